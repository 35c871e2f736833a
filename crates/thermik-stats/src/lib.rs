//! Numeric building blocks for the thermik flight statistics.
//!
//! This crate has no knowledge of flights or pilots. It provides:
//!
//! - **Sorted distributions**: an ascending sequence of values with a positional
//!   median and tie-aware rank lookups
//! - **Descriptive helpers**: root-mean-square and first-encountered extrema
//! - **Rounding**: half-to-even rounding to a fixed number of decimals
//!
//! # Modules
//!
//! - [`distribution`]: Sorted reference distributions and rank ranges
//! - [`descriptive`]: Aggregates over plain value sequences
//! - [`rounding`]: Decimal rounding helpers
//!
//! # Examples
//!
//! ## Looking up the rank range of a tied value
//!
//! ```
//! use thermik_stats::distribution::SortedDistribution;
//!
//! let dist = SortedDistribution::new([3.0, 1.0, 2.0, 2.0]);
//! let range = dist.rank_range(2.0).unwrap();
//! assert_eq!((range.first, range.last), (2, 3));
//! assert_eq!(dist.median(), Some(2.0));
//! ```
//!
//! ## Combining deviations
//!
//! ```
//! use thermik_stats::descriptive::root_mean_square;
//!
//! assert_eq!(root_mean_square([3.0, 4.0, 0.0, 0.0]), Some(2.5));
//! ```

pub mod descriptive;
pub mod distribution;
pub mod rounding;
