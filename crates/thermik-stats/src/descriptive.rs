use std::cmp::Ordering;

/// Computes the root-mean-square of a sequence of values.
///
/// Returns `None` if the sequence is empty.
///
/// # Examples
///
/// ```
/// # use thermik_stats::descriptive::root_mean_square;
/// assert_eq!(root_mean_square([2.0, 2.0]), Some(2.0));
/// assert_eq!(root_mean_square(std::iter::empty()), None);
/// ```
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn root_mean_square<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = f64>,
{
    let (count, sum_of_squares) = values
        .into_iter()
        .fold((0_usize, 0.0), |(count, sum), v| (count + 1, sum + v * v));
    if count == 0 {
        return None;
    }
    Some((sum_of_squares / count as f64).sqrt())
}

/// Returns the first element that compares minimal under `compare`.
///
/// Later elements only replace the current candidate when strictly smaller.
pub fn first_min_by<I, F>(items: I, mut compare: F) -> Option<I::Item>
where
    I: IntoIterator,
    F: FnMut(&I::Item, &I::Item) -> Ordering,
{
    items.into_iter().reduce(|best, item| {
        if compare(&item, &best) == Ordering::Less {
            item
        } else {
            best
        }
    })
}

/// Returns the first element that compares maximal under `compare`.
///
/// Unlike [`Iterator::max_by`], which keeps the last of several equal
/// maxima, the earliest one wins.
///
/// # Examples
///
/// ```
/// # use thermik_stats::descriptive::first_max_by;
/// let items = [("a", 3), ("b", 5), ("c", 5)];
/// let best = first_max_by(items, |x, y| x.1.cmp(&y.1));
/// assert_eq!(best, Some(("b", 5)));
/// ```
pub fn first_max_by<I, F>(items: I, mut compare: F) -> Option<I::Item>
where
    I: IntoIterator,
    F: FnMut(&I::Item, &I::Item) -> Ordering,
{
    items.into_iter().reduce(|best, item| {
        if compare(&item, &best) == Ordering::Greater {
            item
        } else {
            best
        }
    })
}
