use clap::{Parser, Subcommand};

use self::{leaderboard::LeaderboardArg, report::ReportArg};

mod leaderboard;
mod report;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Run the analysis and write JSON bundles and the flight CSV
    Report(#[clap(flatten)] ReportArg),
    /// Run the analysis and print the leaderboard
    Leaderboard(#[clap(flatten)] LeaderboardArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode {
        Mode::Report(arg) => report::run(&arg)?,
        Mode::Leaderboard(arg) => leaderboard::run(&arg)?,
    }
    Ok(())
}
