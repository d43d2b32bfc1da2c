use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "reward-allocator")]
#[command(about = "Split gauge rewards across voters and total them per voter group")]
pub struct Args {
    /// Aggregated per-gauge vote tally.
    #[arg(long, default_value = "script/vlCVX/fix_may_distrib/Round95Aggregated.json")]
    pub tally: PathBuf,
    /// Round file with the reward table and voter groups.
    #[arg(long, default_value = "rounds/round95.json")]
    pub round: PathBuf,
}
