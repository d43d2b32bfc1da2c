pub mod allocate;
pub mod cli;
pub mod error;
pub mod group;
pub mod report;

use std::io::Write;

use vlcvx_distrib_common::report::write_header;
use vlcvx_distrib_common::{load_input, InputFile, RoundConfig, VoteTally};

pub use allocate::{
    allocate, split_reward, Allocation, RewardAllocation, SkipReason, SkippedReward, Split,
};
pub use cli::Args;
pub use error::AllocatorError;
pub use group::{group_totals, GroupTotals, VoterGroup};

const REPORT_TITLE: &str = "Reward allocation";

/// Allocate every configured reward over the tally and write the group report.
pub fn run<W: Write>(args: &Args, out: &mut W) -> Result<(Allocation, GroupTotals), AllocatorError> {
    let (round_input, config) = RoundConfig::load(&args.round)?;
    let (tally_input, tally): (InputFile, VoteTally) = load_input("tally", &args.tally)?;
    tracing::info!(gauges = tally.len(), "tally loaded");

    let allocation = allocate(&config, &tally)?;
    allocation.verify_conservation()?;
    let totals = group_totals(&config, &allocation.voter_rewards)?;

    let inputs = [round_input, tally_input];
    write_header(out, REPORT_TITLE, config.round, &inputs)?;
    report::write_report(out, &allocation, &totals)?;
    Ok((allocation, totals))
}
