pub mod cli;
pub mod error;
pub mod reconcile;
pub mod report;

use std::io::Write;

use vlcvx_distrib_common::report::write_header;
use vlcvx_distrib_common::{load_input, InputFile, RoundConfig, VoteRecord};

pub use cli::Args;
pub use error::ReconcileError;
pub use reconcile::{reconcile, Reconciliation};

const REPORT_TITLE: &str = "Choice reconciliation";

/// Load both snapshots and the round file, reconcile, and write the report.
pub fn run<W: Write>(args: &Args, out: &mut W) -> Result<Reconciliation, ReconcileError> {
    let (round_input, config) = RoundConfig::load(&args.round)?;
    let (pre_input, pre): (InputFile, Vec<VoteRecord>) = load_input("pre-delegation", &args.pre)?;
    let (post_input, post): (InputFile, Vec<VoteRecord>) =
        load_input("post-delegation", &args.post)?;
    tracing::info!(pre = pre.len(), post = post.len(), "snapshots loaded");

    let result = reconcile(&config, pre, post);

    let inputs = [round_input, pre_input, post_input];
    write_header(out, REPORT_TITLE, config.round, &inputs)?;
    report::write_report(out, &result)?;
    Ok(result)
}
