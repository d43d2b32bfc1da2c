use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "choice-reconciler")]
#[command(about = "Compare pre- and post-delegation vote snapshots for tracked choices")]
pub struct Args {
    /// Snapshot export taken before delegation.
    #[arg(long, default_value = "script/vlCVX/fix_may_distrib/Round95PreDel.json")]
    pub pre: PathBuf,
    /// Snapshot export taken after delegation.
    #[arg(long, default_value = "script/vlCVX/fix_may_distrib/Round95PostDel.json")]
    pub post: PathBuf,
    /// Round file with the delegator list and tracked choice ids.
    #[arg(long, default_value = "rounds/round95.json")]
    pub round: PathBuf,
}
