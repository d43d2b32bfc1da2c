use thiserror::Error;
use vlcvx_distrib_common::{ConfigError, SnapshotError};

#[derive(Error, Debug)]
pub enum ReconcileError {
    #[error("{0}")]
    Snapshot(#[from] SnapshotError),

    #[error("invalid round file: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to write report: {0}")]
    Report(#[from] std::io::Error),
}
