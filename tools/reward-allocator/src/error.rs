use cosmwasm_std::Uint128;
use thiserror::Error;
use vlcvx_distrib_common::{ConfigError, SnapshotError, WeightError};

#[derive(Error, Debug)]
pub enum AllocatorError {
    #[error("{0}")]
    Snapshot(#[from] SnapshotError),

    #[error("invalid round file: {0}")]
    Config(#[from] ConfigError),

    #[error("gauge {gauge} has an unusable total: {source}")]
    InvalidTotal {
        gauge: String,
        #[source]
        source: WeightError,
    },

    #[error("gauge {gauge} token {token}: allocated {actual}, expected {expected}")]
    ConservationViolated {
        gauge: String,
        token: String,
        expected: Uint128,
        actual: Uint128,
    },

    #[error("total of token {token} overflows 128 bits")]
    AmountOverflow { token: String },

    #[error("failed to write report: {0}")]
    Report(#[from] std::io::Error),
}
