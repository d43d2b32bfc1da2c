use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum WeightError {
    #[error("value is not numeric: {raw}")]
    NotNumeric { raw: String },

    #[error("malformed number: {raw}")]
    Malformed { raw: String },

    #[error("negative value not allowed: {raw}")]
    Negative { raw: String },

    #[error("value out of range: {raw}")]
    OutOfRange { raw: String },

    #[error("non-zero value below 18 decimal places: {raw}")]
    Underflow { raw: String },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{0}")]
    Snapshot(#[from] SnapshotError),

    #[error("invalid address in {field}: {address}")]
    InvalidAddress { field: String, address: String },

    #[error("address {address} is listed as both {first} and {second}")]
    OverlappingClassification {
        address: String,
        first: String,
        second: String,
    },

    #[error("reward for gauge {gauge} in token {token} is zero")]
    ZeroReward { gauge: String, token: String },

    #[error("gauge {gauge} has no rewards configured")]
    EmptyGauge { gauge: String },
}
