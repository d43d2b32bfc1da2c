use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use sha2::{Digest, Sha256};

use crate::error::SnapshotError;

/// An input file as listed in a report header.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InputFile {
    pub label: &'static str,
    pub path: PathBuf,
    pub sha256: String,
}

/// Read a JSON export fully into memory, digest those bytes and decode them.
/// The returned digest always describes the bytes that were parsed.
pub fn load_input<T: DeserializeOwned>(
    label: &'static str,
    path: &Path,
) -> Result<(InputFile, T), SnapshotError> {
    let bytes = std::fs::read(path).map_err(|source| SnapshotError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let sha256 = sha256_hex(&bytes);
    tracing::info!(input = label, path = %path.display(), %sha256, "read input");

    let value = serde_json::from_slice(&bytes).map_err(|source| SnapshotError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    let input = InputFile {
        label,
        path: path.to_path_buf(),
        sha256,
    };
    Ok((input, value))
}

/// Hex-encoded SHA-256 of `bytes`.
pub fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}
