//! Fixture helpers shared by the end-to-end tests.

use std::path::{Path, PathBuf};

use serde_json::{json, Value};
use tempfile::TempDir;

pub const SELF_VOTER: &str = "0x0d0db6402196fb090cd251a1503b5688a30a6116";
pub const FORWARDER: &str = "0x781fea3353d6efbbabc9fac0b4725eff3c77dba7";
pub const NON_FORWARDER: &str = "0xe001452bec9e7ac34ca4ecac56e7e95ed9c9aa3b";
pub const OTHER_VOTER: &str = "0x1111111111111111111111111111111111111111";
pub const LATE_VOTER: &str = "0x9999999999999999999999999999999999999999";

pub const GAUGE_A: &str = "0x26F7786de3E6D9Bd37Fcf47BE6F2bC455a21b74A";
pub const GAUGE_B: &str = "0xd03BE91b1932715709e18021734fcB91BB431715";
pub const GAUGE_MISSING: &str = "0x4e227d29b33B77113F84bcC189a6F886755a1f24";

pub const TOKEN_A: &str = "0x73968b9a57c6E53d41345FD57a6E6ae27d6CDB2F";
pub const CRV: &str = "0xD533a949740bb3306d119CC777fa900bA034cd52";
pub const USDC: &str = "0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48";

/// A scratch directory holding the files of one test run.
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        Workspace {
            dir: tempfile::tempdir().expect("create temp dir"),
        }
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    pub fn write_json(&self, name: &str, value: &Value) -> PathBuf {
        let path = self.path(name);
        std::fs::write(&path, serde_json::to_vec_pretty(value).expect("encode")).expect("write");
        path
    }

    pub fn write_raw(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.path(name);
        std::fs::write(&path, contents).expect("write");
        path
    }
}

impl Default for Workspace {
    fn default() -> Self {
        Self::new()
    }
}

/// Round file with the classification sets above and the given reward table.
pub fn round_file(gauge_rewards: Value, remainder_policy: &str) -> Value {
    json!({
        "round": 95,
        "target_choices": [139, 27, 408],
        "delegators": [SELF_VOTER, FORWARDER, NON_FORWARDER],
        "self_voters": [SELF_VOTER],
        "forwarders": [FORWARDER],
        "non_forwarders": [NON_FORWARDER],
        "remainder_policy": remainder_policy,
        "gauge_rewards": gauge_rewards
    })
}

/// The round file checked into the repository.
pub fn shipped_round_file() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../rounds/round95.json")
}
