pub mod address;
pub mod config;
pub mod error;
pub mod logging;
pub mod report;
pub mod snapshot;
pub mod types;
pub mod weight;

pub use address::normalize_address;
pub use config::{RemainderPolicy, RoundConfig};
pub use error::{ConfigError, SnapshotError, WeightError};
pub use snapshot::{load_input, sha256_hex, InputFile};
pub use types::{GaugeReward, GaugeVoteData, RewardEntry, VoteRecord, VoteTally, VoterRewards};
pub use weight::{parse_weight, weight_from_value};
