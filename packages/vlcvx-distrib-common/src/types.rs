use std::collections::BTreeMap;

use cosmwasm_std::{Decimal256, Uint128};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::weight::deserialize_choices;

/// One voter's entry in a pre/post delegation snapshot export.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct VoteRecord {
    pub voter: String,
    /// Choice id (as a string) -> allocated amount, in export order.
    #[serde(default, deserialize_with = "deserialize_choices")]
    pub choice: IndexMap<String, Decimal256>,
}

/// Per-gauge entry of the aggregated tally.
///
/// `total` and the vote values are kept as raw JSON so that a single bad
/// value can be reported and skipped instead of failing the whole load.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
pub struct GaugeVoteData {
    #[serde(default)]
    pub total: Value,
    #[serde(default)]
    pub votes: IndexMap<String, Value>,
}

/// Aggregated tally keyed by gauge address, in export order.
pub type VoteTally = IndexMap<String, GaugeVoteData>;

/// A reward pool posted on one gauge for one token.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct RewardEntry {
    /// Token base units.
    pub amount: Uint128,
    pub token: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct GaugeReward {
    pub gauge: String,
    pub rewards: Vec<RewardEntry>,
}

/// voter -> token -> amount. Voters are normalized addresses.
pub type VoterRewards = BTreeMap<String, BTreeMap<String, Uint128>>;
