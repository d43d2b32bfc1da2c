use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::address::{is_valid_address, normalize_address};
use crate::error::ConfigError;
use crate::snapshot::{load_input, InputFile};
use crate::types::GaugeReward;

/// Who receives the rounding remainder of a (gauge, token) allocation.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum RemainderPolicy {
    /// Lexicographically greatest normalized voter address.
    #[default]
    LastByAddress,
    /// Last voter in the tally's per-gauge input order.
    InputOrder,
}

/// Round-specific data for one distribution: allow-lists, tracked choices
/// and the reward table.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Default)]
#[serde(deny_unknown_fields)]
pub struct RoundConfig {
    pub round: u64,
    #[serde(default)]
    pub target_choices: BTreeSet<u32>,
    #[serde(default)]
    pub delegators: BTreeSet<String>,
    #[serde(default)]
    pub self_voters: BTreeSet<String>,
    #[serde(default)]
    pub forwarders: BTreeSet<String>,
    #[serde(default)]
    pub non_forwarders: BTreeSet<String>,
    #[serde(default)]
    pub remainder_policy: RemainderPolicy,
    #[serde(default)]
    pub gauge_rewards: Vec<GaugeReward>,
}

impl RoundConfig {
    /// Read, normalize and validate a round file.
    pub fn load(path: &Path) -> Result<(InputFile, Self), ConfigError> {
        let (input, raw): (InputFile, RoundConfig) = load_input("round", path)?;
        Ok((input, raw.validated()?))
    }

    /// Lower-case every voter and gauge address, then check formats and that
    /// the three reward groups do not overlap. Token addresses keep their
    /// configured case for display.
    pub fn validated(self) -> Result<Self, ConfigError> {
        let delegators = normalize_set("delegators", self.delegators)?;
        let self_voters = normalize_set("self_voters", self.self_voters)?;
        let forwarders = normalize_set("forwarders", self.forwarders)?;
        let non_forwarders = normalize_set("non_forwarders", self.non_forwarders)?;

        let groups = [
            ("self_voters", &self_voters),
            ("forwarders", &forwarders),
            ("non_forwarders", &non_forwarders),
        ];
        let mut seen: BTreeMap<&str, &str> = BTreeMap::new();
        for (group, members) in groups {
            for address in members.iter() {
                if let Some(first) = seen.insert(address.as_str(), group) {
                    return Err(ConfigError::OverlappingClassification {
                        address: address.clone(),
                        first: first.to_string(),
                        second: group.to_string(),
                    });
                }
            }
        }

        let mut gauge_rewards = Vec::with_capacity(self.gauge_rewards.len());
        for gauge in self.gauge_rewards {
            if !is_valid_address(&gauge.gauge) {
                return Err(ConfigError::InvalidAddress {
                    field: "gauge_rewards.gauge".to_string(),
                    address: gauge.gauge,
                });
            }
            if gauge.rewards.is_empty() {
                return Err(ConfigError::EmptyGauge { gauge: gauge.gauge });
            }
            for reward in &gauge.rewards {
                if !is_valid_address(&reward.token) {
                    return Err(ConfigError::InvalidAddress {
                        field: "gauge_rewards.rewards.token".to_string(),
                        address: reward.token.clone(),
                    });
                }
                if reward.amount.is_zero() {
                    return Err(ConfigError::ZeroReward {
                        gauge: gauge.gauge.clone(),
                        token: reward.token.clone(),
                    });
                }
            }
            gauge_rewards.push(GaugeReward {
                gauge: normalize_address(&gauge.gauge),
                rewards: gauge.rewards,
            });
        }

        Ok(RoundConfig {
            round: self.round,
            target_choices: self.target_choices,
            delegators,
            self_voters,
            forwarders,
            non_forwarders,
            remainder_policy: self.remainder_policy,
            gauge_rewards,
        })
    }
}

fn normalize_set(field: &str, addresses: BTreeSet<String>) -> Result<BTreeSet<String>, ConfigError> {
    addresses
        .into_iter()
        .map(|address| {
            if is_valid_address(address.trim()) {
                Ok(normalize_address(&address))
            } else {
                Err(ConfigError::InvalidAddress {
                    field: field.to_string(),
                    address,
                })
            }
        })
        .collect()
}
