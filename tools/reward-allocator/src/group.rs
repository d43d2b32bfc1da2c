use std::collections::BTreeMap;

use cosmwasm_std::Uint128;
use vlcvx_distrib_common::{normalize_address, RoundConfig, VoterRewards};

use crate::error::AllocatorError;

/// Reporting group of a voter. Self-voters are excluded from every total.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VoterGroup {
    SelfVoter,
    Forwarder,
    NonForwarder,
    Other,
}

impl VoterGroup {
    pub fn classify(config: &RoundConfig, voter: &str) -> Self {
        let voter = normalize_address(voter);
        if config.self_voters.contains(&voter) {
            VoterGroup::SelfVoter
        } else if config.forwarders.contains(&voter) {
            VoterGroup::Forwarder
        } else if config.non_forwarders.contains(&voter) {
            VoterGroup::NonForwarder
        } else {
            VoterGroup::Other
        }
    }
}

/// token -> amount
pub type TokenTotals = BTreeMap<String, Uint128>;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GroupTotals {
    pub forwarders: TokenTotals,
    pub non_forwarders: TokenTotals,
    pub other: TokenTotals,
    /// Per-address breakdown of `other`.
    pub other_addresses: VoterRewards,
}

pub fn group_totals(
    config: &RoundConfig,
    voter_rewards: &VoterRewards,
) -> Result<GroupTotals, AllocatorError> {
    let mut totals = GroupTotals::default();

    for (voter, token_amounts) in voter_rewards {
        let target = match VoterGroup::classify(config, voter) {
            VoterGroup::SelfVoter => continue,
            VoterGroup::Forwarder => &mut totals.forwarders,
            VoterGroup::NonForwarder => &mut totals.non_forwarders,
            VoterGroup::Other => {
                let itemized = totals
                    .other_addresses
                    .entry(normalize_address(voter))
                    .or_default();
                add_amounts(itemized, token_amounts)?;
                &mut totals.other
            }
        };
        add_amounts(target, token_amounts)?;
    }

    Ok(totals)
}

fn add_amounts(target: &mut TokenTotals, amounts: &TokenTotals) -> Result<(), AllocatorError> {
    for (token, amount) in amounts {
        let total = target.entry(token.clone()).or_default();
        *total = total
            .checked_add(*amount)
            .map_err(|_| AllocatorError::AmountOverflow {
                token: token.clone(),
            })?;
    }
    Ok(())
}
