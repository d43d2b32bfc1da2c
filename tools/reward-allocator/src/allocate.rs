use std::fmt;

use cosmwasm_std::{Decimal256, Uint128, Uint256};
use indexmap::IndexMap;
use tracing::{debug, warn};
use vlcvx_distrib_common::{
    normalize_address, weight_from_value, GaugeVoteData, RemainderPolicy, RoundConfig, VoteTally,
    VoterRewards,
};

use crate::error::AllocatorError;

/// Why a configured (gauge, token) reward was not allocated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SkipReason {
    GaugeNotFound,
    ZeroTotal,
    /// Every vote under the gauge was malformed.
    NoValidVotes,
    /// Votes sum so far above the gauge total that the remainder recipient's
    /// share cannot absorb the overshoot.
    VotesExceedTotal,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            SkipReason::GaugeNotFound => "gauge not found in voting data",
            SkipReason::ZeroTotal => "no votes found for gauge",
            SkipReason::NoValidVotes => "no parseable votes for gauge",
            SkipReason::VotesExceedTotal => "votes exceed gauge total",
        };
        f.write_str(reason)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkippedReward {
    pub gauge: String,
    pub token: String,
    pub amount: Uint128,
    pub reason: SkipReason,
}

/// Result of splitting one reward over one gauge's voters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Split {
    /// Normalized voter -> amount, in vote order. Includes the remainder.
    pub shares: Vec<(String, Uint128)>,
    pub remainder: Uint128,
    /// Taken back from the remainder recipient when truncated shares add up
    /// to more than the reward, as with a float-summed total slightly below
    /// the sum of its votes.
    pub excess: Uint128,
    pub remainder_recipient: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RewardAllocation {
    pub gauge: String,
    pub token: String,
    pub amount: Uint128,
    pub split: Split,
    /// Voters whose vote could not be parsed. Their share went to the
    /// remainder recipient.
    pub skipped_voters: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Allocation {
    pub rewards: Vec<RewardAllocation>,
    pub skipped: Vec<SkippedReward>,
    pub voter_rewards: VoterRewards,
}

impl Allocation {
    /// Re-sum every allocated (gauge, token) pair against its reward amount.
    pub fn verify_conservation(&self) -> Result<(), AllocatorError> {
        for reward in &self.rewards {
            let actual = reward
                .split
                .shares
                .iter()
                .fold(Uint128::zero(), |acc, (_, share)| acc.saturating_add(*share));
            if actual != reward.amount {
                tracing::error!(
                    gauge = %reward.gauge,
                    token = %reward.token,
                    %actual,
                    expected = %reward.amount,
                    "allocation does not sum to reward"
                );
                return Err(AllocatorError::ConservationViolated {
                    gauge: reward.gauge.clone(),
                    token: reward.token.clone(),
                    expected: reward.amount,
                    actual,
                });
            }
        }
        Ok(())
    }
}

/// Split `reward` pro rata over `weights`.
///
/// Each share is `floor(reward * weight / total)`, computed exactly on the
/// 18-decimal atomics. The voter picked by `policy` receives the rounding
/// remainder, or gives back the overshoot when the shares exceed the reward,
/// so the shares always sum to `reward`.
pub fn split_reward(
    reward: Uint128,
    total: Decimal256,
    weights: &[(String, Decimal256)],
    policy: RemainderPolicy,
) -> Result<Split, SkipReason> {
    if total.is_zero() {
        return Err(SkipReason::ZeroTotal);
    }
    let recipient = remainder_recipient(weights, policy).ok_or(SkipReason::NoValidVotes)?;

    let reward_wide = Uint256::from(reward);
    let total_atomics = total.atomics();

    let mut shares = Vec::with_capacity(weights.len());
    let mut distributed = Uint128::zero();
    for (voter, weight) in weights {
        let share = reward_wide
            .checked_multiply_ratio(weight.atomics(), total_atomics)
            .map_err(|_| SkipReason::VotesExceedTotal)?;
        let share = Uint128::try_from(share).map_err(|_| SkipReason::VotesExceedTotal)?;
        distributed = distributed
            .checked_add(share)
            .map_err(|_| SkipReason::VotesExceedTotal)?;
        shares.push((voter.clone(), share));
    }

    let (remainder, excess) = match reward.checked_sub(distributed) {
        Ok(remainder) => (remainder, Uint128::zero()),
        Err(_) => (Uint128::zero(), distributed - reward),
    };
    let recipient_share = &mut shares[recipient].1;
    *recipient_share = recipient_share
        .checked_add(remainder)
        .and_then(|share| share.checked_sub(excess))
        .map_err(|_| SkipReason::VotesExceedTotal)?;

    Ok(Split {
        remainder,
        excess,
        remainder_recipient: shares[recipient].0.clone(),
        shares,
    })
}

/// Index into `weights` of the voter that absorbs the remainder.
fn remainder_recipient(weights: &[(String, Decimal256)], policy: RemainderPolicy) -> Option<usize> {
    match policy {
        RemainderPolicy::InputOrder => weights.len().checked_sub(1),
        // max_by keeps the last of equal elements
        RemainderPolicy::LastByAddress => weights
            .iter()
            .enumerate()
            .max_by(|(_, (a, _)), (_, (b, _))| a.cmp(b))
            .map(|(idx, _)| idx),
    }
}

/// Allocate every reward in the round's table over the tally.
///
/// Missing gauges, zero totals and malformed votes are logged and skipped; a
/// gauge whose `total` is present but not numeric aborts the run.
pub fn allocate(config: &RoundConfig, tally: &VoteTally) -> Result<Allocation, AllocatorError> {
    let tally: IndexMap<String, &GaugeVoteData> = tally
        .iter()
        .map(|(gauge, data)| (normalize_address(gauge), data))
        .collect();

    let mut allocation = Allocation::default();

    for gauge_reward in &config.gauge_rewards {
        let gauge = gauge_reward.gauge.as_str();
        let skip_all = |allocation: &mut Allocation, reason: SkipReason| {
            warn!(gauge, %reason, "skipping gauge");
            for reward in &gauge_reward.rewards {
                allocation.skipped.push(SkippedReward {
                    gauge: gauge.to_string(),
                    token: reward.token.clone(),
                    amount: reward.amount,
                    reason: reason.clone(),
                });
            }
        };

        let Some(data) = tally.get(gauge) else {
            skip_all(&mut allocation, SkipReason::GaugeNotFound);
            continue;
        };

        let total = if data.total.is_null() {
            Decimal256::zero()
        } else {
            weight_from_value(&data.total).map_err(|source| AllocatorError::InvalidTotal {
                gauge: gauge.to_string(),
                source,
            })?
        };
        if total.is_zero() {
            skip_all(&mut allocation, SkipReason::ZeroTotal);
            continue;
        }

        let mut weights = Vec::with_capacity(data.votes.len());
        let mut skipped_voters = Vec::new();
        for (voter, vote) in &data.votes {
            match weight_from_value(vote) {
                Ok(weight) => weights.push((normalize_address(voter), weight)),
                Err(err) => {
                    warn!(gauge, voter = %voter, %err, "skipping malformed vote");
                    skipped_voters.push(normalize_address(voter));
                }
            }
        }

        for reward in &gauge_reward.rewards {
            match split_reward(reward.amount, total, &weights, config.remainder_policy) {
                Ok(split) => {
                    debug!(
                        gauge,
                        token = %reward.token,
                        voters = split.shares.len(),
                        remainder = %split.remainder,
                        excess = %split.excess,
                        recipient = %split.remainder_recipient,
                        "reward split"
                    );
                    for (voter, share) in &split.shares {
                        let total = allocation
                            .voter_rewards
                            .entry(voter.clone())
                            .or_default()
                            .entry(reward.token.clone())
                            .or_default();
                        *total = total.checked_add(*share).map_err(|_| {
                            AllocatorError::AmountOverflow {
                                token: reward.token.clone(),
                            }
                        })?;
                    }
                    allocation.rewards.push(RewardAllocation {
                        gauge: gauge.to_string(),
                        token: reward.token.clone(),
                        amount: reward.amount,
                        split,
                        skipped_voters: skipped_voters.clone(),
                    });
                }
                Err(reason) => {
                    warn!(gauge, token = %reward.token, %reason, "skipping reward");
                    allocation.skipped.push(SkippedReward {
                        gauge: gauge.to_string(),
                        token: reward.token.clone(),
                        amount: reward.amount,
                        reason,
                    });
                }
            }
        }
    }

    Ok(allocation)
}
