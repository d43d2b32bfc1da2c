use std::collections::{BTreeMap, BTreeSet};

use cosmwasm_std::Decimal256;
use vlcvx_distrib_common::{normalize_address, RoundConfig, VoteRecord};

/// Snapshot records keyed by normalized voter address. On case-variant
/// duplicates the later record wins.
pub type VoterIndex = BTreeMap<String, VoteRecord>;

/// Delegators found in each snapshot.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DelegatorVotes {
    pub pre: BTreeSet<String>,
    pub post: BTreeSet<String>,
    pub both: BTreeSet<String>,
}

/// A pre-delegation voter missing from the post-delegation snapshot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DisappearedVoter {
    pub address: String,
    /// Tracked choices held before delegation, in snapshot order.
    pub choices: Vec<(String, Decimal256)>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChoiceDelta {
    pub choice: u32,
    pub before: Decimal256,
    pub after: Decimal256,
}

/// A voter present in both snapshots whose tracked allocation changed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VoterDelta {
    pub address: String,
    pub changes: Vec<ChoiceDelta>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Reconciliation {
    pub delegators: DelegatorVotes,
    pub disappeared: Vec<DisappearedVoter>,
    pub deltas: Vec<VoterDelta>,
}

pub fn index_by_voter(records: Vec<VoteRecord>) -> VoterIndex {
    records
        .into_iter()
        .map(|record| (normalize_address(&record.voter), record))
        .collect()
}

pub fn reconcile(config: &RoundConfig, pre: Vec<VoteRecord>, post: Vec<VoteRecord>) -> Reconciliation {
    let pre = index_by_voter(pre);
    let post = index_by_voter(post);

    Reconciliation {
        delegators: delegator_votes(&config.delegators, &pre, &post),
        disappeared: disappeared_voters(&pre, &post, &config.target_choices),
        deltas: choice_deltas(&pre, &post, &config.target_choices),
    }
}

/// `delegators` must already be normalized.
pub fn delegator_votes(
    delegators: &BTreeSet<String>,
    pre: &VoterIndex,
    post: &VoterIndex,
) -> DelegatorVotes {
    let voted_in = |index: &VoterIndex| -> BTreeSet<String> {
        delegators
            .iter()
            .filter(|delegator| index.contains_key(delegator.as_str()))
            .cloned()
            .collect()
    };

    let pre = voted_in(pre);
    let post = voted_in(post);
    let both = pre.intersection(&post).cloned().collect();
    DelegatorVotes { pre, post, both }
}

/// Voters present before delegation, absent after, that held at least one
/// tracked choice. Sorted by address.
pub fn disappeared_voters(
    pre: &VoterIndex,
    post: &VoterIndex,
    target_choices: &BTreeSet<u32>,
) -> Vec<DisappearedVoter> {
    let tracked: BTreeSet<String> = target_choices.iter().map(u32::to_string).collect();

    pre.iter()
        .filter(|(address, _)| !post.contains_key(address.as_str()))
        .filter_map(|(address, record)| {
            let choices: Vec<(String, Decimal256)> = record
                .choice
                .iter()
                .filter(|(choice, _)| tracked.contains(choice.as_str()))
                .map(|(choice, amount)| (choice.clone(), *amount))
                .collect();
            if choices.is_empty() {
                None
            } else {
                Some(DisappearedVoter {
                    address: address.clone(),
                    choices,
                })
            }
        })
        .collect()
}

/// Per-voter changes on tracked choices between snapshots. A missing choice
/// counts as zero. Sorted by address, then choice id.
pub fn choice_deltas(
    pre: &VoterIndex,
    post: &VoterIndex,
    target_choices: &BTreeSet<u32>,
) -> Vec<VoterDelta> {
    let amount_of = |record: &VoteRecord, choice: &str| {
        record
            .choice
            .get(choice)
            .copied()
            .unwrap_or_else(Decimal256::zero)
    };

    pre.iter()
        .filter_map(|(address, before)| {
            let after = post.get(address)?;
            let changes: Vec<ChoiceDelta> = target_choices
                .iter()
                .filter_map(|&choice| {
                    let key = choice.to_string();
                    let before = amount_of(before, &key);
                    let after = amount_of(after, &key);
                    (before != after).then_some(ChoiceDelta {
                        choice,
                        before,
                        after,
                    })
                })
                .collect();
            if changes.is_empty() {
                None
            } else {
                Some(VoterDelta {
                    address: address.clone(),
                    changes,
                })
            }
        })
        .collect()
}
