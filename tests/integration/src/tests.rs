//! End-to-end runs of both tools against fixture files.

use std::path::Path;
use std::str::FromStr;

use cosmwasm_std::{Decimal256, Uint128};
use serde_json::json;
use vlcvx_distrib_common::{sha256_hex, RoundConfig};
use vlcvx_integration_tests::*;

use choice_reconciler::ReconcileError;
use reward_allocator::{AllocatorError, SkipReason};

fn reconciler_args(pre: &Path, post: &Path, round: &Path) -> choice_reconciler::Args {
    choice_reconciler::Args {
        pre: pre.to_path_buf(),
        post: post.to_path_buf(),
        round: round.to_path_buf(),
    }
}

fn allocator_args(tally: &Path, round: &Path) -> reward_allocator::Args {
    reward_allocator::Args {
        tally: tally.to_path_buf(),
        round: round.to_path_buf(),
    }
}

// ─── Choice reconciler ───

#[test]
fn test_reconciler_full_report() {
    let ws = Workspace::new();
    let round = ws.write_json("round.json", &round_file(json!([]), "last_by_address"));
    let pre = ws.write_json(
        "pre.json",
        &json!([
            { "voter": "0x0D0DB6402196FB090CD251A1503B5688A30A6116", "choice": { "27": 50, "5": 1 } },
            { "voter": FORWARDER, "choice": { "139": 100 } },
            { "voter": OTHER_VOTER, "choice": { "408": 10, "27": 25 } },
            { "voter": LATE_VOTER, "choice": { "7": 1 } }
        ]),
    );
    let post = ws.write_json(
        "post.json",
        &json!([
            { "voter": SELF_VOTER, "choice": { "5": 1 } },
            { "voter": NON_FORWARDER, "choice": { "139": 5 } },
            { "voter": OTHER_VOTER, "choice": { "408": 10, "27": 25 } }
        ]),
    );

    let mut out = Vec::new();
    let result =
        choice_reconciler::run(&reconciler_args(&pre, &post, &round), &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();

    // Delegators
    assert_eq!(
        result.delegators.pre.iter().cloned().collect::<Vec<_>>(),
        vec![SELF_VOTER.to_string(), FORWARDER.to_string()]
    );
    assert_eq!(
        result.delegators.both.iter().cloned().collect::<Vec<_>>(),
        vec![SELF_VOTER.to_string()]
    );

    // The forwarder vanished while holding choice 139; LATE_VOTER held no
    // tracked choice and is not reported.
    assert_eq!(result.disappeared.len(), 1);
    assert_eq!(result.disappeared[0].address, FORWARDER);
    assert!(text.contains(&format!("\nAddress: {FORWARDER}\n  Choice 139: 100\n")));
    assert!(!text.contains(LATE_VOTER));

    // Self-voter dropped choice 27; OTHER_VOTER is unchanged.
    assert_eq!(result.deltas.len(), 1);
    assert_eq!(result.deltas[0].address, SELF_VOTER);
    assert!(text.contains(&format!(
        "\nAddress: {SELF_VOTER}\n  Choice 27:\n    Before: 50\n    After:  0\n"
    )));

    // Header carries the input digests
    assert!(text.starts_with("Choice reconciliation (round 95)\n"));
    assert!(text.contains(&sha256_hex(&std::fs::read(&pre).unwrap())));
    assert!(text.contains(&sha256_hex(&std::fs::read(&post).unwrap())));
}

#[test]
fn test_reconciler_missing_snapshot_fails_without_output() {
    let ws = Workspace::new();
    let round = ws.write_json("round.json", &round_file(json!([]), "last_by_address"));
    let pre = ws.write_json("pre.json", &json!([]));

    let mut out = Vec::new();
    let err = choice_reconciler::run(
        &reconciler_args(&pre, &ws.path("absent.json"), &round),
        &mut out,
    )
    .unwrap_err();
    assert!(matches!(err, ReconcileError::Snapshot(_)));
    assert!(out.is_empty());
}

#[test]
fn test_reconciler_record_without_voter_is_fatal() {
    let ws = Workspace::new();
    let round = ws.write_json("round.json", &round_file(json!([]), "last_by_address"));
    let pre = ws.write_json("pre.json", &json!([{ "choice": { "139": 1 } }]));
    let post = ws.write_json("post.json", &json!([]));

    let mut out = Vec::new();
    let err = choice_reconciler::run(&reconciler_args(&pre, &post, &round), &mut out)
        .unwrap_err();
    assert!(err.to_string().contains("voter"));
    assert!(out.is_empty());
}

// ─── Reward allocator ───

fn two_gauge_rewards() -> serde_json::Value {
    json!([
        { "gauge": GAUGE_A, "rewards": [
            { "amount": "1000", "token": CRV },
            { "amount": "7", "token": USDC }
        ]},
        { "gauge": GAUGE_B, "rewards": [ { "amount": "10", "token": CRV } ] },
        { "gauge": GAUGE_MISSING, "rewards": [ { "amount": "99", "token": TOKEN_A } ] }
    ])
}

#[test]
fn test_allocator_full_report() {
    let ws = Workspace::new();
    let round = ws.write_json("round.json", &round_file(two_gauge_rewards(), "last_by_address"));
    let tally = ws.write_json(
        "tally.json",
        &json!({
            GAUGE_A.to_lowercase(): {
                "total": 100,
                "votes": {
                    SELF_VOTER: 40,
                    FORWARDER: 30,
                    NON_FORWARDER: 20,
                    OTHER_VOTER: 10
                }
            },
            GAUGE_B: {
                "total": 3,
                "votes": { FORWARDER: 1, OTHER_VOTER: 1, LATE_VOTER: 1 }
            }
        }),
    );

    let mut out = Vec::new();
    let (allocation, totals) =
        reward_allocator::run(&allocator_args(&tally, &round), &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();

    // Every allocated pair sums to its reward
    allocation.verify_conservation().unwrap();
    assert_eq!(allocation.rewards.len(), 3);
    assert_eq!(allocation.skipped.len(), 1);
    assert_eq!(allocation.skipped[0].reason, SkipReason::GaugeNotFound);

    // Gauge B: 10 over three equal votes, LATE_VOTER sorts last and takes the
    // remainder.
    let gauge_b = &allocation.rewards[2];
    assert_eq!(gauge_b.split.remainder, Uint128::new(1));
    assert_eq!(gauge_b.split.remainder_recipient, LATE_VOTER);

    // USDC on gauge A: 7 * [0.4, 0.3, 0.2, 0.1] truncates to [2, 2, 1, 0],
    // remainder 2 goes to NON_FORWARDER (greatest address).
    assert_eq!(allocation.voter_rewards[NON_FORWARDER][USDC], Uint128::new(3));
    assert_eq!(allocation.voter_rewards[OTHER_VOTER][USDC], Uint128::zero());

    // Group sums
    assert_eq!(totals.forwarders[CRV], Uint128::new(300 + 3));
    assert_eq!(totals.forwarders[USDC], Uint128::new(2));
    assert_eq!(totals.non_forwarders[CRV], Uint128::new(200));
    assert_eq!(totals.non_forwarders[USDC], Uint128::new(3));
    assert_eq!(totals.other[CRV], Uint128::new(100 + 3 + 4));
    assert_eq!(
        totals.other_addresses.keys().cloned().collect::<Vec<_>>(),
        vec![OTHER_VOTER.to_string(), LATE_VOTER.to_string()]
    );

    // Self-voter earned a share but is never reported
    assert_eq!(allocation.voter_rewards[SELF_VOTER][CRV], Uint128::new(400));
    assert!(!text.contains(SELF_VOTER));

    assert!(text.contains(&format!("\nForwarder Totals:\n{USDC}: 2\n{CRV}: 303\n")));
    assert!(text.contains(&format!(
        "\nSkipped Rewards:\n  {} {TOKEN_A} 99: gauge not found in voting data\n",
        GAUGE_MISSING.to_lowercase()
    )));
}

#[test]
fn test_allocator_input_order_follows_file_order() {
    let ws = Workspace::new();
    let round = ws.write_json(
        "round.json",
        &round_file(
            json!([{ "gauge": GAUGE_A, "rewards": [ { "amount": "10", "token": CRV } ] }]),
            "input_order",
        ),
    );
    // Written by hand so the vote order is not sorted
    let tally = ws.write_raw(
        "tally.json",
        &format!(
            r#"{{"{GAUGE_A}": {{"total": 3, "votes": {{"{LATE_VOTER}": 1, "{OTHER_VOTER}": 1, "{FORWARDER}": 1}}}}}}"#
        ),
    );

    let mut out = Vec::new();
    let (allocation, _) =
        reward_allocator::run(&allocator_args(&tally, &round), &mut out).unwrap();

    let split = &allocation.rewards[0].split;
    let voters: Vec<_> = split.shares.iter().map(|(voter, _)| voter.as_str()).collect();
    assert_eq!(voters, vec![LATE_VOTER, OTHER_VOTER, FORWARDER]);
    assert_eq!(split.remainder_recipient, FORWARDER);
    assert_eq!(split.shares[2].1, Uint128::new(4));
}

#[test]
fn test_allocator_conserves_large_rewards() {
    // Deterministic spread of fractional weights over many voters
    let mut seed: u64 = 0x2545_f491_4f6c_dd1d;
    let mut votes = serde_json::Map::new();
    let mut total = Decimal256::zero();
    for i in 0..250u64 {
        seed ^= seed << 13;
        seed ^= seed >> 7;
        seed ^= seed << 17;
        let weight = format!("{}.{:06}", seed % 1_000_000, (seed >> 20) % 1_000_000);
        total += Decimal256::from_str(&weight).unwrap();
        votes.insert(
            format!("0x{:040x}", i + 1),
            serde_json::Value::from_str(&weight).unwrap(),
        );
    }

    let ws = Workspace::new();
    let round = ws.write_json(
        "round.json",
        &round_file(
            json!([{ "gauge": GAUGE_A, "rewards": [
                { "amount": "50918662804680252954517426", "token": TOKEN_A },
                { "amount": "31441174855241166", "token": CRV }
            ]}]),
            "last_by_address",
        ),
    );
    let tally = ws.write_json(
        "tally.json",
        &json!({ GAUGE_A: { "total": total.to_string(), "votes": votes } }),
    );

    let mut out = Vec::new();
    let (allocation, totals) =
        reward_allocator::run(&allocator_args(&tally, &round), &mut out).unwrap();

    allocation.verify_conservation().unwrap();
    // No voter is classified, so "other" holds the whole pool
    assert_eq!(
        totals.other[TOKEN_A],
        Uint128::new(50_918_662_804_680_252_954_517_426)
    );
    assert_eq!(totals.other[CRV], Uint128::new(31_441_174_855_241_166));
}

#[test]
fn test_allocator_rejects_overlapping_groups() {
    let ws = Workspace::new();
    let mut config = round_file(json!([]), "last_by_address");
    config["non_forwarders"] = json!([FORWARDER]);
    let round = ws.write_json("round.json", &config);
    let tally = ws.write_json("tally.json", &json!({}));

    let mut out = Vec::new();
    let err = reward_allocator::run(&allocator_args(&tally, &round), &mut out).unwrap_err();
    assert!(matches!(err, AllocatorError::Config(_)));
    assert!(out.is_empty());
}

#[test]
fn test_shipped_round_file_is_valid() {
    let (input, config) = RoundConfig::load(&shipped_round_file()).unwrap();
    assert_eq!(input.label, "round");
    assert_eq!(config.round, 95);
    assert_eq!(config.target_choices.len(), 11);
    assert_eq!(config.gauge_rewards.len(), 11);
    assert_eq!(config.self_voters.len(), 2);
    assert!(config
        .delegators
        .is_superset(&config.forwarders.union(&config.non_forwarders).cloned().collect()));
}
