use std::io::{self, Write};

use crate::allocate::Allocation;
use crate::group::{GroupTotals, TokenTotals};

pub fn write_report<W: Write>(
    out: &mut W,
    allocation: &Allocation,
    totals: &GroupTotals,
) -> io::Result<()> {
    write_token_totals(out, "Forwarder Totals:", &totals.forwarders)?;
    write_token_totals(out, "Non-Forwarder Totals:", &totals.non_forwarders)?;
    write_token_totals(out, "Other Users Totals:", &totals.other)?;

    writeln!(out, "\nIndividual Totals for Other Addresses:")?;
    for (address, token_amounts) in &totals.other_addresses {
        writeln!(out, "\nAddress: {address}")?;
        for (token, amount) in token_amounts {
            writeln!(out, "  {token}: {amount}")?;
        }
    }

    if !allocation.skipped.is_empty() {
        writeln!(out, "\nSkipped Rewards:")?;
        for skipped in &allocation.skipped {
            writeln!(
                out,
                "  {} {} {}: {}",
                skipped.gauge, skipped.token, skipped.amount, skipped.reason
            )?;
        }
    }

    let with_skipped_votes: Vec<_> = allocation
        .rewards
        .iter()
        .filter(|reward| !reward.skipped_voters.is_empty())
        .collect();
    if !with_skipped_votes.is_empty() {
        writeln!(out, "\nRewards With Skipped Votes:")?;
        for reward in with_skipped_votes {
            writeln!(
                out,
                "  {} {}: {} skipped, remainder {} to {}",
                reward.gauge,
                reward.token,
                reward.skipped_voters.join(", "),
                reward.split.remainder,
                reward.split.remainder_recipient
            )?;
        }
    }
    Ok(())
}

fn write_token_totals<W: Write>(out: &mut W, title: &str, totals: &TokenTotals) -> io::Result<()> {
    writeln!(out, "\n{title}")?;
    for (token, amount) in totals {
        writeln!(out, "{token}: {amount}")?;
    }
    Ok(())
}
