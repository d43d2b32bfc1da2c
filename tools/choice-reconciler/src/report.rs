use std::collections::BTreeSet;
use std::io::{self, Write};

use crate::reconcile::Reconciliation;

pub fn write_report<W: Write>(out: &mut W, result: &Reconciliation) -> io::Result<()> {
    write_address_list(out, "Delegators who voted in pre-del:", &result.delegators.pre)?;
    write_address_list(out, "Delegators who voted in post-del:", &result.delegators.post)?;
    write_address_list(out, "Delegators who voted in both files:", &result.delegators.both)?;

    writeln!(out, "\nVoters that disappeared (with target choices):")?;
    for voter in &result.disappeared {
        writeln!(out, "\nAddress: {}", voter.address)?;
        for (choice, amount) in &voter.choices {
            writeln!(out, "  Choice {choice}: {amount}")?;
        }
    }

    writeln!(out, "\nChoice changes for voters in both files:")?;
    for voter in &result.deltas {
        writeln!(out, "\nAddress: {}", voter.address)?;
        for change in &voter.changes {
            writeln!(out, "  Choice {}:", change.choice)?;
            writeln!(out, "    Before: {}", change.before)?;
            writeln!(out, "    After:  {}", change.after)?;
        }
    }
    Ok(())
}

fn write_address_list<W: Write>(
    out: &mut W,
    title: &str,
    addresses: &BTreeSet<String>,
) -> io::Result<()> {
    writeln!(out, "\n{title}")?;
    for address in addresses {
        writeln!(out, "  {address}")?;
    }
    Ok(())
}
