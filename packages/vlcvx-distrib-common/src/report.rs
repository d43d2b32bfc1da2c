use std::io::{self, Write};

use crate::snapshot::InputFile;

/// Report preamble: tool title, round number and the digest of every input.
pub fn write_header<W: Write>(
    out: &mut W,
    title: &str,
    round: u64,
    inputs: &[InputFile],
) -> io::Result<()> {
    writeln!(out, "{title} (round {round})")?;
    for input in inputs {
        writeln!(
            out,
            "  {}: {} (sha256 {})",
            input.label,
            input.path.display(),
            input.sha256
        )?;
    }
    Ok(())
}
