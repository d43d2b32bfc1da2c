/// Canonical form used for every address comparison: trimmed, lower case.
pub fn normalize_address(address: &str) -> String {
    address.trim().to_ascii_lowercase()
}

/// Returns true for a `0x`-prefixed, 20-byte hex address. Case is not checked
/// against the EIP-55 checksum.
pub fn is_valid_address(address: &str) -> bool {
    let Some(body) = address
        .strip_prefix("0x")
        .or_else(|| address.strip_prefix("0X"))
    else {
        return false;
    };
    body.len() == 40 && hex::decode(body).is_ok()
}
