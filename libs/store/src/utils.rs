use alloy::primitives::Address;

pub const DEFAULT_LIMIT: i64 = 100;
pub const MAX_LIMIT: i64 = 500;

/// Missing or non-positive limits fall back to the default; everything else is capped.
pub fn clamp_limit(limit: Option<i64>) -> i64 {
    match limit {
        Some(limit) if limit > 0 => limit.min(MAX_LIMIT),
        _ => DEFAULT_LIMIT,
    }
}

/// EIP-55 representation used for every address column.
pub fn address_to_string(address: &Address) -> String {
    address.to_checksum(None)
}
