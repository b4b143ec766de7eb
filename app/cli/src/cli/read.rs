use alloy::primitives::Address;

/// Accepts any-case hex addresses, with or without EIP-55 checksum.
pub fn parse_address(input: &str) -> Result<Address, String> {
    input.trim().parse::<Address>().map_err(|e| format!("`{input}` is not a valid address: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_address() {
        let expected: Address = "0x5FbDB2315678afecb367f032d93F642f64180aa3".parse().unwrap();
        assert_eq!(parse_address("0x5fbdb2315678afecb367f032d93f642f64180aa3"), Ok(expected));
        assert_eq!(parse_address(" 0x5FbDB2315678afecb367f032d93F642f64180aa3 "), Ok(expected));
        assert!(parse_address("0x1234").is_err());
        assert!(parse_address("blockmed").is_err());
    }
}
