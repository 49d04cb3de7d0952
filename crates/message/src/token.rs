use crate::error::Result;
use rand::{RngCore, rngs::OsRng};

/// Number of random bytes in a token.
pub const TOKEN_BYTE_LENGTH: usize = 16;

/// One-time credential: [`TOKEN_BYTE_LENGTH`] bytes from the OS RNG, hex
/// encoded. Entropy failure is returned to the caller, never retried.
pub fn generate_token() -> Result<String> {
    generate_token_with_len(TOKEN_BYTE_LENGTH)
}

pub fn generate_token_with_len(byte_length: usize) -> Result<String> {
    let mut bytes = vec![0u8; byte_length];
    OsRng.try_fill_bytes(&mut bytes)?;
    Ok(hex::encode(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_token_is_hex_of_expected_length() {
        let token = generate_token().unwrap();
        assert_eq!(token.len(), 2 * TOKEN_BYTE_LENGTH);
        assert!(hex::decode(&token).is_ok());
    }

    #[test]
    fn test_tokens_are_unique() {
        let tokens: HashSet<String> = (0..64).map(|_| generate_token().unwrap()).collect();
        assert_eq!(tokens.len(), 64);
    }

    #[test]
    fn test_custom_length() {
        assert_eq!(generate_token_with_len(32).unwrap().len(), 64);
        assert_eq!(generate_token_with_len(0).unwrap(), "");
    }
}
