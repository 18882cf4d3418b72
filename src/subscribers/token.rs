//! Unsubscribe token generation.

use rand::distributions::Alphanumeric;
use rand::rngs::OsRng;
use rand::Rng;

/// Token length in characters. 32 alphanumeric characters carry just
/// under 191 bits of entropy, well above the 128-bit floor required of
/// a secret that is the sole authorization factor for deletion.
pub const TOKEN_LEN: usize = 32;

/// Generate a fresh unsubscribe token from the OS CSPRNG.
pub fn generate_unsubscribe_token() -> String {
    OsRng
        .sample_iter(&Alphanumeric)
        .take(TOKEN_LEN)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_shape() {
        let token = generate_unsubscribe_token();
        assert_eq!(token.len(), TOKEN_LEN);
        assert!(token.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_tokens_are_distinct() {
        assert_ne!(generate_unsubscribe_token(), generate_unsubscribe_token());
    }
}
