use rand::{rngs::OsRng, Rng};
use std::fmt;

const TOKEN_HEX_LEN: usize = 32;

/// Opaque handle to an ephemeral record.
///
/// 128 bits from the OS RNG rendered as 32 lowercase hex digits. Carries no
/// information about the secret it points to.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Token(String);

impl Token {
    pub fn generate() -> Self {
        let value: u128 = OsRng.gen();
        Self(format!("{:032x}", value))
    }

    /// Accepts only the exact shape produced by [`Token::generate`].
    pub fn parse(text: &str) -> Option<Self> {
        let well_formed = text.len() == TOKEN_HEX_LEN
            && text.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'));
        well_formed.then(|| Self(text.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First 8 characters, for log lines.
    pub fn short(&self) -> &str {
        &self.0[..8]
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Token({}…)", self.short())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generated_shape() {
        let token = Token::generate();
        assert_eq!(token.as_str().len(), 32);
        assert_eq!(Token::parse(token.as_str()), Some(token.clone()));
        assert_eq!(token.short().len(), 8);
    }

    #[test]
    fn test_generated_tokens_are_distinct() {
        let tokens: HashSet<Token> = (0..1000).map(|_| Token::generate()).collect();
        assert_eq!(tokens.len(), 1000);
    }

    #[test]
    fn test_parse_rejects_foreign_shapes() {
        assert_eq!(Token::parse(""), None);
        assert_eq!(Token::parse("abc"), None);
        assert_eq!(Token::parse(&"A".repeat(32)), None);
        assert_eq!(Token::parse(&"g".repeat(32)), None);
        assert_eq!(Token::parse(&"0".repeat(33)), None);
    }
}
