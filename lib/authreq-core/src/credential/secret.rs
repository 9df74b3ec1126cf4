use std::fmt;

use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// A credential property value, wiped from memory when dropped.
///
/// `Debug` never shows the value and `Display` only shows a masked form,
/// so an [`Account`](super::Account) can be logged without leaking its token.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Secret(String);

impl Secret {
    /// Wraps the given value.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the value in clear.
    ///
    /// Keep the returned reference short-lived.
    pub fn expose(&self) -> &str {
        &self.0
    }

    fn masked(&self) -> String {
        let value = self.0.as_str();
        let head = value.get(..4);
        let tail = value
            .len()
            .checked_sub(4)
            .and_then(|start| value.get(start..));
        match (head, tail) {
            (Some(head), Some(tail)) if value.len() > 8 => format!("{head}...{tail}"),
            _ => "***".to_string(),
        }
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret([REDACTED])")
    }
}

impl fmt::Display for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.masked())
    }
}

impl From<String> for Secret {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for Secret {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl Serialize for Secret {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Secret {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        String::deserialize(deserializer).map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_redact_debug() {
        let secret = Secret::new("abc123-very-secret");
        let debug = format!("{secret:?}");

        insta::assert_snapshot!(debug, @"Secret([REDACTED])");
    }

    #[test]
    fn should_mask_display() {
        insta::assert_snapshot!(Secret::new("abc123-very-secret"), @"abc1...cret");
        insta::assert_snapshot!(Secret::new("12345678"), @"***");
        insta::assert_snapshot!(Secret::new(""), @"***");
    }

    #[test]
    fn should_not_split_multibyte_characters_when_masking() {
        // 'é' is two bytes: byte offset 4 falls inside a character
        let secret = Secret::new("abcé-token-é");
        assert_eq!(secret.to_string(), "***");
    }

    #[test]
    fn should_expose_value() {
        let secret = Secret::from("abc123".to_string());
        assert_eq!(secret.expose(), "abc123");
    }
}
