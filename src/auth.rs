use std::fmt;

use crate::error::{ReliabilityError, Result};

/// Bearer credential for the Sentry API.
///
/// The value never shows up in `Debug` output so it can't leak through logs.
#[derive(Clone, PartialEq, Eq)]
pub struct Token(String);

impl Token {
    /// Builds a token from an optional raw value, rejecting missing or blank input.
    pub fn require(raw: Option<&str>) -> Result<Self> {
        match raw.map(str::trim) {
            Some(value) if !value.is_empty() => Ok(Self(value.to_string())),
            _ => Err(ReliabilityError::MissingToken),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Token {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Token(***)")
    }
}
