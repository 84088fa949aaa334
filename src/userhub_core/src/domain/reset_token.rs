use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::DomainError;

/// A single-use six-digit password-reset code.
///
/// Generated uniformly in `[100000, 999999]`, delivered to the user through
/// a side channel, and consumed by the first successful password change.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ResetToken(String);

impl ResetToken {
    /// Draw a fresh token from the thread-local RNG.
    pub fn generate() -> Self {
        let code: u32 = rand::rng().random_range(100_000..=999_999);
        Self(code.to_string())
    }

    pub fn parse(raw: impl Into<String>) -> Result<Self, DomainError> {
        let raw = raw.into();
        let six_digits = raw.len() == 6 && raw.bytes().all(|b| b.is_ascii_digit());
        if !six_digits || raw.starts_with('0') {
            return Err(DomainError::InvalidResetToken);
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ResetToken {
    type Error = DomainError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Self::parse(raw)
    }
}

impl From<ResetToken> for String {
    fn from(token: ResetToken) -> Self {
        token.0
    }
}

impl fmt::Display for ResetToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
