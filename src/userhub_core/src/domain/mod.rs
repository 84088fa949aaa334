pub mod account;
pub mod claims;
pub mod email;
pub mod password;
pub mod reset_token;
pub mod username;

use thiserror::Error;

/// Validation failures for domain value types.
///
/// All of these reject a payload before it reaches a use case, so the
/// dispatcher maps them to a 400-class envelope.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("Invalid email address")]
    InvalidEmail,
    #[error("Invalid username: {0}")]
    InvalidUsername(&'static str),
    #[error("Password must be at least {min} characters", min = password::MIN_PASSWORD_LEN)]
    WeakPassword,
    #[error("Reset token must be exactly six digits")]
    InvalidResetToken,
    #[error("Profile id must not be empty")]
    InvalidProfileId,
    #[error("Invalid account id")]
    InvalidAccountId,
}
