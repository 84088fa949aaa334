use secrecy::{ExposeSecret, Secret};

use super::DomainError;

pub const MIN_PASSWORD_LEN: usize = 8;

/// A raw password as supplied by a caller. Only ever handed to the
/// `PasswordHasher` port; it is never persisted or serialized.
#[derive(Debug, Clone)]
pub struct Password(Secret<String>);

impl Password {
    pub fn parse(raw: Secret<String>) -> Result<Self, DomainError> {
        if raw.expose_secret().len() < MIN_PASSWORD_LEN {
            return Err(DomainError::WeakPassword);
        }
        Ok(Self(raw))
    }
}

impl TryFrom<Secret<String>> for Password {
    type Error = DomainError;

    fn try_from(raw: Secret<String>) -> Result<Self, Self::Error> {
        Self::parse(raw)
    }
}

impl AsRef<Secret<String>> for Password {
    fn as_ref(&self) -> &Secret<String> {
        &self.0
    }
}

/// The salted one-way digest of a password, as produced by the
/// `PasswordHasher` port. Opaque to everything but the hasher.
#[derive(Debug, Clone)]
pub struct PasswordDigest(Secret<String>);

impl PasswordDigest {
    pub fn new(digest: Secret<String>) -> Self {
        Self(digest)
    }
}

impl AsRef<Secret<String>> for PasswordDigest {
    fn as_ref(&self) -> &Secret<String> {
        &self.0
    }
}
