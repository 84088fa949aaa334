use std::fmt;

use chrono::{DateTime, Utc};
use secrecy::Secret;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{
    email::Email, password::PasswordDigest, reset_token::ResetToken, username::Username,
    DomainError,
};

/// Stable identifier of an account, assigned at creation and immutable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(Uuid);

impl AccountId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        Uuid::parse_str(raw)
            .map(Self)
            .map_err(|_| DomainError::InvalidAccountId)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for AccountId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for AccountId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Weak reference to a profile entity owned by the profile service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProfileId(String);

impl ProfileId {
    pub fn parse(raw: impl Into<String>) -> Result<Self, DomainError> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(DomainError::InvalidProfileId);
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ProfileId {
    type Error = DomainError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Self::parse(raw)
    }
}

impl From<ProfileId> for String {
    fn from(id: ProfileId) -> Self {
        id.0
    }
}

impl fmt::Display for ProfileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The persisted user record.
///
/// Deliberately does not implement `Serialize`: nothing outside the service
/// boundary ever sees a digest or a federated access token, and the
/// dispatcher owns the outbound view type.
#[derive(Debug, Clone)]
pub struct Account {
    pub id: AccountId,
    pub username: Option<Username>,
    pub email: Email,
    pub password_digest: Option<PasswordDigest>,
    pub profile_id: Option<ProfileId>,
    pub federated_access_token: Option<Secret<String>>,
    pub reset_token: Option<ResetToken>,
    pub reset_token_expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields supplied to `AccountStore::create`. The store assigns the id and
/// both timestamps.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub username: Option<Username>,
    pub email: Email,
    pub password_digest: Option<PasswordDigest>,
    pub federated_access_token: Option<Secret<String>>,
}
