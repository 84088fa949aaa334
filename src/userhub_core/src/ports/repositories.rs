use async_trait::async_trait;
use chrono::{DateTime, Utc};
use secrecy::Secret;
use thiserror::Error;

use crate::domain::{
    account::{Account, AccountId, NewAccount, ProfileId},
    email::Email,
    password::PasswordDigest,
    reset_token::ResetToken,
};

// AccountStore port trait and errors
#[derive(Debug, Error)]
pub enum AccountStoreError {
    #[error("Account already exists")]
    AccountAlreadyExists,
    #[error("Account not found")]
    AccountNotFound,
    #[error("Unexpected error {0}")]
    UnexpectedError(String),
}

impl PartialEq for AccountStoreError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::AccountAlreadyExists, Self::AccountAlreadyExists) => true,
            (Self::AccountNotFound, Self::AccountNotFound) => true,
            (Self::UnexpectedError(_), Self::UnexpectedError(_)) => true,
            _ => false,
        }
    }
}

/// Persistence port over the account collection.
///
/// Each method is one logical store call; consistency (uniqueness, atomic
/// field updates) is delegated to the store's per-record atomicity. Update
/// methods fail with `AccountNotFound` when no record matches; none of
/// them upsert.
#[async_trait]
pub trait AccountStore: Send + Sync {
    async fn create(&self, account: NewAccount) -> Result<Account, AccountStoreError>;

    async fn find_by_email(&self, email: &Email) -> Result<Account, AccountStoreError>;

    async fn find_by_id(&self, id: &AccountId) -> Result<Account, AccountStoreError>;

    async fn find_by_reset_token(
        &self,
        email: &Email,
        token: &ResetToken,
    ) -> Result<Account, AccountStoreError>;

    async fn find_by_federated_token(
        &self,
        email: &Email,
        token: &str,
    ) -> Result<Account, AccountStoreError>;

    /// Last write wins; setting an already-set profile id to the same value
    /// is an idempotent no-op.
    async fn set_profile_id(
        &self,
        id: &AccountId,
        profile_id: &ProfileId,
    ) -> Result<Account, AccountStoreError>;

    async fn set_reset_token(
        &self,
        email: &Email,
        token: &ResetToken,
        expires_at: DateTime<Utc>,
    ) -> Result<Account, AccountStoreError>;

    /// Replaces the digest, clears any reset token and stamps
    /// `reset_token_expires_at` with the current time as a consumed marker,
    /// all in one store update.
    async fn set_password_digest(
        &self,
        id: &AccountId,
        digest: PasswordDigest,
    ) -> Result<Account, AccountStoreError>;

    async fn link_federated_token(
        &self,
        id: &AccountId,
        token: Secret<String>,
    ) -> Result<Account, AccountStoreError>;
}
