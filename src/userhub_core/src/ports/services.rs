use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{
    account::{AccountId, ProfileId},
    claims::TokenClaims,
    password::{Password, PasswordDigest},
};

// PasswordHasher port trait and errors
#[derive(Debug, Error)]
pub enum CredentialError {
    /// The hashing executor itself failed. Treated as fatal, never retried.
    #[error("Credential hashing failed: {0}")]
    HashingFailed(String),
}

/// Port over the one-way password digest primitives.
///
/// `verify` answers `false` for a mismatch or a malformed digest (only an
/// executor fault is an error), and must not leak timing proportional to
/// the matching prefix length.
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    async fn hash(&self, password: &Password) -> Result<PasswordDigest, CredentialError>;

    async fn verify(
        &self,
        candidate: &Password,
        digest: &PasswordDigest,
    ) -> Result<bool, CredentialError>;
}

// TokenSigner port trait and errors
#[derive(Debug, Error)]
pub enum TokenSignError {
    #[error("Token signing failed: {0}")]
    SigningFailed(String),
}

/// Port over the token-signing primitive. The implementation owns the key
/// and the expiry policy.
pub trait TokenSigner: Send + Sync {
    fn sign(&self, claims: TokenClaims) -> Result<String, TokenSignError>;
}

// ProfileClient port trait and errors
#[derive(Debug, Error)]
pub enum ProfileClientError {
    /// The profile service answered, but with an error payload.
    #[error("Profile service rejected the request: {0}")]
    Rejected(String),
    /// No answer within the transport deadline. Never folded into a
    /// "not found" result.
    #[error("Profile service timed out")]
    Timeout,
    #[error("Profile transport error: {0}")]
    Transport(String),
}

impl PartialEq for ProfileClientError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Rejected(_), Self::Rejected(_)) => true,
            (Self::Timeout, Self::Timeout) => true,
            (Self::Transport(_), Self::Transport(_)) => true,
            _ => false,
        }
    }
}

/// The profile fields this service accepts on account creation and forwards
/// verbatim; the profile service owns their semantics.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileDraft {
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub profile_image: String,
}

/// What comes back from a successful profile creation.
#[derive(Debug, Clone)]
pub struct ProfileRecord {
    pub id: ProfileId,
}

/// Port over the external profile microservice, reached via request/reply
/// on the message bus.
#[async_trait]
pub trait ProfileClient: Send + Sync {
    async fn create_profile(
        &self,
        account_id: &AccountId,
        draft: &ProfileDraft,
    ) -> Result<ProfileRecord, ProfileClientError>;
}
