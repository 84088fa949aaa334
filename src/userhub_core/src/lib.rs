pub mod domain;
pub mod ports;

// Re-export commonly used types for convenience
pub use domain::{
    account::{Account, AccountId, NewAccount, ProfileId},
    claims::TokenClaims,
    email::Email,
    password::{Password, PasswordDigest},
    reset_token::ResetToken,
    username::Username,
    DomainError,
};

pub use ports::{
    repositories::{AccountStore, AccountStoreError},
    services::{
        CredentialError, PasswordHasher, ProfileClient, ProfileClientError, ProfileDraft,
        ProfileRecord, TokenSignError, TokenSigner,
    },
};
