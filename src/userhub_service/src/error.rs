use thiserror::Error;
use userhub_application::{
    CreateAccountError, FederatedLoginError, GetAccountError, LinkProfileError, LoginError,
    RequestPasswordResetError, ResetPasswordError, VerifyCredentialsError,
};
use userhub_core::{AccountStoreError, DomainError};

use crate::contracts::Envelope;

/// Boundary error: everything a pattern handler can fail with, flattened to
/// what the caller is allowed to learn. Renders as a non-200 envelope.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("USER_EXISTS")]
    Conflict,

    #[error("USER_NOT_FOUND")]
    NotFound,

    /// Unknown email and wrong password collapse here so callers cannot
    /// probe for registered addresses.
    #[error("INVALID_CREDENTIALS")]
    InvalidCredentials,

    #[error("RPT_EXPIRED")]
    ResetTokenExpired,

    /// Wrong email and wrong (or consumed) reset token are identical.
    #[error("RPT_OR_EMAIL_INVALID")]
    ResetTokenInvalid,

    #[error("Upstream service failed: {0}")]
    Upstream(String),

    #[error("Unexpected error: {0}")]
    Internal(String),
}

impl ServiceError {
    pub fn status(&self) -> u16 {
        match self {
            ServiceError::Validation(_) => 400,
            ServiceError::Conflict => 409,
            ServiceError::NotFound | ServiceError::ResetTokenInvalid => 404,
            ServiceError::InvalidCredentials => 401,
            ServiceError::ResetTokenExpired => 412,
            ServiceError::Upstream(_) => 502,
            ServiceError::Internal(_) => 500,
        }
    }

    /// The reset-flow outcomes are part of the message contract; everything
    /// else reports through the `error` field.
    pub fn into_envelope(self) -> Envelope {
        let status = self.status();
        let (message, error) = match &self {
            ServiceError::ResetTokenExpired | ServiceError::ResetTokenInvalid => {
                (Some(self.to_string()), None)
            }
            _ => (None, Some(self.to_string())),
        };

        Envelope {
            status,
            message,
            error,
            token: None,
            user: None,
            rpt_expires: None,
        }
    }
}

impl From<DomainError> for ServiceError {
    fn from(error: DomainError) -> Self {
        ServiceError::Validation(error.to_string())
    }
}

impl From<CreateAccountError> for ServiceError {
    fn from(error: CreateAccountError) -> Self {
        match error {
            CreateAccountError::AccountStoreError(AccountStoreError::AccountAlreadyExists) => {
                ServiceError::Conflict
            }
            CreateAccountError::AccountStoreError(AccountStoreError::AccountNotFound) => {
                ServiceError::NotFound
            }
            CreateAccountError::ProfileCreation(e) => ServiceError::Upstream(e.to_string()),
            CreateAccountError::AccountStoreError(AccountStoreError::UnexpectedError(e)) => {
                ServiceError::Internal(e)
            }
            CreateAccountError::CredentialError(e) => ServiceError::Internal(e.to_string()),
            CreateAccountError::TokenSignError(e) => ServiceError::Internal(e.to_string()),
        }
    }
}

impl From<LoginError> for ServiceError {
    fn from(error: LoginError) -> Self {
        match error {
            LoginError::InvalidCredentials
            | LoginError::AccountStoreError(AccountStoreError::AccountNotFound) => {
                ServiceError::InvalidCredentials
            }
            LoginError::AccountStoreError(e) => ServiceError::Internal(e.to_string()),
            LoginError::CredentialError(e) => ServiceError::Internal(e.to_string()),
            LoginError::TokenSignError(e) => ServiceError::Internal(e.to_string()),
        }
    }
}

impl From<FederatedLoginError> for ServiceError {
    fn from(error: FederatedLoginError) -> Self {
        match error {
            FederatedLoginError::AccountStoreError(AccountStoreError::AccountNotFound) => {
                ServiceError::InvalidCredentials
            }
            FederatedLoginError::AccountStoreError(e) => ServiceError::Internal(e.to_string()),
            FederatedLoginError::TokenSignError(e) => ServiceError::Internal(e.to_string()),
        }
    }
}

impl From<VerifyCredentialsError> for ServiceError {
    fn from(error: VerifyCredentialsError) -> Self {
        match error {
            VerifyCredentialsError::AccountStoreError(AccountStoreError::AccountNotFound) => {
                ServiceError::InvalidCredentials
            }
            VerifyCredentialsError::AccountStoreError(e) => ServiceError::Internal(e.to_string()),
            VerifyCredentialsError::CredentialError(e) => ServiceError::Internal(e.to_string()),
        }
    }
}

impl From<RequestPasswordResetError> for ServiceError {
    fn from(error: RequestPasswordResetError) -> Self {
        match error {
            RequestPasswordResetError::AccountStoreError(AccountStoreError::AccountNotFound) => {
                ServiceError::NotFound
            }
            RequestPasswordResetError::AccountStoreError(e) => ServiceError::Internal(e.to_string()),
        }
    }
}

impl From<ResetPasswordError> for ServiceError {
    fn from(error: ResetPasswordError) -> Self {
        match error {
            ResetPasswordError::TokenExpired => ServiceError::ResetTokenExpired,
            ResetPasswordError::AccountStoreError(AccountStoreError::AccountNotFound) => {
                ServiceError::ResetTokenInvalid
            }
            ResetPasswordError::AccountStoreError(e) => ServiceError::Internal(e.to_string()),
            ResetPasswordError::CredentialError(e) => ServiceError::Internal(e.to_string()),
        }
    }
}

impl From<LinkProfileError> for ServiceError {
    fn from(error: LinkProfileError) -> Self {
        match error {
            LinkProfileError::AccountStoreError(AccountStoreError::AccountNotFound) => {
                ServiceError::NotFound
            }
            LinkProfileError::AccountStoreError(e) => ServiceError::Internal(e.to_string()),
        }
    }
}

impl From<GetAccountError> for ServiceError {
    fn from(error: GetAccountError) -> Self {
        match error {
            GetAccountError::AccountStoreError(AccountStoreError::AccountNotFound) => {
                ServiceError::NotFound
            }
            GetAccountError::AccountStoreError(e) => ServiceError::Internal(e.to_string()),
        }
    }
}
