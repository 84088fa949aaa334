use chrono::{DateTime, Duration, Utc};
use userhub_core::{AccountStore, AccountStoreError, Email, ResetToken};

/// Reset tokens stay valid for one day after issuance.
const RESET_TOKEN_TTL_HOURS: i64 = 24;

/// Error types specific to reset-token issuance
#[derive(Debug, thiserror::Error)]
pub enum RequestPasswordResetError {
    #[error("Account store error: {0}")]
    AccountStoreError(#[from] AccountStoreError),
}

/// Request-password-reset use case - issues a fresh six-digit token.
///
/// Only the expiry is returned; the token itself travels to the user over a
/// side channel and is never part of the response envelope. An unknown
/// email fails with `AccountNotFound` rather than creating a stub record.
pub struct RequestPasswordResetUseCase<S>
where
    S: AccountStore,
{
    account_store: S,
}

impl<S> RequestPasswordResetUseCase<S>
where
    S: AccountStore,
{
    pub fn new(account_store: S) -> Self {
        Self { account_store }
    }

    #[tracing::instrument(name = "RequestPasswordResetUseCase::execute", skip(self))]
    pub async fn execute(&self, email: Email) -> Result<DateTime<Utc>, RequestPasswordResetError> {
        let token = ResetToken::generate();
        let expires_at = Utc::now() + Duration::hours(RESET_TOKEN_TTL_HOURS);

        self.account_store
            .set_reset_token(&email, &token, expires_at)
            .await?;

        Ok(expires_at)
    }
}
