use chrono::{DateTime, Utc};
use userhub_core::{
    Account, AccountStore, AccountStoreError, CredentialError, Email, Password, PasswordHasher,
    ResetToken,
};

/// Error types specific to reset-token consumption
#[derive(Debug, thiserror::Error)]
pub enum ResetPasswordError {
    /// The expiry claim the caller was handed at issuance is already in the
    /// past. Checked before any store access.
    #[error("Reset token expired")]
    TokenExpired,
    /// Wrong email and wrong (or already consumed) token are deliberately
    /// indistinguishable.
    #[error("Account store error: {0}")]
    AccountStoreError(#[from] AccountStoreError),
    #[error("Credential error: {0}")]
    CredentialError(#[from] CredentialError),
}

/// Reset-password use case - consumes a reset token and installs a new
/// password digest in one store update.
pub struct ResetPasswordUseCase<S, H>
where
    S: AccountStore,
    H: PasswordHasher,
{
    account_store: S,
    password_hasher: H,
}

impl<S, H> ResetPasswordUseCase<S, H>
where
    S: AccountStore,
    H: PasswordHasher,
{
    pub fn new(account_store: S, password_hasher: H) -> Self {
        Self {
            account_store,
            password_hasher,
        }
    }

    /// Execute the reset-password use case
    ///
    /// # Arguments
    /// * `email` - Address the reset was requested for
    /// * `token` - The six-digit code from the side channel
    /// * `claimed_expiry` - The expiry the caller received at issuance;
    ///   stale client state is rejected fail-fast, before any store read
    /// * `new_password` - The replacement password
    ///
    /// # Returns
    /// The updated account (reset token cleared), or ResetPasswordError
    #[tracing::instrument(name = "ResetPasswordUseCase::execute", skip(self, token, new_password))]
    pub async fn execute(
        &self,
        email: Email,
        token: ResetToken,
        claimed_expiry: DateTime<Utc>,
        new_password: Password,
    ) -> Result<Account, ResetPasswordError> {
        if claimed_expiry < Utc::now() {
            return Err(ResetPasswordError::TokenExpired);
        }

        let account = self.account_store.find_by_reset_token(&email, &token).await?;

        let digest = self.password_hasher.hash(&new_password).await?;
        let account = self
            .account_store
            .set_password_digest(&account.id, digest)
            .await?;

        Ok(account)
    }
}
