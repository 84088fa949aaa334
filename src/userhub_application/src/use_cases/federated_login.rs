use secrecy::{ExposeSecret, Secret};
use userhub_core::{
    AccountStore, AccountStoreError, Email, TokenClaims, TokenSignError, TokenSigner,
};

/// Error types specific to federated login
#[derive(Debug, thiserror::Error)]
pub enum FederatedLoginError {
    /// Neither the federated token nor the email matched an account. This
    /// path never creates accounts; federated signup goes through account
    /// creation.
    #[error("Account store error: {0}")]
    AccountStoreError(#[from] AccountStoreError),
    #[error("Token error: {0}")]
    TokenSignError(#[from] TokenSignError),
}

/// Federated-login use case - authenticates against an identity provider's
/// opaque access token, linking it to an existing account on first use.
pub struct FederatedLoginUseCase<S, T>
where
    S: AccountStore,
    T: TokenSigner,
{
    account_store: S,
    token_signer: T,
}

impl<S, T> FederatedLoginUseCase<S, T>
where
    S: AccountStore,
    T: TokenSigner,
{
    pub fn new(account_store: S, token_signer: T) -> Self {
        Self {
            account_store,
            token_signer,
        }
    }

    #[tracing::instrument(name = "FederatedLoginUseCase::execute", skip(self, federated_token))]
    pub async fn execute(
        &self,
        email: Email,
        federated_token: Secret<String>,
    ) -> Result<String, FederatedLoginError> {
        let lookup = self
            .account_store
            .find_by_federated_token(&email, federated_token.expose_secret())
            .await;

        let account = match lookup {
            Ok(account) => account,
            Err(AccountStoreError::AccountNotFound) => {
                // First federated login for an existing local account: link
                // the provider token, then issue from the linked record.
                let existing = self.account_store.find_by_email(&email).await?;
                self.account_store
                    .link_federated_token(&existing.id, federated_token)
                    .await?
            }
            Err(other) => return Err(other.into()),
        };

        Ok(self.token_signer.sign(TokenClaims::from(&account))?)
    }
}
