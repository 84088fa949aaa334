use secrecy::Secret;
use userhub_core::{
    AccountStore, AccountStoreError, CredentialError, Email, NewAccount, Password, PasswordHasher,
    ProfileClient, ProfileClientError, ProfileDraft, TokenClaims, TokenSignError, TokenSigner,
    Username,
};

/// Account fields accepted at creation. The password is optional so that
/// federated sign-ups can create an account with no local credential.
#[derive(Debug, Clone)]
pub struct NewAccountData {
    pub username: Option<Username>,
    pub email: Email,
    pub password: Option<Password>,
    pub federated_access_token: Option<Secret<String>>,
}

/// Error types specific to account creation
#[derive(Debug, thiserror::Error)]
pub enum CreateAccountError {
    #[error("Account store error: {0}")]
    AccountStoreError(#[from] AccountStoreError),
    /// The account row was persisted but the profile collaborator failed.
    /// The row is deliberately not rolled back; callers see a server error
    /// and the gap is closed out of band.
    #[error("Profile creation failed: {0}")]
    ProfileCreation(#[from] ProfileClientError),
    #[error("Credential error: {0}")]
    CredentialError(#[from] CredentialError),
    #[error("Token error: {0}")]
    TokenSignError(#[from] TokenSignError),
}

/// Create-account use case - persists the account, creates the linked
/// profile through the external collaborator, and issues the first token.
pub struct CreateAccountUseCase<S, P, H, T>
where
    S: AccountStore,
    P: ProfileClient,
    H: PasswordHasher,
    T: TokenSigner,
{
    account_store: S,
    profile_client: P,
    password_hasher: H,
    token_signer: T,
}

impl<S, P, H, T> CreateAccountUseCase<S, P, H, T>
where
    S: AccountStore,
    P: ProfileClient,
    H: PasswordHasher,
    T: TokenSigner,
{
    pub fn new(account_store: S, profile_client: P, password_hasher: H, token_signer: T) -> Self {
        Self {
            account_store,
            profile_client,
            password_hasher,
            token_signer,
        }
    }

    /// Execute the create-account use case
    ///
    /// # Arguments
    /// * `data` - Validated account fields
    /// * `profile` - Profile fields forwarded to the profile service
    ///
    /// # Returns
    /// The signed access token for the new account, or CreateAccountError.
    /// A unique-constraint collision propagates as-is and is never retried.
    #[tracing::instrument(name = "CreateAccountUseCase::execute", skip(self, data, profile), fields(email = %data.email))]
    pub async fn execute(
        &self,
        data: NewAccountData,
        profile: ProfileDraft,
    ) -> Result<String, CreateAccountError> {
        let password_digest = match &data.password {
            Some(password) => Some(self.password_hasher.hash(password).await?),
            None => None,
        };

        let account = self
            .account_store
            .create(NewAccount {
                username: data.username,
                email: data.email,
                password_digest,
                federated_access_token: data.federated_access_token,
            })
            .await?;

        // From here on the account row exists; a collaborator failure leaves
        // it behind without a profile link.
        let profile_record = self
            .profile_client
            .create_profile(&account.id, &profile)
            .await?;

        let account = self
            .account_store
            .set_profile_id(&account.id, &profile_record.id)
            .await?;

        Ok(self.token_signer.sign(TokenClaims::from(&account))?)
    }
}
