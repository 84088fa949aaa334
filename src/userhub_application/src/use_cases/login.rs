use userhub_core::{
    AccountStore, AccountStoreError, CredentialError, Email, Password, PasswordHasher,
    TokenClaims, TokenSignError, TokenSigner,
};

use super::digest_matches;

/// Error types specific to login use case
#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    /// Covers the unknown-email case; the dispatcher collapses it with
    /// `InvalidCredentials` so callers cannot probe for registered emails.
    #[error("Account store error: {0}")]
    AccountStoreError(#[from] AccountStoreError),
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Credential error: {0}")]
    CredentialError(#[from] CredentialError),
    #[error("Token error: {0}")]
    TokenSignError(#[from] TokenSignError),
}

/// Login use case - verifies a password and issues an access token with the
/// same claim shape as account creation.
pub struct LoginUseCase<S, H, T>
where
    S: AccountStore,
    H: PasswordHasher,
    T: TokenSigner,
{
    account_store: S,
    password_hasher: H,
    token_signer: T,
}

impl<S, H, T> LoginUseCase<S, H, T>
where
    S: AccountStore,
    H: PasswordHasher,
    T: TokenSigner,
{
    pub fn new(account_store: S, password_hasher: H, token_signer: T) -> Self {
        Self {
            account_store,
            password_hasher,
            token_signer,
        }
    }

    #[tracing::instrument(name = "LoginUseCase::execute", skip(self, password))]
    pub async fn execute(&self, email: Email, password: Password) -> Result<String, LoginError> {
        let account = self.account_store.find_by_email(&email).await?;

        let matches =
            digest_matches(&self.password_hasher, &password, account.password_digest.as_ref())
                .await?;
        if !matches {
            return Err(LoginError::InvalidCredentials);
        }

        Ok(self.token_signer.sign(TokenClaims::from(&account))?)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Utc};
    use secrecy::{ExposeSecret, Secret};
    use userhub_core::{Account, AccountId, NewAccount, PasswordDigest, ProfileId, ResetToken};

    use super::*;

    #[derive(Clone)]
    struct MockAccountStore {
        account: Option<Account>,
    }

    #[async_trait::async_trait]
    impl AccountStore for MockAccountStore {
        async fn create(&self, _account: NewAccount) -> Result<Account, AccountStoreError> {
            unimplemented!()
        }

        async fn find_by_email(&self, email: &Email) -> Result<Account, AccountStoreError> {
            self.account
                .clone()
                .filter(|a| &a.email == email)
                .ok_or(AccountStoreError::AccountNotFound)
        }

        async fn find_by_id(&self, _id: &AccountId) -> Result<Account, AccountStoreError> {
            unimplemented!()
        }

        async fn find_by_reset_token(
            &self,
            _email: &Email,
            _token: &ResetToken,
        ) -> Result<Account, AccountStoreError> {
            unimplemented!()
        }

        async fn find_by_federated_token(
            &self,
            _email: &Email,
            _token: &str,
        ) -> Result<Account, AccountStoreError> {
            unimplemented!()
        }

        async fn set_profile_id(
            &self,
            _id: &AccountId,
            _profile_id: &ProfileId,
        ) -> Result<Account, AccountStoreError> {
            unimplemented!()
        }

        async fn set_reset_token(
            &self,
            _email: &Email,
            _token: &ResetToken,
            _expires_at: DateTime<Utc>,
        ) -> Result<Account, AccountStoreError> {
            unimplemented!()
        }

        async fn set_password_digest(
            &self,
            _id: &AccountId,
            _digest: PasswordDigest,
        ) -> Result<Account, AccountStoreError> {
            unimplemented!()
        }

        async fn link_federated_token(
            &self,
            _id: &AccountId,
            _token: Secret<String>,
        ) -> Result<Account, AccountStoreError> {
            unimplemented!()
        }
    }

    #[derive(Clone)]
    struct MockHasher;

    #[async_trait::async_trait]
    impl PasswordHasher for MockHasher {
        async fn hash(&self, _password: &Password) -> Result<PasswordDigest, CredentialError> {
            unimplemented!()
        }

        async fn verify(
            &self,
            candidate: &Password,
            digest: &PasswordDigest,
        ) -> Result<bool, CredentialError> {
            Ok(digest.as_ref().expose_secret()
                == &format!("digest:{}", candidate.as_ref().expose_secret()))
        }
    }

    #[derive(Clone)]
    struct MockSigner;

    impl TokenSigner for MockSigner {
        fn sign(&self, claims: TokenClaims) -> Result<String, TokenSignError> {
            Ok(format!("token:{}", claims.email))
        }
    }

    fn account(email: &str, digest: Option<&str>) -> Account {
        let now = Utc::now();
        Account {
            id: AccountId::new(),
            username: None,
            email: Email::parse(email).unwrap(),
            password_digest: digest.map(|d| PasswordDigest::new(Secret::from(d.to_string()))),
            profile_id: None,
            federated_access_token: None,
            reset_token: None,
            reset_token_expires_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn password(raw: &str) -> Password {
        Password::parse(Secret::from(raw.to_string())).unwrap()
    }

    #[tokio::test]
    async fn test_login_success_returns_token() {
        let store = MockAccountStore {
            account: Some(account("a@x.com", Some("digest:correct-horse"))),
        };
        let use_case = LoginUseCase::new(store, MockHasher, MockSigner);

        let token = use_case
            .execute(Email::parse("a@x.com").unwrap(), password("correct-horse"))
            .await
            .unwrap();
        assert_eq!(token, "token:a@x.com");
    }

    #[tokio::test]
    async fn test_login_wrong_password_is_unauthorized() {
        let store = MockAccountStore {
            account: Some(account("a@x.com", Some("digest:correct-horse"))),
        };
        let use_case = LoginUseCase::new(store, MockHasher, MockSigner);

        let result = use_case
            .execute(Email::parse("a@x.com").unwrap(), password("wrong-horse"))
            .await;
        assert!(matches!(result, Err(LoginError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_login_unknown_email_is_not_found() {
        let store = MockAccountStore { account: None };
        let use_case = LoginUseCase::new(store, MockHasher, MockSigner);

        let result = use_case
            .execute(Email::parse("a@x.com").unwrap(), password("any-password"))
            .await;
        assert!(matches!(
            result,
            Err(LoginError::AccountStoreError(
                AccountStoreError::AccountNotFound
            ))
        ));
    }

    #[tokio::test]
    async fn test_login_federated_only_account_never_matches() {
        let store = MockAccountStore {
            account: Some(account("sso@x.com", None)),
        };
        let use_case = LoginUseCase::new(store, MockHasher, MockSigner);

        let result = use_case
            .execute(Email::parse("sso@x.com").unwrap(), password("any-password"))
            .await;
        assert!(matches!(result, Err(LoginError::InvalidCredentials)));
    }
}
