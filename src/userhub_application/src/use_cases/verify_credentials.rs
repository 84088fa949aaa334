use userhub_core::{
    AccountStore, AccountStoreError, CredentialError, Email, Password, PasswordHasher,
};

use super::digest_matches;

/// Error types specific to credential verification
#[derive(Debug, thiserror::Error)]
pub enum VerifyCredentialsError {
    #[error("Account store error: {0}")]
    AccountStoreError(#[from] AccountStoreError),
    #[error("Credential error: {0}")]
    CredentialError(#[from] CredentialError),
}

/// Verify-credentials use case - the raw boolean password check.
///
/// A mismatch is a normal `Ok(false)` answer; only an unknown email or a
/// hashing fault is an error. Accounts without a digest always answer
/// `false`.
pub struct VerifyCredentialsUseCase<S, H>
where
    S: AccountStore,
    H: PasswordHasher,
{
    account_store: S,
    password_hasher: H,
}

impl<S, H> VerifyCredentialsUseCase<S, H>
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

    #[tracing::instrument(name = "VerifyCredentialsUseCase::execute", skip(self, password))]
    pub async fn execute(
        &self,
        email: Email,
        password: Password,
    ) -> Result<bool, VerifyCredentialsError> {
        let account = self.account_store.find_by_email(&email).await?;
        Ok(digest_matches(&self.password_hasher, &password, account.password_digest.as_ref())
            .await?)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Utc};
    use secrecy::{ExposeSecret, Secret};
    use userhub_core::{
        Account, AccountId, NewAccount, PasswordDigest, ProfileId, ResetToken,
    };

    use super::*;

    struct MockAccountStore {
        account: Option<Account>,
    }

    #[async_trait::async_trait]
    impl AccountStore for MockAccountStore {
        async fn create(&self, _account: NewAccount) -> Result<Account, AccountStoreError> {
            unimplemented!()
        }

        async fn find_by_email(&self, _email: &Email) -> Result<Account, AccountStoreError> {
            self.account.clone().ok_or(AccountStoreError::AccountNotFound)
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

    fn account(digest: Option<&str>) -> Account {
        let now = Utc::now();
        Account {
            id: AccountId::new(),
            username: None,
            email: Email::parse("a@x.com").unwrap(),
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
    async fn test_matching_password_verifies_true() {
        let store = MockAccountStore {
            account: Some(account(Some("digest:right-password"))),
        };
        let use_case = VerifyCredentialsUseCase::new(store, MockHasher);

        let result = use_case
            .execute(Email::parse("a@x.com").unwrap(), password("right-password"))
            .await
            .unwrap();
        assert!(result);
    }

    #[tokio::test]
    async fn test_wrong_password_verifies_false_without_error() {
        let store = MockAccountStore {
            account: Some(account(Some("digest:right-password"))),
        };
        let use_case = VerifyCredentialsUseCase::new(store, MockHasher);

        let result = use_case
            .execute(Email::parse("a@x.com").unwrap(), password("wrong-password"))
            .await
            .unwrap();
        assert!(!result);
    }

    #[tokio::test]
    async fn test_digestless_account_verifies_false_never_errors() {
        let store = MockAccountStore {
            account: Some(account(None)),
        };
        let use_case = VerifyCredentialsUseCase::new(store, MockHasher);

        let result = use_case
            .execute(Email::parse("a@x.com").unwrap(), password("any-password"))
            .await
            .unwrap();
        assert!(!result);
    }

    #[tokio::test]
    async fn test_unknown_email_is_not_found() {
        let store = MockAccountStore { account: None };
        let use_case = VerifyCredentialsUseCase::new(store, MockHasher);

        let result = use_case
            .execute(Email::parse("a@x.com").unwrap(), password("any-password"))
            .await;
        assert!(matches!(
            result,
            Err(VerifyCredentialsError::AccountStoreError(
                AccountStoreError::AccountNotFound
            ))
        ));
    }
}
