use userhub_core::{Account, AccountId, AccountStore, AccountStoreError, Email};

/// Error types specific to account lookup
#[derive(Debug, thiserror::Error)]
pub enum GetAccountError {
    #[error("Account store error: {0}")]
    AccountStoreError(#[from] AccountStoreError),
}

/// Get-account use case - read-only lookups backing the fetch patterns.
pub struct GetAccountUseCase<S>
where
    S: AccountStore,
{
    account_store: S,
}

impl<S> GetAccountUseCase<S>
where
    S: AccountStore,
{
    pub fn new(account_store: S) -> Self {
        Self { account_store }
    }

    #[tracing::instrument(name = "GetAccountUseCase::by_email", skip(self))]
    pub async fn by_email(&self, email: &Email) -> Result<Account, GetAccountError> {
        Ok(self.account_store.find_by_email(email).await?)
    }

    #[tracing::instrument(name = "GetAccountUseCase::by_id", skip(self))]
    pub async fn by_id(&self, id: &AccountId) -> Result<Account, GetAccountError> {
        Ok(self.account_store.find_by_id(id).await?)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Utc};
    use secrecy::Secret;
    use userhub_core::{NewAccount, PasswordDigest, ProfileId, ResetToken};

    use super::*;

    struct MockAccountStore {
        account: Account,
    }

    #[async_trait::async_trait]
    impl AccountStore for MockAccountStore {
        async fn create(&self, _account: NewAccount) -> Result<Account, AccountStoreError> {
            unimplemented!()
        }

        async fn find_by_email(&self, email: &Email) -> Result<Account, AccountStoreError> {
            if &self.account.email == email {
                Ok(self.account.clone())
            } else {
                Err(AccountStoreError::AccountNotFound)
            }
        }

        async fn find_by_id(&self, id: &AccountId) -> Result<Account, AccountStoreError> {
            if &self.account.id == id {
                Ok(self.account.clone())
            } else {
                Err(AccountStoreError::AccountNotFound)
            }
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

    fn store() -> (MockAccountStore, AccountId) {
        let now = Utc::now();
        let id = AccountId::new();
        let store = MockAccountStore {
            account: Account {
                id,
                username: None,
                email: Email::parse("a@x.com").unwrap(),
                password_digest: None,
                profile_id: None,
                federated_access_token: None,
                reset_token: None,
                reset_token_expires_at: None,
                created_at: now,
                updated_at: now,
            },
        };
        (store, id)
    }

    #[tokio::test]
    async fn test_lookup_by_email_and_id() {
        let (store, id) = store();
        let use_case = GetAccountUseCase::new(store);

        let by_email = use_case
            .by_email(&Email::parse("a@x.com").unwrap())
            .await
            .unwrap();
        assert_eq!(by_email.id, id);

        let by_id = use_case.by_id(&id).await.unwrap();
        assert_eq!(by_id.email, Email::parse("a@x.com").unwrap());
    }

    #[tokio::test]
    async fn test_misses_are_not_found() {
        let (store, _) = store();
        let use_case = GetAccountUseCase::new(store);

        let result = use_case.by_email(&Email::parse("ghost@x.com").unwrap()).await;
        assert!(matches!(
            result,
            Err(GetAccountError::AccountStoreError(
                AccountStoreError::AccountNotFound
            ))
        ));
    }
}
