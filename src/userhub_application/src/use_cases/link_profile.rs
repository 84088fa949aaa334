use userhub_core::{Account, AccountId, AccountStore, AccountStoreError, ProfileId};

/// Error types specific to profile linking
#[derive(Debug, thiserror::Error)]
pub enum LinkProfileError {
    #[error("Account store error: {0}")]
    AccountStoreError(#[from] AccountStoreError),
}

/// Link-profile use case - points an account at its profile record.
///
/// A single direct store update: last write wins, and re-linking the same
/// profile id is an idempotent no-op.
pub struct LinkProfileUseCase<S>
where
    S: AccountStore,
{
    account_store: S,
}

impl<S> LinkProfileUseCase<S>
where
    S: AccountStore,
{
    pub fn new(account_store: S) -> Self {
        Self { account_store }
    }

    #[tracing::instrument(name = "LinkProfileUseCase::execute", skip(self))]
    pub async fn execute(
        &self,
        account_id: AccountId,
        profile_id: ProfileId,
    ) -> Result<Account, LinkProfileError> {
        Ok(self
            .account_store
            .set_profile_id(&account_id, &profile_id)
            .await?)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::{DateTime, Utc};
    use secrecy::Secret;
    use tokio::sync::RwLock;
    use userhub_core::{Email, NewAccount, PasswordDigest, ResetToken};

    use super::*;

    #[derive(Clone)]
    struct MockAccountStore {
        account: Arc<RwLock<Account>>,
    }

    #[async_trait::async_trait]
    impl AccountStore for MockAccountStore {
        async fn create(&self, _account: NewAccount) -> Result<Account, AccountStoreError> {
            unimplemented!()
        }

        async fn find_by_email(&self, _email: &Email) -> Result<Account, AccountStoreError> {
            unimplemented!()
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
            id: &AccountId,
            profile_id: &ProfileId,
        ) -> Result<Account, AccountStoreError> {
            let mut account = self.account.write().await;
            if &account.id != id {
                return Err(AccountStoreError::AccountNotFound);
            }
            account.profile_id = Some(profile_id.clone());
            account.updated_at = Utc::now();
            Ok(account.clone())
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
            account: Arc::new(RwLock::new(Account {
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
            })),
        };
        (store, id)
    }

    #[tokio::test]
    async fn test_links_the_profile() {
        let (store, id) = store();
        let use_case = LinkProfileUseCase::new(store);

        let account = use_case
            .execute(id, ProfileId::parse("p1").unwrap())
            .await
            .unwrap();
        assert_eq!(account.profile_id, Some(ProfileId::parse("p1").unwrap()));
    }

    #[tokio::test]
    async fn test_relinking_the_same_profile_is_idempotent() {
        let (store, id) = store();
        let use_case = LinkProfileUseCase::new(store);
        let profile_id = ProfileId::parse("p1").unwrap();

        let first = use_case.execute(id, profile_id.clone()).await.unwrap();
        let second = use_case.execute(id, profile_id.clone()).await.unwrap();

        assert_eq!(first.profile_id, second.profile_id);
        assert_eq!(second.profile_id, Some(profile_id));
    }

    #[tokio::test]
    async fn test_unknown_account_is_not_found() {
        let (store, _) = store();
        let use_case = LinkProfileUseCase::new(store);

        let result = use_case
            .execute(AccountId::new(), ProfileId::parse("p1").unwrap())
            .await;
        assert!(matches!(
            result,
            Err(LinkProfileError::AccountStoreError(
                AccountStoreError::AccountNotFound
            ))
        ));
    }
}
