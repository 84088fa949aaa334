use std::sync::Arc;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use secrecy::{ExposeSecret, Secret};
use userhub_core::{
    Account, AccountId, AccountStore, AccountStoreError, Email, NewAccount, PasswordDigest,
    ProfileId, ResetToken,
};

/// In-memory account store for tests and local wiring.
///
/// Uniqueness checks are linear scans; fine at the scale this adapter is
/// meant for.
#[derive(Default, Clone)]
pub struct InMemoryAccountStore {
    accounts: Arc<DashMap<AccountId, Account>>,
}

impl InMemoryAccountStore {
    pub fn new() -> Self {
        Self {
            accounts: Arc::new(DashMap::new()),
        }
    }

    fn find(&self, predicate: impl Fn(&Account) -> bool) -> Result<Account, AccountStoreError> {
        self.accounts
            .iter()
            .find(|entry| predicate(entry.value()))
            .map(|entry| entry.value().clone())
            .ok_or(AccountStoreError::AccountNotFound)
    }

    fn update(
        &self,
        id: &AccountId,
        mutate: impl FnOnce(&mut Account),
    ) -> Result<Account, AccountStoreError> {
        let mut entry = self
            .accounts
            .get_mut(id)
            .ok_or(AccountStoreError::AccountNotFound)?;
        mutate(entry.value_mut());
        entry.updated_at = Utc::now();
        Ok(entry.value().clone())
    }
}

#[async_trait::async_trait]
impl AccountStore for InMemoryAccountStore {
    async fn create(&self, account: NewAccount) -> Result<Account, AccountStoreError> {
        let collision = self.accounts.iter().any(|existing| {
            existing.email == account.email
                || (account.username.is_some() && existing.username == account.username)
        });
        if collision {
            return Err(AccountStoreError::AccountAlreadyExists);
        }

        let now = Utc::now();
        let account = Account {
            id: AccountId::new(),
            username: account.username,
            email: account.email,
            password_digest: account.password_digest,
            profile_id: None,
            federated_access_token: account.federated_access_token,
            reset_token: None,
            reset_token_expires_at: None,
            created_at: now,
            updated_at: now,
        };
        self.accounts.insert(account.id, account.clone());
        Ok(account)
    }

    async fn find_by_email(&self, email: &Email) -> Result<Account, AccountStoreError> {
        self.find(|a| &a.email == email)
    }

    async fn find_by_id(&self, id: &AccountId) -> Result<Account, AccountStoreError> {
        self.accounts
            .get(id)
            .map(|entry| entry.value().clone())
            .ok_or(AccountStoreError::AccountNotFound)
    }

    async fn find_by_reset_token(
        &self,
        email: &Email,
        token: &ResetToken,
    ) -> Result<Account, AccountStoreError> {
        self.find(|a| &a.email == email && a.reset_token.as_ref() == Some(token))
    }

    async fn find_by_federated_token(
        &self,
        email: &Email,
        token: &str,
    ) -> Result<Account, AccountStoreError> {
        self.find(|a| {
            &a.email == email
                && a.federated_access_token
                    .as_ref()
                    .is_some_and(|t| t.expose_secret() == token)
        })
    }

    async fn set_profile_id(
        &self,
        id: &AccountId,
        profile_id: &ProfileId,
    ) -> Result<Account, AccountStoreError> {
        self.update(id, |account| {
            account.profile_id = Some(profile_id.clone());
        })
    }

    async fn set_reset_token(
        &self,
        email: &Email,
        token: &ResetToken,
        expires_at: DateTime<Utc>,
    ) -> Result<Account, AccountStoreError> {
        let id = self.find(|a| &a.email == email)?.id;
        self.update(&id, |account| {
            account.reset_token = Some(token.clone());
            account.reset_token_expires_at = Some(expires_at);
        })
    }

    async fn set_password_digest(
        &self,
        id: &AccountId,
        digest: PasswordDigest,
    ) -> Result<Account, AccountStoreError> {
        self.update(id, |account| {
            account.password_digest = Some(digest);
            account.reset_token = None;
            account.reset_token_expires_at = Some(Utc::now());
        })
    }

    async fn link_federated_token(
        &self,
        id: &AccountId,
        token: Secret<String>,
    ) -> Result<Account, AccountStoreError> {
        self.update(id, |account| {
            account.federated_access_token = Some(token);
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use userhub_core::Username;

    use super::*;

    fn new_account(email: &str, username: Option<&str>) -> NewAccount {
        NewAccount {
            username: username.map(|u| Username::parse(u).unwrap()),
            email: Email::parse(email).unwrap(),
            password_digest: Some(PasswordDigest::new(Secret::from("digest".to_string()))),
            federated_access_token: None,
        }
    }

    #[tokio::test]
    async fn test_create_assigns_id_and_timestamps() {
        use fake::{Fake, faker::internet::en::SafeEmail};

        let store = InMemoryAccountStore::new();
        let email: String = SafeEmail().fake();
        let account = store.create(new_account(&email, Some("alice"))).await.unwrap();

        assert_eq!(account.email, Email::parse(email).unwrap());
        assert!(account.profile_id.is_none());
        assert_eq!(account.created_at, account.updated_at);
        assert_eq!(store.find_by_id(&account.id).await.unwrap().id, account.id);
    }

    #[tokio::test]
    async fn test_duplicate_email_or_username_conflicts() {
        let store = InMemoryAccountStore::new();
        store.create(new_account("a@x.com", Some("alice"))).await.unwrap();

        let same_email = store.create(new_account("a@x.com", Some("other"))).await;
        assert_eq!(same_email.unwrap_err(), AccountStoreError::AccountAlreadyExists);

        let same_username = store.create(new_account("b@x.com", Some("alice"))).await;
        assert_eq!(
            same_username.unwrap_err(),
            AccountStoreError::AccountAlreadyExists
        );

        // No username supplied: only the email can collide.
        assert!(store.create(new_account("c@x.com", None)).await.is_ok());
        assert!(store.create(new_account("d@x.com", None)).await.is_ok());
    }

    #[tokio::test]
    async fn test_reset_token_lifecycle() {
        let store = InMemoryAccountStore::new();
        let email = Email::parse("a@x.com").unwrap();
        let account = store.create(new_account("a@x.com", None)).await.unwrap();

        let token = ResetToken::parse("123456").unwrap();
        let expires_at = Utc::now() + Duration::hours(24);
        store.set_reset_token(&email, &token, expires_at).await.unwrap();

        let found = store.find_by_reset_token(&email, &token).await.unwrap();
        assert_eq!(found.id, account.id);

        // Consuming the token clears it and stamps the expiry with now.
        let digest = PasswordDigest::new(Secret::from("digest:new".to_string()));
        let updated = store.set_password_digest(&account.id, digest).await.unwrap();
        assert!(updated.reset_token.is_none());
        assert!(updated.reset_token_expires_at.unwrap() <= Utc::now());

        let replay = store.find_by_reset_token(&email, &token).await;
        assert_eq!(replay.unwrap_err(), AccountStoreError::AccountNotFound);
    }

    #[tokio::test]
    async fn test_updates_without_a_match_do_not_upsert() {
        let store = InMemoryAccountStore::new();
        let missing = AccountId::new();

        let result = store
            .set_profile_id(&missing, &ProfileId::parse("p1").unwrap())
            .await;
        assert_eq!(result.unwrap_err(), AccountStoreError::AccountNotFound);

        let result = store
            .set_reset_token(
                &Email::parse("ghost@x.com").unwrap(),
                &ResetToken::parse("123456").unwrap(),
                Utc::now(),
            )
            .await;
        assert_eq!(result.unwrap_err(), AccountStoreError::AccountNotFound);
        assert!(store.accounts.is_empty());
    }

    #[tokio::test]
    async fn test_federated_token_lookup_and_linking() {
        let store = InMemoryAccountStore::new();
        let email = Email::parse("sso@x.com").unwrap();
        let account = store.create(new_account("sso@x.com", None)).await.unwrap();

        let miss = store.find_by_federated_token(&email, "goog-1").await;
        assert_eq!(miss.unwrap_err(), AccountStoreError::AccountNotFound);

        store
            .link_federated_token(&account.id, Secret::from("goog-1".to_string()))
            .await
            .unwrap();

        let hit = store.find_by_federated_token(&email, "goog-1").await.unwrap();
        assert_eq!(hit.id, account.id);
    }
}
