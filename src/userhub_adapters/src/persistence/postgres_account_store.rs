use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, Secret};
use sqlx::{Pool, Postgres};
use userhub_core::{
    Account, AccountId, AccountStore, AccountStoreError, Email, NewAccount, PasswordDigest,
    ProfileId, ResetToken,
};
use uuid::Uuid;

const ACCOUNT_COLUMNS: &str = "id, username, email, password_digest, profile_id, \
     federated_access_token, reset_token, reset_token_expires_at, created_at, updated_at";

pub struct PostgresAccountStore {
    pool: sqlx::PgPool,
}

impl PostgresAccountStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        PostgresAccountStore { pool }
    }
}

/// Raw row shape; converted into the domain `Account` after fetching.
#[derive(sqlx::FromRow)]
struct AccountRow {
    id: Uuid,
    username: Option<String>,
    email: String,
    password_digest: Option<String>,
    profile_id: Option<String>,
    federated_access_token: Option<String>,
    reset_token: Option<String>,
    reset_token_expires_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<AccountRow> for Account {
    type Error = AccountStoreError;

    fn try_from(row: AccountRow) -> Result<Self, Self::Error> {
        let unexpected = |e: String| AccountStoreError::UnexpectedError(e);

        Ok(Account {
            id: AccountId::from(row.id),
            username: row
                .username
                .map(userhub_core::Username::parse)
                .transpose()
                .map_err(|e| unexpected(e.to_string()))?,
            email: Email::parse(row.email).map_err(|e| unexpected(e.to_string()))?,
            password_digest: row
                .password_digest
                .map(|d| PasswordDigest::new(Secret::from(d))),
            profile_id: row
                .profile_id
                .map(ProfileId::parse)
                .transpose()
                .map_err(|e| unexpected(e.to_string()))?,
            federated_access_token: row.federated_access_token.map(Secret::from),
            reset_token: row
                .reset_token
                .map(ResetToken::parse)
                .transpose()
                .map_err(|e| unexpected(e.to_string()))?,
            reset_token_expires_at: row.reset_token_expires_at,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn map_insert_error(e: sqlx::Error) -> AccountStoreError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.constraint().is_some() {
            return AccountStoreError::AccountAlreadyExists;
        }
    }
    AccountStoreError::UnexpectedError(e.to_string())
}

fn map_query_error(e: sqlx::Error) -> AccountStoreError {
    AccountStoreError::UnexpectedError(e.to_string())
}

fn row_or_not_found(row: Option<AccountRow>) -> Result<Account, AccountStoreError> {
    row.ok_or(AccountStoreError::AccountNotFound)?.try_into()
}

#[async_trait::async_trait]
impl AccountStore for PostgresAccountStore {
    #[tracing::instrument(name = "Inserting account into PostgreSQL", skip_all)]
    async fn create(&self, account: NewAccount) -> Result<Account, AccountStoreError> {
        let query = format!(
            r#"
                INSERT INTO accounts (username, email, password_digest, federated_access_token)
                VALUES ($1, $2, $3, $4)
                RETURNING {ACCOUNT_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, AccountRow>(&query)
            .bind(account.username.as_ref().map(|u| u.as_str()))
            .bind(account.email.as_str())
            .bind(
                account
                    .password_digest
                    .as_ref()
                    .map(|d| d.as_ref().expose_secret().as_str()),
            )
            .bind(
                account
                    .federated_access_token
                    .as_ref()
                    .map(|t| t.expose_secret().as_str()),
            )
            .fetch_one(&self.pool)
            .await
            .map_err(map_insert_error)?;

        row.try_into()
    }

    #[tracing::instrument(name = "Fetching account by email", skip_all)]
    async fn find_by_email(&self, email: &Email) -> Result<Account, AccountStoreError> {
        let query = format!("SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE email = $1");

        let row = sqlx::query_as::<_, AccountRow>(&query)
            .bind(email.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_query_error)?;

        row_or_not_found(row)
    }

    #[tracing::instrument(name = "Fetching account by id", skip_all)]
    async fn find_by_id(&self, id: &AccountId) -> Result<Account, AccountStoreError> {
        let query = format!("SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE id = $1");

        let row = sqlx::query_as::<_, AccountRow>(&query)
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_query_error)?;

        row_or_not_found(row)
    }

    #[tracing::instrument(name = "Fetching account by reset token", skip_all)]
    async fn find_by_reset_token(
        &self,
        email: &Email,
        token: &ResetToken,
    ) -> Result<Account, AccountStoreError> {
        let query = format!(
            "SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE email = $1 AND reset_token = $2"
        );

        let row = sqlx::query_as::<_, AccountRow>(&query)
            .bind(email.as_str())
            .bind(token.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_query_error)?;

        row_or_not_found(row)
    }

    #[tracing::instrument(name = "Fetching account by federated token", skip_all)]
    async fn find_by_federated_token(
        &self,
        email: &Email,
        token: &str,
    ) -> Result<Account, AccountStoreError> {
        let query = format!(
            "SELECT {ACCOUNT_COLUMNS} FROM accounts \
             WHERE email = $1 AND federated_access_token = $2"
        );

        let row = sqlx::query_as::<_, AccountRow>(&query)
            .bind(email.as_str())
            .bind(token)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_query_error)?;

        row_or_not_found(row)
    }

    #[tracing::instrument(name = "Linking profile id", skip_all)]
    async fn set_profile_id(
        &self,
        id: &AccountId,
        profile_id: &ProfileId,
    ) -> Result<Account, AccountStoreError> {
        let query = format!(
            r#"
                UPDATE accounts
                SET profile_id = $2, updated_at = now()
                WHERE id = $1
                RETURNING {ACCOUNT_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, AccountRow>(&query)
            .bind(id.as_uuid())
            .bind(profile_id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_query_error)?;

        row_or_not_found(row)
    }

    #[tracing::instrument(name = "Setting reset token", skip_all)]
    async fn set_reset_token(
        &self,
        email: &Email,
        token: &ResetToken,
        expires_at: DateTime<Utc>,
    ) -> Result<Account, AccountStoreError> {
        let query = format!(
            r#"
                UPDATE accounts
                SET reset_token = $2, reset_token_expires_at = $3, updated_at = now()
                WHERE email = $1
                RETURNING {ACCOUNT_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, AccountRow>(&query)
            .bind(email.as_str())
            .bind(token.as_str())
            .bind(expires_at)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_query_error)?;

        row_or_not_found(row)
    }

    #[tracing::instrument(name = "Setting password digest", skip_all)]
    async fn set_password_digest(
        &self,
        id: &AccountId,
        digest: PasswordDigest,
    ) -> Result<Account, AccountStoreError> {
        // One atomic update: new digest installed, reset token consumed.
        let query = format!(
            r#"
                UPDATE accounts
                SET password_digest = $2,
                    reset_token = NULL,
                    reset_token_expires_at = now(),
                    updated_at = now()
                WHERE id = $1
                RETURNING {ACCOUNT_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, AccountRow>(&query)
            .bind(id.as_uuid())
            .bind(digest.as_ref().expose_secret().as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_query_error)?;

        row_or_not_found(row)
    }

    #[tracing::instrument(name = "Linking federated token", skip_all)]
    async fn link_federated_token(
        &self,
        id: &AccountId,
        token: Secret<String>,
    ) -> Result<Account, AccountStoreError> {
        let query = format!(
            r#"
                UPDATE accounts
                SET federated_access_token = $2, updated_at = now()
                WHERE id = $1
                RETURNING {ACCOUNT_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, AccountRow>(&query)
            .bind(id.as_uuid())
            .bind(token.expose_secret().as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_query_error)?;

        row_or_not_found(row)
    }
}
