use chrono::{DateTime, Utc};
use secrecy::Secret;
use userhub_application::{
    CreateAccountUseCase, FederatedLoginUseCase, GetAccountUseCase, LinkProfileUseCase,
    LoginUseCase, NewAccountData, RequestPasswordResetUseCase, ResetPasswordUseCase,
    VerifyCredentialsUseCase,
};
use userhub_core::{
    Account, AccountId, AccountStore, Email, Password, PasswordHasher, ProfileClient,
    ProfileDraft, ProfileId, ResetToken, TokenSigner,
};

use crate::error::ServiceError;

/// The account lifecycle service: one facade over all use cases, handed to
/// the dispatcher.
///
/// Ports implement `Clone` via internal `Arc` sharing, so each call builds
/// its use case from cheap clones instead of holding one of each.
pub struct AccountService<S, P, H, T>
where
    S: AccountStore + Clone,
    P: ProfileClient + Clone,
    H: PasswordHasher + Clone,
    T: TokenSigner + Clone,
{
    account_store: S,
    profile_client: P,
    password_hasher: H,
    token_signer: T,
}

impl<S, P, H, T> AccountService<S, P, H, T>
where
    S: AccountStore + Clone,
    P: ProfileClient + Clone,
    H: PasswordHasher + Clone,
    T: TokenSigner + Clone,
{
    pub fn new(account_store: S, profile_client: P, password_hasher: H, token_signer: T) -> Self {
        Self {
            account_store,
            profile_client,
            password_hasher,
            token_signer,
        }
    }

    pub async fn create_account(
        &self,
        data: NewAccountData,
        profile: ProfileDraft,
    ) -> Result<String, ServiceError> {
        let use_case = CreateAccountUseCase::new(
            self.account_store.clone(),
            self.profile_client.clone(),
            self.password_hasher.clone(),
            self.token_signer.clone(),
        );
        Ok(use_case.execute(data, profile).await?)
    }

    pub async fn login(&self, email: Email, password: Password) -> Result<String, ServiceError> {
        let use_case = LoginUseCase::new(
            self.account_store.clone(),
            self.password_hasher.clone(),
            self.token_signer.clone(),
        );
        Ok(use_case.execute(email, password).await?)
    }

    pub async fn federated_login(
        &self,
        email: Email,
        federated_token: Secret<String>,
    ) -> Result<String, ServiceError> {
        let use_case =
            FederatedLoginUseCase::new(self.account_store.clone(), self.token_signer.clone());
        Ok(use_case.execute(email, federated_token).await?)
    }

    pub async fn verify_credentials(
        &self,
        email: Email,
        password: Password,
    ) -> Result<bool, ServiceError> {
        let use_case = VerifyCredentialsUseCase::new(
            self.account_store.clone(),
            self.password_hasher.clone(),
        );
        Ok(use_case.execute(email, password).await?)
    }

    pub async fn request_password_reset(
        &self,
        email: Email,
    ) -> Result<DateTime<Utc>, ServiceError> {
        let use_case = RequestPasswordResetUseCase::new(self.account_store.clone());
        Ok(use_case.execute(email).await?)
    }

    pub async fn reset_password(
        &self,
        email: Email,
        token: ResetToken,
        claimed_expiry: DateTime<Utc>,
        new_password: Password,
    ) -> Result<Account, ServiceError> {
        let use_case =
            ResetPasswordUseCase::new(self.account_store.clone(), self.password_hasher.clone());
        Ok(use_case
            .execute(email, token, claimed_expiry, new_password)
            .await?)
    }

    pub async fn link_profile(
        &self,
        account_id: AccountId,
        profile_id: ProfileId,
    ) -> Result<Account, ServiceError> {
        let use_case = LinkProfileUseCase::new(self.account_store.clone());
        Ok(use_case.execute(account_id, profile_id).await?)
    }

    pub async fn get_by_email(&self, email: &Email) -> Result<Account, ServiceError> {
        let use_case = GetAccountUseCase::new(self.account_store.clone());
        Ok(use_case.by_email(email).await?)
    }

    pub async fn get_by_id(&self, id: &AccountId) -> Result<Account, ServiceError> {
        let use_case = GetAccountUseCase::new(self.account_store.clone());
        Ok(use_case.by_id(id).await?)
    }
}
