use std::sync::Arc;

use chrono::Utc;
use secrecy::Secret;
use serde::de::DeserializeOwned;
use serde_json::Value;
use userhub_application::NewAccountData;
use userhub_core::{
    AccountId, AccountStore, Email, Password, PasswordHasher, ProfileClient, ProfileId,
    ResetToken, TokenSigner, Username,
};

use crate::contracts::{
    AccountView, CreateAccountRequest, Envelope, FederatedLoginRequest, GetWithEmailRequest,
    GetWithIdRequest, LoginRequest, RequestResetRequest, ResetPasswordRequest,
    UpdateProfileIdRequest,
};
use crate::error::ServiceError;
use crate::service::AccountService;
use userhub_adapters::InProcessBus;

/// Every request pattern this service consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
    CreateUser,
    GetWithEmail,
    GetWithId,
    UpdateProfileId,
    UpdateRpt,
    UpdatePassword,
    ComparePassword,
    SsoLogin,
    GoogleLogin,
}

impl Pattern {
    pub const ALL: [Pattern; 9] = [
        Pattern::CreateUser,
        Pattern::GetWithEmail,
        Pattern::GetWithId,
        Pattern::UpdateProfileId,
        Pattern::UpdateRpt,
        Pattern::UpdatePassword,
        Pattern::ComparePassword,
        Pattern::SsoLogin,
        Pattern::GoogleLogin,
    ];

    pub fn wire_name(&self) -> &'static str {
        match self {
            Pattern::CreateUser => "USER_CREATE_USER",
            Pattern::GetWithEmail => "USER_GET_WITH_EMAIL",
            Pattern::GetWithId => "USER_GET_WITH_ID",
            Pattern::UpdateProfileId => "USER_UPDATE_PROFILE_ID",
            Pattern::UpdateRpt => "USER_UPDATE_RPT",
            Pattern::UpdatePassword => "USER_UPDATE_PASSWORD",
            Pattern::ComparePassword => "USER_COMPARE_PASSWORD",
            Pattern::SsoLogin => "USER_SSO_LOGIN",
            Pattern::GoogleLogin => "USER_GOOGLE_LOGIN",
        }
    }

    pub fn from_wire(name: &str) -> Option<Self> {
        Pattern::ALL.into_iter().find(|p| p.wire_name() == name)
    }
}

fn decode<T: DeserializeOwned>(payload: &Value) -> Result<T, ServiceError> {
    serde_json::from_value(payload.clone())
        .map_err(|e| ServiceError::Validation(e.to_string()))
}

/// Maps inbound patterns to lifecycle operations and normalizes every
/// outcome, success or failure, into a response envelope. Never panics a
/// consumer loop; an unhandled pattern is itself just an envelope.
pub struct Dispatcher<S, P, H, T>
where
    S: AccountStore + Clone,
    P: ProfileClient + Clone,
    H: PasswordHasher + Clone,
    T: TokenSigner + Clone,
{
    service: AccountService<S, P, H, T>,
}

impl<S, P, H, T> Dispatcher<S, P, H, T>
where
    S: AccountStore + Clone + Send + Sync + 'static,
    P: ProfileClient + Clone + Send + Sync + 'static,
    H: PasswordHasher + Clone + Send + Sync + 'static,
    T: TokenSigner + Clone + Send + Sync + 'static,
{
    pub fn new(service: AccountService<S, P, H, T>) -> Self {
        Self { service }
    }

    /// Consume all request patterns on the given bus. Each delivery is
    /// acked exactly once, after its envelope is computed and before the
    /// reply is sent, on every path.
    pub fn serve(self: Arc<Self>, bus: &InProcessBus) {
        for pattern in Pattern::ALL {
            let mut inbox = bus.subscribe(pattern.wire_name());
            let dispatcher = Arc::clone(&self);

            tokio::spawn(async move {
                while let Some(mut delivery) = inbox.recv().await {
                    let envelope = dispatcher
                        .handle(pattern.wire_name(), delivery.payload())
                        .await;
                    delivery.ack();

                    let reply = match serde_json::to_value(&envelope) {
                        Ok(value) => value,
                        Err(e) => {
                            tracing::error!(error = %e, "Failed to encode reply envelope");
                            continue;
                        }
                    };
                    if delivery.reply(reply).is_err() {
                        tracing::warn!(
                            pattern = pattern.wire_name(),
                            "Requester gone before reply"
                        );
                    }
                }
            });
        }
    }

    #[tracing::instrument(name = "Dispatcher::handle", skip(self, payload), fields(pattern = pattern))]
    pub async fn handle(&self, pattern: &str, payload: &Value) -> Envelope {
        let Some(pattern) = Pattern::from_wire(pattern) else {
            return ServiceError::Validation(format!("Unknown pattern: {pattern}"))
                .into_envelope();
        };

        let outcome = match pattern {
            Pattern::CreateUser => self.create_user(payload).await,
            Pattern::GetWithEmail => self.get_with_email(payload).await,
            Pattern::GetWithId => self.get_with_id(payload).await,
            Pattern::UpdateProfileId => self.update_profile_id(payload).await,
            Pattern::UpdateRpt => self.request_reset(payload).await,
            Pattern::UpdatePassword => self.reset_password(payload).await,
            Pattern::ComparePassword | Pattern::SsoLogin => self.login(payload).await,
            Pattern::GoogleLogin => self.google_login(payload).await,
        };

        outcome.unwrap_or_else(|error| {
            tracing::warn!(error = %error, status = error.status(), "Request failed");
            error.into_envelope()
        })
    }

    async fn create_user(&self, payload: &Value) -> Result<Envelope, ServiceError> {
        let request: CreateAccountRequest = decode(payload)?;

        let data = NewAccountData {
            username: request
                .user_fields
                .username
                .map(Username::parse)
                .transpose()?,
            email: Email::parse(request.user_fields.email)?,
            password: request
                .user_fields
                .password
                .map(|p| Password::parse(Secret::from(p)))
                .transpose()?,
            federated_access_token: request.user_fields.google_access_token.map(Secret::from),
        };

        let token = self
            .service
            .create_account(data, request.profile_fields)
            .await?;
        Ok(Envelope::with_token(token))
    }

    async fn get_with_email(&self, payload: &Value) -> Result<Envelope, ServiceError> {
        let request: GetWithEmailRequest = decode(payload)?;
        let email = Email::parse(request.email)?;

        let account = self.service.get_by_email(&email).await?;
        Ok(Envelope::with_user(AccountView::from(&account)))
    }

    async fn get_with_id(&self, payload: &Value) -> Result<Envelope, ServiceError> {
        let request: GetWithIdRequest = decode(payload)?;
        let id = AccountId::parse(&request.id)?;

        let account = self.service.get_by_id(&id).await?;
        Ok(Envelope::with_user(AccountView::from(&account)))
    }

    async fn update_profile_id(&self, payload: &Value) -> Result<Envelope, ServiceError> {
        let request: UpdateProfileIdRequest = decode(payload)?;
        let id = AccountId::parse(&request.user_id)?;
        let profile_id = ProfileId::parse(request.profile_id)?;

        let account = self.service.link_profile(id, profile_id).await?;
        Ok(Envelope::with_user(AccountView::from(&account)))
    }

    async fn request_reset(&self, payload: &Value) -> Result<Envelope, ServiceError> {
        let request: RequestResetRequest = decode(payload)?;
        let email = Email::parse(request.email)?;

        let expires_at = self.service.request_password_reset(email).await?;
        Ok(Envelope::with_reset_expiry(expires_at))
    }

    async fn reset_password(&self, payload: &Value) -> Result<Envelope, ServiceError> {
        let request: ResetPasswordRequest = decode(payload)?;
        // The claimed expiry is compared before anything else about the
        // request is considered.
        if request.rpt_expires < Utc::now() {
            return Err(ServiceError::ResetTokenExpired);
        }
        let email = Email::parse(request.email)?;
        // A token that does not even have the right shape answers exactly
        // like a token that matches nothing.
        let token = ResetToken::parse(request.reset_password_token)
            .map_err(|_| ServiceError::ResetTokenInvalid)?;
        let new_password = Password::parse(Secret::from(request.password))?;

        let account = self
            .service
            .reset_password(email, token, request.rpt_expires, new_password)
            .await?;
        Ok(Envelope::with_message_and_user(
            "USER_PASSWORD_CHANGED",
            AccountView::from(&account),
        ))
    }

    async fn login(&self, payload: &Value) -> Result<Envelope, ServiceError> {
        let request: LoginRequest = decode(payload)?;
        let email = Email::parse(request.email)?;
        // A password below the accepted minimum can never match a stored
        // digest; collapse it into the credential failure.
        let password = Password::parse(Secret::from(request.password))
            .map_err(|_| ServiceError::InvalidCredentials)?;

        let token = self.service.login(email, password).await?;
        Ok(Envelope::with_token(token))
    }

    async fn google_login(&self, payload: &Value) -> Result<Envelope, ServiceError> {
        let request: FederatedLoginRequest = decode(payload)?;
        let email = Email::parse(request.email)?;

        let token = self
            .service
            .federated_login(email, Secret::from(request.google_access_token))
            .await?;
        Ok(Envelope::with_token(token))
    }
}
