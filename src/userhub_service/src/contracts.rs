//! Wire shapes for the request/reply patterns: inbound payload DTOs and the
//! uniform response envelope. Everything here is camelCase on the wire.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use userhub_core::{Account, ProfileDraft};

/// The uniform reply shape. `status` is always present; every other field
/// appears only when the handled pattern produced it.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    pub status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<AccountView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rpt_expires: Option<DateTime<Utc>>,
}

impl Envelope {
    fn ok() -> Self {
        Self {
            status: 200,
            message: None,
            error: None,
            token: None,
            user: None,
            rpt_expires: None,
        }
    }

    pub fn with_token(token: String) -> Self {
        Self {
            token: Some(token),
            ..Self::ok()
        }
    }

    pub fn with_user(user: AccountView) -> Self {
        Self {
            user: Some(user),
            ..Self::ok()
        }
    }

    pub fn with_message_and_user(message: &str, user: AccountView) -> Self {
        Self {
            message: Some(message.to_string()),
            user: Some(user),
            ..Self::ok()
        }
    }

    pub fn with_reset_expiry(expires_at: DateTime<Utc>) -> Self {
        Self {
            message: Some("RPT SET".to_string()),
            rpt_expires: Some(expires_at),
            ..Self::ok()
        }
    }
}

/// The account as callers see it. The password digest, the reset token and
/// the federated access token never leave the service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountView {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rpt_expires: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Account> for AccountView {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id.to_string(),
            username: account.username.as_ref().map(|u| u.as_str().to_owned()),
            email: account.email.as_str().to_owned(),
            profile_id: account.profile_id.as_ref().map(|p| p.as_str().to_owned()),
            rpt_expires: account.reset_token_expires_at,
            created_at: account.created_at,
            updated_at: account.updated_at,
        }
    }
}

/// `USER_CREATE_USER` payload: account fields plus the profile fields that
/// are forwarded verbatim to the profile service.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAccountRequest {
    pub user_fields: UserFields,
    pub profile_fields: ProfileDraft,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserFields {
    #[serde(default)]
    pub username: Option<String>,
    pub email: String,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub google_access_token: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct GetWithEmailRequest {
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct GetWithIdRequest {
    pub id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileIdRequest {
    pub user_id: String,
    pub profile_id: String,
}

#[derive(Debug, Deserialize)]
pub struct RequestResetRequest {
    pub email: String,
}

/// `USER_UPDATE_PASSWORD` payload. `rpt_expires` is the expiry the caller
/// was handed at issuance; a stale value is rejected before any lookup.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    pub email: String,
    pub reset_password_token: String,
    pub rpt_expires: DateTime<Utc>,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FederatedLoginRequest {
    pub email: String,
    pub google_access_token: String,
}
