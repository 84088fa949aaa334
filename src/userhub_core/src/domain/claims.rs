use secrecy::ExposeSecret;

use super::account::Account;

/// The claims embedded in every access token this service issues: the same
/// shape for account creation, password login and federated login.
///
/// The signer appends the expiry; nothing here is secret to the token
/// holder, which is why the federated access token is exposed as a plain
/// string at this point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenClaims {
    pub username: Option<String>,
    pub email: String,
    pub profile_id: Option<String>,
    pub federated_access_token: Option<String>,
}

impl From<&Account> for TokenClaims {
    fn from(account: &Account) -> Self {
        Self {
            username: account.username.as_ref().map(|u| u.as_str().to_owned()),
            email: account.email.as_str().to_owned(),
            profile_id: account.profile_id.as_ref().map(|p| p.as_str().to_owned()),
            federated_access_token: account
                .federated_access_token
                .as_ref()
                .map(|t| t.expose_secret().clone()),
        }
    }
}
