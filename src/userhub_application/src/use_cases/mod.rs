pub mod create_account;
pub mod federated_login;
pub mod get_account;
pub mod link_profile;
pub mod login;
pub mod request_password_reset;
pub mod reset_password;
pub mod verify_credentials;

use userhub_core::{CredentialError, Password, PasswordDigest, PasswordHasher};

/// Shared credential check: an account without a digest (pure federated
/// sign-up) deterministically fails the comparison instead of erroring.
pub(crate) async fn digest_matches<H: PasswordHasher>(
    hasher: &H,
    candidate: &Password,
    digest: Option<&PasswordDigest>,
) -> Result<bool, CredentialError> {
    match digest {
        Some(digest) => hasher.verify(candidate, digest).await,
        None => Ok(false),
    }
}
