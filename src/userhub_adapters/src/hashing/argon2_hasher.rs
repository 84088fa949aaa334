use argon2::{
    Algorithm, Argon2, Params, PasswordHash, PasswordVerifier, Version,
    password_hash::{PasswordHasher as _, SaltString, rand_core},
};
use secrecy::{ExposeSecret, Secret};
use userhub_core::{CredentialError, Password, PasswordDigest, PasswordHasher};

/// Argon2id password hasher. Hashing and verification run on the blocking
/// thread pool so the async executor is never stalled by key derivation.
#[derive(Default, Clone)]
pub struct Argon2PasswordHasher;

impl Argon2PasswordHasher {
    pub fn new() -> Self {
        Argon2PasswordHasher
    }
}

fn argon2() -> Result<Argon2<'static>, String> {
    Ok(Argon2::new(
        Algorithm::Argon2id,
        Version::V0x13,
        Params::new(15000, 2, 1, None).map_err(|e| e.to_string())?,
    ))
}

#[async_trait::async_trait]
impl PasswordHasher for Argon2PasswordHasher {
    #[tracing::instrument(name = "Computing password digest", skip_all)]
    async fn hash(&self, password: &Password) -> Result<PasswordDigest, CredentialError> {
        let password = password.as_ref().clone();
        let current_span: tracing::Span = tracing::Span::current();

        let digest = tokio::task::spawn_blocking(move || {
            current_span.in_scope(move || {
                let salt: SaltString = SaltString::generate(rand_core::OsRng);
                argon2()?
                    .hash_password(password.expose_secret().as_bytes(), &salt)
                    .map(|h| Secret::from(h.to_string()))
                    .map_err(|e| e.to_string())
            })
        })
        .await
        .map_err(|e| CredentialError::HashingFailed(e.to_string()))?
        .map_err(CredentialError::HashingFailed)?;

        Ok(PasswordDigest::new(digest))
    }

    #[tracing::instrument(name = "Verifying password digest", skip_all)]
    async fn verify(
        &self,
        candidate: &Password,
        digest: &PasswordDigest,
    ) -> Result<bool, CredentialError> {
        let candidate = candidate.as_ref().clone();
        let digest = digest.as_ref().clone();
        let current_span: tracing::Span = tracing::Span::current();

        let matches = tokio::task::spawn_blocking(move || {
            current_span.in_scope(|| {
                // A digest that fails to parse can never match; treated the
                // same as a wrong password rather than a fault.
                let Ok(parsed) = PasswordHash::new(digest.expose_secret()) else {
                    return Ok(false);
                };

                argon2().map(|hasher| {
                    hasher
                        .verify_password(candidate.expose_secret().as_bytes(), &parsed)
                        .is_ok()
                })
            })
        })
        .await
        .map_err(|e| CredentialError::HashingFailed(e.to_string()))?
        .map_err(CredentialError::HashingFailed)?;

        Ok(matches)
    }
}
