use chrono::Utc;
use jsonwebtoken::{EncodingKey, Header, encode};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use userhub_core::{TokenClaims, TokenSignError, TokenSigner};

#[derive(Clone)]
pub struct JwtConfig {
    pub jwt_secret: Secret<String>,
    pub token_ttl_in_seconds: i64,
}

impl JwtConfig {
    pub fn as_bytes(&self) -> &[u8] {
        self.jwt_secret.expose_secret().as_bytes()
    }
}

/// The wire shape of the signed claims. Absent optionals are omitted from
/// the payload rather than encoded as null.
#[derive(Debug, Serialize, Deserialize)]
pub struct JwtClaims {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    pub email: String,
    #[serde(rename = "profileId", skip_serializing_if = "Option::is_none")]
    pub profile_id: Option<String>,
    #[serde(rename = "federatedAccessToken", skip_serializing_if = "Option::is_none")]
    pub federated_access_token: Option<String>,
    pub exp: usize,
}

#[derive(Clone)]
pub struct JwtTokenSigner {
    config: JwtConfig,
}

impl JwtTokenSigner {
    pub fn new(config: JwtConfig) -> Self {
        Self { config }
    }
}

impl TokenSigner for JwtTokenSigner {
    #[tracing::instrument(name = "Signing access token", skip_all)]
    fn sign(&self, claims: TokenClaims) -> Result<String, TokenSignError> {
        let delta = chrono::Duration::try_seconds(self.config.token_ttl_in_seconds).ok_or(
            TokenSignError::SigningFailed("Failed to create token duration".to_string()),
        )?;

        let exp = Utc::now()
            .checked_add_signed(delta)
            .ok_or(TokenSignError::SigningFailed(
                "Duration out of range".to_string(),
            ))?
            .timestamp();

        let exp: usize = exp
            .try_into()
            .map_err(|_| TokenSignError::SigningFailed("Failed to cast i64 to usize".to_string()))?;

        let claims = JwtClaims {
            username: claims.username,
            email: claims.email,
            profile_id: claims.profile_id,
            federated_access_token: claims.federated_access_token,
            exp,
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.config.as_bytes()),
        )
        .map_err(|e| TokenSignError::SigningFailed(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use jsonwebtoken::{DecodingKey, Validation, decode};

    use super::*;

    fn signer(secret: &str) -> JwtTokenSigner {
        JwtTokenSigner::new(JwtConfig {
            jwt_secret: Secret::from(secret.to_string()),
            token_ttl_in_seconds: 3600,
        })
    }

    fn claims() -> TokenClaims {
        TokenClaims {
            username: Some("alice".to_string()),
            email: "alice@example.com".to_string(),
            profile_id: Some("prof-1".to_string()),
            federated_access_token: None,
        }
    }

    #[test]
    fn test_signed_token_decodes_with_the_same_secret() {
        let token = signer("test-secret").sign(claims()).unwrap();

        let decoded = decode::<JwtClaims>(
            &token,
            &DecodingKey::from_secret(b"test-secret"),
            &Validation::default(),
        )
        .unwrap();

        assert_eq!(decoded.claims.email, "alice@example.com");
        assert_eq!(decoded.claims.username.as_deref(), Some("alice"));
        assert_eq!(decoded.claims.profile_id.as_deref(), Some("prof-1"));
        assert!(decoded.claims.federated_access_token.is_none());
    }

    #[test]
    fn test_token_does_not_verify_with_a_different_secret() {
        let token = signer("test-secret").sign(claims()).unwrap();

        let decoded = decode::<JwtClaims>(
            &token,
            &DecodingKey::from_secret(b"another-secret"),
            &Validation::default(),
        );

        assert!(decoded.is_err());
    }

    #[test]
    fn test_absent_optionals_are_omitted_from_the_payload() {
        let claims = JwtClaims {
            username: None,
            email: "bare@example.com".to_string(),
            profile_id: None,
            federated_access_token: None,
            exp: 0,
        };

        let raw = serde_json::to_string(&claims).unwrap();
        assert!(!raw.contains("username"));
        assert!(!raw.contains("profileId"));
        assert!(!raw.contains("federatedAccessToken"));
    }
}
