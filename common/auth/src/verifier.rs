use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde_json::{Map, Value};
use tracing::debug;

use crate::claims::ClaimSet;
use crate::config::SigningConfig;
use crate::error::{AuthError, AuthResult};

/// Validates bearer tokens against the shared symmetric secret.
///
/// Verification is pure: no I/O, no per-request state. Audience and issuer
/// checks are disabled; any well-signed, unexpired token passes.
pub struct TokenVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    pub fn new(config: SigningConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_aud = false;
        Self {
            key: DecodingKey::from_secret(config.secret()),
            validation,
        }
    }

    /// Decode the token and validate signature and expiry. All failure causes
    /// collapse to [`AuthError::InvalidToken`]; on success the claim payload
    /// is returned unchanged.
    pub fn verify(&self, token: &str) -> AuthResult<ClaimSet> {
        let data = decode::<Map<String, Value>>(token, &self.key, &self.validation)
            .map_err(|err| {
                debug!(error = %err, "token verification failed");
                AuthError::InvalidToken
            })?;
        Ok(ClaimSet::new(data.claims))
    }
}
