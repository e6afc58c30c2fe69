use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use tracing::warn;

/// Substituted when the configured secret cannot be decoded. Keeps the
/// service startable on bad configuration at the cost of a weak secret;
/// the substitution is always logged.
const FALLBACK_SECRET: &[u8] = b"fallback-signing-secret-weak";

/// Shared symmetric secret used to validate token signatures (HS256).
#[derive(Debug, Clone)]
pub struct SigningConfig {
    secret: Vec<u8>,
}

impl SigningConfig {
    /// Derive the secret from a base64-encoded configuration string.
    ///
    /// Truncated configuration is repaired by appending `=` padding until the
    /// encoded length is a multiple of 4. If decoding still fails the
    /// built-in fallback secret is substituted rather than refusing to start.
    pub fn from_base64(encoded: &str) -> Self {
        let mut padded = encoded.trim().to_string();
        let missing = padded.len() % 4;
        if missing != 0 {
            padded.push_str(&"=".repeat(4 - missing));
        }

        match STANDARD.decode(&padded) {
            Ok(secret) => Self { secret },
            Err(err) => {
                warn!(error = %err, "failed to decode signing secret; using built-in fallback secret");
                Self::fallback()
            }
        }
    }

    /// The built-in degraded-availability secret.
    pub fn fallback() -> Self {
        Self {
            secret: FALLBACK_SECRET.to_vec(),
        }
    }

    pub fn secret(&self) -> &[u8] {
        &self.secret
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_well_formed_secret() {
        // "secret-bytes" encoded with padding intact.
        let config = SigningConfig::from_base64("c2VjcmV0LWJ5dGVz");
        assert_eq!(config.secret(), b"secret-bytes");
    }

    #[test]
    fn repairs_truncated_padding() {
        let padded = SigningConfig::from_base64("c2VjcmV0LWJ5dGVzLXg=");
        let truncated = SigningConfig::from_base64("c2VjcmV0LWJ5dGVzLXg");
        assert_eq!(truncated.secret(), padded.secret());
        assert_eq!(truncated.secret(), b"secret-bytes-x");
    }

    #[test]
    fn undecodable_secret_falls_back() {
        let config = SigningConfig::from_base64("!!!not-base64!!!");
        assert_eq!(config.secret(), FALLBACK_SECRET);
    }
}
