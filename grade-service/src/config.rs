use anyhow::{anyhow, Context, Result};
use common_auth::SigningConfig;
use std::env;
use tracing::warn;

/// Process-wide configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct GradeConfig {
    pub database_url: String,
    pub grades_table: String,
    pub signing: SigningConfig,
    pub host: String,
    pub port: u16,
}

impl GradeConfig {
    pub fn from_env() -> Result<Self> {
        let database_url = env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

        let grades_table = env::var("GRADES_TABLE").unwrap_or_else(|_| "grades".to_string());
        validate_table_name(&grades_table)?;

        // A missing or undecodable secret degrades to the built-in fallback
        // instead of refusing to start (known weak-secret risk, deliberate).
        let signing = match env::var("AUTH_SIGNING_SECRET") {
            Ok(encoded) => SigningConfig::from_base64(&encoded),
            Err(_) => {
                warn!("AUTH_SIGNING_SECRET not set; using built-in fallback secret");
                SigningConfig::fallback()
            }
        };

        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(8094);

        Ok(Self {
            database_url,
            grades_table,
            signing,
            host,
            port,
        })
    }
}

// The table name is interpolated into SQL text, so restrict it to a bare
// identifier even though it comes from operator configuration.
fn validate_table_name(name: &str) -> Result<()> {
    let valid = !name.is_empty()
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
        && !name.starts_with(|c: char| c.is_ascii_digit());
    if valid {
        Ok(())
    } else {
        Err(anyhow!(
            "GRADES_TABLE '{name}' is not a plain SQL identifier"
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_identifiers() {
        assert!(validate_table_name("grades").is_ok());
        assert!(validate_table_name("grade_records_v2").is_ok());
    }

    #[test]
    fn rejects_quoting_and_punctuation() {
        assert!(validate_table_name("").is_err());
        assert!(validate_table_name("grades; drop table students").is_err());
        assert!(validate_table_name("\"grades\"").is_err());
        assert!(validate_table_name("1grades").is_err());
    }
}
