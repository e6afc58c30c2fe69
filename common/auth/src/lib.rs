pub mod claims;
pub mod config;
pub mod error;
pub mod extractors;
pub mod verifier;

pub use claims::ClaimSet;
pub use config::SigningConfig;
pub use error::{AuthError, AuthResult};
pub use extractors::AuthContext;
pub use verifier::TokenVerifier;
