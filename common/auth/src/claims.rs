use serde::Serialize;
use serde_json::{Map, Value};

/// Decoded payload of a verified token. The service treats claim contents as
/// opaque: any well-signed, unexpired token is accepted regardless of subject
/// or role, and the claims are dropped once the request completes.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ClaimSet(Map<String, Value>);

impl ClaimSet {
    pub fn new(claims: Map<String, Value>) -> Self {
        Self(claims)
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}
