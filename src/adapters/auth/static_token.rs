//! Single shared admin token, compared in constant time.
//!
//! With no token configured every request is refused: admin reads are closed by default.

use crate::ports::AdminAuthorizer;

pub struct StaticTokenAuthorizer {
    token: Option<String>,
}

impl StaticTokenAuthorizer {
    /// Empty or whitespace-only tokens count as unset.
    pub fn new(token: Option<String>) -> Self {
        let token = token
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());
        Self { token }
    }

    pub fn is_configured(&self) -> bool {
        self.token.is_some()
    }
}

impl AdminAuthorizer for StaticTokenAuthorizer {
    fn authorize(&self, credential: Option<&str>) -> bool {
        match (&self.token, credential) {
            (Some(expected), Some(given)) => constant_time_eq(expected.as_bytes(), given.as_bytes()),
            _ => false,
        }
    }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
