use std::collections::HashMap;

use crate::config::CredentialEntry;
use crate::models::{Identity, UserId};

/// Maps a presented credential to the user it belongs to.
pub trait CredentialResolver: Send + Sync {
    /// `None` means the credential is unknown and the request must be rejected.
    fn resolve(&self, credential: &str) -> Option<Identity>;
}

/// Fixed in-memory token table. Exact match only: no case folding, no
/// prefixes, no expiry.
#[derive(Debug, Clone)]
pub struct StaticCredentials {
    tokens: HashMap<String, UserId>,
}

impl StaticCredentials {
    pub fn new(tokens: HashMap<String, UserId>) -> Self {
        Self { tokens }
    }

    pub fn from_entries(entries: &[CredentialEntry]) -> Self {
        Self::new(
            entries
                .iter()
                .map(|e| (e.token.clone(), e.user_id))
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl Default for StaticCredentials {
    fn default() -> Self {
        Self::new(HashMap::from([
            ("token1".to_string(), 1),
            ("token2".to_string(), 2),
        ]))
    }
}

impl CredentialResolver for StaticCredentials {
    fn resolve(&self, credential: &str) -> Option<Identity> {
        self.tokens
            .get(credential)
            .map(|&user_id| Identity { user_id })
    }
}
