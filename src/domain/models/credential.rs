use serde::{Deserialize, Serialize};

/// Value object holding an encoded password hash.
///
/// The encoding is self-describing (algorithm, cost and salt travel with the
/// digest), so the string alone is enough to verify a password later.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HashedPassword(String);

impl HashedPassword {
    /// Wrap an already encoded hash, e.g. one loaded from storage
    pub fn new(hash: String) -> Self {
        Self(hash)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl From<String> for HashedPassword {
    fn from(hash: String) -> Self {
        Self(hash)
    }
}
