//! Newtype identifiers for catalog entries.
//!
//! Product identifiers are human-readable slugs (e.g. `square-bites`) fixed at
//! build time. Wrapping them keeps a product id from being confused with a
//! flavor or variant label, which are also plain strings.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Stable, unique identifier of a catalog product.
///
/// ```
/// use darsi_core::ProductId;
///
/// let id = ProductId::new("kunafa-bar");
/// assert_eq!(id.as_str(), "kunafa-bar");
/// assert_eq!(id.to_string(), "kunafa-bar");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Create a product id from any string-like value.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the slug mentions `fragment` (case-sensitive).
    #[must_use]
    pub fn mentions(&self, fragment: &str) -> bool {
        self.0.contains(fragment)
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ProductId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl AsRef<str> for ProductId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_is_transparent() {
        let id = ProductId::new("big-bars");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"big-bars\"");

        let parsed: ProductId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_mentions() {
        let id = ProductId::new("photo-squarebites");
        assert!(id.mentions("bites"));
        assert!(!id.mentions("bars"));
    }
}
