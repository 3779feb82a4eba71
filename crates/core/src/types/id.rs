//! Product identifiers.

use core::fmt;

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Identifier of a catalog product.
///
/// Generated from the creation time in milliseconds plus a random offset in
/// `0..=999`. Two products created less than 1000 ms apart can collide; the
/// store resolves lookups to the first match, so IDs are treated as
/// "practically unique", not as a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(i64);

impl ProductId {
    /// Largest random offset added to the timestamp.
    pub const MAX_JITTER: i64 = 999;

    /// Create an ID from a raw value.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Generate an ID for a product created at `now`.
    #[must_use]
    pub fn generate(now: DateTime<Utc>) -> Self {
        let jitter = rand::rng().random_range(0..=Self::MAX_JITTER);
        Self(now.timestamp_millis().saturating_add(jitter))
    }

    /// Get the underlying value.
    #[must_use]
    pub const fn as_i64(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for ProductId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<ProductId> for i64 {
    fn from(id: ProductId) -> Self {
        id.0
    }
}
