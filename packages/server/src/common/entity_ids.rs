//! Typed ID definitions for domain entities.
//!
//! Listings use store-assigned `BIGSERIAL` keys, and the same number travels
//! through Slack as the approval token. Wrapping it keeps a raw `i64` (a page
//! size, a count) from being passed where a listing id was expected.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::str::FromStr;

/// Typed ID for Listing entities (rows of the `restaurants` table).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, sqlx::Type,
)]
#[serde(transparent)]
#[sqlx(transparent)]
pub struct ListingId(i64);

impl ListingId {
    #[inline]
    pub fn from_i64(id: i64) -> Self {
        Self(id)
    }

    #[inline]
    pub fn into_inner(self) -> i64 {
        self.0
    }
}

impl Display for ListingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Parses the decimal form produced by `Display`. Signs, whitespace and
/// values past `i64::MAX` are rejected.
impl FromStr for ListingId {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            anyhow::bail!("Invalid listing id: {:?}", s);
        }
        let id: i64 = s
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid listing id {:?}: {}", s, e))?;
        Ok(Self(id))
    }
}
