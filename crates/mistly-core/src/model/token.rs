use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user API token.
///
/// Listings return `key` masked as `abcd...wxyz`; creation returns it in full.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ApiToken {
    pub id: String,
    pub key: String,
    #[serde(default)]
    pub name: Option<String>,
    /// Seconds since the epoch.
    #[serde(default)]
    pub created_time: Option<f64>,
    #[serde(default)]
    pub last_used: Option<f64>,
}

impl ApiToken {
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_time.and_then(epoch)
    }

    pub fn last_used_at(&self) -> Option<DateTime<Utc>> {
        self.last_used.and_then(epoch)
    }
}

#[allow(clippy::cast_possible_truncation, clippy::as_conversions)]
fn epoch(secs: f64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(secs.trunc() as i64, 0)
}
