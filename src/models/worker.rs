//! Worker (natural person) model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A natural person identified by a national resident registration number.
///
/// One worker may hold multiple [`Employment`](super::Employment) records
/// across different businesses or time spans; the resident number is the
/// unique key across the whole system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Worker {
    /// Stable identifier.
    pub id: String,
    /// Full name.
    pub name: String,
    /// 13-digit resident registration number; the system-wide unique key.
    pub resident_no: String,
    /// Nationality code ("100" = domestic).
    #[serde(default)]
    pub nationality: Option<String>,
    /// Contact phone number.
    #[serde(default)]
    pub phone: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}
