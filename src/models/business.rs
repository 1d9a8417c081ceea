//! Business (employer entity) model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An employer entity that workers are employed under.
///
/// The identifier is immutable; metadata is mutable. A business is never
/// deleted while dependent employments exist (enforced by the persistence
/// collaborator, not this crate).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Business {
    /// Stable identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Business registration number.
    pub registration_no: String,
    /// National pension scheme management number, if registered.
    #[serde(default)]
    pub pension_mgmt_no: Option<String>,
    /// Health insurance scheme management number, if registered.
    #[serde(default)]
    pub health_mgmt_no: Option<String>,
    /// Employment insurance scheme management number, if registered.
    #[serde(default)]
    pub employment_mgmt_no: Option<String>,
    /// Industrial accident scheme management number, if registered.
    #[serde(default)]
    pub accident_mgmt_no: Option<String>,
    /// Postal address.
    #[serde(default)]
    pub address: Option<String>,
    /// Contact phone number.
    #[serde(default)]
    pub phone: Option<String>,
    /// Default job classification code applied to new employments.
    #[serde(default)]
    pub default_job_code: Option<String>,
    /// Default contracted weekly hours applied to new employments.
    #[serde(default)]
    pub default_weekly_hours: Option<u32>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_minimal_business() {
        let json = r#"{
            "id": "biz-bupyeong",
            "name": "부평점",
            "registration_no": "123-45-67890",
            "created_at": "2025-01-01T00:00:00Z",
            "updated_at": "2025-01-01T00:00:00Z"
        }"#;

        let business: Business = serde_json::from_str(json).unwrap();
        assert_eq!(business.id, "biz-bupyeong");
        assert_eq!(business.default_job_code, None);
        assert_eq!(business.default_weekly_hours, None);
    }

    #[test]
    fn test_serialize_round_trip() {
        let business = Business {
            id: "biz-001".to_string(),
            name: "강동점".to_string(),
            registration_no: "111-22-33333".to_string(),
            pension_mgmt_no: Some("NP-001".to_string()),
            health_mgmt_no: None,
            employment_mgmt_no: Some("EI-001".to_string()),
            accident_mgmt_no: None,
            address: None,
            phone: None,
            default_job_code: Some("532".to_string()),
            default_weekly_hours: Some(40),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let json = serde_json::to_string(&business).unwrap();
        let back: Business = serde_json::from_str(&json).unwrap();
        assert_eq!(business, back);
    }
}
