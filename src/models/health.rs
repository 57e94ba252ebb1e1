use chrono::Utc;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// # Health Status Response
///
/// Represents the operational status of the service with a timestamp.
///
/// ## Fields
/// - `status`: String indicating service availability ("UP" or "DOWN")
/// - `timestamp`: ISO 8601 formatted timestamp of the status check
/// - `registry_locked`: Whether the TLD overrides have been frozen
///
/// ## Example JSON
/// ```json
/// {
///   "status": "UP",
///   "timestamp": "2024-03-10T15:30:45.123456789Z",
///   "registry_locked": true
/// }
/// ```
#[derive(Serialize, Debug, PartialEq, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub registry_locked: bool,
}

impl HealthResponse {
    pub fn up(registry_locked: bool) -> Self {
        Self {
            status: "UP".to_string(),
            timestamp: Utc::now().to_rfc3339(),
            registry_locked,
        }
    }
}
