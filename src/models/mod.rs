/// # Health Status Response
///
/// Represents the operational status of the service with a timestamp and the
/// state of the TLD override registry.
///
/// ## Example JSON
/// ```json
/// {
///   "status": "UP",
///   "timestamp": "2024-03-10T15:30:45.123456789Z",
///   "registry_locked": true
/// }
/// ```
pub mod health;

/// Request and response records of the validation endpoints.
pub mod validation;
