use crate::validation::domain::DomainValidator;
use crate::validation::email::EmailValidator;
use crate::validation::tld::{TldTable, base_entries};
use actix_web::web;
use std::sync::Arc;

/// # Health Check Endpoint
///
/// Returns the current health status of the service along with a timestamp
/// and whether the TLD overrides are locked.
pub mod health;

/// # Domain Validation Endpoints
///
/// - `POST /validate-domain`: validates a domain name
/// - `GET /tld/{label}`: classifies a top-level domain label
///
/// ## Example Request
/// ```json
/// { "domain": "example.com" }
/// ```
pub mod domain;

/// # Email Validation Endpoints
///
/// - `POST /validate-email`: validates one email address
/// - `POST /validate-emails-bulk`: validates a batch of addresses
///
/// ## Example Request
/// ```json
/// { "email": "user@example.com" }
/// ```
pub mod email;

/// # TLD Table Endpoint
///
/// `GET /tlds/{table}` returns a copy of one of the TLD tables, e.g.
/// `GENERIC_RO` or `COUNTRY_CODE_PLUS`.
pub mod tld;

/// Validators shared by all workers.
#[derive(Debug, Clone)]
pub struct AppState {
    pub domain: Arc<DomainValidator>,
    pub email: Arc<EmailValidator>,
}

impl AppState {
    pub fn new(domain: Arc<DomainValidator>, email: Arc<EmailValidator>) -> Self {
        Self { domain, email }
    }

    /// Uses the shared validator instances, locking the TLD registry.
    pub fn shared(allow_local: bool, allow_tld: bool) -> Self {
        Self::new(
            DomainValidator::instance(allow_local),
            EmailValidator::instance(allow_local, allow_tld),
        )
    }

    /// Entries of `table` as seen by this service's domain validator.
    pub fn table_entries(&self, table: TldTable) -> Vec<String> {
        if table.is_read_only() {
            return base_entries(table.category());
        }
        self.domain.overrides(table).unwrap_or_default()
    }
}

/// # API Route Configuration
///
/// Sets up versioned API endpoints under the `/api/v1` base path.
///
/// ## Example Endpoints
///
/// ```text
/// GET  /api/v1/health              - Service health status
/// POST /api/v1/validate-domain     - Domain validation
/// GET  /api/v1/tld/{label}         - TLD classification
/// POST /api/v1/validate-email      - Email validation
/// POST /api/v1/validate-emails-bulk - Bulk email validation
/// GET  /api/v1/tlds/{table}        - TLD table contents
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(health::configure_routes)
            .configure(domain::configure_routes)
            .configure(email::configure_routes)
            .configure(tld::configure_routes),
    );
}
