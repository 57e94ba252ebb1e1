use utoipa::OpenApi;

/// OpenAPI Specification Documentation
///
/// Defines the API contract using OpenAPI 3.0 format with utoipa procedural macros.
///
/// # Endpoints
/// - Health Check: `GET /health`
/// - Domain Validation: `POST /validate-domain`, `GET /tld/{label}`, `GET /tlds/{table}`
/// - Email Validation: `POST /validate-email`, `POST /validate-emails-bulk`
///
/// # Tags
/// 1. **Health Check**: Service monitoring endpoints
/// 2. **Domain Validation**: Domain names and top-level domains
/// 3. **Email Validation**: Email address syntax checks
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health::health,
        crate::routes::domain::validate_domain,
        crate::routes::domain::classify_tld,
        crate::routes::tld::tld_table,
        crate::routes::email::validate_email,
        crate::routes::email::validate_emails_bulk,
    ),
    components(
        schemas(
            crate::models::health::HealthResponse,
            crate::models::validation::DomainRequest,
            crate::models::validation::EmailRequest,
            crate::models::validation::BulkEmailRequest,
            crate::models::validation::ValidationResponse,
            crate::models::validation::BulkEmailValidationResult,
            crate::models::validation::BulkEmailValidationResponse,
            crate::models::validation::TldResponse,
            crate::models::validation::TldTableResponse,
        )
    ),
    tags(
        (name = "Health Check", description = "Service health monitoring endpoints"),
        (name = "Domain Validation", description = "Domain name and TLD validation endpoints"),
        (name = "Email Validation", description = "Email address validation endpoints")
    ),
    info(
        description = "Syntax validation of domain names and email addresses against the IANA TLD lists",
        title = "Domain Validator API",
        version = "0.1.0",
    )
)]
pub struct ApiDoc;
