use crate::models::validation::{
    BulkEmailRequest, BulkEmailValidationResponse, BulkEmailValidationResult, EmailRequest,
    ValidationResponse,
};
use crate::routes::AppState;
use crate::validation::email::{EmailRejection, EmailValidator};
use actix_web::{HttpResponse, Responder, post, web};

/// # Email Validation Endpoint
///
/// Validates an email address:
/// 1. Overall `user@domain` structure, no trailing dot
/// 2. User part syntax and length (max 64 characters)
/// 3. Domain part as a domain name with a recognised TLD, or as a bracketed
///    IP address literal
///
/// ## Responses
/// - **200 OK**: Validation result. `reason` is one of `INVALID_SYNTAX`,
///   `INVALID_USER`, `INVALID_DOMAIN` or `INVALID_IP_LITERAL` when invalid.
/// - **400 Bad Request**: Malformed JSON body
#[utoipa::path(
    post,
    path = "/api/v1/validate-email",
    request_body = EmailRequest,
    responses(
        (status = 200, description = "Validation result", body = ValidationResponse),
        (status = 400, description = "Malformed request body")
    ),
    tag = "Email Validation"
)]
#[post("/validate-email")]
pub async fn validate_email(
    req: web::Json<EmailRequest>,
    state: web::Data<AppState>,
) -> impl Responder {
    let response = match req.email.as_deref() {
        Some(email) => validate_single_email(&state.email, email),
        None => ValidationResponse::invalid(None, EmailRejection::InvalidSyntax.code()),
    };
    HttpResponse::Ok().json(response)
}

/// # Bulk Email Validation Endpoint
///
/// Validates every address of the batch and reports per-address results
/// together with valid and invalid counts.
///
/// ## Example Request
/// ```json
/// { "emails": ["user1@example.com", "user2@example.com"] }
/// ```
#[utoipa::path(
    post,
    path = "/api/v1/validate-emails-bulk",
    request_body = BulkEmailRequest,
    responses(
        (status = 200, description = "Bulk validation results", body = BulkEmailValidationResponse),
        (status = 400, description = "Malformed request body")
    ),
    tag = "Email Validation"
)]
#[post("/validate-emails-bulk")]
pub async fn validate_emails_bulk(
    req: web::Json<BulkEmailRequest>,
    state: web::Data<AppState>,
) -> impl Responder {
    let results: Vec<BulkEmailValidationResult> = req
        .emails
        .iter()
        .map(|email| BulkEmailValidationResult {
            email: email.clone(),
            validation: validate_single_email(&state.email, email),
        })
        .collect();
    let valid_count = results.iter().filter(|r| r.validation.is_valid).count();

    HttpResponse::Ok().json(BulkEmailValidationResponse {
        invalid_count: results.len() - valid_count,
        valid_count,
        results,
    })
}

pub fn validate_single_email(validator: &EmailValidator, email: &str) -> ValidationResponse {
    match validator.check(email) {
        Ok(()) => ValidationResponse::valid(email),
        Err(reason) => ValidationResponse::invalid(Some(email), reason.code()),
    }
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(validate_email).service(validate_emails_bulk);
}
