use crate::models::validation::{DomainRequest, TldResponse, ValidationResponse};
use crate::routes::AppState;
use actix_web::{HttpResponse, Responder, get, post, web};

/// # Domain Validation Endpoint
///
/// Validates a domain name: ASCII conversion, length limit, host name syntax
/// and a recognised top-level domain.
///
/// ## Responses
/// - **200 OK**: Validation result. `reason` is one of `INVALID_SYNTAX`,
///   `TOO_LONG` or `UNKNOWN_TLD` when the domain is invalid.
/// - **400 Bad Request**: Malformed JSON body
#[utoipa::path(
    post,
    path = "/api/v1/validate-domain",
    request_body = DomainRequest,
    responses(
        (status = 200, description = "Validation result", body = ValidationResponse),
        (status = 400, description = "Malformed request body")
    ),
    tag = "Domain Validation"
)]
#[post("/validate-domain")]
pub async fn validate_domain(
    req: web::Json<DomainRequest>,
    state: web::Data<AppState>,
) -> impl Responder {
    let Some(domain) = req.domain.as_deref() else {
        return HttpResponse::Ok().json(ValidationResponse::invalid(None, "INVALID_SYNTAX"));
    };

    let response = match state.domain.check(domain) {
        Ok(()) => ValidationResponse::valid(domain),
        Err(reason) => ValidationResponse::invalid(Some(domain), reason.code()),
    };
    HttpResponse::Ok().json(response)
}

/// # TLD Classification Endpoint
///
/// Reports whether a label is a recognised top-level domain and which
/// categories (`INFRASTRUCTURE`, `GENERIC`, `COUNTRY_CODE`, `LOCAL`) list it.
#[utoipa::path(
    get,
    path = "/api/v1/tld/{label}",
    params(
        ("label" = String, Path, description = "Top-level domain, with or without a leading dot")
    ),
    responses(
        (status = 200, description = "Classification result", body = TldResponse)
    ),
    tag = "Domain Validation"
)]
#[get("/tld/{label}")]
pub async fn classify_tld(path: web::Path<String>, state: web::Data<AppState>) -> impl Responder {
    let label = path.into_inner();
    let categories = state
        .domain
        .tld_categories(&label)
        .into_iter()
        .map(|category| category.name().to_string())
        .collect();

    HttpResponse::Ok().json(TldResponse {
        is_valid: state.domain.is_valid_tld(&label),
        label,
        categories,
    })
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(validate_domain).service(classify_tld);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::domain::DomainValidator;
    use crate::validation::email::EmailValidator;
    use crate::validation::tld::TldRegistry;
    use actix_web::{App, test};
    use serde_json::{Value, json};
    use std::sync::Arc;

    fn state(allow_local: bool) -> AppState {
        let domain = Arc::new(
            DomainValidator::builder()
                .allow_local(allow_local)
                .build_with(&TldRegistry::new())
                .unwrap(),
        );
        let email = Arc::new(
            EmailValidator::with_domain_validator(allow_local, false, Arc::clone(&domain))
                .unwrap(),
        );
        AppState::new(domain, email)
    }

    async fn post_domain(state: AppState, body: Value) -> Value {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .configure(configure_routes),
        )
        .await;
        let req = test::TestRequest::post()
            .uri("/validate-domain")
            .set_json(body)
            .to_request();
        test::call_and_read_body_json(&app, req).await
    }

    #[actix_web::test]
    async fn test_valid_domain() {
        let body = post_domain(state(false), json!({"domain": "example.com"})).await;
        assert_eq!(body, json!({"input": "example.com", "is_valid": true}));
    }

    #[actix_web::test]
    async fn test_invalid_domains_report_reason() {
        let body = post_domain(state(false), json!({"domain": "example.rog"})).await;
        assert_eq!(body["is_valid"], false);
        assert_eq!(body["reason"], "UNKNOWN_TLD");

        let body = post_domain(state(false), json!({"domain": "-example.com"})).await;
        assert_eq!(body["reason"], "INVALID_SYNTAX");

        let long = format!("{}.com", "a.".repeat(130));
        let body = post_domain(state(false), json!({ "domain": long })).await;
        assert_eq!(body["reason"], "TOO_LONG");
    }

    #[actix_web::test]
    async fn test_missing_domain_is_invalid() {
        let body = post_domain(state(false), json!({})).await;
        assert_eq!(body["is_valid"], false);
        assert_eq!(body["input"], Value::Null);

        let body = post_domain(state(false), json!({"domain": null})).await;
        assert_eq!(body["is_valid"], false);
    }

    #[actix_web::test]
    async fn test_allow_local_state() {
        let body = post_domain(state(true), json!({"domain": "localhost"})).await;
        assert_eq!(body["is_valid"], true);
        let body = post_domain(state(false), json!({"domain": "localhost"})).await;
        assert_eq!(body["is_valid"], false);
    }

    #[actix_web::test]
    async fn test_malformed_body() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state(false)))
                .configure(configure_routes),
        )
        .await;
        let req = test::TestRequest::post()
            .uri("/validate-domain")
            .insert_header(("content-type", "application/json"))
            .set_payload(r#"{"domain": "example.com""#)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400);
    }

    #[actix_web::test]
    async fn test_classify_tld() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state(false)))
                .configure(configure_routes),
        )
        .await;

        let req = test::TestRequest::get().uri("/tld/UK").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(
            body,
            json!({"label": "UK", "is_valid": true, "categories": ["COUNTRY_CODE"]})
        );

        let req = test::TestRequest::get().uri("/tld/localhost").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["is_valid"], false, "local TLDs need allow_local");
        assert_eq!(body["categories"], json!(["LOCAL"]));
    }
}
