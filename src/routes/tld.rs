use crate::models::validation::TldTableResponse;
use crate::routes::AppState;
use crate::validation::tld::TldTable;
use actix_web::{HttpResponse, Responder, get, web};
use serde_json::json;

/// # TLD Table Endpoint
///
/// Returns a copy of one TLD table. Read-only tables hold the compiled-in
/// lists, the others the overrides in effect for this service.
///
/// ## Responses
/// - **200 OK**: Table contents
/// - **404 Not Found**: Unknown table name
#[utoipa::path(
    get,
    path = "/api/v1/tlds/{table}",
    params(
        ("table" = String, Path, description = "Table name, e.g. GENERIC_PLUS or COUNTRY_CODE_RO")
    ),
    responses(
        (status = 200, description = "Table contents", body = TldTableResponse),
        (status = 404, description = "Unknown table")
    ),
    tag = "Domain Validation"
)]
#[get("/tlds/{table}")]
pub async fn tld_table(path: web::Path<String>, state: web::Data<AppState>) -> impl Responder {
    match path.parse::<TldTable>() {
        Ok(table) => HttpResponse::Ok().json(TldTableResponse {
            table: table.name().to_string(),
            entries: state.table_entries(table),
        }),
        Err(err) => {
            tracing::debug!(table = %path.as_str(), "unknown TLD table requested");
            HttpResponse::NotFound().json(json!({ "error": err.to_string() }))
        }
    }
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(tld_table);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::domain::DomainValidator;
    use crate::validation::email::EmailValidator;
    use crate::validation::tld::{OverrideItem, TldRegistry};
    use actix_web::{App, test};
    use serde_json::Value;
    use std::sync::Arc;

    async fn get_table(uri: &str) -> (u16, Value) {
        let domain = Arc::new(
            DomainValidator::builder()
                .item(OverrideItem::new(TldTable::CountryCodeMinus, ["UK", "ch"]))
                .build_with(&TldRegistry::new())
                .unwrap(),
        );
        let email = Arc::new(
            EmailValidator::with_domain_validator(false, false, Arc::clone(&domain)).unwrap(),
        );
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(AppState::new(domain, email)))
                .configure(configure_routes),
        )
        .await;

        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        let status = resp.status().as_u16();
        let body = test::read_body(resp).await;
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[actix_web::test]
    async fn test_override_table() {
        let (status, body) = get_table("/tlds/country_code_minus").await;
        assert_eq!(status, 200);
        assert_eq!(
            body,
            json!({"table": "COUNTRY_CODE_MINUS", "entries": ["ch", "uk"]})
        );

        let (_, body) = get_table("/tlds/GENERIC_PLUS").await;
        assert_eq!(body["entries"], json!([]));
    }

    #[actix_web::test]
    async fn test_read_only_table() {
        let (status, body) = get_table("/tlds/LOCAL_RO").await;
        assert_eq!(status, 200);
        assert_eq!(body["entries"], json!(["localdomain", "localhost"]));

        let (_, body) = get_table("/tlds/GENERIC_RO").await;
        let entries = body["entries"].as_array().unwrap();
        assert!(entries.contains(&json!("com")));
    }

    #[actix_web::test]
    async fn test_unknown_table() {
        let (status, body) = get_table("/tlds/SOMETHING_ELSE").await;
        assert_eq!(status, 404);
        assert!(body["error"].as_str().unwrap().contains("SOMETHING_ELSE"));
    }
}
