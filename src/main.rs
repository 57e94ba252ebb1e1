use actix_web::{App, HttpServer, middleware, web::Data};
use domain_validator::config::AppConfig;
use domain_validator::openapi::ApiDoc;
use domain_validator::routes::AppState;
use domain_validator::validation::tld;
use std::io;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Domain Validator Service Entry Point
///
/// Configures and launches the Actix-web HTTP server with:
/// - TLD overrides and validator flags from the environment (`.env` supported)
/// - Shared domain and email validators, acquired once at startup
/// - Swagger UI for API documentation
///
/// # Endpoints
/// - REST API: `/api/v1/...` (configured in routes)
/// - Swagger UI: `/swagger-ui/`
/// - OpenAPI spec: `/api-docs/openapi.json`
#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env().map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    config
        .apply_overrides(tld::registry())
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

    // Overrides are frozen from here on.
    let state = AppState::shared(config.allow_local, config.allow_tld);

    tracing::info!(
        address = %config.bind_address,
        port = config.port,
        allow_local = config.allow_local,
        allow_tld = config.allow_tld,
        "starting domain validator service"
    );

    HttpServer::new(move || {
        let openapi = ApiDoc::openapi();

        App::new()
            .wrap(middleware::Logger::default())
            .app_data(Data::new(state.clone()))
            .configure(domain_validator::routes::configure)
            .service(SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", openapi))
    })
    .bind((config.bind_address.as_str(), config.port))?
    .run()
    .await
}
