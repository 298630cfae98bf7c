use actix_cors::Cors;
use actix_web::middleware::{Compress, Logger};
use actix_web::{http::header, web, App, HttpServer};
use actix_web_prometheus::PrometheusMetricsBuilder;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

pub mod config;
pub mod contracts;
pub mod generators;

pub use crate::config::ServerConfig;
pub use crate::contracts::AppState;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    #[schema(example = "BadRequest")]
    pub code: String,
    pub timestamp: String,
}

impl ErrorResponse {
    pub fn new(code: &str, message: &str) -> Self {
        Self {
            error: message.to_string(),
            code: code.to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn bad_request(message: &str) -> Self {
        Self::new("BadRequest", message)
    }

    pub fn method_not_allowed(message: &str) -> Self {
        Self::new("MethodNotAllowed", message)
    }

    pub fn payload_too_large(message: &str) -> Self {
        Self::new("PayloadTooLarge", message)
    }

    pub fn internal_error(message: &str) -> Self {
        Self::new("InternalServerError", message)
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::contracts::handlers::generate_vehicle_contract,
        crate::contracts::handlers::generate_debt_confession,
        crate::contracts::handlers::health
    ),
    components(
        schemas(
            contracts::models::VehicleSaleForm,
            contracts::models::DebtConfessionForm,
            contracts::models::HealthResponse,
            ErrorResponse,
        )
    ),
    tags(
        (name = "Contratos", description = "Contract PDF generation endpoints.")
    ),
    servers(
        (url = "http://127.0.0.1:8080", description = "Local server")
    )
)]
pub struct ApiDoc;

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok(); // Load .env file
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = ServerConfig::from_env().context("invalid server configuration")?;
    let app_state = web::Data::new(AppState::default());

    let prometheus = PrometheusMetricsBuilder::new("contrato_server")
        .endpoint("/metrics")
        .build()
        .map_err(|e| anyhow::anyhow!("failed to create Prometheus metrics middleware: {e}"))?;

    let (host, port) = config.bind_address();
    log::info!("Starting server at http://{}:{}", host, port);

    let allowed_origins = config.allowed_origins.clone();
    let payload_limit = config.payload_limit;

    let mut server = HttpServer::new(move || {
        let app_state = app_state.clone();
        let prometheus = prometheus.clone();
        let cors = allowed_origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
            .allowed_methods(vec!["GET", "POST", "OPTIONS"])
            .allowed_headers(vec![header::ACCEPT, header::CONTENT_TYPE])
            .expose_headers(vec![header::CONTENT_DISPOSITION])
            .max_age(3600);

        App::new()
            .wrap(Compress::default())
            .wrap(Logger::default())
            .wrap(prometheus)
            .wrap(cors)
            .app_data(app_state)
            .app_data(web::PayloadConfig::new(payload_limit))
            .configure(contracts::handlers::config)
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-doc/openapi.json", ApiDoc::openapi()),
            )
    })
    .keep_alive(actix_web::http::KeepAlive::Os);

    if let Some(workers) = config.workers {
        server = server.workers(workers);
    }

    server
        .bind((host.as_str(), port))
        .with_context(|| format!("failed to bind {host}:{port}"))?
        .run()
        .await?;

    Ok(())
}
