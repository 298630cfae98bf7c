use std::fmt::Display;

use actix_web::{http::header, http::StatusCode, web, HttpResponse, Responder};
use log::{error, info, warn};

use crate::contracts::models::{DebtConfessionForm, HealthResponse, VehicleSaleForm};
use crate::contracts::AppState;
use crate::generators::{DocumentKind, GeneratedDocument, InputRecord};
use crate::ErrorResponse;

const GENERATION_FAILED: &str = "Erro ao gerar PDF";
const PAYLOAD_TOO_LARGE: &str = "Dados demasiado extensos";

#[utoipa::path(
    post,
    path = "/api/generate-pdf",
    tag = "Contratos",
    request_body(content = inline(VehicleSaleForm), content_type = "application/json"),
    responses(
        (status = 200, description = "Vehicle sale contract", body = Vec<u8>, content_type = "application/pdf"),
        (status = 400, description = "Missing or malformed body", body = ErrorResponse),
        (status = 405, description = "Only POST is accepted", body = ErrorResponse),
        (status = 413, description = "Body exceeds the payload limit", body = ErrorResponse),
        (status = 500, description = "PDF generation failed", body = ErrorResponse)
    )
)]
pub async fn generate_vehicle_contract(
    state: web::Data<AppState>,
    body: Result<web::Bytes, actix_web::Error>,
) -> impl Responder {
    generate_document(DocumentKind::VehicleSale, state, body).await
}

#[utoipa::path(
    post,
    path = "/api/generate_confissao_pdf",
    tag = "Contratos",
    request_body(content = inline(DebtConfessionForm), content_type = "application/json"),
    responses(
        (status = 200, description = "Debt confession", body = Vec<u8>, content_type = "application/pdf"),
        (status = 400, description = "Missing or malformed body", body = ErrorResponse),
        (status = 405, description = "Only POST is accepted", body = ErrorResponse),
        (status = 413, description = "Body exceeds the payload limit", body = ErrorResponse),
        (status = 500, description = "PDF generation failed", body = ErrorResponse)
    )
)]
pub async fn generate_debt_confession(
    state: web::Data<AppState>,
    body: Result<web::Bytes, actix_web::Error>,
) -> impl Responder {
    generate_document(DocumentKind::DebtConfession, state, body).await
}

async fn generate_document(
    kind: DocumentKind,
    state: web::Data<AppState>,
    body: Result<web::Bytes, actix_web::Error>,
) -> HttpResponse {
    let body = match body {
        Ok(body) => body,
        Err(e) => return rejected_payload(kind, e),
    };

    let record = match InputRecord::from_body(&body) {
        Ok(record) => record,
        Err(e) => {
            warn!("Rejected {} request: {}", kind.label(), e);
            return HttpResponse::BadRequest().json(ErrorResponse::bad_request(&e.to_string()));
        }
    };

    info!("Generating {} from {} fields", kind.label(), record.len());

    let clock = state.clock.clone();
    let page = state.page;
    let result = web::block(move || kind.generate(clock, page, &record)).await;

    match result {
        Ok(Ok(document)) => {
            info!(
                "Generated {}: {} ({} pages, {} bytes)",
                kind.label(),
                document.filename,
                document.pages,
                document.pdf.len()
            );
            pdf_response(document)
        }
        Ok(Err(e)) => generation_failed(kind, e),
        Err(e) => generation_failed(kind, e),
    }
}

/// Body extraction failed before parsing, usually because it exceeds the
/// configured payload limit.
fn rejected_payload(kind: DocumentKind, e: actix_web::Error) -> HttpResponse {
    let status = e.as_response_error().status_code();
    warn!("Rejected {} body ({}): {}", kind.label(), status, e);

    if status == StatusCode::PAYLOAD_TOO_LARGE {
        HttpResponse::PayloadTooLarge().json(ErrorResponse::payload_too_large(PAYLOAD_TOO_LARGE))
    } else {
        HttpResponse::BadRequest().json(ErrorResponse::bad_request(&e.to_string()))
    }
}

/// Details stay in the log; the client only sees a generic message.
fn generation_failed(kind: DocumentKind, e: impl Display) -> HttpResponse {
    error!("Failed to generate {}: {}", kind.label(), e);
    HttpResponse::InternalServerError().json(ErrorResponse::internal_error(GENERATION_FAILED))
}

fn pdf_response(document: GeneratedDocument) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("application/pdf")
        .insert_header((
            header::CONTENT_DISPOSITION,
            format!("attachment; filename={}", document.filename),
        ))
        .body(document.pdf)
}

/// Fallback for any non-POST method on the document paths.
pub async fn method_not_allowed() -> impl Responder {
    HttpResponse::MethodNotAllowed()
        .insert_header((header::ALLOW, "POST"))
        .json(ErrorResponse::method_not_allowed("Método não permitido"))
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "Contratos",
    responses(
        (status = 200, description = "Service is up", body = HealthResponse)
    )
)]
pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "OK".to_string(),
        message: "Servidor de contratos ativo".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

/// Configure contract routes.
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/api/generate-pdf")
            .route(web::post().to(generate_vehicle_contract))
            .default_service(web::route().to(method_not_allowed)),
    )
    .service(
        web::resource("/api/generate_confissao_pdf")
            .route(web::post().to(generate_debt_confession))
            .default_service(web::route().to(method_not_allowed)),
    )
    .service(web::resource("/health").route(web::get().to(health)));
}
