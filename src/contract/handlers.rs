//! HTTP boundary for contract generation.

use actix_web::http::header;
use actix_web::{web, HttpResponse, Responder};

use super::models::ContractRequest;
use super::traits::{Generator, Validator};
use crate::{AppState, ErrorResponse};

#[utoipa::path(
    post,
    path = "/api/contract/generate",
    tag = "Contract Service",
    request_body = ContractRequest,
    responses(
        (status = 200, description = "Contract PDF, served as an attachment download"),
        (status = 400, description = "Missing required contract details", body = ErrorResponse),
        (status = 500, description = "Contract rendering failed", body = ErrorResponse)
    )
)]
pub async fn generate_contract(
    state: web::Data<AppState>,
    body: web::Json<ContractRequest>,
) -> impl Responder {
    let request = body.into_inner();

    if let Err(message) = Validator::validate(&request) {
        log::warn!("Rejected contract request: {message}");
        return HttpResponse::BadRequest().json(ErrorResponse::bad_request(&message));
    }

    // Typst compilation is CPU-bound; keep it off the async workers.
    let generator = state.generator.clone();
    let generated = web::block(move || generator.generate(request)).await;

    match generated {
        Ok(Ok(contract)) => {
            log::info!(
                "Generated contract {} ({} bytes)",
                contract.contract_id,
                contract.pdf.len()
            );
            let content_length = contract.pdf.len() as u64;
            HttpResponse::Ok()
                .content_type("application/pdf")
                .insert_header((
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", contract.filename),
                ))
                .no_chunking(content_length)
                .body(contract.pdf)
        }
        Ok(Err(e)) => {
            log::error!("Contract generation failed: {e}");
            HttpResponse::InternalServerError()
                .json(ErrorResponse::internal_error("Error generating contract PDF"))
        }
        Err(e) => {
            log::error!("Contract generation task failed: {e}");
            HttpResponse::InternalServerError()
                .json(ErrorResponse::internal_error("Error generating contract PDF"))
        }
    }
}

/// Register contract routes under the `/api` scope.
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/contract/generate").route(web::post().to(generate_contract)));
}
