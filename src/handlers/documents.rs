// src/handlers/documents.rs

use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
};
use uuid::Uuid;

use crate::{
    common::error::ApiError,
    config::AppState,
    middleware::{auth::AuthenticatedUser, i18n::Locale},
};

// GET /api/v1/catalogs/{id}/pdf
#[utoipa::path(
    get,
    path = "/api/v1/catalogs/{id}/pdf",
    tag = "Catálogos",
    params(("id" = Uuid, Path, description = "ID do catálogo")),
    responses(
        (status = 200, description = "PDF do catálogo", content_type = "application/pdf"),
        (status = 404, description = "Catálogo não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn catalog_pdf(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(catalog_id): Path<Uuid>,
) -> Result<Response, ApiError> {
    let pdf_bytes = app_state
        .document_service
        .generate_catalog_pdf(Some(&user), catalog_id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    // Configura os Headers para o navegador baixar ou mostrar o PDF
    let disposition = format!("attachment; filename=\"catalogo_{}.pdf\"", catalog_id);
    let headers = [
        (header::CONTENT_TYPE, "application/pdf"),
        (header::CONTENT_DISPOSITION, disposition.as_str()),
    ];

    Ok((headers, pdf_bytes).into_response())
}
