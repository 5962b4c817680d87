// src/handlers/uploads.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{auth::AuthenticatedUser, i18n::Locale},
    models::upload::{RequestUploadPayload, Upload, UploadCallbackPayload, UploadTicket},
};

// POST /api/v1/uploads
#[utoipa::path(
    post,
    path = "/api/v1/uploads",
    tag = "Uploads",
    request_body = RequestUploadPayload,
    responses(
        (status = 201, description = "URL assinada para envio direto ao storage", body = UploadTicket),
        (status = 400, description = "Tipo de arquivo não suportado")
    ),
    security(("api_jwt" = []))
)]
pub async fn request_upload(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<RequestUploadPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let ticket = app_state
        .upload_service
        .request(&user, &payload.file_name, &payload.content_type)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(ticket)))
}

// POST /api/v1/uploads/callback (chamado pelo serviço de arquivos)
#[utoipa::path(
    post,
    path = "/api/v1/uploads/callback",
    tag = "Uploads",
    request_body = UploadCallbackPayload,
    responses(
        (status = 200, description = "Upload concluído", body = Upload),
        (status = 401, description = "Token de upload inválido"),
        (status = 409, description = "Upload expirado ou já concluído")
    )
)]
pub async fn upload_callback(
    State(app_state): State<AppState>,
    locale: Locale,
    Json(payload): Json<UploadCallbackPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let upload = app_state
        .upload_service
        .callback(&payload.token, &payload.public_url)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(upload)))
}

// GET /api/v1/uploads/{id}
#[utoipa::path(
    get,
    path = "/api/v1/uploads/{id}",
    tag = "Uploads",
    params(("id" = Uuid, Path, description = "ID do upload")),
    responses(
        (status = 200, description = "Status atual do upload", body = Upload),
        (status = 403, description = "Upload de outro usuário"),
        (status = 404, description = "Upload não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn poll_upload(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let upload = app_state
        .upload_service
        .poll(&user, id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(upload)))
}
