// src/handlers/messages.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{
        auth::AuthenticatedUser,
        i18n::Locale,
        rbac::{Administrators, RequireRole},
    },
    models::message::{
        CreateMessagePayload, Message, MessageFilter, MessageThread, ReplyMessagePayload,
    },
};

// POST /api/v1/catalogs/{id}/messages
#[utoipa::path(
    post,
    path = "/api/v1/catalogs/{id}/messages",
    tag = "Mensagens",
    request_body = CreateMessagePayload,
    params(("id" = Uuid, Path, description = "ID do catálogo")),
    responses(
        (status = 201, description = "Mensagem enviada", body = Message),
        (status = 400, description = "Catálogo não publicado ou do próprio remetente"),
        (status = 404, description = "Catálogo não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn send_message(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(catalog_id): Path<Uuid>,
    Json(payload): Json<CreateMessagePayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let message = app_state
        .message_service
        .create(&user, catalog_id, &payload.subject, &payload.body)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(message)))
}

// GET /api/v1/messages
#[utoipa::path(
    get,
    path = "/api/v1/messages",
    tag = "Mensagens",
    params(MessageFilter),
    responses(
        (status = 200, description = "Mensagens enviadas ou recebidas (todas, para administradores)", body = Vec<Message>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_messages(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(user): AuthenticatedUser,
    Query(filter): Query<MessageFilter>,
) -> Result<impl IntoResponse, ApiError> {
    let messages = app_state
        .message_service
        .list_for(&user, filter.status)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(messages)))
}

// GET /api/v1/messages/{id}
#[utoipa::path(
    get,
    path = "/api/v1/messages/{id}",
    tag = "Mensagens",
    params(("id" = Uuid, Path, description = "ID da mensagem")),
    responses(
        (status = 200, description = "Mensagem com a resposta, se houver", body = MessageThread),
        (status = 404, description = "Mensagem não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_message(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let thread = app_state
        .message_service
        .get_thread(&user, id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(thread)))
}

// POST /api/v1/messages/{id}/reply
#[utoipa::path(
    post,
    path = "/api/v1/messages/{id}/reply",
    tag = "Mensagens",
    request_body = ReplyMessagePayload,
    params(("id" = Uuid, Path, description = "ID da mensagem")),
    responses(
        (status = 201, description = "Resposta registrada", body = MessageThread),
        (status = 403, description = "Apenas administradores"),
        (status = 404, description = "Mensagem não encontrada"),
        (status = 409, description = "Mensagem já respondida")
    ),
    security(("api_jwt" = []))
)]
pub async fn reply_message(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireRole<Administrators>,
    AuthenticatedUser(admin): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<ReplyMessagePayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let thread = app_state
        .message_service
        .reply(&admin, id, &payload.body)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(thread)))
}
