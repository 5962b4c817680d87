// src/handlers/reviews.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{auth::AuthenticatedUser, i18n::Locale},
    models::review::{Review, ReviewPayload, ReviewWithRating},
};

// POST /api/v1/catalogs/{id}/reviews
#[utoipa::path(
    post,
    path = "/api/v1/catalogs/{id}/reviews",
    tag = "Avaliações",
    request_body = ReviewPayload,
    params(("id" = Uuid, Path, description = "ID do catálogo")),
    responses(
        (status = 201, description = "Avaliação criada e nota do catálogo recalculada", body = ReviewWithRating),
        (status = 400, description = "Nota fora de 1..5 ou catálogo próprio"),
        (status = 404, description = "Catálogo não encontrado"),
        (status = 409, description = "Usuário já avaliou este catálogo")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_review(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(catalog_id): Path<Uuid>,
    Json(payload): Json<ReviewPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let created = app_state
        .review_service
        .create(
            &user,
            catalog_id,
            payload.score,
            payload.title.as_deref(),
            payload.comment.as_deref(),
        )
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(created)))
}

// GET /api/v1/catalogs/{id}/reviews (público)
#[utoipa::path(
    get,
    path = "/api/v1/catalogs/{id}/reviews",
    tag = "Avaliações",
    params(("id" = Uuid, Path, description = "ID do catálogo")),
    responses(
        (status = 200, description = "Avaliações do catálogo publicado", body = Vec<Review>),
        (status = 404, description = "Catálogo não encontrado")
    )
)]
pub async fn list_reviews(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(catalog_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let reviews = app_state
        .review_service
        .list(catalog_id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(reviews)))
}

// PUT /api/v1/reviews/{id}
#[utoipa::path(
    put,
    path = "/api/v1/reviews/{id}",
    tag = "Avaliações",
    request_body = ReviewPayload,
    params(("id" = Uuid, Path, description = "ID da avaliação")),
    responses(
        (status = 200, description = "Avaliação atualizada", body = ReviewWithRating),
        (status = 403, description = "Apenas o autor ou um administrador"),
        (status = 404, description = "Avaliação não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_review(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(review_id): Path<Uuid>,
    Json(payload): Json<ReviewPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let updated = app_state
        .review_service
        .update(
            &user,
            review_id,
            payload.score,
            payload.title.as_deref(),
            payload.comment.as_deref(),
        )
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(updated)))
}

// DELETE /api/v1/reviews/{id}
#[utoipa::path(
    delete,
    path = "/api/v1/reviews/{id}",
    tag = "Avaliações",
    params(("id" = Uuid, Path, description = "ID da avaliação")),
    responses(
        (status = 200, description = "Avaliação removida; devolve a nova nota do catálogo"),
        (status = 403, description = "Apenas o autor ou um administrador"),
        (status = 404, description = "Avaliação não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_review(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(review_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let catalog_rating = app_state
        .review_service
        .delete(&user, review_id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(json!({ "catalogRating": catalog_rating }))))
}
