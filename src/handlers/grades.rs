// src/handlers/grades.rs

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
    models::grade::{Grade, UpsertGradesPayload},
};

// PUT /api/v1/products/{id}/grades
#[utoipa::path(
    put,
    path = "/api/v1/products/{id}/grades",
    tag = "Grades",
    request_body = UpsertGradesPayload,
    params(("id" = Uuid, Path, description = "ID do produto")),
    responses(
        (status = 200, description = "Grade completa do produto após a gravação", body = Vec<Grade>),
        (status = 400, description = "Dados inválidos"),
        (status = 403, description = "Apenas o dono ou um administrador"),
        (status = 404, description = "Produto não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn upsert_grades(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(product_id): Path<Uuid>,
    Json(payload): Json<UpsertGradesPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let grades = app_state
        .grade_service
        .upsert_grades(&user, product_id, payload.grades)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(grades)))
}

// GET /api/v1/products/{id}/grades
#[utoipa::path(
    get,
    path = "/api/v1/products/{id}/grades",
    tag = "Grades",
    params(("id" = Uuid, Path, description = "ID do produto")),
    responses(
        (status = 200, description = "Grade do produto", body = Vec<Grade>),
        (status = 404, description = "Produto não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_grades(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(product_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let grades = app_state
        .grade_service
        .list(&user, product_id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(grades)))
}

// DELETE /api/v1/products/{id}/grades/{grade_id}
#[utoipa::path(
    delete,
    path = "/api/v1/products/{id}/grades/{grade_id}",
    tag = "Grades",
    params(
        ("id" = Uuid, Path, description = "ID do produto"),
        ("grade_id" = Uuid, Path, description = "ID da variação")
    ),
    responses(
        (status = 204, description = "Variação removida"),
        (status = 404, description = "Variação não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_grade(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(user): AuthenticatedUser,
    Path((product_id, grade_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .grade_service
        .delete(&user, product_id, grade_id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(StatusCode::NO_CONTENT)
}
