// src/handlers/favorites.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::{
    common::error::ApiError,
    config::AppState,
    middleware::{auth::AuthenticatedUser, i18n::Locale},
    models::{catalog::Catalog, favorite::Favorite},
};

// POST /api/v1/catalogs/{id}/favorite
#[utoipa::path(
    post,
    path = "/api/v1/catalogs/{id}/favorite",
    tag = "Favoritos",
    params(("id" = Uuid, Path, description = "ID do catálogo")),
    responses(
        (status = 201, description = "Catálogo favoritado", body = Favorite),
        (status = 404, description = "Catálogo não encontrado ou não publicado"),
        (status = 409, description = "Catálogo já está nos favoritos")
    ),
    security(("api_jwt" = []))
)]
pub async fn add_favorite(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(catalog_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let favorite = app_state
        .favorite_service
        .add(&user, catalog_id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(favorite)))
}

// DELETE /api/v1/catalogs/{id}/favorite
#[utoipa::path(
    delete,
    path = "/api/v1/catalogs/{id}/favorite",
    tag = "Favoritos",
    params(("id" = Uuid, Path, description = "ID do catálogo")),
    responses(
        (status = 204, description = "Favorito removido"),
        (status = 404, description = "Catálogo não estava nos favoritos")
    ),
    security(("api_jwt" = []))
)]
pub async fn remove_favorite(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(catalog_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .favorite_service
        .remove(&user, catalog_id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(StatusCode::NO_CONTENT)
}

// GET /api/v1/favorites
#[utoipa::path(
    get,
    path = "/api/v1/favorites",
    tag = "Favoritos",
    responses(
        (status = 200, description = "Catálogos favoritos do usuário", body = Vec<Catalog>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_favorites(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<impl IntoResponse, ApiError> {
    let catalogs = app_state
        .favorite_service
        .list(&user)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(catalogs)))
}
