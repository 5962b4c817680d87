// src/handlers/vitrine.rs
//
// Vitrine pública: nada aqui exige autenticação.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::{
    common::{
        error::ApiError,
        pagination::{Paginated, PaginationParams},
    },
    config::AppState,
    middleware::i18n::Locale,
    models::catalog::{Catalog, CatalogDetail, VitrineQuery},
};

// GET /api/v1/vitrine
#[utoipa::path(
    get,
    path = "/api/v1/vitrine",
    tag = "Vitrine",
    params(VitrineQuery, PaginationParams),
    responses(
        (status = 200, description = "Catálogos publicados, melhor avaliados primeiro", body = Paginated<Catalog>)
    )
)]
pub async fn list_vitrine(
    State(app_state): State<AppState>,
    locale: Locale,
    Query(query): Query<VitrineQuery>,
    Query(pagination): Query<PaginationParams>,
) -> Result<impl IntoResponse, ApiError> {
    let page = app_state
        .catalog_service
        .vitrine(query.q.as_deref(), &pagination)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(page)))
}

// GET /api/v1/vitrine/{id}
#[utoipa::path(
    get,
    path = "/api/v1/vitrine/{id}",
    tag = "Vitrine",
    params(("id" = Uuid, Path, description = "ID do catálogo")),
    responses(
        (status = 200, description = "Catálogo publicado com produtos", body = CatalogDetail),
        (status = 404, description = "Catálogo não encontrado")
    )
)]
pub async fn get_vitrine_catalog(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let detail = app_state
        .catalog_service
        .get_detail(None, id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(detail)))
}
