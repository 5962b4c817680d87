// src/handlers/catalogs.rs

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
        rbac::{Administrators, Publishers, RequireRole},
    },
    models::catalog::{
        AddCatalogProductPayload, Catalog, CatalogDetail, CatalogFilter, CatalogProduct,
        CreateCatalogPayload, TransitionCatalogPayload, UpdateCatalogPayload,
        UpdateCatalogProductPayload,
    },
};

// =============================================================================
//  ÁREA 1: CATÁLOGOS
// =============================================================================

// POST /api/v1/catalogs
#[utoipa::path(
    post,
    path = "/api/v1/catalogs",
    tag = "Catálogos",
    request_body = CreateCatalogPayload,
    responses(
        (status = 201, description = "Catálogo criado (aguardando aprovação)", body = Catalog),
        (status = 400, description = "Dados inválidos"),
        (status = 403, description = "Apenas fornecedores e representantes")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_catalog(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireRole<Publishers>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<CreateCatalogPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let catalog = app_state
        .catalog_service
        .create(
            &user,
            &payload.name,
            payload.description.as_deref(),
            payload.cover_image_url.as_deref(),
        )
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(catalog)))
}

// GET /api/v1/catalogs
#[utoipa::path(
    get,
    path = "/api/v1/catalogs",
    tag = "Catálogos",
    params(CatalogFilter),
    responses(
        (status = 200, description = "Catálogos visíveis para o usuário", body = Vec<Catalog>),
        (status = 403, description = "Lojistas usam a vitrine")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_catalogs(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(user): AuthenticatedUser,
    Query(filter): Query<CatalogFilter>,
) -> Result<impl IntoResponse, ApiError> {
    let catalogs = app_state
        .catalog_service
        .list_for(&user, filter.status)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(catalogs)))
}

// GET /api/v1/catalogs/{id}
#[utoipa::path(
    get,
    path = "/api/v1/catalogs/{id}",
    tag = "Catálogos",
    params(("id" = Uuid, Path, description = "ID do catálogo")),
    responses(
        (status = 200, description = "Catálogo com produtos", body = CatalogDetail),
        (status = 404, description = "Catálogo não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_catalog(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let detail = app_state
        .catalog_service
        .get_detail(Some(&user), id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(detail)))
}

// PUT /api/v1/catalogs/{id}
#[utoipa::path(
    put,
    path = "/api/v1/catalogs/{id}",
    tag = "Catálogos",
    request_body = UpdateCatalogPayload,
    params(("id" = Uuid, Path, description = "ID do catálogo")),
    responses(
        (status = 200, description = "Catálogo atualizado", body = Catalog),
        (status = 403, description = "Apenas o dono ou um administrador"),
        (status = 404, description = "Catálogo não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_catalog(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateCatalogPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let catalog = app_state
        .catalog_service
        .update(
            &user,
            id,
            &payload.name,
            payload.description.as_deref(),
            payload.cover_image_url.as_deref(),
        )
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(catalog)))
}

// DELETE /api/v1/catalogs/{id}
#[utoipa::path(
    delete,
    path = "/api/v1/catalogs/{id}",
    tag = "Catálogos",
    params(("id" = Uuid, Path, description = "ID do catálogo")),
    responses(
        (status = 204, description = "Catálogo removido"),
        (status = 403, description = "Apenas o dono ou um administrador"),
        (status = 404, description = "Catálogo não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_catalog(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .catalog_service
        .delete(&user, id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(StatusCode::NO_CONTENT)
}

// PATCH /api/v1/catalogs/{id}/status
#[utoipa::path(
    patch,
    path = "/api/v1/catalogs/{id}/status",
    tag = "Catálogos",
    request_body = TransitionCatalogPayload,
    params(("id" = Uuid, Path, description = "ID do catálogo")),
    responses(
        (status = 200, description = "Status alterado", body = Catalog),
        (status = 403, description = "Apenas administradores"),
        (status = 404, description = "Catálogo não encontrado"),
        (status = 409, description = "Transição fora da ordem do ciclo de vida")
    ),
    security(("api_jwt" = []))
)]
pub async fn transition_status(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireRole<Administrators>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<TransitionCatalogPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let catalog = app_state
        .catalog_service
        .transition_status(&user, id, payload.status)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(catalog)))
}

// =============================================================================
//  ÁREA 2: PRODUTOS DO CATÁLOGO
// =============================================================================

// POST /api/v1/catalogs/{id}/products
#[utoipa::path(
    post,
    path = "/api/v1/catalogs/{id}/products",
    tag = "Catálogos",
    request_body = AddCatalogProductPayload,
    params(("id" = Uuid, Path, description = "ID do catálogo")),
    responses(
        (status = 201, description = "Produto vinculado", body = CatalogProduct),
        (status = 403, description = "Catálogo ou produto de outro dono"),
        (status = 409, description = "Produto já está no catálogo")
    ),
    security(("api_jwt" = []))
)]
pub async fn add_product(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(catalog_id): Path<Uuid>,
    Json(payload): Json<AddCatalogProductPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let association = app_state
        .catalog_service
        .add_product(&user, catalog_id, payload.product_id, payload.price, payload.featured)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(association)))
}

// PUT /api/v1/catalogs/{id}/products/{product_id}
#[utoipa::path(
    put,
    path = "/api/v1/catalogs/{id}/products/{product_id}",
    tag = "Catálogos",
    request_body = UpdateCatalogProductPayload,
    params(
        ("id" = Uuid, Path, description = "ID do catálogo"),
        ("product_id" = Uuid, Path, description = "ID do produto")
    ),
    responses(
        (status = 200, description = "Preço/destaque atualizados", body = CatalogProduct),
        (status = 404, description = "Produto não pertence ao catálogo")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_product(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(user): AuthenticatedUser,
    Path((catalog_id, product_id)): Path<(Uuid, Uuid)>,
    Json(payload): Json<UpdateCatalogProductPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let association = app_state
        .catalog_service
        .update_product(&user, catalog_id, product_id, payload.price, payload.featured)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(association)))
}

// DELETE /api/v1/catalogs/{id}/products/{product_id}
#[utoipa::path(
    delete,
    path = "/api/v1/catalogs/{id}/products/{product_id}",
    tag = "Catálogos",
    params(
        ("id" = Uuid, Path, description = "ID do catálogo"),
        ("product_id" = Uuid, Path, description = "ID do produto")
    ),
    responses(
        (status = 204, description = "Produto desvinculado"),
        (status = 404, description = "Produto não pertence ao catálogo")
    ),
    security(("api_jwt" = []))
)]
pub async fn remove_product(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(user): AuthenticatedUser,
    Path((catalog_id, product_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .catalog_service
        .remove_product(&user, catalog_id, product_id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(StatusCode::NO_CONTENT)
}
