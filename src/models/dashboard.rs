// src/models/dashboard.rs

use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::models::{auth::UserRole, catalog::CatalogStatus};

#[derive(Debug, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatusCount {
    pub status: CatalogStatus,
    pub total: i64,
}

#[derive(Debug, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RoleCount {
    pub role: UserRole,
    pub total: i64,
}

// Painel do administrador
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminDashboard {
    pub catalogs_by_status: Vec<StatusCount>,
    pub users_by_role: Vec<RoleCount>,
    pub new_messages: i64,
}

// Painel de fornecedor / representante
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PublisherDashboard {
    pub catalogs_by_status: Vec<StatusCount>,
    pub total_products: i64,
    pub new_messages: i64,
    #[schema(value_type = Option<f64>)]
    pub average_rating: Option<Decimal>,
}

// Painel do lojista
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RetailerDashboard {
    pub favorites: i64,
    pub sent_messages: i64,
    pub answered_messages: i64,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Dashboard {
    Admin(AdminDashboard),
    Publisher(PublisherDashboard),
    Retailer(RetailerDashboard),
}
