// src/models/product.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Uuid,
    pub owner_id: Uuid,
    #[schema(example = "Camiseta Básica Algodão")]
    pub name: String,
    pub description: Option<String>,
    pub image_urls: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductPayload {
    #[validate(length(min = 2, max = 160, message = "O nome deve ter entre 2 e 160 caracteres."))]
    #[schema(example = "Camiseta Básica Algodão")]
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    #[validate(length(max = 10, message = "No máximo 10 imagens por produto."))]
    pub image_urls: Vec<String>,
}
