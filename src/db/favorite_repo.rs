// src/db/favorite_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::{map_unique_violation, AppError},
    models::favorite::Favorite,
};

#[derive(Clone)]
pub struct FavoriteRepository {
    pool: PgPool,
}

impl FavoriteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, user_id: Uuid, catalog_id: Uuid) -> Result<Favorite, AppError> {
        sqlx::query_as::<_, Favorite>(
            "INSERT INTO favorites (user_id, catalog_id) VALUES ($1, $2) RETURNING *",
        )
        .bind(user_id)
        .bind(catalog_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            map_unique_violation(e, |constraint| match constraint {
                "favorites_pkey" => AppError::FavoriteAlreadyExists,
                other => AppError::UniqueConstraintViolation(other.to_string()),
            })
        })
    }

    pub async fn delete(&self, user_id: Uuid, catalog_id: Uuid) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM favorites WHERE user_id = $1 AND catalog_id = $2")
            .bind(user_id)
            .bind(catalog_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
