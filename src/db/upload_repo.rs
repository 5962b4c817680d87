// src/db/upload_repo.rs

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::upload::{Upload, UploadStatus},
};

#[derive(Clone)]
pub struct UploadRepository {
    pool: PgPool,
}

impl UploadRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        id: Uuid,
        owner_id: Uuid,
        file_name: &str,
        content_type: &str,
        storage_key: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<Upload, AppError> {
        let upload = sqlx::query_as::<_, Upload>(
            r#"
            INSERT INTO uploads (id, owner_id, file_name, content_type, storage_key, expires_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(owner_id)
        .bind(file_name)
        .bind(content_type)
        .bind(storage_key)
        .bind(expires_at)
        .fetch_one(&self.pool)
        .await?;
        Ok(upload)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Upload>, AppError> {
        let upload = sqlx::query_as::<_, Upload>("SELECT * FROM uploads WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(upload)
    }

    /// Conclui um upload ainda pendente e dentro do prazo. None se já foi encerrado.
    pub async fn complete(&self, id: Uuid, public_url: &str) -> Result<Option<Upload>, AppError> {
        let upload = sqlx::query_as::<_, Upload>(
            r#"
            UPDATE uploads
            SET status = 'completed', public_url = $2, completed_at = NOW()
            WHERE id = $1 AND status = 'pending' AND expires_at > NOW()
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(public_url)
        .fetch_optional(&self.pool)
        .await?;
        Ok(upload)
    }

    pub async fn set_status(&self, id: Uuid, status: UploadStatus) -> Result<Upload, AppError> {
        let upload = sqlx::query_as::<_, Upload>(
            "UPDATE uploads SET status = $2 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(status)
        .fetch_one(&self.pool)
        .await?;
        Ok(upload)
    }
}
