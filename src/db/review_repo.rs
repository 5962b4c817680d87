// src/db/review_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::{map_unique_violation, AppError},
    models::review::Review,
};

#[derive(Clone)]
pub struct ReviewRepository {
    pool: PgPool,
}

impl ReviewRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Review>, AppError> {
        let review = sqlx::query_as::<_, Review>("SELECT * FROM reviews WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(review)
    }

    pub async fn list_by_catalog(&self, catalog_id: Uuid) -> Result<Vec<Review>, AppError> {
        let reviews = sqlx::query_as::<_, Review>(
            "SELECT * FROM reviews WHERE catalog_id = $1 ORDER BY created_at DESC",
        )
        .bind(catalog_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(reviews)
    }

    pub async fn scores_for_catalog<'e, E>(&self, executor: E, catalog_id: Uuid) -> Result<Vec<i32>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let scores: Vec<i32> = sqlx::query_scalar("SELECT score FROM reviews WHERE catalog_id = $1")
            .bind(catalog_id)
            .fetch_all(executor)
            .await?;
        Ok(scores)
    }

    pub async fn create<'e, E>(
        &self,
        executor: E,
        user_id: Uuid,
        catalog_id: Uuid,
        score: i32,
        title: Option<&str>,
        comment: Option<&str>,
    ) -> Result<Review, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Review>(
            r#"
            INSERT INTO reviews (user_id, catalog_id, score, title, comment)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(catalog_id)
        .bind(score)
        .bind(title)
        .bind(comment)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            map_unique_violation(e, |constraint| match constraint {
                "reviews_user_catalog_key" => AppError::ReviewAlreadyExists,
                other => AppError::UniqueConstraintViolation(other.to_string()),
            })
        })
    }

    pub async fn update<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        score: i32,
        title: Option<&str>,
        comment: Option<&str>,
    ) -> Result<Option<Review>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let review = sqlx::query_as::<_, Review>(
            r#"
            UPDATE reviews SET score = $2, title = $3, comment = $4, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(score)
        .bind(title)
        .bind(comment)
        .fetch_optional(executor)
        .await?;
        Ok(review)
    }

    pub async fn delete<'e, E>(&self, executor: E, id: Uuid) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM reviews WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }
}
