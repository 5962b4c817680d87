// src/db/grade_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{common::error::AppError, models::grade::Grade};

#[derive(Clone)]
pub struct GradeRepository {
    pool: PgPool,
}

impl GradeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_by_product<'e, E>(&self, executor: E, product_id: Uuid) -> Result<Vec<Grade>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let grades = sqlx::query_as::<_, Grade>(
            "SELECT * FROM grades WHERE product_id = $1 ORDER BY color ASC, size ASC",
        )
        .bind(product_id)
        .fetch_all(executor)
        .await?;
        Ok(grades)
    }

    /// Esta query é um "UPSERT".
    /// Tenta INSERIR. Se a combinação (produto, cor, tamanho) já existir, SOBRESCREVE estoque e pronta-entrega.
    /// Nunca duplica a linha: o índice único resolve o conflito.
    pub async fn upsert<'e, E>(
        &self,
        executor: E,
        product_id: Uuid,
        color: &str,
        size: &str,
        stock: i32,
        ready_to_ship: bool,
    ) -> Result<Grade, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let grade = sqlx::query_as::<_, Grade>(
            r#"
            INSERT INTO grades (product_id, color, size, stock, ready_to_ship)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (product_id, lower(color), size)
            DO UPDATE SET
                stock = EXCLUDED.stock,
                ready_to_ship = EXCLUDED.ready_to_ship,
                updated_at = NOW()
            RETURNING *
            "#,
        )
        .bind(product_id)
        .bind(color)
        .bind(size)
        .bind(stock)
        .bind(ready_to_ship)
        .fetch_one(executor)
        .await?;
        Ok(grade)
    }

    pub async fn delete(&self, product_id: Uuid, grade_id: Uuid) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM grades WHERE id = $1 AND product_id = $2")
            .bind(grade_id)
            .bind(product_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
