// src/db/dashboard_repo.rs

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::dashboard::{AdminDashboard, PublisherDashboard, RetailerDashboard, RoleCount, StatusCount},
};

#[derive(Clone)]
pub struct DashboardRepository {
    pool: PgPool,
}

impl DashboardRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // 1. Visão geral da plataforma
    pub async fn admin_summary(&self) -> Result<AdminDashboard, AppError> {
        // Snapshot consistente dos dados
        let mut tx = self.pool.begin().await?;

        let catalogs_by_status = sqlx::query_as::<_, StatusCount>(
            "SELECT status, COUNT(*) AS total FROM catalogs GROUP BY status ORDER BY status",
        )
        .fetch_all(&mut *tx)
        .await?;

        let users_by_role = sqlx::query_as::<_, RoleCount>(
            "SELECT role, COUNT(*) AS total FROM users WHERE is_active GROUP BY role ORDER BY role",
        )
        .fetch_all(&mut *tx)
        .await?;

        let new_messages: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM messages WHERE status = 'new'")
                .fetch_one(&mut *tx)
                .await?;

        tx.commit().await?;

        Ok(AdminDashboard { catalogs_by_status, users_by_role, new_messages })
    }

    // 2. Fornecedor / representante: só o que é dele
    pub async fn publisher_summary(&self, owner_id: Uuid) -> Result<PublisherDashboard, AppError> {
        let mut tx = self.pool.begin().await?;

        let catalogs_by_status = sqlx::query_as::<_, StatusCount>(
            r#"
            SELECT status, COUNT(*) AS total FROM catalogs
            WHERE owner_id = $1
            GROUP BY status ORDER BY status
            "#,
        )
        .bind(owner_id)
        .fetch_all(&mut *tx)
        .await?;

        let total_products: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM products WHERE owner_id = $1")
                .bind(owner_id)
                .fetch_one(&mut *tx)
                .await?;

        let new_messages: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM messages m
            JOIN catalogs c ON c.id = m.catalog_id
            WHERE c.owner_id = $1 AND m.status = 'new'
            "#,
        )
        .bind(owner_id)
        .fetch_one(&mut *tx)
        .await?;

        let average_rating: Option<Decimal> = sqlx::query_scalar(
            r#"
            SELECT ROUND(AVG(rating)::numeric, 2) FROM catalogs
            WHERE owner_id = $1 AND status = 'published'
            "#,
        )
        .bind(owner_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(PublisherDashboard { catalogs_by_status, total_products, new_messages, average_rating })
    }

    // 3. Lojista
    pub async fn retailer_summary(&self, user_id: Uuid) -> Result<RetailerDashboard, AppError> {
        let mut tx = self.pool.begin().await?;

        let favorites: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM favorites WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(&mut *tx)
            .await?;

        let (sent_messages, answered_messages): (i64, i64) = sqlx::query_as(
            r#"
            SELECT COUNT(*), COUNT(*) FILTER (WHERE status = 'answered')
            FROM messages WHERE sender_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(RetailerDashboard { favorites, sent_messages, answered_messages })
    }
}
