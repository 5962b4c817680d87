// src/db/catalog_repo.rs

use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::{map_unique_violation, AppError},
    models::catalog::{Catalog, CatalogProduct, CatalogProductEntry, CatalogStatus},
};

#[derive(Clone)]
pub struct CatalogRepository {
    pool: PgPool,
}

impl CatalogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ---
    // Leitura
    // ---

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Catalog>, AppError> {
        let catalog = sqlx::query_as::<_, Catalog>("SELECT * FROM catalogs WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(catalog)
    }

    /// Trava a linha do catálogo até o fim da transação.
    pub async fn find_for_update<'e, E>(
        &self,
        executor: E,
        id: Uuid,
    ) -> Result<Option<Catalog>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let catalog =
            sqlx::query_as::<_, Catalog>("SELECT * FROM catalogs WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(executor)
                .await?;
        Ok(catalog)
    }

    pub async fn list_all(&self, status: Option<CatalogStatus>) -> Result<Vec<Catalog>, AppError> {
        let catalogs = sqlx::query_as::<_, Catalog>(
            r#"
            SELECT * FROM catalogs
            WHERE ($1::catalog_status IS NULL OR status = $1)
            ORDER BY created_at DESC
            "#,
        )
        .bind(status)
        .fetch_all(&self.pool)
        .await?;
        Ok(catalogs)
    }

    pub async fn list_by_owner(
        &self,
        owner_id: Uuid,
        status: Option<CatalogStatus>,
    ) -> Result<Vec<Catalog>, AppError> {
        let catalogs = sqlx::query_as::<_, Catalog>(
            r#"
            SELECT * FROM catalogs
            WHERE owner_id = $1
              AND ($2::catalog_status IS NULL OR status = $2)
            ORDER BY created_at DESC
            "#,
        )
        .bind(owner_id)
        .bind(status)
        .fetch_all(&self.pool)
        .await?;
        Ok(catalogs)
    }

    // Vitrine: só publicados, melhores notas primeiro
    pub async fn list_published(
        &self,
        search: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Catalog>, AppError> {
        let catalogs = sqlx::query_as::<_, Catalog>(
            r#"
            SELECT * FROM catalogs
            WHERE status = 'published'
              AND ($1::text IS NULL OR name ILIKE '%' || $1 || '%' ESCAPE '\')
            ORDER BY rating DESC, published_at DESC NULLS LAST
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(search)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;
        Ok(catalogs)
    }

    pub async fn count_published(&self, search: Option<&str>) -> Result<i64, AppError> {
        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM catalogs
            WHERE status = 'published'
              AND ($1::text IS NULL OR name ILIKE '%' || $1 || '%' ESCAPE '\')
            "#,
        )
        .bind(search)
        .fetch_one(&self.pool)
        .await?;
        Ok(total)
    }

    pub async fn list_favorites_of(&self, user_id: Uuid) -> Result<Vec<Catalog>, AppError> {
        let catalogs = sqlx::query_as::<_, Catalog>(
            r#"
            SELECT c.* FROM catalogs c
            JOIN favorites f ON f.catalog_id = c.id
            WHERE f.user_id = $1
            ORDER BY f.created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(catalogs)
    }

    pub async fn list_products(&self, catalog_id: Uuid) -> Result<Vec<CatalogProductEntry>, AppError> {
        let products = sqlx::query_as::<_, CatalogProductEntry>(
            r#"
            SELECT p.id AS product_id, p.name, p.description, p.image_urls,
                   cp.price, cp.featured
            FROM catalog_products cp
            JOIN products p ON p.id = cp.product_id
            WHERE cp.catalog_id = $1
            ORDER BY cp.featured DESC, p.name ASC
            "#,
        )
        .bind(catalog_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(products)
    }

    // ---
    // Escrita
    // ---

    pub async fn create<'e, E>(
        &self,
        executor: E,
        owner_id: Uuid,
        name: &str,
        description: Option<&str>,
        cover_image_url: Option<&str>,
    ) -> Result<Catalog, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let catalog = sqlx::query_as::<_, Catalog>(
            r#"
            INSERT INTO catalogs (owner_id, name, description, cover_image_url)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(owner_id)
        .bind(name)
        .bind(description)
        .bind(cover_image_url)
        .fetch_one(executor)
        .await?;
        Ok(catalog)
    }

    pub async fn update(
        &self,
        id: Uuid,
        name: &str,
        description: Option<&str>,
        cover_image_url: Option<&str>,
    ) -> Result<Option<Catalog>, AppError> {
        let catalog = sqlx::query_as::<_, Catalog>(
            r#"
            UPDATE catalogs
            SET name = $2, description = $3, cover_image_url = $4, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(description)
        .bind(cover_image_url)
        .fetch_optional(&self.pool)
        .await?;
        Ok(catalog)
    }

    pub async fn delete(&self, id: Uuid) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM catalogs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// Só atualiza se o status atual ainda for `from` (proteção contra corrida).
    pub async fn update_status<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        from: CatalogStatus,
        to: CatalogStatus,
    ) -> Result<Option<Catalog>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let catalog = sqlx::query_as::<_, Catalog>(
            r#"
            UPDATE catalogs
            SET status = $3,
                published_at = CASE WHEN $3 = 'published'::catalog_status THEN NOW() ELSE published_at END,
                updated_at = NOW()
            WHERE id = $1 AND status = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(from)
        .bind(to)
        .fetch_optional(executor)
        .await?;
        Ok(catalog)
    }

    pub async fn set_rating<'e, E>(&self, executor: E, id: Uuid, rating: i32) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query("UPDATE catalogs SET rating = $2, updated_at = NOW() WHERE id = $1")
            .bind(id)
            .bind(rating)
            .execute(executor)
            .await?;
        Ok(())
    }

    // ---
    // Vínculo catálogo x produto
    // ---

    pub async fn add_product<'e, E>(
        &self,
        executor: E,
        catalog_id: Uuid,
        product_id: Uuid,
        price: Decimal,
        featured: bool,
    ) -> Result<CatalogProduct, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, CatalogProduct>(
            r#"
            INSERT INTO catalog_products (catalog_id, product_id, price, featured)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(catalog_id)
        .bind(product_id)
        .bind(price)
        .bind(featured)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            map_unique_violation(e, |constraint| match constraint {
                "catalog_products_pkey" => AppError::ProductAlreadyInCatalog,
                other => AppError::UniqueConstraintViolation(other.to_string()),
            })
        })
    }

    pub async fn update_product(
        &self,
        catalog_id: Uuid,
        product_id: Uuid,
        price: Decimal,
        featured: bool,
    ) -> Result<Option<CatalogProduct>, AppError> {
        let entry = sqlx::query_as::<_, CatalogProduct>(
            r#"
            UPDATE catalog_products SET price = $3, featured = $4
            WHERE catalog_id = $1 AND product_id = $2
            RETURNING *
            "#,
        )
        .bind(catalog_id)
        .bind(product_id)
        .bind(price)
        .bind(featured)
        .fetch_optional(&self.pool)
        .await?;
        Ok(entry)
    }

    pub async fn remove_product(&self, catalog_id: Uuid, product_id: Uuid) -> Result<u64, AppError> {
        let result =
            sqlx::query("DELETE FROM catalog_products WHERE catalog_id = $1 AND product_id = $2")
                .bind(catalog_id)
                .bind(product_id)
                .execute(&self.pool)
                .await?;
        Ok(result.rows_affected())
    }
}
