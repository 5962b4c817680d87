// src/services/grade_service.rs

use std::collections::HashMap;

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{GradeRepository, ProductRepository},
    models::{
        auth::User,
        grade::{Grade, GradeInput},
        product::Product,
    },
    services::access,
};

#[derive(Clone)]
pub struct GradeService {
    repo: GradeRepository,
    product_repo: ProductRepository,
    pool: PgPool,
}

/// Normaliza e remove duplicatas do lote enviado.
///
/// Cor e tamanho são aparados; a comparação ignora maiúsculas. Para a mesma chave,
/// a última entrada vence, mas a posição da primeira aparição é mantida.
pub fn merge_grade_inputs(inputs: Vec<GradeInput>) -> Vec<GradeInput> {
    let mut merged: Vec<GradeInput> = Vec::with_capacity(inputs.len());
    let mut index: HashMap<(String, String), usize> = HashMap::new();

    for input in inputs {
        let normalized = GradeInput {
            color: input.color.trim().to_string(),
            size: input.size.trim().to_uppercase(),
            ..input
        };
        let key = (normalized.color.to_lowercase(), normalized.size.clone());

        match index.get(&key) {
            Some(&pos) => merged[pos] = normalized,
            None => {
                index.insert(key, merged.len());
                merged.push(normalized);
            }
        }
    }
    merged
}

impl GradeService {
    pub fn new(repo: GradeRepository, product_repo: ProductRepository, pool: PgPool) -> Self {
        Self { repo, product_repo, pool }
    }

    async fn find_owned_product(&self, user: &User, product_id: Uuid) -> Result<Product, AppError> {
        let product = self
            .product_repo
            .find_by_id(product_id)
            .await?
            .ok_or(AppError::ProductNotFound)?;
        access::ensure_owner_or_admin(user, product.owner_id)?;
        Ok(product)
    }

    // --- UPSERT DE GRADES ---
    pub async fn upsert_grades(
        &self,
        user: &User,
        product_id: Uuid,
        inputs: Vec<GradeInput>,
    ) -> Result<Vec<Grade>, AppError> {
        self.find_owned_product(user, product_id).await?;

        let merged = merge_grade_inputs(inputs);

        let mut tx = self.pool.begin().await?;
        for grade in &merged {
            self.repo
                .upsert(
                    &mut *tx,
                    product_id,
                    &grade.color,
                    &grade.size,
                    grade.stock,
                    grade.ready_to_ship,
                )
                .await?;
        }
        let grades = self.repo.list_by_product(&mut *tx, product_id).await?;
        tx.commit().await?;

        tracing::info!("📦 {} grade(s) gravadas no produto {}", merged.len(), product_id);
        Ok(grades)
    }

    pub async fn list(&self, user: &User, product_id: Uuid) -> Result<Vec<Grade>, AppError> {
        let product = self
            .product_repo
            .find_by_id(product_id)
            .await?
            .ok_or(AppError::ProductNotFound)?;
        if access::ensure_owner_or_admin(user, product.owner_id).is_err()
            && !self.product_repo.is_publicly_listed(product_id).await?
        {
            return Err(AppError::ProductNotFound);
        }
        self.repo.list_by_product(&self.pool, product_id).await
    }

    pub async fn delete(&self, user: &User, product_id: Uuid, grade_id: Uuid) -> Result<(), AppError> {
        self.find_owned_product(user, product_id).await?;
        if self.repo.delete(product_id, grade_id).await? == 0 {
            return Err(AppError::GradeNotFound);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(color: &str, size: &str, stock: i32) -> GradeInput {
        GradeInput { color: color.into(), size: size.into(), stock, ready_to_ship: false }
    }

    #[test]
    fn same_color_and_size_keeps_last_stock() {
        let merged = merge_grade_inputs(vec![
            input("Azul", "M", 10),
            input("Preto", "G", 3),
            input(" azul ", "m", 25),
        ]);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].color, "azul");
        assert_eq!(merged[0].size, "M");
        assert_eq!(merged[0].stock, 25);
        assert_eq!(merged[1].stock, 3);
    }

    #[test]
    fn distinct_keys_are_preserved_in_order() {
        let merged = merge_grade_inputs(vec![
            input("Azul", "P", 1),
            input("Azul", "M", 2),
            input("Azul", "G", 3),
        ]);
        let sizes: Vec<_> = merged.iter().map(|g| g.size.as_str()).collect();
        assert_eq!(sizes, ["P", "M", "G"]);
    }

    #[test]
    fn ready_to_ship_flag_follows_last_entry() {
        let mut last = input("Verde", "U", 0);
        last.ready_to_ship = true;
        let merged = merge_grade_inputs(vec![input("Verde", "U", 9), last]);
        assert_eq!(merged.len(), 1);
        assert!(merged[0].ready_to_ship);
        assert_eq!(merged[0].stock, 0);
    }

    // --- Com banco ---

    use crate::{
        models::auth::UserRole,
        services::access::fixtures::{seed_product, seed_user},
    };

    fn service(pool: &PgPool) -> GradeService {
        GradeService::new(
            GradeRepository::new(pool.clone()),
            ProductRepository::new(pool.clone()),
            pool.clone(),
        )
    }

    #[sqlx::test]
    async fn upsert_replaces_stock_of_existing_variant(pool: PgPool) {
        let service = service(&pool);
        let owner = seed_user(&pool, UserRole::Supplier).await;
        let product = seed_product(&pool, owner.id).await;

        service
            .upsert_grades(&owner, product.id, vec![input("Azul", "M", 10), input("Preto", "G", 4)])
            .await
            .unwrap();
        service
            .upsert_grades(&owner, product.id, vec![input(" azul ", "m", 3)])
            .await
            .unwrap();

        let grades = service.list(&owner, product.id).await.unwrap();
        assert_eq!(grades.len(), 2);
        let azul = grades.iter().find(|g| g.size == "M").unwrap();
        assert_eq!(azul.color, "Azul");
        assert_eq!(azul.stock, 3);

        let rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM grades WHERE product_id = $1")
            .bind(product.id)
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(rows, 2);
    }

    #[sqlx::test]
    async fn only_owner_or_admin_writes_grades(pool: PgPool) {
        let service = service(&pool);
        let owner = seed_user(&pool, UserRole::Supplier).await;
        let stranger = seed_user(&pool, UserRole::Supplier).await;
        let product = seed_product(&pool, owner.id).await;

        let denied = service
            .upsert_grades(&stranger, product.id, vec![input("Azul", "M", 1)])
            .await;
        assert!(matches!(denied, Err(AppError::Forbidden)));

        let missing = service.delete(&owner, product.id, Uuid::new_v4()).await;
        assert!(matches!(missing, Err(AppError::GradeNotFound)));
    }
}
