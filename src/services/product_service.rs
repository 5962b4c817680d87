// src/services/product_service.rs

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::ProductRepository,
    models::{auth::User, product::Product},
    services::access,
};

#[derive(Clone)]
pub struct ProductService {
    repo: ProductRepository,
}

impl ProductService {
    pub fn new(repo: ProductRepository) -> Self {
        Self { repo }
    }

    pub async fn create(
        &self,
        user: &User,
        name: &str,
        description: Option<&str>,
        image_urls: &[String],
    ) -> Result<Product, AppError> {
        self.repo.create(user.id, name, description, image_urls).await
    }

    pub async fn list_for(&self, user: &User) -> Result<Vec<Product>, AppError> {
        if user.is_admin() {
            self.repo.list_all().await
        } else if user.role.is_publisher() {
            self.repo.list_by_owner(user.id).await
        } else {
            Err(AppError::Forbidden)
        }
    }

    /// Dono e administrador sempre veem; os demais só se o produto estiver num catálogo publicado.
    pub async fn get(&self, user: &User, id: Uuid) -> Result<Product, AppError> {
        let product = self.repo.find_by_id(id).await?.ok_or(AppError::ProductNotFound)?;
        if access::ensure_owner_or_admin(user, product.owner_id).is_ok()
            || self.repo.is_publicly_listed(id).await?
        {
            return Ok(product);
        }
        Err(AppError::ProductNotFound)
    }

    pub async fn update(
        &self,
        user: &User,
        id: Uuid,
        name: &str,
        description: Option<&str>,
        image_urls: &[String],
    ) -> Result<Product, AppError> {
        let product = self.repo.find_by_id(id).await?.ok_or(AppError::ProductNotFound)?;
        access::ensure_owner_or_admin(user, product.owner_id)?;
        self.repo
            .update(id, name, description, image_urls)
            .await?
            .ok_or(AppError::ProductNotFound)
    }

    pub async fn delete(&self, user: &User, id: Uuid) -> Result<(), AppError> {
        let product = self.repo.find_by_id(id).await?.ok_or(AppError::ProductNotFound)?;
        access::ensure_owner_or_admin(user, product.owner_id)?;
        if self.repo.delete(id).await? == 0 {
            return Err(AppError::ProductNotFound);
        }
        tracing::info!("🗑️ Produto {} removido por {}", id, user.id);
        Ok(())
    }
}
