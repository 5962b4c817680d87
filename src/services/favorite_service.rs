// src/services/favorite_service.rs

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{CatalogRepository, FavoriteRepository},
    models::{auth::User, catalog::Catalog, favorite::Favorite},
};

#[derive(Clone)]
pub struct FavoriteService {
    repo: FavoriteRepository,
    catalog_repo: CatalogRepository,
}

impl FavoriteService {
    pub fn new(repo: FavoriteRepository, catalog_repo: CatalogRepository) -> Self {
        Self { repo, catalog_repo }
    }

    pub async fn add(&self, user: &User, catalog_id: Uuid) -> Result<Favorite, AppError> {
        let catalog = self
            .catalog_repo
            .find_by_id(catalog_id)
            .await?
            .ok_or(AppError::CatalogNotFound)?;

        // Só o que está na vitrine pode ser favoritado
        if !catalog.is_published() {
            return Err(AppError::CatalogNotFound);
        }

        self.repo.create(user.id, catalog_id).await
    }

    pub async fn remove(&self, user: &User, catalog_id: Uuid) -> Result<(), AppError> {
        if self.repo.delete(user.id, catalog_id).await? == 0 {
            return Err(AppError::FavoriteNotFound);
        }
        Ok(())
    }

    pub async fn list(&self, user: &User) -> Result<Vec<Catalog>, AppError> {
        self.catalog_repo.list_favorites_of(user.id).await
    }
}

#[cfg(test)]
mod tests {
    use sqlx::PgPool;

    use super::*;
    use crate::{
        models::{auth::UserRole, catalog::CatalogStatus},
        services::access::fixtures::{seed_catalog, seed_user},
    };

    fn service(pool: &PgPool) -> FavoriteService {
        FavoriteService::new(
            FavoriteRepository::new(pool.clone()),
            CatalogRepository::new(pool.clone()),
        )
    }

    #[sqlx::test]
    async fn favorite_lifecycle(pool: PgPool) {
        let service = service(&pool);
        let owner = seed_user(&pool, UserRole::Supplier).await;
        let retailer = seed_user(&pool, UserRole::Retailer).await;
        let catalog = seed_catalog(&pool, owner.id, CatalogStatus::Published).await;

        service.add(&retailer, catalog.id).await.unwrap();
        let again = service.add(&retailer, catalog.id).await;
        assert!(matches!(again, Err(AppError::FavoriteAlreadyExists)));

        let favorites = service.list(&retailer).await.unwrap();
        assert_eq!(favorites.len(), 1);
        assert_eq!(favorites[0].id, catalog.id);

        service.remove(&retailer, catalog.id).await.unwrap();
        let gone = service.remove(&retailer, catalog.id).await;
        assert!(matches!(gone, Err(AppError::FavoriteNotFound)));
    }

    #[sqlx::test]
    async fn unpublished_catalog_cannot_be_favorited(pool: PgPool) {
        let service = service(&pool);
        let owner = seed_user(&pool, UserRole::Supplier).await;
        let retailer = seed_user(&pool, UserRole::Retailer).await;
        let catalog = seed_catalog(&pool, owner.id, CatalogStatus::PendingApproval).await;

        let result = service.add(&retailer, catalog.id).await;
        assert!(matches!(result, Err(AppError::CatalogNotFound)));
    }
}
