// src/services/catalog_service.rs

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::{
        error::AppError,
        pagination::{Paginated, PaginationParams},
    },
    db::{CatalogRepository, ProductRepository},
    models::{
        auth::User,
        catalog::{Catalog, CatalogDetail, CatalogProduct, CatalogStatus},
    },
    services::access,
};

#[derive(Clone)]
pub struct CatalogService {
    repo: CatalogRepository,
    product_repo: ProductRepository,
    pool: PgPool,
}

/// Termo de busca da vitrine: vazio conta como "sem filtro".
/// Curingas do LIKE são escapados para casar literalmente.
fn normalize_search(q: Option<&str>) -> Option<String> {
    q.map(str::trim).filter(|s| !s.is_empty()).map(escape_like)
}

fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Valida o próximo passo do ciclo de vida.
pub fn check_transition(current: CatalogStatus, target: CatalogStatus) -> Result<(), AppError> {
    if current.can_transition_to(target) {
        Ok(())
    } else {
        Err(AppError::InvalidStatusTransition { from: current, to: target })
    }
}

impl CatalogService {
    pub fn new(repo: CatalogRepository, product_repo: ProductRepository, pool: PgPool) -> Self {
        Self { repo, product_repo, pool }
    }

    async fn find(&self, id: Uuid) -> Result<Catalog, AppError> {
        self.repo.find_by_id(id).await?.ok_or(AppError::CatalogNotFound)
    }

    /// Busca o catálogo e exige que o usuário seja dono ou administrador.
    async fn find_owned(&self, user: &User, id: Uuid) -> Result<Catalog, AppError> {
        let catalog = self.find(id).await?;
        access::ensure_owner_or_admin(user, catalog.owner_id)?;
        Ok(catalog)
    }

    /// Catálogo que o usuário (ou o público, se None) pode enxergar.
    pub async fn find_visible(&self, user: Option<&User>, id: Uuid) -> Result<Catalog, AppError> {
        let catalog = self.find(id).await?;
        access::ensure_catalog_visible(user, &catalog)?;
        Ok(catalog)
    }

    // --- CRUD ---

    pub async fn create(
        &self,
        user: &User,
        name: &str,
        description: Option<&str>,
        cover_image_url: Option<&str>,
    ) -> Result<Catalog, AppError> {
        let catalog = self
            .repo
            .create(&self.pool, user.id, name, description, cover_image_url)
            .await?;
        tracing::info!("📒 Catálogo {} criado por {}", catalog.id, user.id);
        Ok(catalog)
    }

    pub async fn list_for(
        &self,
        user: &User,
        status: Option<CatalogStatus>,
    ) -> Result<Vec<Catalog>, AppError> {
        if user.is_admin() {
            self.repo.list_all(status).await
        } else if user.role.is_publisher() {
            self.repo.list_by_owner(user.id, status).await
        } else {
            // Lojistas navegam pela vitrine
            Err(AppError::Forbidden)
        }
    }

    pub async fn get_detail(&self, user: Option<&User>, id: Uuid) -> Result<CatalogDetail, AppError> {
        let catalog = self.find_visible(user, id).await?;
        let products = self.repo.list_products(catalog.id).await?;
        Ok(CatalogDetail { catalog, products })
    }

    pub async fn update(
        &self,
        user: &User,
        id: Uuid,
        name: &str,
        description: Option<&str>,
        cover_image_url: Option<&str>,
    ) -> Result<Catalog, AppError> {
        self.find_owned(user, id).await?;
        self.repo
            .update(id, name, description, cover_image_url)
            .await?
            .ok_or(AppError::CatalogNotFound)
    }

    pub async fn delete(&self, user: &User, id: Uuid) -> Result<(), AppError> {
        self.find_owned(user, id).await?;
        if self.repo.delete(id).await? == 0 {
            return Err(AppError::CatalogNotFound);
        }
        tracing::info!("🗑️ Catálogo {} removido por {}", id, user.id);
        Ok(())
    }

    // --- CICLO DE VIDA ---

    pub async fn transition_status(
        &self,
        user: &User,
        id: Uuid,
        target: CatalogStatus,
    ) -> Result<Catalog, AppError> {
        access::ensure_admin(user)?;

        let mut tx = self.pool.begin().await?;

        let current = self
            .repo
            .find_for_update(&mut *tx, id)
            .await?
            .ok_or(AppError::CatalogNotFound)?;

        check_transition(current.status, target)?;

        let updated = self
            .repo
            .update_status(&mut *tx, id, current.status, target)
            .await?
            .ok_or(AppError::InvalidStatusTransition { from: current.status, to: target })?;

        tx.commit().await?;

        tracing::info!(
            "🔁 Catálogo {}: {} -> {} (por {})",
            id,
            current.status,
            target,
            user.id
        );
        Ok(updated)
    }

    // --- PRODUTOS DO CATÁLOGO ---

    pub async fn add_product(
        &self,
        user: &User,
        catalog_id: Uuid,
        product_id: Uuid,
        price: Decimal,
        featured: bool,
    ) -> Result<CatalogProduct, AppError> {
        self.find_owned(user, catalog_id).await?;

        let product = self
            .product_repo
            .find_by_id(product_id)
            .await?
            .ok_or(AppError::ProductNotFound)?;
        access::ensure_owner_or_admin(user, product.owner_id)?;

        self.repo
            .add_product(&self.pool, catalog_id, product_id, price, featured)
            .await
    }

    pub async fn update_product(
        &self,
        user: &User,
        catalog_id: Uuid,
        product_id: Uuid,
        price: Decimal,
        featured: bool,
    ) -> Result<CatalogProduct, AppError> {
        self.find_owned(user, catalog_id).await?;
        self.repo
            .update_product(catalog_id, product_id, price, featured)
            .await?
            .ok_or(AppError::AssociationNotFound)
    }

    pub async fn remove_product(
        &self,
        user: &User,
        catalog_id: Uuid,
        product_id: Uuid,
    ) -> Result<(), AppError> {
        self.find_owned(user, catalog_id).await?;
        if self.repo.remove_product(catalog_id, product_id).await? == 0 {
            return Err(AppError::AssociationNotFound);
        }
        Ok(())
    }

    // --- VITRINE ---

    pub async fn vitrine(
        &self,
        q: Option<&str>,
        params: &PaginationParams,
    ) -> Result<Paginated<Catalog>, AppError> {
        let search = normalize_search(q);
        let catalogs = self
            .repo
            .list_published(search.as_deref(), params.limit(), params.offset())
            .await?;
        let total = self.repo.count_published(search.as_deref()).await?;
        Ok(Paginated::new(catalogs, params, total))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_search_means_no_filter() {
        assert_eq!(normalize_search(None), None);
        assert_eq!(normalize_search(Some("   ")), None);
        assert_eq!(normalize_search(Some("  verão ")), Some("verão".to_string()));
    }

    #[test]
    fn like_wildcards_in_search_match_literally() {
        assert_eq!(normalize_search(Some("100%")), Some("100\\%".to_string()));
        assert_eq!(normalize_search(Some("_")), Some("\\_".to_string()));
        assert_eq!(normalize_search(Some("a\\b")), Some("a\\\\b".to_string()));
    }

    #[test]
    fn publishing_requires_approved_status() {
        assert!(matches!(
            check_transition(CatalogStatus::PendingApproval, CatalogStatus::Published),
            Err(AppError::InvalidStatusTransition {
                from: CatalogStatus::PendingApproval,
                to: CatalogStatus::Published
            })
        ));
        assert!(check_transition(CatalogStatus::Approved, CatalogStatus::Published).is_ok());
    }

    #[test]
    fn transitions_never_go_backwards() {
        assert!(check_transition(CatalogStatus::Published, CatalogStatus::Approved).is_err());
        assert!(check_transition(CatalogStatus::Approved, CatalogStatus::PendingApproval).is_err());
        assert!(check_transition(CatalogStatus::Approved, CatalogStatus::Approved).is_err());
    }

    // --- Com banco ---

    use crate::{
        models::auth::UserRole,
        services::access::fixtures::{seed_catalog, seed_user},
    };

    fn service(pool: &PgPool) -> CatalogService {
        CatalogService::new(
            CatalogRepository::new(pool.clone()),
            ProductRepository::new(pool.clone()),
            pool.clone(),
        )
    }

    #[sqlx::test]
    async fn admin_moves_catalog_one_step_at_a_time(pool: PgPool) {
        let service = service(&pool);
        let owner = seed_user(&pool, UserRole::Supplier).await;
        let admin = seed_user(&pool, UserRole::Administrator).await;
        let catalog = seed_catalog(&pool, owner.id, CatalogStatus::PendingApproval).await;

        let skipped = service
            .transition_status(&admin, catalog.id, CatalogStatus::Published)
            .await;
        assert!(matches!(skipped, Err(AppError::InvalidStatusTransition { .. })));

        let by_owner = service
            .transition_status(&owner, catalog.id, CatalogStatus::Approved)
            .await;
        assert!(matches!(by_owner, Err(AppError::Forbidden)));

        service
            .transition_status(&admin, catalog.id, CatalogStatus::Approved)
            .await
            .unwrap();
        let published = service
            .transition_status(&admin, catalog.id, CatalogStatus::Published)
            .await
            .unwrap();
        assert_eq!(published.status, CatalogStatus::Published);
        assert!(published.published_at.is_some());
    }

    #[sqlx::test]
    async fn stranger_cannot_edit_catalog(pool: PgPool) {
        let service = service(&pool);
        let owner = seed_user(&pool, UserRole::Representative).await;
        let stranger = seed_user(&pool, UserRole::Supplier).await;
        let catalog = seed_catalog(&pool, owner.id, CatalogStatus::Approved).await;

        let denied = service.update(&stranger, catalog.id, "Outro nome", None, None).await;
        assert!(matches!(denied, Err(AppError::Forbidden)));

        let renamed = service.update(&owner, catalog.id, "Coleção Outono", None, None).await.unwrap();
        assert_eq!(renamed.name, "Coleção Outono");
    }

    #[sqlx::test]
    async fn vitrine_search_treats_percent_literally(pool: PgPool) {
        let service = service(&pool);
        let owner = seed_user(&pool, UserRole::Supplier).await;
        seed_catalog(&pool, owner.id, CatalogStatus::Published).await;

        let params = PaginationParams::default();
        let all = service.vitrine(Some("%"), &params).await.unwrap();
        assert_eq!(all.meta.total, 0);

        let hit = service.vitrine(Some("inverno"), &params).await.unwrap();
        assert_eq!(hit.meta.total, 1);
        assert_eq!(hit.data.len(), 1);
    }
}
