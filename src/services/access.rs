// src/services/access.rs
//
// Regras de acesso compartilhadas pelos serviços: papel, dono e visibilidade.

use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{auth::User, catalog::Catalog},
};

pub fn ensure_admin(user: &User) -> Result<(), AppError> {
    if user.is_admin() {
        Ok(())
    } else {
        Err(AppError::Forbidden)
    }
}

/// Só o dono do recurso ou um administrador podem alterá-lo.
pub fn ensure_owner_or_admin(user: &User, owner_id: Uuid) -> Result<(), AppError> {
    if user.is_admin() || user.id == owner_id {
        Ok(())
    } else {
        Err(AppError::Forbidden)
    }
}

pub fn can_view_catalog(user: Option<&User>, catalog: &Catalog) -> bool {
    catalog.is_published()
        || user.is_some_and(|u| u.is_admin() || u.id == catalog.owner_id)
}

/// Catálogo não publicado é invisível (404) para quem não é dono nem administrador.
pub fn ensure_catalog_visible(user: Option<&User>, catalog: &Catalog) -> Result<(), AppError> {
    if can_view_catalog(user, catalog) {
        Ok(())
    } else {
        Err(AppError::CatalogNotFound)
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use chrono::Utc;
    use sqlx::PgPool;
    use uuid::Uuid;

    use crate::{
        db::{CatalogRepository, ProductRepository, UserRepository},
        models::{
            auth::{User, UserRole},
            catalog::{Catalog, CatalogStatus},
            product::Product,
        },
    };

    pub fn user(role: UserRole) -> User {
        User {
            id: Uuid::new_v4(),
            name: "Fulano".into(),
            email: format!("{}@vitrine.test", Uuid::new_v4()),
            password_hash: "hash".into(),
            role,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    pub fn catalog(owner_id: Uuid, status: CatalogStatus) -> Catalog {
        Catalog {
            id: Uuid::new_v4(),
            owner_id,
            name: "Coleção Inverno".into(),
            description: None,
            cover_image_url: None,
            status,
            rating: 0,
            published_at: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    // --- Dados persistidos, para os testes com banco (#[sqlx::test]) ---

    pub async fn seed_user(pool: &PgPool, role: UserRole) -> User {
        let email = format!("{}@vitrine.test", Uuid::new_v4());
        UserRepository::new(pool.clone())
            .create_user(pool, "Fulano", &email, "hash", role)
            .await
            .unwrap()
    }

    /// Cria o catálogo e percorre o ciclo de vida até `status`.
    pub async fn seed_catalog(pool: &PgPool, owner_id: Uuid, status: CatalogStatus) -> Catalog {
        let repo = CatalogRepository::new(pool.clone());
        let mut catalog = repo
            .create(pool, owner_id, "Coleção Inverno", None, None)
            .await
            .unwrap();
        while catalog.status != status {
            let next = catalog.status.next().unwrap();
            catalog = repo
                .update_status(pool, catalog.id, catalog.status, next)
                .await
                .unwrap()
                .unwrap();
        }
        catalog
    }

    pub async fn seed_product(pool: &PgPool, owner_id: Uuid) -> Product {
        ProductRepository::new(pool.clone())
            .create(owner_id, "Camiseta Básica", None, &[])
            .await
            .unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::{catalog, user};
    use super::*;
    use crate::models::{auth::UserRole, catalog::CatalogStatus};

    #[test]
    fn owner_and_admin_may_mutate_others_may_not() {
        let owner = user(UserRole::Supplier);
        let admin = user(UserRole::Administrator);
        let stranger = user(UserRole::Supplier);
        let retailer = user(UserRole::Retailer);

        assert!(ensure_owner_or_admin(&owner, owner.id).is_ok());
        assert!(ensure_owner_or_admin(&admin, owner.id).is_ok());
        assert!(matches!(ensure_owner_or_admin(&stranger, owner.id), Err(AppError::Forbidden)));
        assert!(matches!(ensure_owner_or_admin(&retailer, owner.id), Err(AppError::Forbidden)));
    }

    #[test]
    fn only_administrators_pass_admin_check() {
        assert!(ensure_admin(&user(UserRole::Administrator)).is_ok());
        assert!(ensure_admin(&user(UserRole::Representative)).is_err());
    }

    #[test]
    fn unpublished_catalog_is_hidden_from_strangers() {
        let owner = user(UserRole::Representative);
        let retailer = user(UserRole::Retailer);
        let admin = user(UserRole::Administrator);
        let draft = catalog(owner.id, CatalogStatus::Approved);

        assert!(can_view_catalog(Some(&owner), &draft));
        assert!(can_view_catalog(Some(&admin), &draft));
        assert!(!can_view_catalog(Some(&retailer), &draft));
        assert!(!can_view_catalog(None, &draft));
        assert!(matches!(
            ensure_catalog_visible(Some(&retailer), &draft),
            Err(AppError::CatalogNotFound)
        ));
    }

    #[test]
    fn published_catalog_is_public() {
        let owner = user(UserRole::Supplier);
        let published = catalog(owner.id, CatalogStatus::Published);
        assert!(can_view_catalog(None, &published));
    }
}
