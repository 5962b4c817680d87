// src/services/review_service.rs

use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{CatalogRepository, ReviewRepository},
    models::{
        auth::User,
        review::{Review, ReviewWithRating},
    },
    services::access,
};

// Nota exibida enquanto o catálogo não tem avaliações
pub const DEFAULT_RATING: i32 = 0;

/// Média das notas arredondada (meio para cima). Sem notas, a nota padrão.
pub fn aggregate_rating(scores: &[i32]) -> i32 {
    if scores.is_empty() {
        return DEFAULT_RATING;
    }
    let sum: i64 = scores.iter().map(|&s| i64::from(s)).sum();
    let count = scores.len() as i64;
    // round(sum / count) com inteiros: (2*sum + count) / (2*count)
    ((2 * sum + count) / (2 * count)) as i32
}

#[derive(Clone)]
pub struct ReviewService {
    repo: ReviewRepository,
    catalog_repo: CatalogRepository,
    pool: PgPool,
}

impl ReviewService {
    pub fn new(repo: ReviewRepository, catalog_repo: CatalogRepository, pool: PgPool) -> Self {
        Self { repo, catalog_repo, pool }
    }

    /// Recalcula a nota dentro da transação. A linha do catálogo já deve estar travada.
    async fn recompute_rating(&self, conn: &mut PgConnection, catalog_id: Uuid) -> Result<i32, AppError> {
        let scores = self.repo.scores_for_catalog(&mut *conn, catalog_id).await?;
        let rating = aggregate_rating(&scores);
        self.catalog_repo.set_rating(&mut *conn, catalog_id, rating).await?;
        Ok(rating)
    }

    pub async fn list(&self, catalog_id: Uuid) -> Result<Vec<Review>, AppError> {
        let catalog = self
            .catalog_repo
            .find_by_id(catalog_id)
            .await?
            .ok_or(AppError::CatalogNotFound)?;
        access::ensure_catalog_visible(None, &catalog)?;
        self.repo.list_by_catalog(catalog_id).await
    }

    pub async fn create(
        &self,
        user: &User,
        catalog_id: Uuid,
        score: i32,
        title: Option<&str>,
        comment: Option<&str>,
    ) -> Result<ReviewWithRating, AppError> {
        let mut tx = self.pool.begin().await?;

        // Trava o catálogo: escritas concorrentes de avaliação ficam em fila
        let catalog = self
            .catalog_repo
            .find_for_update(&mut *tx, catalog_id)
            .await?
            .ok_or(AppError::CatalogNotFound)?;
        access::ensure_catalog_visible(Some(user), &catalog)?;
        if !catalog.is_published() {
            return Err(AppError::CatalogNotPublished);
        }
        if catalog.owner_id == user.id {
            return Err(AppError::OwnCatalog);
        }

        let review = self
            .repo
            .create(&mut *tx, user.id, catalog_id, score, title, comment)
            .await?;
        let catalog_rating = self.recompute_rating(&mut tx, catalog_id).await?;

        tx.commit().await?;
        Ok(ReviewWithRating { review, catalog_rating })
    }

    pub async fn update(
        &self,
        user: &User,
        review_id: Uuid,
        score: i32,
        title: Option<&str>,
        comment: Option<&str>,
    ) -> Result<ReviewWithRating, AppError> {
        let existing = self.repo.find_by_id(review_id).await?.ok_or(AppError::ReviewNotFound)?;
        access::ensure_owner_or_admin(user, existing.user_id)?;

        let mut tx = self.pool.begin().await?;
        self.catalog_repo
            .find_for_update(&mut *tx, existing.catalog_id)
            .await?
            .ok_or(AppError::CatalogNotFound)?;

        let review = self
            .repo
            .update(&mut *tx, review_id, score, title, comment)
            .await?
            .ok_or(AppError::ReviewNotFound)?;
        let catalog_rating = self.recompute_rating(&mut tx, review.catalog_id).await?;

        tx.commit().await?;
        Ok(ReviewWithRating { review, catalog_rating })
    }

    /// Remove a avaliação e devolve a nova nota do catálogo.
    pub async fn delete(&self, user: &User, review_id: Uuid) -> Result<i32, AppError> {
        let existing = self.repo.find_by_id(review_id).await?.ok_or(AppError::ReviewNotFound)?;
        access::ensure_owner_or_admin(user, existing.user_id)?;

        let mut tx = self.pool.begin().await?;
        self.catalog_repo
            .find_for_update(&mut *tx, existing.catalog_id)
            .await?
            .ok_or(AppError::CatalogNotFound)?;

        if self.repo.delete(&mut *tx, review_id).await? == 0 {
            return Err(AppError::ReviewNotFound);
        }
        let catalog_rating = self.recompute_rating(&mut tx, existing.catalog_id).await?;

        tx.commit().await?;
        Ok(catalog_rating)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_reviews_yields_default_rating() {
        assert_eq!(aggregate_rating(&[]), DEFAULT_RATING);
    }

    #[test]
    fn rating_is_rounded_mean() {
        assert_eq!(aggregate_rating(&[5]), 5);
        assert_eq!(aggregate_rating(&[3, 4, 4]), 4); // 3.67
        assert_eq!(aggregate_rating(&[2, 2, 3]), 2); // 2.33
        assert_eq!(aggregate_rating(&[1, 1, 1, 5]), 2); // 2.0
    }

    #[test]
    fn halves_round_up() {
        assert_eq!(aggregate_rating(&[4, 5]), 5); // 4.5
        assert_eq!(aggregate_rating(&[1, 2]), 2); // 1.5
    }

    #[test]
    fn rating_stays_within_score_bounds() {
        let scores: Vec<i32> = (0..1000).map(|i| 1 + i % 5).collect();
        let rating = aggregate_rating(&scores);
        assert!((1..=5).contains(&rating));
        assert_eq!(rating, 3);
    }

    // --- Com banco: #[sqlx::test] cria um banco limpo e aplica as migrations ---

    use crate::{
        models::{auth::UserRole, catalog::CatalogStatus},
        services::access::fixtures::{seed_catalog, seed_user},
    };

    fn service(pool: &PgPool) -> ReviewService {
        ReviewService::new(
            ReviewRepository::new(pool.clone()),
            CatalogRepository::new(pool.clone()),
            pool.clone(),
        )
    }

    async fn stored_rating(pool: &PgPool, catalog_id: Uuid) -> i32 {
        CatalogRepository::new(pool.clone())
            .find_by_id(catalog_id)
            .await
            .unwrap()
            .unwrap()
            .rating
    }

    #[sqlx::test]
    async fn rating_follows_reviews_through_their_lifecycle(pool: PgPool) {
        let service = service(&pool);
        let owner = seed_user(&pool, UserRole::Supplier).await;
        let first = seed_user(&pool, UserRole::Retailer).await;
        let second = seed_user(&pool, UserRole::Retailer).await;
        let catalog = seed_catalog(&pool, owner.id, CatalogStatus::Published).await;

        let a = service.create(&first, catalog.id, 5, None, None).await.unwrap();
        assert_eq!(a.catalog_rating, 5);

        let b = service.create(&second, catalog.id, 4, Some("Bom"), None).await.unwrap();
        assert_eq!(b.catalog_rating, 5); // 4.5
        assert_eq!(stored_rating(&pool, catalog.id).await, 5);

        let edited = service.update(&second, b.review.id, 2, None, None).await.unwrap();
        assert_eq!(edited.catalog_rating, 4); // 3.5
        assert_eq!(stored_rating(&pool, catalog.id).await, 4);

        assert_eq!(service.delete(&first, a.review.id).await.unwrap(), 2);
        assert_eq!(service.delete(&second, b.review.id).await.unwrap(), DEFAULT_RATING);
        assert_eq!(stored_rating(&pool, catalog.id).await, DEFAULT_RATING);
    }

    #[sqlx::test]
    async fn second_review_by_same_user_is_rejected(pool: PgPool) {
        let service = service(&pool);
        let owner = seed_user(&pool, UserRole::Representative).await;
        let retailer = seed_user(&pool, UserRole::Retailer).await;
        let catalog = seed_catalog(&pool, owner.id, CatalogStatus::Published).await;

        service.create(&retailer, catalog.id, 3, None, None).await.unwrap();
        let again = service.create(&retailer, catalog.id, 1, None, None).await;
        assert!(matches!(again, Err(AppError::ReviewAlreadyExists)));
        assert_eq!(stored_rating(&pool, catalog.id).await, 3);
    }

    #[sqlx::test]
    async fn only_author_or_admin_edits_a_review(pool: PgPool) {
        let service = service(&pool);
        let owner = seed_user(&pool, UserRole::Supplier).await;
        let author = seed_user(&pool, UserRole::Retailer).await;
        let stranger = seed_user(&pool, UserRole::Retailer).await;
        let admin = seed_user(&pool, UserRole::Administrator).await;
        let catalog = seed_catalog(&pool, owner.id, CatalogStatus::Published).await;

        let created = service.create(&author, catalog.id, 4, None, None).await.unwrap();
        let denied = service.update(&stranger, created.review.id, 1, None, None).await;
        assert!(matches!(denied, Err(AppError::Forbidden)));

        let moderated = service.update(&admin, created.review.id, 2, None, None).await.unwrap();
        assert_eq!(moderated.catalog_rating, 2);
    }

    #[sqlx::test]
    async fn unpublished_catalog_cannot_be_reviewed(pool: PgPool) {
        let service = service(&pool);
        let owner = seed_user(&pool, UserRole::Supplier).await;
        let retailer = seed_user(&pool, UserRole::Retailer).await;
        let catalog = seed_catalog(&pool, owner.id, CatalogStatus::Approved).await;

        let result = service.create(&retailer, catalog.id, 5, None, None).await;
        assert!(matches!(result, Err(AppError::CatalogNotFound)));
    }
}
