// src/models/review.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: Uuid,
    pub user_id: Uuid,
    pub catalog_id: Uuid,
    #[schema(example = 5, minimum = 1, maximum = 5)]
    pub score: i32,
    pub title: Option<String>,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Resposta das escritas: a avaliação e a nota recalculada do catálogo
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReviewWithRating {
    pub review: Review,
    pub catalog_rating: i32,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ReviewPayload {
    #[validate(range(min = 1, max = 5, message = "A nota deve estar entre 1 e 5."))]
    #[schema(example = 5)]
    pub score: i32,
    #[validate(length(max = 120, message = "O título deve ter no máximo 120 caracteres."))]
    pub title: Option<String>,
    #[validate(length(max = 2000, message = "O comentário deve ter no máximo 2000 caracteres."))]
    pub comment: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_must_be_between_one_and_five() {
        for (score, ok) in [(0, false), (1, true), (5, true), (6, false)] {
            let payload = ReviewPayload { score, title: None, comment: None };
            assert_eq!(payload.validate().is_ok(), ok, "score {}", score);
        }
    }
}
