// src/models/catalog.rs

use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// Ciclo de vida do catálogo. Só anda para frente, um passo por vez.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "catalog_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum CatalogStatus {
    PendingApproval,
    Approved,
    Published,
}

impl CatalogStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            CatalogStatus::PendingApproval => "pending_approval",
            CatalogStatus::Approved => "approved",
            CatalogStatus::Published => "published",
        }
    }

    pub fn next(self) -> Option<CatalogStatus> {
        match self {
            CatalogStatus::PendingApproval => Some(CatalogStatus::Approved),
            CatalogStatus::Approved => Some(CatalogStatus::Published),
            CatalogStatus::Published => None,
        }
    }

    pub fn can_transition_to(self, target: CatalogStatus) -> bool {
        self.next() == Some(target)
    }
}

impl fmt::Display for CatalogStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    pub id: Uuid,
    pub owner_id: Uuid,
    #[schema(example = "Coleção Verão 2026")]
    pub name: String,
    pub description: Option<String>,
    pub cover_image_url: Option<String>,
    pub status: CatalogStatus,
    #[schema(example = 4, minimum = 0, maximum = 5)]
    pub rating: i32,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Catalog {
    pub fn is_published(&self) -> bool {
        self.status == CatalogStatus::Published
    }
}

// Produto como aparece dentro de um catálogo (com preço e destaque do vínculo)
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CatalogProductEntry {
    pub product_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub image_urls: Vec<String>,
    #[schema(value_type = f64, example = 89.9)]
    pub price: Decimal,
    pub featured: bool,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CatalogDetail {
    #[serde(flatten)]
    pub catalog: Catalog,
    pub products: Vec<CatalogProductEntry>,
}

// Vínculo catálogo x produto
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CatalogProduct {
    pub catalog_id: Uuid,
    pub product_id: Uuid,
    #[schema(value_type = f64, example = 89.9)]
    pub price: Decimal,
    pub featured: bool,
    pub created_at: DateTime<Utc>,
}

// Limites da coluna NUMERIC(12, 2)
// 999_999_999_999 escala 2 (= 9_999_999_999.99); `Decimal::new` não é const
const MAX_PRICE: Decimal = Decimal::from_parts(0xD4A5_0FFF, 0xE8, 0, false, 2);
const PRICE_SCALE: u32 = 2;

fn validate_price(val: &Decimal) -> Result<(), validator::ValidationError> {
    let message = if val.is_sign_negative() && !val.is_zero() {
        "O valor não pode ser negativo."
    } else if *val > MAX_PRICE {
        "O valor excede o máximo permitido."
    } else if val.normalize().scale() > PRICE_SCALE {
        "O valor aceita no máximo duas casas decimais."
    } else {
        return Ok(());
    };
    let mut err = validator::ValidationError::new("range");
    err.message = Some(message.into());
    Err(err)
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCatalogPayload {
    #[validate(length(min = 2, max = 160, message = "O nome deve ter entre 2 e 160 caracteres."))]
    #[schema(example = "Coleção Verão 2026")]
    pub name: String,
    pub description: Option<String>,
    #[validate(url(message = "URL da capa inválida."))]
    pub cover_image_url: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCatalogPayload {
    #[validate(length(min = 2, max = 160, message = "O nome deve ter entre 2 e 160 caracteres."))]
    pub name: String,
    pub description: Option<String>,
    #[validate(url(message = "URL da capa inválida."))]
    pub cover_image_url: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct TransitionCatalogPayload {
    pub status: CatalogStatus,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddCatalogProductPayload {
    pub product_id: Uuid,
    #[validate(custom(function = "validate_price"))]
    #[schema(value_type = f64, example = 89.9)]
    pub price: Decimal,
    #[serde(default)]
    pub featured: bool,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCatalogProductPayload {
    #[validate(custom(function = "validate_price"))]
    #[schema(value_type = f64, example = 79.9)]
    pub price: Decimal,
    #[serde(default)]
    pub featured: bool,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CatalogFilter {
    pub status: Option<CatalogStatus>,
}

// Busca da vitrine (?q=verão)
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct VitrineQuery {
    pub q: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn lifecycle_only_moves_forward_one_step() {
        use CatalogStatus::*;
        assert!(PendingApproval.can_transition_to(Approved));
        assert!(Approved.can_transition_to(Published));

        assert!(!PendingApproval.can_transition_to(Published));
        assert!(!Approved.can_transition_to(PendingApproval));
        assert!(!Published.can_transition_to(Approved));
        assert!(!Published.can_transition_to(Published));
        assert_eq!(Published.next(), None);
    }

    #[test]
    fn status_uses_wire_names() {
        assert_eq!(
            serde_json::to_value(CatalogStatus::PendingApproval).unwrap(),
            "pending_approval"
        );
        assert_eq!(CatalogStatus::Published.to_string(), "published");
    }

    #[test]
    fn negative_price_is_rejected() {
        let payload = AddCatalogProductPayload {
            product_id: Uuid::new_v4(),
            price: Decimal::from_str("-1.50").unwrap(),
            featured: false,
        };
        assert!(payload.validate().is_err());
    }

    #[test]
    fn price_must_fit_the_price_column() {
        let with_price = |price: &str| UpdateCatalogProductPayload {
            price: Decimal::from_str(price).unwrap(),
            featured: false,
        };
        assert!(with_price("100000000000").validate().is_err());
        assert!(with_price("10000000000.00").validate().is_err());
        assert!(with_price("9999999999.99").validate().is_ok());
        assert!(with_price("89.999").validate().is_err());
        assert!(with_price("89.900").validate().is_ok());
        assert!(with_price("0").validate().is_ok());
    }
}
