// src/models/grade.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

// Variação de estoque de um produto (cor x tamanho)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Grade {
    pub id: Uuid,
    pub product_id: Uuid,
    #[schema(example = "Azul Marinho")]
    pub color: String,
    #[schema(example = "M")]
    pub size: String,
    #[schema(example = 42)]
    pub stock: i32,
    pub ready_to_ship: bool,
    pub updated_at: DateTime<Utc>,
}

// Só espaços não identifica cor nem tamanho
fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("O campo não pode ficar em branco.".into());
        return Err(err);
    }
    Ok(())
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GradeInput {
    #[validate(
        length(min = 1, max = 60, message = "A cor é obrigatória."),
        custom(function = "validate_not_blank")
    )]
    #[schema(example = "Azul Marinho")]
    pub color: String,
    #[validate(
        length(min = 1, max = 30, message = "O tamanho é obrigatório."),
        custom(function = "validate_not_blank")
    )]
    #[schema(example = "M")]
    pub size: String,
    #[validate(range(min = 0, message = "O estoque não pode ser negativo."))]
    #[schema(example = 42)]
    pub stock: i32,
    #[serde(default)]
    pub ready_to_ship: bool,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpsertGradesPayload {
    #[validate(length(min = 1, message = "Informe ao menos uma grade."), nested)]
    pub grades: Vec<GradeInput>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(color: &str, size: &str) -> UpsertGradesPayload {
        UpsertGradesPayload {
            grades: vec![GradeInput {
                color: color.into(),
                size: size.into(),
                stock: 5,
                ready_to_ship: false,
            }],
        }
    }

    #[test]
    fn blank_color_or_size_is_rejected() {
        assert!(payload("   ", "M").validate().is_err());
        assert!(payload("Azul", " \t").validate().is_err());
        assert!(payload(" Azul ", "m").validate().is_ok());
    }

    #[test]
    fn empty_grade_list_is_rejected() {
        let errors = UpsertGradesPayload { grades: vec![] }.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("grades"));
    }

    #[test]
    fn grade_input_serializes_in_camel_case() {
        let json = serde_json::to_value(&payload("Azul", "M").grades[0]).unwrap();
        assert_eq!(json["readyToShip"], false);
        assert_eq!(json["stock"], 5);
    }
}
