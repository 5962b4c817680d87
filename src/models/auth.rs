// src/models/auth.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

// Papéis da plataforma
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "user_role", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Administrator,
    Supplier,
    Representative,
    Retailer,
}

impl UserRole {
    /// Fornecedores e representantes são donos de catálogos e produtos.
    pub fn is_publisher(self) -> bool {
        matches!(self, UserRole::Supplier | UserRole::Representative)
    }
}

// Representa um usuário vindo do banco de dados
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    #[schema(example = "Malharia Serra Azul")]
    pub name: String,
    #[schema(example = "contato@serraazul.com.br")]
    pub email: String,

    #[serde(skip_serializing)] // IMPORTANTE para segurança
    #[schema(ignore)]
    pub password_hash: String,

    pub role: UserRole,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Administrator
    }
}

fn validate_self_service_role(role: &UserRole) -> Result<(), ValidationError> {
    if *role == UserRole::Administrator {
        let mut err = ValidationError::new("role");
        err.message = Some("Não é possível se registrar como administrador.".into());
        return Err(err);
    }
    Ok(())
}

// Dados para registro de um novo usuário
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUserPayload {
    #[validate(length(min = 2, max = 120, message = "O nome deve ter entre 2 e 120 caracteres."))]
    #[schema(example = "Malharia Serra Azul")]
    pub name: String,
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    #[schema(example = "contato@serraazul.com.br")]
    pub email: String,
    #[validate(length(min = 6, message = "A senha deve ter no mínimo 6 caracteres."))]
    #[schema(example = "segredo123")]
    pub password: String,
    #[validate(custom(function = "validate_self_service_role"))]
    #[schema(example = json!("supplier"))]
    pub role: UserRole,
}

// Dados para login
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginUserPayload {
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: String,
    #[validate(length(min = 6, message = "A senha deve ter no mínimo 6 caracteres."))]
    pub password: String,
}

// Resposta de autenticação com o token
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserActivePayload {
    pub is_active: bool,
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UserFilter {
    pub role: Option<UserRole>,
}

// Estrutura de dados ("claims") dentro do JWT
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,      // Subject (ID do usuário)
    pub role: UserRole, // Papel no momento da emissão
    pub exp: usize,     // Expiration time (quando o token expira)
    pub iat: usize,     // Issued At (quando o token foi criado)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(role: UserRole) -> RegisterUserPayload {
        RegisterUserPayload {
            name: "Loja Centro".into(),
            email: "loja@centro.com".into(),
            password: "123456".into(),
            role,
        }
    }

    #[test]
    fn self_registration_rejects_administrator() {
        let errors = payload(UserRole::Administrator).validate().unwrap_err();
        assert!(errors.field_errors().contains_key("role"));
        assert!(payload(UserRole::Retailer).validate().is_ok());
    }

    #[test]
    fn roles_serialize_as_snake_case() {
        assert_eq!(serde_json::to_value(UserRole::Representative).unwrap(), "representative");
        let parsed: UserRole = serde_json::from_str("\"administrator\"").unwrap();
        assert_eq!(parsed, UserRole::Administrator);
    }

    #[test]
    fn publishers_are_suppliers_and_representatives() {
        assert!(UserRole::Supplier.is_publisher());
        assert!(UserRole::Representative.is_publisher());
        assert!(!UserRole::Retailer.is_publisher());
        assert!(!UserRole::Administrator.is_publisher());
    }
}
