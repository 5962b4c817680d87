// src/common/error.rs

use std::sync::LazyLock;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;

use crate::{
    common::i18n::{I18nStore, DEFAULT_LANG},
    middleware::i18n::Locale,
    models::catalog::CatalogStatus,
};

// Nosso tipo de erro de domínio. Os handlers traduzem para ApiError com o idioma do cliente.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("E-mail já existe")]
    EmailAlreadyExists,

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Token inválido")]
    InvalidToken,

    #[error("Conta desativada")]
    AccountDisabled,

    #[error("Acesso negado")]
    Forbidden,

    #[error("Usuário não encontrado")]
    UserNotFound,

    #[error("Catálogo não encontrado")]
    CatalogNotFound,

    #[error("Produto não encontrado")]
    ProductNotFound,

    #[error("Grade não encontrada")]
    GradeNotFound,

    #[error("Avaliação não encontrada")]
    ReviewNotFound,

    #[error("Mensagem não encontrada")]
    MessageNotFound,

    #[error("Upload não encontrado")]
    UploadNotFound,

    #[error("Favorito não encontrado")]
    FavoriteNotFound,

    #[error("Produto não pertence ao catálogo")]
    AssociationNotFound,

    #[error("Avaliação duplicada")]
    ReviewAlreadyExists,

    #[error("Favorito duplicado")]
    FavoriteAlreadyExists,

    #[error("Produto já está no catálogo")]
    ProductAlreadyInCatalog,

    #[error("Mensagem já respondida")]
    MessageAlreadyAnswered,

    #[error("Transição de status inválida: {from} -> {to}")]
    InvalidStatusTransition { from: CatalogStatus, to: CatalogStatus },

    #[error("Catálogo não publicado")]
    CatalogNotPublished,

    #[error("Ação não permitida no próprio catálogo")]
    OwnCatalog,

    #[error("Auto desativação")]
    SelfDeactivation,

    #[error("Upload encerrado")]
    UploadClosed,

    #[error("Violação de unicidade: {0}")]
    UniqueConstraintViolation(String),

    #[error("Fonte não encontrada: {0}")]
    FontNotFound(String),

    // Variante para erros de banco de dados
    #[error("Erro de banco de dados: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Erro interno do servidor: {0}")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

// O corpo de erro que o cliente recebe
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub error: String,
    pub details: Option<Value>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match self.details {
            Some(details) => json!({ "error": self.error, "details": details }),
            None => json!({ "error": self.error }),
        };
        (self.status, Json(body)).into_response()
    }
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_)
            | AppError::CatalogNotPublished
            | AppError::OwnCatalog
            | AppError::SelfDeactivation => StatusCode::BAD_REQUEST,

            AppError::InvalidCredentials | AppError::InvalidToken => StatusCode::UNAUTHORIZED,

            AppError::AccountDisabled | AppError::Forbidden => StatusCode::FORBIDDEN,

            AppError::UserNotFound
            | AppError::CatalogNotFound
            | AppError::ProductNotFound
            | AppError::GradeNotFound
            | AppError::ReviewNotFound
            | AppError::MessageNotFound
            | AppError::UploadNotFound
            | AppError::FavoriteNotFound
            | AppError::AssociationNotFound => StatusCode::NOT_FOUND,

            AppError::EmailAlreadyExists
            | AppError::ReviewAlreadyExists
            | AppError::FavoriteAlreadyExists
            | AppError::ProductAlreadyInCatalog
            | AppError::MessageAlreadyAnswered
            | AppError::InvalidStatusTransition { .. }
            | AppError::UploadClosed
            | AppError::UniqueConstraintViolation(_) => StatusCode::CONFLICT,

            AppError::FontNotFound(_)
            | AppError::DatabaseError(_)
            | AppError::InternalServerError(_)
            | AppError::BcryptError(_)
            | AppError::JwtError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    // Chave do catálogo de mensagens + parâmetros de interpolação
    fn message_key(&self) -> (&'static str, Vec<(&'static str, String)>) {
        match self {
            AppError::ValidationError(_) => ("errors.validation", vec![]),
            AppError::EmailAlreadyExists => ("errors.email_taken", vec![]),
            AppError::InvalidCredentials => ("errors.invalid_credentials", vec![]),
            AppError::InvalidToken => ("errors.invalid_token", vec![]),
            AppError::AccountDisabled => ("errors.account_disabled", vec![]),
            AppError::Forbidden => ("errors.forbidden", vec![]),
            AppError::UserNotFound => ("errors.user_not_found", vec![]),
            AppError::CatalogNotFound => ("errors.catalog_not_found", vec![]),
            AppError::ProductNotFound => ("errors.product_not_found", vec![]),
            AppError::GradeNotFound => ("errors.grade_not_found", vec![]),
            AppError::ReviewNotFound => ("errors.review_not_found", vec![]),
            AppError::MessageNotFound => ("errors.message_not_found", vec![]),
            AppError::UploadNotFound => ("errors.upload_not_found", vec![]),
            AppError::FavoriteNotFound => ("errors.favorite_not_found", vec![]),
            AppError::AssociationNotFound => ("errors.association_not_found", vec![]),
            AppError::ReviewAlreadyExists => ("errors.review_exists", vec![]),
            AppError::FavoriteAlreadyExists => ("errors.favorite_exists", vec![]),
            AppError::ProductAlreadyInCatalog => ("errors.product_in_catalog", vec![]),
            AppError::MessageAlreadyAnswered => ("errors.message_answered", vec![]),
            AppError::InvalidStatusTransition { from, to } => (
                "errors.invalid_transition",
                vec![("from", from.to_string()), ("to", to.to_string())],
            ),
            AppError::CatalogNotPublished => ("errors.catalog_not_published", vec![]),
            AppError::OwnCatalog => ("errors.own_catalog", vec![]),
            AppError::SelfDeactivation => ("errors.self_deactivation", vec![]),
            AppError::UploadClosed => ("errors.upload_closed", vec![]),
            AppError::UniqueConstraintViolation(constraint) => {
                ("errors.unique_violation", vec![("constraint", constraint.clone())])
            }
            _ => ("errors.internal", vec![]),
        }
    }

    /// Converte o erro de domínio na resposta HTTP, já traduzida.
    pub fn to_api_error(&self, locale: &Locale, i18n: &I18nStore) -> ApiError {
        let status = self.status_code();

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            // O detalhe fica só no log; o cliente recebe a mensagem genérica.
            tracing::error!("Erro Interno do Servidor: {}", self);
        }

        let (key, params) = self.message_key();
        let error = i18n.translate(&locale.0, key, &params);

        let details = match self {
            AppError::ValidationError(errors) => Some(validation_details(errors)),
            _ => None,
        };

        ApiError { status, error, details }
    }
}

// Monta { campo: [mensagens] } a partir dos erros do validator
fn validation_details(errors: &validator::ValidationErrors) -> Value {
    let mut details = serde_json::Map::new();
    for (field, field_errors) in errors.field_errors() {
        let messages: Vec<String> = field_errors
            .iter()
            .map(|e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string())
            })
            .collect();
        details.insert(field.to_string(), json!(messages));
    }
    for (field, kind) in errors.errors() {
        if let validator::ValidationErrorsKind::List(items) = kind {
            let nested: serde_json::Map<String, Value> = items
                .iter()
                .map(|(index, inner)| (index.to_string(), validation_details(inner)))
                .collect();
            details.insert(field.to_string(), Value::Object(nested));
        }
    }
    Value::Object(details)
}

// Carregado uma vez para as respostas fora dos handlers
static FALLBACK_STORE: LazyLock<I18nStore> =
    LazyLock::new(|| I18nStore::load().unwrap_or_default());

fn fallback_store() -> &'static I18nStore {
    &FALLBACK_STORE
}

// Usado pelos middlewares, que não têm acesso ao idioma do cliente.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.to_api_error(&Locale(DEFAULT_LANG.to_string()), fallback_store())
            .into_response()
    }
}

/// Traduz violações de unicidade pelo nome da constraint; o resto vira DatabaseError.
pub(crate) fn map_unique_violation(e: sqlx::Error, on_unique: impl FnOnce(&str) -> AppError) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.is_unique_violation() {
            let constraint = db_err.constraint().unwrap_or_default().to_string();
            return on_unique(&constraint);
        }
    }
    e.into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Payload {
        #[validate(length(min = 3, message = "curto demais"))]
        name: String,
    }

    fn store() -> I18nStore {
        I18nStore::load().unwrap()
    }

    #[test]
    fn maps_categories_to_status_codes() {
        assert_eq!(AppError::InvalidToken.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::Forbidden.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(AppError::CatalogNotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::ReviewAlreadyExists.status_code(), StatusCode::CONFLICT);
        assert_eq!(AppError::FavoriteAlreadyExists.status_code(), StatusCode::CONFLICT);
        assert_eq!(
            AppError::InvalidStatusTransition {
                from: CatalogStatus::PendingApproval,
                to: CatalogStatus::Published,
            }
            .status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::InternalServerError(anyhow::anyhow!("boom")).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn internal_errors_are_opaque() {
        let err = AppError::InternalServerError(anyhow::anyhow!("senha do banco vazou"));
        let api = err.to_api_error(&Locale("en".into()), &store());
        assert_eq!(api.error, "An unexpected error occurred.");
        assert!(api.details.is_none());
    }

    #[test]
    fn validation_errors_carry_field_details() {
        let errors = Payload { name: "ab".into() }.validate().unwrap_err();
        let api = AppError::ValidationError(errors).to_api_error(&Locale("pt".into()), &store());
        assert_eq!(api.status, StatusCode::BAD_REQUEST);
        assert_eq!(api.details.unwrap()["name"][0], "curto demais");
    }

    #[test]
    fn transition_message_is_localized() {
        let err = AppError::InvalidStatusTransition {
            from: CatalogStatus::PendingApproval,
            to: CatalogStatus::Published,
        };
        let api = err.to_api_error(&Locale("pt".into()), &store());
        assert_eq!(
            api.error,
            "Não é possível mudar o status de 'pending_approval' para 'published'."
        );
    }

    #[test]
    fn fallback_store_is_loaded_once() {
        assert!(std::ptr::eq(fallback_store(), fallback_store()));
    }

    #[tokio::test]
    async fn into_response_uses_default_language() {
        let response = AppError::InvalidToken.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "Token de autenticação inválido ou ausente.");
    }
}
