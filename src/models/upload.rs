// src/models/upload.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "upload_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum UploadStatus {
    Pending,
    Completed,
    Expired,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Upload {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub file_name: String,
    pub content_type: String,
    pub storage_key: String,
    pub status: UploadStatus,
    pub public_url: Option<String>,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl Upload {
    /// Pendente mas com a janela de envio vencida.
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        self.status == UploadStatus::Pending && self.expires_at <= now
    }
}

// Tipos aceitos pelo serviço de arquivos (imagens de produto e capa)
pub const ALLOWED_CONTENT_TYPES: &[&str] = &["image/jpeg", "image/png", "image/webp"];

fn validate_content_type(content_type: &str) -> Result<(), ValidationError> {
    if !ALLOWED_CONTENT_TYPES.contains(&content_type) {
        let mut err = ValidationError::new("content_type");
        err.message = Some("Tipo de arquivo não suportado.".into());
        return Err(err);
    }
    Ok(())
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RequestUploadPayload {
    #[validate(length(min = 1, max = 255, message = "O nome do arquivo é obrigatório."))]
    #[schema(example = "camiseta-azul.png")]
    pub file_name: String,
    #[validate(custom(function = "validate_content_type"))]
    #[schema(example = "image/png")]
    pub content_type: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadTicket {
    pub id: Uuid,
    pub upload_url: String,
    pub expires_at: DateTime<Utc>,
}

// Chamada de retorno do serviço de arquivos quando o envio termina
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadCallbackPayload {
    #[validate(length(min = 1))]
    pub token: String,
    #[validate(url(message = "URL pública inválida."))]
    pub public_url: String,
}

// Claims do token que vai na URL assinada
#[derive(Debug, Serialize, Deserialize)]
pub struct UploadClaims {
    pub sub: Uuid,     // ID do upload
    pub owner: Uuid,   // Dono do arquivo
    pub key: String,   // Chave no storage
    pub purpose: String,
    pub exp: usize,
    pub iat: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn only_images_are_accepted() {
        let ok = RequestUploadPayload { file_name: "a.png".into(), content_type: "image/png".into() };
        let bad = RequestUploadPayload { file_name: "a.exe".into(), content_type: "application/x-msdownload".into() };
        assert!(ok.validate().is_ok());
        assert!(bad.validate().is_err());
    }

    #[test]
    fn pending_upload_past_deadline_is_overdue() {
        let now = Utc::now();
        let mut upload = Upload {
            id: Uuid::new_v4(),
            owner_id: Uuid::new_v4(),
            file_name: "a.png".into(),
            content_type: "image/png".into(),
            storage_key: "k".into(),
            status: UploadStatus::Pending,
            public_url: None,
            expires_at: now - Duration::minutes(1),
            created_at: now - Duration::minutes(16),
            completed_at: None,
        };
        assert!(upload.is_overdue(now));
        upload.status = UploadStatus::Completed;
        assert!(!upload.is_overdue(now));
    }
}
