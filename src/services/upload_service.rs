// src/services/upload_service.rs
//
// Emissão de URLs assinadas para o serviço de arquivos e acompanhamento do envio.
// O arquivo em si nunca passa por aqui: só o ticket, o retorno e o status.

use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation,
};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::UploadRepository,
    models::{
        auth::User,
        upload::{Upload, UploadClaims, UploadStatus, UploadTicket},
    },
    services::access,
};

// Janela para o cliente concluir o envio
const UPLOAD_TTL_MINUTES: i64 = 15;
const UPLOAD_PURPOSE: &str = "upload";

/// Chave no storage. O nome do arquivo perde qualquer caminho embutido.
pub fn storage_key(owner_id: Uuid, upload_id: Uuid, file_name: &str) -> String {
    let base = file_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim();
    let base = if base.is_empty() || base == "." || base == ".." { "arquivo" } else { base };
    format!("uploads/{}/{}/{}", owner_id, upload_id, base)
}

pub(crate) fn sign_upload_token(secret: &str, claims: &UploadClaims) -> Result<String, AppError> {
    Ok(encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_ref()),
    )?)
}

/// Token vencido conta como envio encerrado; qualquer outro defeito, como token inválido.
pub(crate) fn verify_upload_token(secret: &str, token: &str) -> Result<UploadClaims, AppError> {
    let claims = decode::<UploadClaims>(
        token,
        &DecodingKey::from_secret(secret.as_ref()),
        &Validation::default(),
    )
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => AppError::UploadClosed,
        _ => AppError::InvalidToken,
    })?
    .claims;

    if claims.purpose != UPLOAD_PURPOSE {
        return Err(AppError::InvalidToken);
    }
    Ok(claims)
}

#[derive(Clone)]
pub struct UploadService {
    repo: UploadRepository,
    jwt_secret: String,
    upload_base_url: String,
}

impl UploadService {
    pub fn new(repo: UploadRepository, jwt_secret: String, upload_base_url: String) -> Self {
        Self { repo, jwt_secret, upload_base_url }
    }

    pub async fn request(
        &self,
        user: &User,
        file_name: &str,
        content_type: &str,
    ) -> Result<UploadTicket, AppError> {
        let id = Uuid::new_v4();
        let now = Utc::now();
        let expires_at = now + Duration::minutes(UPLOAD_TTL_MINUTES);
        let key = storage_key(user.id, id, file_name);

        let upload = self
            .repo
            .create(id, user.id, file_name, content_type, &key, expires_at)
            .await?;

        let claims = UploadClaims {
            sub: upload.id,
            owner: user.id,
            key,
            purpose: UPLOAD_PURPOSE.to_string(),
            exp: expires_at.timestamp() as usize,
            iat: now.timestamp() as usize,
        };
        let token = sign_upload_token(&self.jwt_secret, &claims)?;

        Ok(UploadTicket {
            id: upload.id,
            upload_url: format!("{}?token={}", self.upload_base_url, token),
            expires_at: upload.expires_at,
        })
    }

    /// Retorno do serviço de arquivos: o envio terminou e o arquivo tem URL pública.
    pub async fn callback(&self, token: &str, public_url: &str) -> Result<Upload, AppError> {
        let claims = verify_upload_token(&self.jwt_secret, token)?;

        let upload = self.repo.find_by_id(claims.sub).await?.ok_or(AppError::UploadNotFound)?;
        if upload.owner_id != claims.owner || upload.storage_key != claims.key {
            return Err(AppError::InvalidToken);
        }

        match self.repo.complete(upload.id, public_url).await? {
            Some(completed) => {
                tracing::info!("📦 Upload {} concluído", completed.id);
                Ok(completed)
            }
            None => {
                if upload.is_overdue(Utc::now()) {
                    self.repo.set_status(upload.id, UploadStatus::Expired).await?;
                }
                Err(AppError::UploadClosed)
            }
        }
    }

    pub async fn poll(&self, user: &User, id: Uuid) -> Result<Upload, AppError> {
        let upload = self.repo.find_by_id(id).await?.ok_or(AppError::UploadNotFound)?;
        access::ensure_owner_or_admin(user, upload.owner_id)?;

        if upload.is_overdue(Utc::now()) {
            return self.repo.set_status(upload.id, UploadStatus::Expired).await;
        }
        Ok(upload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(purpose: &str, exp_offset: Duration) -> UploadClaims {
        let now = Utc::now();
        UploadClaims {
            sub: Uuid::new_v4(),
            owner: Uuid::new_v4(),
            key: "uploads/a/b/c.png".into(),
            purpose: purpose.into(),
            exp: (now + exp_offset).timestamp() as usize,
            iat: now.timestamp() as usize,
        }
    }

    #[test]
    fn signed_token_verifies_with_same_secret() {
        let original = claims(UPLOAD_PURPOSE, Duration::minutes(15));
        let token = sign_upload_token("segredo", &original).unwrap();

        let verified = verify_upload_token("segredo", &token).unwrap();
        assert_eq!(verified.sub, original.sub);
        assert_eq!(verified.key, original.key);

        assert!(matches!(verify_upload_token("outro", &token), Err(AppError::InvalidToken)));
    }

    #[test]
    fn session_like_token_is_not_an_upload_token() {
        let token = sign_upload_token("segredo", &claims("session", Duration::minutes(15))).unwrap();
        assert!(matches!(verify_upload_token("segredo", &token), Err(AppError::InvalidToken)));
    }

    #[test]
    fn expired_token_means_upload_closed() {
        // Bem além da margem padrão de validação
        let token = sign_upload_token("segredo", &claims(UPLOAD_PURPOSE, Duration::hours(-2))).unwrap();
        assert!(matches!(verify_upload_token("segredo", &token), Err(AppError::UploadClosed)));
    }

    #[test]
    fn storage_key_drops_embedded_paths() {
        let owner = Uuid::new_v4();
        let id = Uuid::new_v4();
        assert_eq!(
            storage_key(owner, id, "../../etc/passwd"),
            format!("uploads/{}/{}/passwd", owner, id)
        );
        assert_eq!(
            storage_key(owner, id, "C:\\fotos\\azul.png"),
            format!("uploads/{}/{}/azul.png", owner, id)
        );
        assert_eq!(storage_key(owner, id, ".."), format!("uploads/{}/{}/arquivo", owner, id));
    }
}
