// src/services/message_service.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{CatalogRepository, MessageRepository},
    models::{
        auth::User,
        catalog::Catalog,
        message::{Message, MessageStatus, MessageThread},
    },
    services::access,
};

/// Quem pode ler uma conversa: administradores, o remetente e o dono do catálogo.
pub fn can_read_message(user: &User, message: &Message, catalog: &Catalog) -> bool {
    user.is_admin() || message.sender_id == user.id || catalog.owner_id == user.id
}

/// Mensagens só vão para catálogos publicados de outra pessoa.
pub fn check_can_send(user: &User, catalog: &Catalog) -> Result<(), AppError> {
    if !catalog.is_published() {
        return Err(AppError::CatalogNotPublished);
    }
    if catalog.owner_id == user.id {
        return Err(AppError::OwnCatalog);
    }
    Ok(())
}

#[derive(Clone)]
pub struct MessageService {
    repo: MessageRepository,
    catalog_repo: CatalogRepository,
    pool: PgPool,
}

impl MessageService {
    pub fn new(repo: MessageRepository, catalog_repo: CatalogRepository, pool: PgPool) -> Self {
        Self { repo, catalog_repo, pool }
    }

    pub async fn create(
        &self,
        user: &User,
        catalog_id: Uuid,
        subject: &str,
        body: &str,
    ) -> Result<Message, AppError> {
        let catalog = self
            .catalog_repo
            .find_by_id(catalog_id)
            .await?
            .ok_or(AppError::CatalogNotFound)?;
        check_can_send(user, &catalog)?;

        let message = self.repo.create(catalog_id, user.id, subject, body).await?;
        tracing::info!("✉️ Mensagem {} enviada ao catálogo {}", message.id, catalog_id);
        Ok(message)
    }

    pub async fn list_for(
        &self,
        user: &User,
        status: Option<MessageStatus>,
    ) -> Result<Vec<Message>, AppError> {
        if user.is_admin() {
            self.repo.list_all(status).await
        } else {
            self.repo.list_for_participant(user.id, status).await
        }
    }

    pub async fn get_thread(&self, user: &User, id: Uuid) -> Result<MessageThread, AppError> {
        let message = self.repo.find_by_id(id).await?.ok_or(AppError::MessageNotFound)?;
        let catalog = self
            .catalog_repo
            .find_by_id(message.catalog_id)
            .await?
            .ok_or(AppError::CatalogNotFound)?;

        // Para quem não participa, a mensagem não existe
        if !can_read_message(user, &message, &catalog) {
            return Err(AppError::MessageNotFound);
        }

        let reply = self.repo.find_reply(message.id).await?;
        Ok(MessageThread { message, reply })
    }

    pub async fn reply(&self, admin: &User, id: Uuid, body: &str) -> Result<MessageThread, AppError> {
        access::ensure_admin(admin)?;

        let mut tx = self.pool.begin().await?;

        let message = self
            .repo
            .find_for_update(&mut *tx, id)
            .await?
            .ok_or(AppError::MessageNotFound)?;
        if message.status == MessageStatus::Answered {
            return Err(AppError::MessageAlreadyAnswered);
        }

        let reply = self.repo.insert_reply(&mut *tx, id, admin.id, body).await?;
        let message = self.repo.set_status(&mut *tx, id, MessageStatus::Answered).await?;

        tx.commit().await?;

        tracing::info!("💬 Mensagem {} respondida por {}", id, admin.id);
        Ok(MessageThread { message, reply: Some(reply) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::{auth::UserRole, catalog::CatalogStatus},
        services::access::fixtures::{catalog, user},
    };
    use chrono::Utc;

    fn message(catalog: &Catalog, sender: &User) -> Message {
        Message {
            id: Uuid::new_v4(),
            catalog_id: catalog.id,
            sender_id: sender.id,
            subject: "Pedido mínimo".into(),
            body: "Qual o pedido mínimo?".into(),
            status: MessageStatus::New,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn only_published_catalogs_of_others_receive_messages() {
        let owner = user(UserRole::Supplier);
        let retailer = user(UserRole::Retailer);

        let draft = catalog(owner.id, CatalogStatus::Approved);
        assert!(matches!(check_can_send(&retailer, &draft), Err(AppError::CatalogNotPublished)));

        let published = catalog(owner.id, CatalogStatus::Published);
        assert!(check_can_send(&retailer, &published).is_ok());
        assert!(matches!(check_can_send(&owner, &published), Err(AppError::OwnCatalog)));
    }

    #[test]
    fn thread_is_visible_to_participants_and_admins() {
        let owner = user(UserRole::Representative);
        let sender = user(UserRole::Retailer);
        let admin = user(UserRole::Administrator);
        let other = user(UserRole::Retailer);

        let cat = catalog(owner.id, CatalogStatus::Published);
        let msg = message(&cat, &sender);

        assert!(can_read_message(&owner, &msg, &cat));
        assert!(can_read_message(&sender, &msg, &cat));
        assert!(can_read_message(&admin, &msg, &cat));
        assert!(!can_read_message(&other, &msg, &cat));
    }
}
