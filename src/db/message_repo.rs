// src/db/message_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::{map_unique_violation, AppError},
    models::message::{Message, MessageReply, MessageStatus},
};

#[derive(Clone)]
pub struct MessageRepository {
    pool: PgPool,
}

impl MessageRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Message>, AppError> {
        let message = sqlx::query_as::<_, Message>("SELECT * FROM messages WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(message)
    }

    pub async fn find_for_update<'e, E>(&self, executor: E, id: Uuid) -> Result<Option<Message>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let message = sqlx::query_as::<_, Message>("SELECT * FROM messages WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(message)
    }

    pub async fn find_reply(&self, message_id: Uuid) -> Result<Option<MessageReply>, AppError> {
        let reply = sqlx::query_as::<_, MessageReply>(
            "SELECT * FROM message_replies WHERE message_id = $1",
        )
        .bind(message_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(reply)
    }

    pub async fn list_all(&self, status: Option<MessageStatus>) -> Result<Vec<Message>, AppError> {
        let messages = sqlx::query_as::<_, Message>(
            r#"
            SELECT * FROM messages
            WHERE ($1::message_status IS NULL OR status = $1)
            ORDER BY created_at DESC
            "#,
        )
        .bind(status)
        .fetch_all(&self.pool)
        .await?;
        Ok(messages)
    }

    // Mensagens enviadas pelo usuário ou recebidas nos catálogos dele
    pub async fn list_for_participant(
        &self,
        user_id: Uuid,
        status: Option<MessageStatus>,
    ) -> Result<Vec<Message>, AppError> {
        let messages = sqlx::query_as::<_, Message>(
            r#"
            SELECT m.* FROM messages m
            JOIN catalogs c ON c.id = m.catalog_id
            WHERE (m.sender_id = $1 OR c.owner_id = $1)
              AND ($2::message_status IS NULL OR m.status = $2)
            ORDER BY m.created_at DESC
            "#,
        )
        .bind(user_id)
        .bind(status)
        .fetch_all(&self.pool)
        .await?;
        Ok(messages)
    }

    pub async fn create(
        &self,
        catalog_id: Uuid,
        sender_id: Uuid,
        subject: &str,
        body: &str,
    ) -> Result<Message, AppError> {
        let message = sqlx::query_as::<_, Message>(
            r#"
            INSERT INTO messages (catalog_id, sender_id, subject, body)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(catalog_id)
        .bind(sender_id)
        .bind(subject)
        .bind(body)
        .fetch_one(&self.pool)
        .await?;
        Ok(message)
    }

    pub async fn insert_reply<'e, E>(
        &self,
        executor: E,
        message_id: Uuid,
        admin_id: Uuid,
        body: &str,
    ) -> Result<MessageReply, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, MessageReply>(
            r#"
            INSERT INTO message_replies (message_id, admin_id, body)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(message_id)
        .bind(admin_id)
        .bind(body)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            map_unique_violation(e, |constraint| match constraint {
                "message_replies_message_key" => AppError::MessageAlreadyAnswered,
                other => AppError::UniqueConstraintViolation(other.to_string()),
            })
        })
    }

    pub async fn set_status<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        status: MessageStatus,
    ) -> Result<Message, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let message = sqlx::query_as::<_, Message>(
            "UPDATE messages SET status = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(status)
        .fetch_one(executor)
        .await?;
        Ok(message)
    }
}
