// src/models/message.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "message_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum MessageStatus {
    New,
    Answered,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: Uuid,
    pub catalog_id: Uuid,
    pub sender_id: Uuid,
    #[schema(example = "Pedido mínimo")]
    pub subject: String,
    pub body: String,
    pub status: MessageStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MessageReply {
    pub id: Uuid,
    pub message_id: Uuid,
    pub admin_id: Uuid,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MessageThread {
    #[serde(flatten)]
    pub message: Message,
    pub reply: Option<MessageReply>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateMessagePayload {
    #[validate(length(min = 2, max = 160, message = "O assunto deve ter entre 2 e 160 caracteres."))]
    #[schema(example = "Pedido mínimo")]
    pub subject: String,
    #[validate(length(min = 1, max = 5000, message = "A mensagem não pode ser vazia."))]
    #[schema(example = "Qual o pedido mínimo para revenda?")]
    pub body: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ReplyMessagePayload {
    #[validate(length(min = 1, max = 5000, message = "A resposta não pode ser vazia."))]
    pub body: String,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct MessageFilter {
    pub status: Option<MessageStatus>,
}
