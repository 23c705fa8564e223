use axum::{
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::services::messages::MessageRecord;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Body of `POST /messages`.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct NewMessage {
    pub body: String,
    pub username: String,
}

/// Body of `PATCH /messages/{id}`. Any key other than `body` is ignored.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
pub struct MessagePatch {
    #[serde(default)]
    pub body: Option<String>,
}

/// How a message is rendered on the wire.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct MessageView {
    pub id: i32,
    pub body: String,
    pub username: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<MessageRecord> for MessageView {
    fn from(record: MessageRecord) -> Self {
        Self {
            id: record.id,
            body: record.body,
            username: record.username,
            created_at: record.created_at.format(TIMESTAMP_FORMAT).to_string(),
            updated_at: record.updated_at.format(TIMESTAMP_FORMAT).to_string(),
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct DeleteReceipt {
    pub delete_successful: bool,
    pub message: &'static str,
}

impl Default for DeleteReceipt {
    fn default() -> Self {
        Self {
            delete_successful: true,
            message: "Message deleted.",
        }
    }
}

/// JSON response that honours the `pretty_json` setting.
pub struct Reply<T> {
    pub status: StatusCode,
    pub value: T,
    pub pretty: bool,
}

impl<T: Serialize> IntoResponse for Reply<T> {
    fn into_response(self) -> Response {
        let encoded = if self.pretty {
            serde_json::to_vec_pretty(&self.value)
        } else {
            serde_json::to_vec(&self.value)
        };
        match encoded {
            Ok(bytes) => (
                self.status,
                [(header::CONTENT_TYPE, "application/json")],
                bytes,
            )
                .into_response(),
            Err(why) => {
                error!("Failed to encode response: {why}");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}
