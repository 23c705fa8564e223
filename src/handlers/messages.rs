use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use snafu::{OptionExt, ResultExt, ensure};
use tracing::{debug, info};

use super::{
    AppState,
    payload::{DeleteReceipt, MessagePatch, MessageView, NewMessage, Reply},
};
use crate::{
    error::{BoardError, InvalidFieldsSnafu, MalformedBodySnafu, NotFoundSnafu},
    services::MessageService,
};

/// An id segment that is not an integer names no record either.
fn message_id(path: Result<Path<i32>, PathRejection>) -> Result<i32, BoardError> {
    path.map(|Path(id)| id).map_err(|_| NotFoundSnafu.build())
}

/// Request bodies must be JSON objects; arrays never fill fields by position.
fn decode<T: DeserializeOwned>(
    payload: Result<Json<Map<String, Value>>, JsonRejection>,
) -> Result<T, BoardError> {
    let Json(fields) = payload.context(MalformedBodySnafu)?;
    serde_json::from_value(Value::Object(fields)).context(InvalidFieldsSnafu)
}

/// GET /messages
pub async fn list(State(state): State<AppState>) -> Result<Reply<Vec<MessageView>>, BoardError> {
    let messages = state.db.message().list().await?;
    debug!("Listing {} messages", messages.len());
    Ok(state.reply(
        StatusCode::OK,
        messages.into_iter().map(MessageView::from).collect(),
    ))
}

/// POST /messages
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<Map<String, Value>>, JsonRejection>,
) -> Result<Reply<MessageView>, BoardError> {
    let new: NewMessage = decode(payload)?;
    let message = state.db.message().create(new.body, new.username).await?;
    info!("Message {} posted by {}", message.id, message.username);
    Ok(state.reply(StatusCode::CREATED, message.into()))
}

/// GET /messages/{id}
pub async fn show(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Reply<MessageView>, BoardError> {
    let id = message_id(id)?;
    let message = state.db.message().find(id).await?.context(NotFoundSnafu)?;
    debug!("Fetched message {id}");
    Ok(state.reply(StatusCode::OK, message.into()))
}

/// PATCH /messages/{id}
pub async fn update(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
    payload: Result<Json<Map<String, Value>>, JsonRejection>,
) -> Result<Reply<MessageView>, BoardError> {
    let id = message_id(id)?;
    // a missing record wins over a bad body
    let service = state.db.message();
    let message = service.find(id).await?.context(NotFoundSnafu)?;
    let patch: MessagePatch = decode(payload)?;

    let edited = patch.body.is_some();
    let message = service.update_body(message, patch.body).await?;
    if edited {
        info!("Message {id} edited");
    }
    Ok(state.reply(StatusCode::OK, message.into()))
}

/// DELETE /messages/{id}
pub async fn destroy(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Reply<DeleteReceipt>, BoardError> {
    let id = message_id(id)?;
    ensure!(state.db.message().delete(id).await?, NotFoundSnafu);
    info!("Message {id} deleted");
    Ok(state.reply(StatusCode::OK, DeleteReceipt::default()))
}

#[cfg(test)]
mod test {
    use axum::http::StatusCode;
    use serde_json::json;

    use super::*;

    fn object(value: Value) -> Result<Json<Map<String, Value>>, JsonRejection> {
        match value {
            Value::Object(fields) => Ok(Json(fields)),
            other => panic!("not an object: {other}"),
        }
    }

    #[test]
    fn test_decode_object() {
        let new: NewMessage = decode(object(json!({ "body": "hi", "username": "bob" }))).unwrap();
        assert_eq!(new.body, "hi");
        assert_eq!(new.username, "bob");

        let patch: MessagePatch = decode(object(json!({ "body": null }))).unwrap();
        assert_eq!(patch, MessagePatch::default());
    }

    #[test]
    fn test_decode_missing_field_is_bad_request() {
        let err = decode::<NewMessage>(object(json!({ "body": "hi" }))).unwrap_err();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert!(err.to_string().contains("username"));
    }
}
