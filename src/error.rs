use std::net::SocketAddr;

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::DbErr;
use serde_json::json;
use snafu::Snafu;
use tracing::error;

pub const NOT_FOUND_MESSAGE: &str = "This record does not exist in our database. Please try again.";

#[derive(Snafu, Debug)]
#[snafu(visibility(pub))]
pub enum BoardError {
    #[snafu(transparent)]
    Database { source: DbErr },
    #[snafu(display("{}", NOT_FOUND_MESSAGE))]
    NotFound,
    #[snafu(display("{}", source.body_text()))]
    MalformedBody { source: JsonRejection },
    #[snafu(display("Invalid request body: {source}"))]
    InvalidFields { source: serde_json::Error },
    #[snafu(display("Failed to read configuration"))]
    Config { source: figment::Error },
    #[snafu(display("Failed to listen on {addr}"))]
    Bind {
        addr: SocketAddr,
        source: std::io::Error,
    },
    #[snafu(display("HTTP server stopped unexpectedly"))]
    Serve { source: std::io::Error },
}

impl BoardError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            BoardError::NotFound => StatusCode::NOT_FOUND,
            BoardError::MalformedBody { .. } | BoardError::InvalidFields { .. } => {
                StatusCode::BAD_REQUEST
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for BoardError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = if status.is_server_error() {
            error!("Request failed: {self:?}");
            "Internal server error".to_string()
        } else {
            self.to_string()
        };
        (status, Json(json!({ "message": message }))).into_response()
    }
}

#[cfg(test)]
mod test {
    use axum::body::to_bytes;

    use super::*;

    async fn body_of(err: BoardError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_not_found_body() {
        let (status, body) = body_of(BoardError::NotFound).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "message": NOT_FOUND_MESSAGE }));
    }

    #[tokio::test]
    async fn test_store_errors_are_hidden() {
        let err = BoardError::from(DbErr::Custom("disk on fire".to_string()));
        let (status, body) = body_of(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "message": "Internal server error" }));
    }
}
