mod messages;
pub mod payload;

use std::{future::Future, sync::Arc};

use axum::{Router, http::StatusCode, routing::get};
use snafu::ResultExt;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    config::BoardCfg,
    database::BoardDatabase,
    error::{BoardError, ServeSnafu},
};
use payload::Reply;

/// Everything a request handler needs, handed over through router state.
#[derive(Clone)]
pub struct AppState {
    pub db: BoardDatabase,
    pub cfg: Arc<BoardCfg>,
}

impl AppState {
    pub fn new(db: BoardDatabase, cfg: BoardCfg) -> Self {
        Self {
            db,
            cfg: Arc::new(cfg),
        }
    }

    fn reply<T>(&self, status: StatusCode, value: T) -> Reply<T> {
        Reply {
            status,
            value,
            pretty: self.cfg.pretty_json,
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/messages", get(messages::list).post(messages::create))
        .route(
            "/messages/:id",
            get(messages::show)
                .patch(messages::update)
                .delete(messages::destroy),
        )
        .layer(TraceLayer::new_for_http())
        // any origin may call the board
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Serves the board on `listener` until `shutdown` resolves.
pub async fn serve(
    listener: TcpListener,
    state: AppState,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<(), BoardError> {
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await
        .context(ServeSnafu)
}
