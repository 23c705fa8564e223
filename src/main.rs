use chrono::Utc;
use clap::Parser;
use message_board::{
    Args,
    config::BoardCfg,
    database::BoardDatabase,
    error::{BindSnafu, BoardError},
    handlers::{AppState, serve},
};
use owo_colors::OwoColorize as _;
use snafu::ResultExt;
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::{
    EnvFilter,
    fmt::{format::Writer, time::FormatTime},
};

struct UtcTime;

impl FormatTime for UtcTime {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        write!(w, "{}", Utc::now().format("%Y-%m-%d %H:%M:%S%.3f UTC"))
    }
}

async fn shutdown_signal() {
    if let Err(why) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for Ctrl-C: {why}");
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}

#[snafu::report]
#[tokio::main]
async fn main() -> Result<(), BoardError> {
    let args = Args::parse();
    let cfg = BoardCfg::read(&args.config)?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cfg.log_filter)),
        )
        .with_ansi(true)
        .with_timer(UtcTime)
        .init();

    let db = BoardDatabase::new(&args.db).await?;
    db.migrate().await?;
    info!("Using database {}", args.db.display().green());

    let addr = cfg.bind;
    let listener = TcpListener::bind(addr).await.context(BindSnafu { addr })?;
    info!("Message board listening on {}", addr.green());

    serve(listener, AppState::new(db, cfg), shutdown_signal()).await
}
