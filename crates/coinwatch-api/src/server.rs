use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::header::{HeaderName, HeaderValue};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use tokio::task;
use tower_http::cors::CorsLayer;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use coinwatch_core::{
    DuckDbTickerStore, StoreError, Symbol, Ticker, TickerRepository, TickerService, Timestamp,
};

use crate::config::ApiConfig;
use crate::error::ApiError;

#[derive(Clone)]
pub struct AppState {
    service: Arc<TickerService>,
}

#[derive(Debug, Deserialize)]
pub struct RangeParams {
    start: String,
    end: String,
}

/// Build the application router around an already-wired service.
pub fn router(service: Arc<TickerService>) -> Router {
    Router::new()
        .route("/coins/:symbol", get(find_tickers))
        .route("/health", get(health))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("x-engine"),
            HeaderValue::from_static("axum"),
        ))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(AppState { service })
}

/// `GET /coins/:symbol?start=yyyy-MM-dd&end=yyyy-MM-dd`
///
/// Dates expand to day bounds (00:00:00 / 23:59:59) before the range guard
/// and the store query run. The store call is synchronous, so it is moved
/// off the async worker threads.
async fn find_tickers(
    Path(symbol): Path<String>,
    Query(range): Query<RangeParams>,
    State(state): State<AppState>,
) -> Result<Json<Vec<Ticker>>, ApiError> {
    let symbol = Symbol::parse(&symbol)?;
    let start = Timestamp::start_of_day(Timestamp::parse_date(&range.start)?);
    let end = Timestamp::end_of_day(Timestamp::parse_date(&range.end)?);

    let service = Arc::clone(&state.service);
    let tickers = task::spawn_blocking(move || service.find(&symbol, start, end))
        .await
        .map_err(|error| ApiError::Worker(error.to_string()))??;

    Ok(Json(tickers))
}

async fn health() -> StatusCode {
    StatusCode::OK
}

#[derive(Debug, thiserror::Error)]
pub enum ServeError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Open the store, wire the service by hand, and serve until shutdown.
///
/// The repository is the single process-wide store handle; it is owned
/// here and released when the server loop returns.
///
/// # Errors
/// Returns an error if the store cannot be opened or the listener fails.
pub async fn serve(config: ApiConfig) -> Result<(), ServeError> {
    let repository = TickerRepository::open(config.store)?;
    info!(db_path = %repository.db_path().display(), "ticker store ready");

    let service = Arc::new(TickerService::new(Arc::new(DuckDbTickerStore::new(
        repository,
    ))));

    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    info!(addr = %config.bind, "listening");

    axum::serve(listener, router(service))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped, store handle released");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("shutdown signal received"),
        Err(error) => {
            // Without a working signal handler the future must never
            // resolve, or the server would shut down immediately.
            tracing::error!(%error, "failed to install shutdown handler");
            std::future::pending::<()>().await;
        }
    }
}
