//! C8: the axum HTTP/JSON surface over spec.md §6. A thin adapter onto
//! [`auction_pool::RequestApi`]: every handler decodes its request body,
//! calls the matching trait method, and encodes the result (or the error,
//! per §7: every [`AuctionError`] becomes an HTTP 500 with a plain-text
//! body carrying its `Display` message).

mod dto;
mod error;
mod wire;

use std::sync::Arc;

use auction_pool::RequestApi;
use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};

use dto::{
    PooledTxWire, RegisterRequest, ResultTxWire, ResultsRequest, ResultsResponse,
    StatusRequest, StatusResponse, SubmitBidRequest, SubmitBidResponse, SubmitTxRequest,
    TxPoolRequest,
};
use error::ApiError;

/// Shared application state: a handle onto the pool behind the
/// [`RequestApi`] trait object, so this crate never needs to know whether
/// it's talking to [`auction_pool::PoolState`] or a test double.
#[derive(Clone)]
pub struct AppState {
    pool: Arc<dyn RequestApi + Send + Sync>,
}

impl AppState {
    pub fn new(pool: Arc<dyn RequestApi + Send + Sync>) -> Self {
        Self { pool }
    }
}

/// Builds the router for the six routes of spec.md §6. Left unbound to any
/// particular listener so the binary crate decides how (and where) to serve
/// it.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/register", post(register))
        .route("/status", get(status))
        .route("/submitTx", post(submit_tx))
        .route("/txPool", get(tx_pool))
        .route("/submitBid", post(submit_bid))
        .route("/results", get(results))
        .with_state(state)
}

async fn register(State(state): State<AppState>, Json(req): Json<RegisterRequest>) -> Result<(), ApiError> {
    state.pool.register(req.pub_key).await?;
    Ok(())
}

async fn status(
    State(state): State<AppState>,
    Json(req): Json<StatusRequest>,
) -> Result<Json<StatusResponse>, ApiError> {
    let status = state.pool.get_status(&req.pub_key).await?;
    Ok(Json(StatusResponse { access: status.access, pending_payment: status.pending_payment }))
}

async fn submit_tx(State(state): State<AppState>, Json(req): Json<SubmitTxRequest>) -> Result<(), ApiError> {
    state.pool.submit_tx(req.raw_tx).await?;
    Ok(())
}

async fn tx_pool(
    State(state): State<AppState>,
    Json(req): Json<TxPoolRequest>,
) -> Result<Json<Vec<PooledTxWire>>, ApiError> {
    let pooled = state.pool.get_txpool(&req.pub_key).await?;
    Ok(Json(pooled.into_iter().map(|tx| PooledTxWire { data: tx.data, reserve: tx.reserve }).collect()))
}

async fn submit_bid(
    State(state): State<AppState>,
    Json(req): Json<SubmitBidRequest>,
) -> Result<Json<SubmitBidResponse>, ApiError> {
    let slot = state.pool.submit_bid(req.pub_key, req.tx_hash, req.value).await?;
    Ok(Json(SubmitBidResponse { slot }))
}

async fn results(
    State(state): State<AppState>,
    Json(req): Json<ResultsRequest>,
) -> Result<Json<ResultsResponse>, ApiError> {
    let page = state.pool.get_results(&req.pub_key, req.slot).await?;
    Ok(Json(ResultsResponse {
        transactions: page
            .transactions
            .into_iter()
            .map(|entry| ResultTxWire { payment: entry.payment, data: entry.data })
            .collect(),
        total_payment: page.total_payment,
    }))
}
