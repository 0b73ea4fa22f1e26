use anyhow::Result;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::{routing::get, Json, Router};
use serde::{Deserialize, Serialize};

use crate::chain::ChainId;
use crate::etherscan::{normalize_address, EtherscanClient};
use crate::models::TxStats;
use crate::price::CoingeckoClient;
use crate::stats::compute_tx_stats;
use crate::units;

#[derive(Clone)]
pub struct AppState {
    pub etherscan: EtherscanClient,
    pub price: CoingeckoClient,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

#[derive(Serialize)]
struct ChainEntry {
    id: u64,
    name: &'static str,
    supported: bool,
}

async fn chains() -> Json<Vec<ChainEntry>> {
    let entries = ChainId::ALL
        .iter()
        .map(|chain| ChainEntry {
            id: chain.id(),
            name: chain.name(),
            supported: chain.is_supported(),
        })
        .collect();
    Json(entries)
}

#[derive(Deserialize)]
struct WalletStatsQuery {
    address: String,
    chain: Option<u64>,
}

#[derive(Serialize)]
struct WalletStatsResponse {
    address: String,
    chain_id: u64,
    chain: &'static str,
    stats: TxStats,
    fees_eth: String,
    fees_usd: Option<String>,
    eth_usd: Option<f64>,
}

async fn wallet_stats(
    State(state): State<AppState>,
    Query(query): Query<WalletStatsQuery>,
) -> Result<Json<WalletStatsResponse>, (StatusCode, String)> {
    let chain_id = query.chain.unwrap_or_else(|| ChainId::Mainnet.id());
    let Some(chain) = ChainId::from_id(chain_id) else {
        return Err((
            StatusCode::BAD_REQUEST,
            format!("unknown chain id {}", chain_id),
        ));
    };
    if !chain.is_supported() {
        return Err((
            StatusCode::BAD_REQUEST,
            format!("{} has no block explorer API", chain.name()),
        ));
    }
    let address =
        normalize_address(&query.address).map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;

    let txs = state
        .etherscan
        .fetch_account_txs(chain, &address)
        .await
        .map_err(|e| (StatusCode::BAD_GATEWAY, format!("etherscan query failed: {}", e)))?;

    // Price failures degrade the fiat columns rather than the request.
    let price = match state.price.eth_usd().await {
        Ok(price) => Some(price),
        Err(e) => {
            tracing::warn!("failed to fetch ETH/USD price: {}", e);
            None
        }
    };

    let stats = compute_tx_stats(Some(&address), &txs).unwrap_or_default();
    let fees_eth = units::eth_display(stats.total_fees_paid, 5);
    let fees_usd = price.map(|p| units::usd_display(stats.total_fees_paid, p.cents(), 2));

    Ok(Json(WalletStatsResponse {
        address,
        chain_id,
        chain: chain.name(),
        stats,
        fees_eth,
        fees_usd,
        eth_usd: price.map(|p| p.usd),
    }))
}

pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/chains", get(chains))
        .route("/wallet/stats", get(wallet_stats))
        .with_state(state)
}

pub async fn run_http_server(addr: &str, state: AppState) -> Result<()> {
    let app = app_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("HTTP server listening on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
