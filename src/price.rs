use std::time::Duration;

use anyhow::{bail, Context, Result};
use ethers_core::types::U256;
use reqwest::Client;
use serde::Deserialize;
use url::Url;

pub const COINGECKO_API_URL: &str = "https://api.coingecko.com/api/v3/";

/// Spot ETH price in US dollars.
#[derive(Debug, Clone, Copy)]
pub struct EthPrice {
    pub usd: f64,
}

impl EthPrice {
    /// The price in whole US cents, rounded to the nearest cent. Keeping
    /// fiat arithmetic integral avoids float error on large fee totals.
    pub fn cents(&self) -> U256 {
        U256::from((self.usd * 100.0).round() as u64)
    }
}

#[derive(Debug, Deserialize)]
struct PriceResponse {
    ethereum: PricePoint,
}

#[derive(Debug, Deserialize)]
struct PricePoint {
    usd: f64,
}

#[derive(Clone)]
pub struct CoingeckoClient {
    http: Client,
    base_url: Url,
}

impl CoingeckoClient {
    pub fn new() -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .context("failed to build HTTP client")?;
        let base_url = Url::parse(COINGECKO_API_URL).context("invalid Coingecko API URL")?;
        Ok(Self { http, base_url })
    }

    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = base_url;
        self
    }

    /// Current ETH/USD rate from the `simple/price` endpoint.
    pub async fn eth_usd(&self) -> Result<EthPrice> {
        let url = self
            .base_url
            .join("simple/price")
            .context("failed to build Coingecko URL")?;
        let response = self
            .http
            .get(url)
            .header("Accept", "application/json")
            .query(&[("ids", "ethereum"), ("vs_currencies", "usd")])
            .send()
            .await
            .context("coingecko request failed")?;

        let status = response.status();
        if !status.is_success() {
            bail!("coingecko HTTP error with status code: {}", status.as_u16());
        }

        let body: PriceResponse = response
            .json()
            .await
            .context("failed to decode coingecko response")?;
        Ok(EthPrice {
            usd: body.ethereum.usd,
        })
    }
}
