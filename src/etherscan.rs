use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use ethers_core::types::Address;
use reqwest::Client;
use thiserror::Error;
use url::Url;

use crate::chain::ChainId;
use crate::models::{Tx, TxListResponse, TxListResult};

#[derive(Debug, Error)]
pub enum EtherscanError {
    #[error("no block explorer API for chain {0}")]
    UnsupportedChain(ChainId),

    #[error("etherscan HTTP error with status code: {0}")]
    Http(u16),

    #[error("etherscan API error (status {status}): {message}")]
    Api { status: String, message: String },
}

/// Client for the Etherscan-style block explorer APIs in the chain
/// registry. Holds a reusable HTTP client and the API key appended to
/// every query.
#[derive(Clone)]
pub struct EtherscanClient {
    http: Client,
    api_key: String,
    base_url_override: Option<Url>,
}

impl EtherscanClient {
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self {
            http,
            api_key: api_key.into(),
            base_url_override: None,
        })
    }

    /// Routes every query to `base_url` instead of the registry URL for
    /// the queried chain.
    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url_override = Some(base_url);
        self
    }

    /// Fetches the full transaction history the explorer holds for
    /// `address`, newest first.
    pub async fn fetch_account_txs(&self, chain: ChainId, address: &str) -> Result<Vec<Tx>> {
        let url = self.explorer_url(chain)?;
        let response = self
            .http
            .get(url)
            .header("Accept", "application/json")
            .query(&[
                ("module", "account"),
                ("action", "txlist"),
                ("address", address),
                ("startblock", "0"),
                ("endblock", "99999999"),
                ("sort", "desc"),
                ("apikey", self.api_key.as_str()),
            ])
            .send()
            .await
            .context("etherscan request failed")?;

        let status = response.status();
        if !status.is_success() {
            return Err(EtherscanError::Http(status.as_u16()).into());
        }

        let body: TxListResponse = response
            .json()
            .await
            .context("failed to decode etherscan response")?;

        match body.result {
            Some(TxListResult::Txs(txs)) => Ok(txs),
            Some(TxListResult::Notice(message)) => Err(EtherscanError::Api {
                status: body.status.unwrap_or_default(),
                message,
            }
            .into()),
            None => Ok(Vec::new()),
        }
    }

    fn explorer_url(&self, chain: ChainId) -> Result<Url> {
        if let Some(url) = &self.base_url_override {
            return Ok(url.clone());
        }
        let raw = chain
            .explorer_api_url()
            .ok_or(EtherscanError::UnsupportedChain(chain))?;
        Url::parse(raw).with_context(|| format!("invalid explorer API URL for {}", chain))
    }
}

/// Parses a hex account address and re-renders it as lowercase `0x` hex.
pub fn normalize_address(address: &str) -> Result<String> {
    let parsed: Address = address
        .trim()
        .parse()
        .map_err(|_| anyhow!("invalid address: {}", address))?;
    Ok(format!("0x{:x}", parsed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    const ADDR: &str = "0xabcdef0123456789abcdef0123456789abcdef01";

    fn client_for(server: &mockito::ServerGuard) -> EtherscanClient {
        EtherscanClient::new("test-key")
            .unwrap()
            .with_base_url(Url::parse(&format!("{}/api", server.url())).unwrap())
    }

    #[tokio::test]
    async fn fetches_and_decodes_account_txs() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("module".into(), "account".into()),
                Matcher::UrlEncoded("action".into(), "txlist".into()),
                Matcher::UrlEncoded("address".into(), ADDR.into()),
                Matcher::UrlEncoded("sort".into(), "desc".into()),
                Matcher::UrlEncoded("apikey".into(), "test-key".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                    "status": "1",
                    "message": "OK",
                    "result": [
                        {"from": "0xabcdef0123456789abcdef0123456789abcdef01",
                         "hash": "0xaaa", "gasUsed": "21000", "gasPrice": "1000", "isError": "0"},
                        {"from": "0x9999999999999999999999999999999999999999",
                         "hash": "0xbbb", "gasUsed": "50000", "gasPrice": "2000", "isError": "1"}
                    ]
                }"#,
            )
            .expect(1)
            .create_async()
            .await;

        let client = client_for(&server);
        let txs = client
            .fetch_account_txs(ChainId::Mainnet, ADDR)
            .await
            .unwrap();

        assert_eq!(txs.len(), 2);
        assert_eq!(txs[0].gas_used, "21000");
        assert_eq!(txs[1].is_error, "1");

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn surfaces_api_notices_as_errors() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/api")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"status":"0","message":"NOTOK","result":"Max rate limit reached"}"#)
            .create_async()
            .await;

        let err = client_for(&server)
            .fetch_account_txs(ChainId::Mainnet, ADDR)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Max rate limit reached"));
    }

    #[tokio::test]
    async fn missing_or_empty_result_is_empty_history() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/api")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"status":"0","message":"No transactions found","result":[]}"#)
            .create_async()
            .await;

        let txs = client_for(&server)
            .fetch_account_txs(ChainId::Mainnet, ADDR)
            .await
            .unwrap();
        assert!(txs.is_empty());
    }

    #[tokio::test]
    async fn rejects_http_errors() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/api")
            .match_query(Matcher::Any)
            .with_status(502)
            .with_body("Bad Gateway")
            .create_async()
            .await;

        let err = client_for(&server)
            .fetch_account_txs(ChainId::Mainnet, ADDR)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("502"));
    }

    #[tokio::test]
    async fn unsupported_chain_is_rejected_before_any_request() {
        let client = EtherscanClient::new("test-key").unwrap();
        let err = client
            .fetch_account_txs(ChainId::Local, ADDR)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("no block explorer API"));
    }

    #[test]
    fn normalizes_addresses_to_lowercase_hex() {
        let normalized =
            normalize_address("0xABCDEF0123456789abcdef0123456789ABCDEF01").unwrap();
        assert_eq!(normalized, ADDR);
        assert_eq!(normalize_address(ADDR).unwrap(), ADDR);

        assert!(normalize_address("not-an-address").is_err());
        assert!(normalize_address("0x1234").is_err());
    }
}
