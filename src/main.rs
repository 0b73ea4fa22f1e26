use anyhow::Context;
use clap::Parser;

use eth_fees::api::{self, AppState};
use eth_fees::chain::ChainId;
use eth_fees::cli::{Cli, Commands};
use eth_fees::config::Config;
use eth_fees::etherscan::{normalize_address, EtherscanClient};
use eth_fees::models::TxStats;
use eth_fees::price::{CoingeckoClient, EthPrice};
use eth_fees::stats::compute_tx_stats;
use eth_fees::units;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    let config = Config::from_env();

    match cli.command {
        Commands::Stats {
            address,
            chain,
            json,
        } => run_stats(&config, &chain, &address, json).await?,
        Commands::Price => run_price().await?,
        Commands::Chains => run_chains(),
        Commands::Serve { addr } => {
            let bind = addr.unwrap_or_else(|| config.http_bind_addr.clone());
            let state = AppState {
                etherscan: EtherscanClient::new(config.require_etherscan_api_key()?)?,
                price: CoingeckoClient::new()?,
            };
            api::run_http_server(&bind, state).await?;
        }
    }

    Ok(())
}

async fn run_stats(config: &Config, chain: &str, address: &str, json: bool) -> anyhow::Result<()> {
    let chain: ChainId = chain.parse()?;
    let account = normalize_address(address)?;
    let etherscan = EtherscanClient::new(config.require_etherscan_api_key()?)?;
    let coingecko = CoingeckoClient::new()?;

    let (txs, price) = tokio::join!(
        etherscan.fetch_account_txs(chain, &account),
        coingecko.eth_usd()
    );
    let txs = txs.context("failed to fetch transaction history")?;
    let price = match price {
        Ok(price) => Some(price),
        Err(e) => {
            tracing::warn!("failed to fetch ETH/USD price: {}", e);
            None
        }
    };

    let stats = compute_tx_stats(Some(&account), &txs).unwrap_or_default();
    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        print_report(&account, chain, &stats, price);
    }
    Ok(())
}

fn print_report(account: &str, chain: ChainId, stats: &TxStats, price: Option<EthPrice>) {
    println!("Account:          {}", account);
    println!("Chain:            {}", chain.name());
    println!("Transactions:     {}", stats.count);
    println!(
        "Failed:           {} (wasted {} ETH)",
        stats.failed_count,
        units::eth_display(stats.failed_total_fees_paid, 5)
    );
    println!("Total gas used:   {}", stats.total_gas_used);
    println!(
        "Avg gas price:    {} gwei",
        units::gwei_display(stats.avg_gas_price, 3)
    );
    match price {
        Some(price) => {
            println!(
                "Total fees paid:  {} ETH / ${}",
                units::eth_display(stats.total_fees_paid, 5),
                units::usd_display(stats.total_fees_paid, price.cents(), 2)
            );
            println!("                  at today's rate of ${:.2}", price.usd);
        }
        None => {
            println!(
                "Total fees paid:  {} ETH",
                units::eth_display(stats.total_fees_paid, 5)
            );
        }
    }
}

async fn run_price() -> anyhow::Result<()> {
    let price = CoingeckoClient::new()?
        .eth_usd()
        .await
        .context("failed to fetch ETH/USD price")?;
    println!("1 ETH = ${:.2}", price.usd);
    Ok(())
}

fn run_chains() {
    for chain in ChainId::ALL {
        let explorer = chain.explorer_api_url().unwrap_or("(no explorer API)");
        println!("{:>5}  {:<8}  {}", chain.id(), chain.name(), explorer);
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();
}
