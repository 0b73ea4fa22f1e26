use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "eth-fees", version, about = "Ethereum account gas/fee statistics")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch an account's transaction history and print gas/fee statistics
    Stats {
        /// Account address, 0x-prefixed hex
        #[arg(long)]
        address: String,
        /// Chain name or numeric id, e.g. mainnet or 1
        #[arg(long, default_value = "mainnet")]
        chain: String,
        /// Print the raw aggregate as JSON instead of the report
        #[arg(long)]
        json: bool,
    },
    /// Print the current ETH/USD rate
    Price,
    /// List known chains and their block explorer APIs
    Chains,
    /// Run the HTTP API server
    Serve {
        /// Override bind address, e.g. 0.0.0.0:8080
        #[arg(long)]
        addr: Option<String>,
    },
}
