use std::fmt;
use std::str::FromStr;

/// Networks the dashboard knows about. Only chains with a block-explorer
/// API can serve transaction history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChainId {
    Mainnet,
    Ropsten,
    Rinkeby,
    Goerli,
    Local,
}

#[derive(thiserror::Error, Debug)]
#[error("unknown chain: {0}")]
pub struct ParseChainError(String);

impl ChainId {
    pub const ALL: [ChainId; 5] = [
        ChainId::Mainnet,
        ChainId::Ropsten,
        ChainId::Rinkeby,
        ChainId::Goerli,
        ChainId::Local,
    ];

    pub fn from_id(id: u64) -> Option<ChainId> {
        match id {
            1 => Some(ChainId::Mainnet),
            3 => Some(ChainId::Ropsten),
            4 => Some(ChainId::Rinkeby),
            5 => Some(ChainId::Goerli),
            1337 => Some(ChainId::Local),
            _ => None,
        }
    }

    pub const fn id(self) -> u64 {
        match self {
            ChainId::Mainnet => 1,
            ChainId::Ropsten => 3,
            ChainId::Rinkeby => 4,
            ChainId::Goerli => 5,
            ChainId::Local => 1337,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            ChainId::Mainnet => "Mainnet",
            ChainId::Ropsten => "Ropsten",
            ChainId::Rinkeby => "Rinkeby",
            ChainId::Goerli => "Goerli",
            ChainId::Local => "Local",
        }
    }

    pub const fn explorer_api_url(self) -> Option<&'static str> {
        match self {
            ChainId::Mainnet => Some("https://api.etherscan.io/api"),
            ChainId::Ropsten => None,
            ChainId::Rinkeby => Some("https://api-rinkeby.etherscan.io/api"),
            ChainId::Goerli => Some("https://api-goerli.etherscan.io/api"),
            ChainId::Local => None,
        }
    }

    pub fn is_supported(self) -> bool {
        self.explorer_api_url().is_some()
    }
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ChainId {
    type Err = ParseChainError;

    /// Accepts a chain name (case-insensitive) or a decimal chain id.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(id) = s.parse::<u64>() {
            return ChainId::from_id(id).ok_or_else(|| ParseChainError(s.to_string()));
        }
        match s.to_ascii_lowercase().as_str() {
            "mainnet" => Ok(ChainId::Mainnet),
            "ropsten" => Ok(ChainId::Ropsten),
            "rinkeby" => Ok(ChainId::Rinkeby),
            "goerli" => Ok(ChainId::Goerli),
            "local" => Ok(ChainId::Local),
            _ => Err(ParseChainError(s.to_string())),
        }
    }
}

/// Display name for a raw chain id, falling back for ids outside the
/// registry.
pub fn chain_name(id: u64) -> &'static str {
    ChainId::from_id(id).map(ChainId::name).unwrap_or("Unknown Chain")
}
