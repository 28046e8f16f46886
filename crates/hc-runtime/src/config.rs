//! # Vault Configuration
//!
//! Network table, contract address and session switches.
//!
//! All values have defaults; `VaultConfig::from_env` overrides them from
//! `HC_*` environment variables.

use std::env;
use std::time::Duration;

use shared_types::{Address, AddressError, TxHash};
use thiserror::Error;

/// Contract address used when `HC_CONTRACT_ADDRESS` is unset.
pub const DEFAULT_CONTRACT_ADDRESS: Address = Address::new([
    0x1e, 0x44, 0x09, 0x04, 0xdb, 0x8b, 0xf7, 0x4e, 0x07, 0x07, 0x23, 0xfa, 0xe5, 0xf8, 0x35, 0xe4,
    0x96, 0x09, 0x56, 0x46,
]);

/// Public IPFS gateway prefix.
pub const DEFAULT_IPFS_GATEWAY: &str = "https://ipfs.io/ipfs/";

/// Simulated proving time per proof in the demo.
pub const DEFAULT_PROOF_LATENCY_MS: u64 = 2300;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// `HC_NETWORK` names an unknown network.
    #[error("Unknown network '{0}', expected testnet or mainnet")]
    UnknownNetwork(String),

    /// `HC_CONTRACT_ADDRESS` is not a valid address.
    #[error("Invalid contract address: {0}")]
    InvalidContractAddress(#[from] AddressError),

    /// A numeric variable did not parse.
    #[error("Invalid value '{value}' for {var}")]
    InvalidNumber {
        /// Variable name.
        var: &'static str,
        /// Offending value.
        value: String,
    },
}

/// Chain parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkConfig {
    /// Display name.
    pub name: String,
    /// EIP-155 chain id.
    pub chain_id: u64,
    /// JSON-RPC endpoint.
    pub rpc_url: String,
    /// Block explorer base URL.
    pub explorer_url: String,
    /// Native currency symbol.
    pub currency_symbol: String,
    /// Native currency decimals.
    pub decimals: u8,
}

impl NetworkConfig {
    /// Celo Sepolia testnet.
    pub fn testnet() -> Self {
        Self {
            name: "Celo Sepolia Testnet".to_string(),
            chain_id: 11_142_220,
            rpc_url: "https://forno.celo-sepolia.celo-testnet.org".to_string(),
            explorer_url: "https://celo-sepolia.blockscout.com".to_string(),
            currency_symbol: "CELO".to_string(),
            decimals: 18,
        }
    }

    /// Celo mainnet.
    pub fn mainnet() -> Self {
        Self {
            name: "Celo Mainnet".to_string(),
            chain_id: 42_220,
            rpc_url: "https://forno.celo.org".to_string(),
            explorer_url: "https://celoscan.io".to_string(),
            currency_symbol: "CELO".to_string(),
            decimals: 18,
        }
    }

    /// Look up a network by name.
    pub fn by_name(name: &str) -> Result<Self, ConfigError> {
        match name.trim().to_lowercase().as_str() {
            "testnet" | "sepolia" | "celo-sepolia" => Ok(Self::testnet()),
            "mainnet" | "celo" => Ok(Self::mainnet()),
            _ => Err(ConfigError::UnknownNetwork(name.to_string())),
        }
    }

    /// Explorer link for a transaction.
    pub fn tx_url(&self, tx_hash: &TxHash) -> String {
        format!("{}/tx/{}", self.explorer_url.trim_end_matches('/'), tx_hash)
    }

    /// Explorer link for an address.
    pub fn address_url(&self, address: &Address) -> String {
        format!("{}/address/{}", self.explorer_url.trim_end_matches('/'), address)
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self::testnet()
    }
}

/// Complete session configuration.
#[derive(Debug, Clone)]
pub struct VaultConfig {
    /// Target chain.
    pub network: NetworkConfig,
    /// Document-sharing contract.
    pub contract_address: Address,
    /// Verify locally when the contract call fails (demo mode).
    pub allow_local_verification_fallback: bool,
    /// Simulated proving time per proof.
    pub proof_latency: Duration,
    /// Gateway prefix for viewing pinned content.
    pub ipfs_gateway: String,
    /// Event bus buffer per subscriber.
    pub event_capacity: usize,
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            network: NetworkConfig::testnet(),
            contract_address: DEFAULT_CONTRACT_ADDRESS,
            allow_local_verification_fallback: false,
            proof_latency: Duration::from_millis(DEFAULT_PROOF_LATENCY_MS),
            ipfs_gateway: DEFAULT_IPFS_GATEWAY.to_string(),
            event_capacity: shared_bus::DEFAULT_CHANNEL_CAPACITY,
        }
    }
}

impl VaultConfig {
    /// Configuration for tests: no simulated latency.
    pub fn for_testing() -> Self {
        Self {
            proof_latency: Duration::ZERO,
            ..Self::default()
        }
    }

    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `HC_NETWORK`: testnet or mainnet (default: testnet)
    /// - `HC_CONTRACT_ADDRESS`: contract address
    /// - `HC_VERIFY_FALLBACK`: local verification fallback (default: false)
    /// - `HC_PROOF_LATENCY_MS`: simulated proving time (default: 2300)
    /// - `HC_IPFS_GATEWAY`: content gateway prefix
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Create configuration from an arbitrary variable lookup.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(network) = lookup("HC_NETWORK") {
            config.network = NetworkConfig::by_name(&network)?;
        }
        if let Some(address) = lookup("HC_CONTRACT_ADDRESS") {
            config.contract_address = address.parse::<Address>()?;
        }
        if let Some(flag) = lookup("HC_VERIFY_FALLBACK") {
            config.allow_local_verification_fallback =
                flag.to_lowercase() == "true" || flag == "1";
        }
        if let Some(ms) = lookup("HC_PROOF_LATENCY_MS") {
            let millis = ms.parse::<u64>().map_err(|_| ConfigError::InvalidNumber {
                var: "HC_PROOF_LATENCY_MS",
                value: ms.clone(),
            })?;
            config.proof_latency = Duration::from_millis(millis);
        }
        if let Some(gateway) = lookup("HC_IPFS_GATEWAY") {
            config.ipfs_gateway = gateway;
        }

        Ok(config)
    }

    /// Gateway link for a content id.
    pub fn content_url(&self, content_id: &str) -> String {
        format!("{}{}", self.ipfs_gateway, content_id)
    }
}
