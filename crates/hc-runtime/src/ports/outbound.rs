//! # Outbound Ports
//!
//! The browser wallet as seen by the session.

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use shared_types::{Address, UpstreamError};
use tokio::sync::broadcast;

/// Native-currency balance.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balance {
    /// Amount in the smallest unit.
    pub raw: u128,
    /// Decimal places of the currency.
    pub decimals: u8,
    /// Currency symbol.
    pub symbol: String,
}

impl Balance {
    /// Amount in whole units.
    pub fn as_units(&self) -> f64 {
        self.raw as f64 / 10f64.powi(i32::from(self.decimals))
    }
}

impl fmt::Display for Balance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4} {}", self.as_units(), self.symbol)
    }
}

/// Notification pushed by the wallet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WalletChange {
    /// The user switched or locked accounts.
    AccountChanged(Option<Address>),
    /// The user switched networks.
    NetworkChanged(u64),
}

/// Wallet provider - outbound port.
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// Request account access. `force_select` shows the account picker even
    /// when an account is already authorized.
    async fn connect(&self, force_select: bool) -> Result<Address, UpstreamError>;

    /// Revoke the session's account access.
    async fn disconnect(&self) -> Result<(), UpstreamError>;

    /// Currently active account.
    fn account(&self) -> Option<Address>;

    /// Currently selected chain id.
    fn chain_id(&self) -> Option<u64>;

    /// Native balance of `account`.
    async fn balance(&self, account: Address) -> Result<Balance, UpstreamError>;

    /// Subscribe to account and network changes.
    fn changes(&self) -> broadcast::Receiver<WalletChange>;
}
