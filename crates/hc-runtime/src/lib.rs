//! # HealthChain Runtime
//!
//! The vault session and its simulated collaborators.
//!
//! ## Architectural Patterns
//!
//! - **Single writer**: registry and ledger are mutated only through
//!   [`VaultSession`], behind one lock that is never held across an await
//! - **Hexagonal Architecture**: wallet, contract, content store and proof
//!   generator are ports; `adapters/` holds in-process simulations
//! - **Event-driven feedback**: every outcome is published as a
//!   `VaultEvent` on the shared bus
//!
//! ## Module Structure
//!
//! ```text
//! hc-runtime/
//! ├── config.rs        # VaultConfig, NetworkConfig, env loading
//! ├── errors.rs        # VaultError, ActionKind
//! ├── guard.rs         # One in-flight call per action kind
//! ├── session.rs       # VaultSession
//! ├── ports/           # WalletProvider
//! └── adapters/        # SimulatedChain, SimulatedContentStore
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod config;
pub mod errors;
pub mod guard;
pub mod ports;
pub mod session;

pub use adapters::{SimulatedBackend, SimulatedChain, SimulatedContentStore};
pub use config::{ConfigError, NetworkConfig, VaultConfig};
pub use errors::{ActionKind, VaultError};
pub use ports::{Balance, WalletChange, WalletProvider};
pub use session::{VaultPorts, VaultSession, VaultState};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    #[test]
    #[allow(clippy::const_is_empty)]
    fn test_version() {
        assert!(!super::VERSION.is_empty());
    }
}
