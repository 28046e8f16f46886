//! # HealthChain Test Suite
//!
//! Cross-crate flows driven through a `VaultSession` wired to the
//! simulated backend.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── flows.rs        # Upload → verify → select → grant → prove
//!     ├── choreography.rs # Event bus ordering and failure events
//!     └── concurrency.rs  # In-flight guards and wallet notifications
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p hc-tests
//! cargo test -p hc-tests integration::flows::
//! ```

pub mod integration;
