//! # Shared Bus - Vault Event Bus
//!
//! Every outcome of a vault session action (success, local rejection or
//! upstream failure) is published here as a [`VaultEvent`]. Front ends and
//! audit sinks subscribe instead of polling session state.
//!
//! ```text
//! ┌──────────────┐                    ┌──────────────┐
//! │ VaultSession │                    │  UI / audit  │
//! │              │    publish()       │              │
//! │              │ ──────┐            │              │
//! └──────────────┘       │            └──────────────┘
//!                        ▼                    ↑
//!                  ┌──────────────┐          │
//!                  │  Event Bus   │          │
//!                  │              │ ─────────┘
//!                  └──────────────┘  subscribe()
//! ```

// Nursery lints that are too strict
#![allow(clippy::missing_const_for_fn)]
// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::panic))]

pub mod events;
pub mod publisher;
pub mod subscriber;

// Re-export main types
pub use events::{EventFilter, EventTopic, VaultEvent};
pub use publisher::InMemoryEventBus;
pub use subscriber::{EventStream, Subscription, SubscriptionError};

/// Maximum events to buffer per subscriber before the oldest are dropped.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 256;
