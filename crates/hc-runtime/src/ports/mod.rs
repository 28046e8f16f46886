//! # Ports Module
//!
//! The wallet port. Contract, content store and proof generator ports live
//! in the subsystem crates that consume them.

pub mod outbound;

pub use outbound::*;
