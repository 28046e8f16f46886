//! # Adapters

pub mod simulated;

pub use simulated::SimulatedProofGenerator;
