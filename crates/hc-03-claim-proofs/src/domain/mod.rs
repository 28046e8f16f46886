//! # Domain Module
//!
//! Claim catalogue and proof records.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::*;
pub use value_objects::*;
