//! Core domain types
//!
//! Pure types with no I/O dependencies: caller-facing radio state and errors,
//! and the backend vocabulary they are translated from.

pub mod config;
pub mod error;
pub mod message;
pub mod types;

pub use config::*;
pub use error::*;
pub use message::*;
pub use types::*;
