//! FM radio tuner handle
//!
//! A thin, strongly-typed layer over an external tuner backend: it validates
//! arguments, enforces the READY/PLAYING/SCANNING state machine, translates
//! backend error codes and republishes backend events as callbacks.
//!
//! ## Architecture (Hexagonal / Ports & Adapters)
//!
//! - `domain/` - Pure domain types, no I/O dependencies
//! - `ports/` - Trait definitions for the tuner backend and platform services
//! - `radio/` - The handle: state machine, callback table, event dispatch
//! - `adapters/` - Implementations of ports (mock tuner, static capability)
//! - `profiles` - JSON configuration profile persistence

// Core domain (pure, no I/O)
pub mod domain;
pub mod ports;
pub mod radio;

// Adapters (external I/O)
pub mod adapters;
pub mod profiles;

pub use domain::{Frequency, InterruptedCode, RadioError, RadioResult, RadioState};
pub use radio::RadioHandle;
