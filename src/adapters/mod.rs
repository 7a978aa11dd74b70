//! Adapters: implementations of port traits
//!
//! - `mock_tuner`: in-memory tuner backend for development and tests
//! - `static_capability`: capability service answering from a fixed list

pub mod mock_tuner;
pub mod static_capability;

pub use mock_tuner::{MockTuner, MockTunerControl};
pub use static_capability::StaticCapability;
