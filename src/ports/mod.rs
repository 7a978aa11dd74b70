//! Port traits (interfaces)
//!
//! These traits define the boundaries between the radio core and the external
//! tuner backend and platform services. Adapters implement them.

pub mod capability;
pub mod tuner;

pub use capability::*;
pub use tuner::*;
