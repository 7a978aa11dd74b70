//! Radio handle core.
//!
//! This module separates the concerns of driving a tuner backend:
//! - `convert`: translate backend codes and states (pure, no I/O)
//! - `callbacks`: the per-event callback slot table
//! - `dispatch`: pump backend messages into callbacks on a per-handle thread
//! - `handle`: own the backend session and enforce the state machine

pub mod callbacks;
pub mod convert;
pub(crate) mod dispatch;
pub mod handle;

pub use callbacks::{FrequencyCallback, InterruptedCallback, NotifyCallback};
pub use convert::{map_backend_error, map_backend_state, map_interrupt_code};
pub use handle::RadioHandle;
