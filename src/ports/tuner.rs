//! Tuner backend traits
//!
//! Split into two traits, like a factory and the connection it opens:
//! - `TunerFactory` opens a session and hands it the message sink
//! - `TunerSession` is one exclusively owned backend session

use crossbeam_channel::Sender;

use crate::domain::{
    BackendMessage, BackendResult, BackendState, Frequency, FrequencyRange, SeekDirection,
};

/// Sending half of a handle's message queue, given to the backend at open.
///
/// Sends never block. Once the owning handle is destroyed, sends are
/// silently dropped.
#[derive(Debug, Clone)]
pub struct MessageSink {
    tx: Sender<BackendMessage>,
}

impl MessageSink {
    pub fn new(tx: Sender<BackendMessage>) -> Self {
        Self { tx }
    }

    /// Post a message for dispatch. Returns false if the handle is gone.
    pub fn post(&self, message: BackendMessage) -> bool {
        self.tx.send(message).is_ok()
    }
}

/// Opens backend sessions.
pub trait TunerFactory {
    /// Create a session that reports asynchronous events through `sink`.
    fn open(&self, sink: MessageSink) -> BackendResult<Box<dyn TunerSession>>;
}

/// One open backend session. Owned by exactly one `RadioHandle`.
pub trait TunerSession: Send {
    /// Acquire the tuner device
    fn realize(&mut self) -> BackendResult<()>;

    /// Release the tuner device
    fn unrealize(&mut self) -> BackendResult<()>;

    /// Tear down the session. No other call is made after a successful destroy.
    fn destroy(&mut self) -> BackendResult<()>;

    fn get_state(&mut self) -> BackendResult<BackendState>;

    fn start(&mut self) -> BackendResult<()>;

    fn stop(&mut self) -> BackendResult<()>;

    fn set_frequency(&mut self, freq: Frequency) -> BackendResult<()>;

    fn get_frequency(&mut self) -> BackendResult<Frequency>;

    /// Start an asynchronous seek; completion arrives as `SeekFinished`
    fn seek(&mut self, direction: SeekDirection) -> BackendResult<()>;

    /// Start an asynchronous scan; stations arrive as `ScanInfo`
    fn scan_start(&mut self) -> BackendResult<()>;

    fn scan_stop(&mut self) -> BackendResult<()>;

    fn set_mute(&mut self, muted: bool) -> BackendResult<()>;

    fn get_signal_strength(&mut self) -> BackendResult<i32>;

    fn get_frequency_range(&mut self) -> BackendResult<FrequencyRange>;

    fn get_channel_spacing(&mut self) -> BackendResult<i32>;
}
