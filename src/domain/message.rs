//! Backend vocabulary: the states, error codes and asynchronous messages a
//! tuner backend speaks. These are translated into the caller-facing types
//! by `radio::convert`.

use super::Frequency;

/// Tuner state as reported by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendState {
    Null,
    Ready,
    Playing,
    Scanning,
}

/// Error codes a backend may return
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendErrorCode {
    NoFreeSpace,
    NotInitialized,
    NoOp,
    InvalidState,
    CommonInvalidArgument,
    InvalidArgument,
    PolicyBlocked,
    PolicyInterrupted,
    PolicyInternal,
    PolicyDuplicated,
    RadioInternal,
    ResponseTimeout,
    DeviceNotFound,
    NoAntenna,
    DeviceNotOpened,
    /// Anything the backend reports that has no named variant
    Other(i32),
}

impl std::fmt::Display for BackendErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BackendErrorCode::Other(code) => write!(f, "Other(0x{code:x})"),
            other => write!(f, "{other:?}"),
        }
    }
}

/// Result of a single backend call
pub type BackendResult<T> = Result<T, BackendErrorCode>;

/// Interruption reasons reported by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendInterruptCode {
    CallStart,
    CallEnd,
    AlarmStart,
    AlarmEnd,
    EmergencyStart,
    EmergencyEnd,
    NotificationStart,
    NotificationEnd,
    Media,
    OtherPlayerApp,
    EarjackUnplug,
    ResourceConflict,
    Other(i32),
}

/// Asynchronous message delivered by the backend through its `MessageSink`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendMessage {
    /// A station was found during a scan
    ScanInfo { frequency: Frequency },
    /// The backend confirmed a scan stop
    ScanStopped,
    /// The scan ran to completion
    ScanFinished,
    /// A seek landed on a station
    SeekFinished { frequency: Frequency },
    StateInterrupted { code: BackendInterruptCode },
    /// The interruption ended and playback may resume
    ReadyToResume,
    StateChanged {
        previous: BackendState,
        current: BackendState,
    },
    Error { code: BackendErrorCode },
    ScanStarted,
    SeekStarted,
}
