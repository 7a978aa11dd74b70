//! Domain error types

use thiserror::Error;

/// Errors returned by radio handle operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RadioError {
    #[error("Out of memory")]
    OutOfMemory,

    #[error("Invalid parameter")]
    InvalidParameter,

    #[error("Invalid operation")]
    InvalidOperation,

    #[error("Invalid radio state")]
    InvalidState,

    #[error("Sound policy error")]
    SoundPolicy,

    #[error("No antenna")]
    NoAntenna,

    #[error("Permission denied")]
    PermissionDenied,

    #[error("Not supported")]
    NotSupported,

    /// A backend code with no entry in the conversion table
    #[error("Unknown backend error (code {0})")]
    Unknown(i32),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Base of the radio-specific error range
const RADIO_ERROR_BASE: i32 = -0x0196_0000;

impl RadioError {
    /// Stable integer code for callers that need numeric compatibility.
    pub fn code(&self) -> i32 {
        match self {
            RadioError::OutOfMemory => -12,
            RadioError::InvalidParameter => -22,
            RadioError::InvalidOperation => -38,
            RadioError::InvalidState => RADIO_ERROR_BASE | 0x01,
            RadioError::SoundPolicy => RADIO_ERROR_BASE | 0x02,
            RadioError::NoAntenna => RADIO_ERROR_BASE | 0x03,
            RadioError::PermissionDenied => -13,
            RadioError::NotSupported => -0x3fff_fffe,
            RadioError::Unknown(code) => *code,
            RadioError::Config(_) => -38,
        }
    }
}

/// Result type alias for radio operations
pub type RadioResult<T> = Result<T, RadioError>;
