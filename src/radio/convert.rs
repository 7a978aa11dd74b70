//! Backend → caller translation tables
//!
//! Pure functions, no I/O, so the whole mapping can be tested without a
//! backend.

use crate::domain::{BackendErrorCode, BackendInterruptCode, BackendState, InterruptedCode, RadioError, RadioState};

/// Translate a backend error code into the caller-facing error.
pub fn map_backend_error(code: BackendErrorCode) -> RadioError {
    use BackendErrorCode::*;

    match code {
        NoFreeSpace => RadioError::OutOfMemory,
        NotInitialized | NoOp | InvalidState => RadioError::InvalidState,
        CommonInvalidArgument | InvalidArgument => RadioError::InvalidParameter,
        PolicyBlocked | PolicyInterrupted | PolicyInternal | PolicyDuplicated => {
            RadioError::SoundPolicy
        }
        RadioInternal | ResponseTimeout => RadioError::InvalidOperation,
        DeviceNotFound => RadioError::NotSupported,
        NoAntenna => RadioError::NoAntenna,
        DeviceNotOpened => RadioError::PermissionDenied,
        Other(raw) => RadioError::Unknown(raw),
    }
}

/// Translate a backend error and log it against the failing operation.
pub(crate) fn backend_failure(op: &str, code: BackendErrorCode) -> RadioError {
    let err = map_backend_error(code);
    log::error!("[{op}] {err} : backend error {code}");
    err
}

/// Collapse the backend state into the three caller-visible states.
/// `Null` reads as `Ready`.
pub fn map_backend_state(state: BackendState) -> RadioState {
    match state {
        BackendState::Playing => RadioState::Playing,
        BackendState::Scanning => RadioState::Scanning,
        BackendState::Null | BackendState::Ready => RadioState::Ready,
    }
}

/// Translate a backend interruption reason. Unrecognised codes read as a
/// resource conflict.
pub fn map_interrupt_code(code: BackendInterruptCode) -> InterruptedCode {
    use BackendInterruptCode::*;

    match code {
        CallEnd | AlarmEnd | EmergencyEnd | NotificationEnd => InterruptedCode::Completed,
        Media | OtherPlayerApp => InterruptedCode::ByMedia,
        CallStart => InterruptedCode::ByCall,
        EarjackUnplug => InterruptedCode::ByEarjackUnplug,
        AlarmStart => InterruptedCode::ByAlarm,
        NotificationStart => InterruptedCode::ByNotification,
        EmergencyStart => InterruptedCode::ByEmergency,
        ResourceConflict | Other(_) => InterruptedCode::ByResourceConflict,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn policy_codes_map_to_sound_policy() {
        for code in [
            BackendErrorCode::PolicyBlocked,
            BackendErrorCode::PolicyInterrupted,
            BackendErrorCode::PolicyInternal,
            BackendErrorCode::PolicyDuplicated,
        ] {
            assert_eq!(map_backend_error(code), RadioError::SoundPolicy, "{code:?}");
        }
    }

    #[test]
    fn state_like_codes_map_to_invalid_state() {
        for code in [
            BackendErrorCode::NotInitialized,
            BackendErrorCode::NoOp,
            BackendErrorCode::InvalidState,
        ] {
            assert_eq!(map_backend_error(code), RadioError::InvalidState);
        }
    }

    #[test]
    fn single_entry_codes() {
        assert_eq!(map_backend_error(BackendErrorCode::NoFreeSpace), RadioError::OutOfMemory);
        assert_eq!(map_backend_error(BackendErrorCode::InvalidArgument), RadioError::InvalidParameter);
        assert_eq!(map_backend_error(BackendErrorCode::CommonInvalidArgument), RadioError::InvalidParameter);
        assert_eq!(map_backend_error(BackendErrorCode::RadioInternal), RadioError::InvalidOperation);
        assert_eq!(map_backend_error(BackendErrorCode::ResponseTimeout), RadioError::InvalidOperation);
        assert_eq!(map_backend_error(BackendErrorCode::DeviceNotFound), RadioError::NotSupported);
        assert_eq!(map_backend_error(BackendErrorCode::NoAntenna), RadioError::NoAntenna);
        assert_eq!(map_backend_error(BackendErrorCode::DeviceNotOpened), RadioError::PermissionDenied);
    }

    #[test]
    fn unmapped_code_is_unknown_not_permission_denied() {
        assert_eq!(map_backend_error(BackendErrorCode::Other(0x42)), RadioError::Unknown(0x42));
    }

    #[test]
    fn null_backend_state_reads_as_ready() {
        assert_eq!(map_backend_state(BackendState::Null), RadioState::Ready);
        assert_eq!(map_backend_state(BackendState::Ready), RadioState::Ready);
        assert_eq!(map_backend_state(BackendState::Playing), RadioState::Playing);
        assert_eq!(map_backend_state(BackendState::Scanning), RadioState::Scanning);
    }

    #[test]
    fn end_codes_mean_interrupt_completed() {
        for code in [
            BackendInterruptCode::CallEnd,
            BackendInterruptCode::AlarmEnd,
            BackendInterruptCode::EmergencyEnd,
            BackendInterruptCode::NotificationEnd,
        ] {
            assert_eq!(map_interrupt_code(code), InterruptedCode::Completed);
        }
    }

    #[test]
    fn start_codes_name_their_source() {
        assert_eq!(map_interrupt_code(BackendInterruptCode::CallStart), InterruptedCode::ByCall);
        assert_eq!(map_interrupt_code(BackendInterruptCode::AlarmStart), InterruptedCode::ByAlarm);
        assert_eq!(map_interrupt_code(BackendInterruptCode::EmergencyStart), InterruptedCode::ByEmergency);
        assert_eq!(map_interrupt_code(BackendInterruptCode::NotificationStart), InterruptedCode::ByNotification);
        assert_eq!(map_interrupt_code(BackendInterruptCode::Media), InterruptedCode::ByMedia);
        assert_eq!(map_interrupt_code(BackendInterruptCode::OtherPlayerApp), InterruptedCode::ByMedia);
        assert_eq!(map_interrupt_code(BackendInterruptCode::EarjackUnplug), InterruptedCode::ByEarjackUnplug);
    }

    #[test]
    fn unknown_interrupt_is_resource_conflict() {
        assert_eq!(map_interrupt_code(BackendInterruptCode::Other(99)), InterruptedCode::ByResourceConflict);
        assert_eq!(
            map_interrupt_code(BackendInterruptCode::ResourceConflict),
            InterruptedCode::ByResourceConflict
        );
    }
}
