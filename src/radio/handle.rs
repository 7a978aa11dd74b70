//! RadioHandle: one open tuner session and its state machine.
//!
//! Every public operation runs the same gauntlet before touching the backend:
//! 1. platform feature check (fails with `NotSupported`)
//! 2. handle liveness (a destroyed handle fails with `InvalidParameter`)
//! 3. argument and state-precondition checks
//!
//! Only then is the backend called; its error code is translated through
//! `convert::map_backend_error`.
//!
//! | Operation      | Requires  | Leaves    |
//! |----------------|-----------|-----------|
//! | `start`        | Ready     | Playing   |
//! | `stop`         | Playing   | Ready     |
//! | `scan_start`   | Ready     | Scanning  |
//! | `scan_stop`    | Scanning  | Ready     |
//! | `seek_up/down` | Playing   | Playing   |

use std::sync::Arc;

use crate::domain::{
    BackendResult, Configuration, EventKind, Frequency, FrequencyRange, RadioError, RadioResult,
    RadioState, SeekDirection, DEFAULT_FEATURE_ID, FM_MAX_KHZ, FM_MIN_KHZ,
};
use crate::ports::{FeatureCapability, MessageSink, TunerFactory, TunerSession};

use super::callbacks::{Callback, FrequencyCallback, InterruptedCallback, NotifyCallback};
use super::convert::{backend_failure, map_backend_state};
use super::dispatch::{lock, Dispatcher, HandleShared};

/// Fail with `NotSupported` unless the platform reports the feature.
fn check_feature(capability: &dyn FeatureCapability, feature_id: &str, op: &str) -> RadioResult<()> {
    log::info!("[{op}] Enter");
    if capability.is_feature_supported(feature_id) {
        Ok(())
    } else {
        log::error!("[{op}] {} : feature '{feature_id}' unavailable", RadioError::NotSupported);
        Err(RadioError::NotSupported)
    }
}

/// Caller-visible handle for one open tuner.
///
/// Commands are issued through `&mut self`; asynchronous backend events are
/// delivered to registered callbacks on the handle's own dispatch thread.
pub struct RadioHandle {
    session: Option<Box<dyn TunerSession>>,
    capability: Arc<dyn FeatureCapability>,
    feature_id: String,
    shared: Arc<HandleShared>,
    muted: bool,
    dispatcher: Option<Dispatcher>,
}

impl RadioHandle {
    /// Open and realize a backend session gated by the default FM feature.
    pub fn create(
        factory: &dyn TunerFactory,
        capability: Arc<dyn FeatureCapability>,
    ) -> RadioResult<Self> {
        Self::open(factory, capability, DEFAULT_FEATURE_ID.to_string())
    }

    /// Like `create`, but gated by the feature named in the profile.
    pub fn create_with_config(
        factory: &dyn TunerFactory,
        capability: Arc<dyn FeatureCapability>,
        config: &Configuration,
    ) -> RadioResult<Self> {
        Self::open(factory, capability, config.feature_id.clone())
    }

    fn open(
        factory: &dyn TunerFactory,
        capability: Arc<dyn FeatureCapability>,
        feature_id: String,
    ) -> RadioResult<Self> {
        const OP: &str = "create";
        check_feature(capability.as_ref(), &feature_id, OP)?;

        let shared = Arc::new(HandleShared::default());
        let (tx, rx) = crossbeam_channel::unbounded();
        // Running before the session opens so no early message is missed
        let dispatcher = Dispatcher::spawn(rx, Arc::clone(&shared))?;

        let mut session = factory
            .open(MessageSink::new(tx))
            .map_err(|code| backend_failure(OP, code))?;

        if let Err(code) = session.realize() {
            if let Err(destroy_code) = session.destroy() {
                log::warn!("[{OP}] Failed to destroy unrealized session ({destroy_code})");
            }
            return Err(backend_failure(OP, code));
        }

        *lock(&shared.state) = RadioState::Ready;
        Ok(Self {
            session: Some(session),
            capability,
            feature_id,
            shared,
            muted: false,
            dispatcher: Some(dispatcher),
        })
    }

    /// Release the tuner and destroy the backend session.
    ///
    /// A failed unrealize is logged and ignored. If the backend refuses to
    /// destroy the session the handle stays usable and the error is returned.
    pub fn destroy(&mut self) -> RadioResult<()> {
        const OP: &str = "destroy";
        self.enter(OP)?;
        let session = self.session.as_mut().ok_or_else(|| invalid_handle(OP))?;

        if let Err(code) = session.unrealize() {
            log::warn!("[{OP}] Failed to unrealize ({code})");
        }
        session.destroy().map_err(|code| backend_failure(OP, code))?;

        self.release();
        Ok(())
    }

    /// True until `destroy` succeeds.
    pub fn is_live(&self) -> bool {
        self.session.is_some()
    }

    /// Ask the backend for its state and refresh the cached copy.
    ///
    /// On backend failure the cached state is left as it was.
    pub fn get_state(&mut self) -> RadioResult<RadioState> {
        const OP: &str = "get_state";
        self.enter(OP)?;
        let shared = Arc::clone(&self.shared);
        let mut state = lock(&shared.state);
        let backend_state = self.with_session(OP, |s| s.get_state())?;
        *state = map_backend_state(backend_state);
        Ok(*state)
    }

    pub fn start(&mut self) -> RadioResult<()> {
        const OP: &str = "start";
        self.enter(OP)?;
        self.ensure_live(OP)?;
        self.transition(OP, RadioState::Ready, RadioState::Playing, |s| s.start())
    }

    pub fn stop(&mut self) -> RadioResult<()> {
        const OP: &str = "stop";
        self.enter(OP)?;
        self.ensure_live(OP)?;
        self.transition(OP, RadioState::Playing, RadioState::Ready, |s| s.stop())
    }

    /// Seek towards higher frequencies.
    ///
    /// `Some(cb)` replaces the seek-completed callback; `None` clears it.
    /// The landing frequency arrives later through that callback.
    pub fn seek_up(&mut self, callback: Option<FrequencyCallback>) -> RadioResult<()> {
        self.seek("seek_up", SeekDirection::Up, callback)
    }

    /// Seek towards lower frequencies. Callback rules as for `seek_up`.
    pub fn seek_down(&mut self, callback: Option<FrequencyCallback>) -> RadioResult<()> {
        self.seek("seek_down", SeekDirection::Down, callback)
    }

    fn seek(
        &mut self,
        op: &str,
        direction: SeekDirection,
        callback: Option<FrequencyCallback>,
    ) -> RadioResult<()> {
        self.enter(op)?;
        self.ensure_live(op)?;
        self.expect_state(op, RadioState::Playing)?;
        self.register_one_shot(EventKind::SeekCompleted, callback.map(Callback::frequency));
        self.with_session(op, |s| s.seek(direction))
    }

    /// Tune to `freq`. Values outside 87.5–108 MHz are rejected locally.
    pub fn set_frequency(&mut self, freq: Frequency) -> RadioResult<()> {
        const OP: &str = "set_frequency";
        self.enter(OP)?;
        self.ensure_live(OP)?;
        if !freq.is_fm_band() {
            log::error!(
                "[{OP}] {} : {} kHz out of range ({FM_MIN_KHZ} ~ {FM_MAX_KHZ})",
                RadioError::InvalidParameter,
                freq.as_khz()
            );
            return Err(RadioError::InvalidParameter);
        }
        self.with_session(OP, |s| s.set_frequency(freq))
    }

    pub fn get_frequency(&mut self) -> RadioResult<Frequency> {
        const OP: &str = "get_frequency";
        self.enter(OP)?;
        self.with_session(OP, |s| s.get_frequency())
    }

    /// Signal strength in backend-defined units
    pub fn get_signal_strength(&mut self) -> RadioResult<i32> {
        const OP: &str = "get_signal_strength";
        self.enter(OP)?;
        self.with_session(OP, |s| s.get_signal_strength())
    }

    /// Tunable range for the backend's current region
    pub fn get_frequency_range(&mut self) -> RadioResult<FrequencyRange> {
        const OP: &str = "get_frequency_range";
        self.enter(OP)?;
        self.with_session(OP, |s| s.get_frequency_range())
    }

    pub fn get_channel_spacing(&mut self) -> RadioResult<i32> {
        const OP: &str = "get_channel_spacing";
        self.enter(OP)?;
        self.with_session(OP, |s| s.get_channel_spacing())
    }

    /// Start scanning the band.
    ///
    /// `Some(cb)` replaces the scan-updated callback, invoked once per
    /// station found; `None` clears it. When the scan runs to completion the
    /// scan-completed subscription fires and the backend's state change
    /// returns the handle to `Ready`.
    pub fn scan_start(&mut self, callback: Option<FrequencyCallback>) -> RadioResult<()> {
        const OP: &str = "scan_start";
        self.enter(OP)?;
        self.ensure_live(OP)?;
        self.expect_state(OP, RadioState::Ready)?;
        self.register_one_shot(EventKind::ScanUpdated, callback.map(Callback::frequency));
        self.transition(OP, RadioState::Ready, RadioState::Scanning, |s| s.scan_start())
    }

    /// Stop a running scan. `Some(cb)` replaces the scan-stopped callback,
    /// fired once the backend confirms; `None` clears it.
    pub fn scan_stop(&mut self, callback: Option<NotifyCallback>) -> RadioResult<()> {
        const OP: &str = "scan_stop";
        self.enter(OP)?;
        self.ensure_live(OP)?;
        self.expect_state(OP, RadioState::Scanning)?;
        self.register_one_shot(EventKind::ScanStopped, callback.map(Callback::notify));
        self.transition(OP, RadioState::Scanning, RadioState::Ready, |s| s.scan_stop())
    }

    /// Mute or unmute. The cached flag changes only once the backend agrees.
    pub fn set_mute(&mut self, muted: bool) -> RadioResult<()> {
        const OP: &str = "set_mute";
        self.enter(OP)?;
        self.with_session(OP, |s| s.set_mute(muted))?;
        self.muted = muted;
        Ok(())
    }

    pub fn is_muted(&self) -> RadioResult<bool> {
        const OP: &str = "is_muted";
        self.enter(OP)?;
        self.ensure_live(OP)?;
        Ok(self.muted)
    }

    /// Subscribe to scan completion. `None` is rejected.
    pub fn set_scan_completed_cb(&mut self, callback: Option<NotifyCallback>) -> RadioResult<()> {
        self.subscribe(
            "set_scan_completed_cb",
            EventKind::ScanCompleted,
            callback.map(Callback::notify),
        )
    }

    pub fn unset_scan_completed_cb(&mut self) -> RadioResult<()> {
        self.unsubscribe("unset_scan_completed_cb", EventKind::ScanCompleted)
    }

    /// Subscribe to interruptions (calls, alarms, policy). `None` is rejected.
    pub fn set_interrupted_cb(&mut self, callback: Option<InterruptedCallback>) -> RadioResult<()> {
        self.subscribe(
            "set_interrupted_cb",
            EventKind::Interrupted,
            callback.map(Callback::interrupted),
        )
    }

    pub fn unset_interrupted_cb(&mut self) -> RadioResult<()> {
        self.unsubscribe("unset_interrupted_cb", EventKind::Interrupted)
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    fn enter(&self, op: &str) -> RadioResult<()> {
        check_feature(self.capability.as_ref(), &self.feature_id, op)
    }

    fn ensure_live(&self, op: &str) -> RadioResult<()> {
        if self.session.is_some() {
            Ok(())
        } else {
            Err(invalid_handle(op))
        }
    }

    fn expect_state(&self, op: &str, expected: RadioState) -> RadioResult<()> {
        let current = *lock(&self.shared.state);
        if current == expected {
            Ok(())
        } else {
            log::error!(
                "[{op}] {} : expected {expected:?}, handle is {current:?}",
                RadioError::InvalidState
            );
            Err(RadioError::InvalidState)
        }
    }

    /// Run `f` on the live session, translating any backend error.
    fn with_session<T>(
        &mut self,
        op: &str,
        f: impl FnOnce(&mut dyn TunerSession) -> BackendResult<T>,
    ) -> RadioResult<T> {
        let session = self.session.as_mut().ok_or_else(|| invalid_handle(op))?;
        f(session.as_mut()).map_err(|code| backend_failure(op, code))
    }

    /// Check `from`, call the backend, and move to `to` on success.
    ///
    /// The state lock is held across the backend call so that a
    /// `StateChanged` posted during the call is applied after, not before,
    /// the local transition.
    fn transition(
        &mut self,
        op: &str,
        from: RadioState,
        to: RadioState,
        f: impl FnOnce(&mut dyn TunerSession) -> BackendResult<()>,
    ) -> RadioResult<()> {
        let shared = Arc::clone(&self.shared);
        let mut state = lock(&shared.state);
        if *state != from {
            log::error!(
                "[{op}] {} : expected {from:?}, handle is {:?}",
                RadioError::InvalidState,
                *state
            );
            return Err(RadioError::InvalidState);
        }
        self.with_session(op, f)?;
        *state = to;
        Ok(())
    }

    /// One-shot operation callbacks: `None` means "no interest" and clears.
    fn register_one_shot(&self, kind: EventKind, callback: Option<Callback>) {
        let mut table = lock(&self.shared.callbacks);
        match callback {
            Some(cb) => table.set(kind, cb),
            None => table.clear(kind),
        }
    }

    /// Long-lived subscriptions: `None` is an invalid argument.
    fn subscribe(&mut self, op: &str, kind: EventKind, callback: Option<Callback>) -> RadioResult<()> {
        self.enter(op)?;
        self.ensure_live(op)?;
        let Some(cb) = callback else {
            log::error!("[{op}] {} : callback is required", RadioError::InvalidParameter);
            return Err(RadioError::InvalidParameter);
        };
        lock(&self.shared.callbacks).set(kind, cb);
        Ok(())
    }

    fn unsubscribe(&mut self, op: &str, kind: EventKind) -> RadioResult<()> {
        self.enter(op)?;
        self.ensure_live(op)?;
        lock(&self.shared.callbacks).clear(kind);
        Ok(())
    }

    /// Drop the session, stop the dispatch thread and forget every callback.
    fn release(&mut self) {
        self.session = None;
        self.dispatcher = None;
        lock(&self.shared.callbacks).clear_all();
    }
}

impl Drop for RadioHandle {
    fn drop(&mut self) {
        if let Some(session) = self.session.as_mut() {
            log::warn!("radio handle dropped without destroy; tearing down");
            if let Err(code) = session.unrealize() {
                log::warn!("[drop] Failed to unrealize ({code})");
            }
            if let Err(code) = session.destroy() {
                log::warn!("[drop] Failed to destroy session ({code})");
            }
        }
        self.release();
    }
}

fn invalid_handle(op: &str) -> RadioError {
    log::error!("[{op}] {} : handle destroyed", RadioError::InvalidParameter);
    RadioError::InvalidParameter
}
