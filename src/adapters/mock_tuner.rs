//! Mock tuner adapter for development and testing without hardware.
//!
//! Every backend call is logged at INFO level so you can verify exactly what
//! a real tuner would be asked to do:
//!
//!   RUST_LOG=fmtuner=info cargo run
//!
//! A `MockTunerControl` shares the device state with the session, so tests
//! can inject failures, push arbitrary backend messages and inspect the call
//! log from outside the handle.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::domain::{
    BackendErrorCode, BackendMessage, BackendResult, BackendState, Configuration, Frequency,
    FrequencyRange, SeekDirection, FM_MAX_KHZ, FM_MIN_KHZ,
};
use crate::ports::{MessageSink, TunerFactory, TunerSession};

/// Signal strength reported when tuned to a listed station
const STATION_SIGNAL: i32 = -45;
/// Signal strength reported between stations
const NOISE_FLOOR_SIGNAL: i32 = -98;
/// Channel spacing reported by the mock (kHz)
const CHANNEL_SPACING_KHZ: i32 = 100;

#[derive(Debug)]
struct MockDevice {
    sink: Option<MessageSink>,
    state: BackendState,
    frequency: Frequency,
    muted: bool,
    calls: Vec<String>,
    failures: HashMap<&'static str, BackendErrorCode>,
    open_failure: Option<BackendErrorCode>,
}

/// Shared view of the mock device, for tests and the demo driver.
#[derive(Debug, Clone)]
pub struct MockTunerControl {
    device: Arc<Mutex<MockDevice>>,
}

impl MockTunerControl {
    fn device(&self) -> MutexGuard<'_, MockDevice> {
        self.device.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Make the next call to `op` (e.g. "start", "destroy") fail with `code`.
    pub fn fail_next(&self, op: &'static str, code: BackendErrorCode) {
        self.device().failures.insert(op, code);
    }

    /// Make the next `open` fail with `code`.
    pub fn fail_open(&self, code: BackendErrorCode) {
        self.device().open_failure = Some(code);
    }

    /// Post a message as if the backend emitted it. False if no session is
    /// open or its handle is gone.
    pub fn emit(&self, message: BackendMessage) -> bool {
        self.device().post(message)
    }

    /// Run a held scan to completion: one `ScanInfo` per station, then
    /// `ScanFinished` and the return to `Ready`.
    pub fn complete_scan(&self, stations: &[Frequency]) {
        let mut device = self.device();
        for &frequency in stations {
            device.post(BackendMessage::ScanInfo { frequency });
        }
        device.post(BackendMessage::ScanFinished);
        device.change_state(BackendState::Ready);
    }

    /// Names (and arguments) of every backend call, oldest first.
    pub fn calls(&self) -> Vec<String> {
        self.device().calls.clone()
    }

    pub fn frequency(&self) -> Frequency {
        self.device().frequency
    }

    pub fn state(&self) -> BackendState {
        self.device().state
    }

    pub fn is_muted(&self) -> bool {
        self.device().muted
    }
}

impl MockDevice {
    fn post(&self, message: BackendMessage) -> bool {
        self.sink.as_ref().is_some_and(|sink| sink.post(message))
    }

    /// Only a finished scan is announced; every other transition is the
    /// direct result of a call and the handle tracks it itself.
    fn change_state(&mut self, current: BackendState) {
        let previous = self.state;
        self.state = current;
        self.post(BackendMessage::StateChanged { previous, current });
    }

    /// Record the call and consume any failure queued for it.
    fn call(&mut self, op: &'static str, detail: Option<String>) -> BackendResult<()> {
        let entry = match detail {
            Some(d) => format!("{op} {d}"),
            None => op.to_string(),
        };
        log::info!("[MOCK TUNER] {entry}");
        self.calls.push(entry);

        match self.failures.remove(op) {
            Some(code) => {
                log::info!("[MOCK TUNER] {op} → injected failure {code}");
                Err(code)
            }
            None => Ok(()),
        }
    }
}

/// In-memory tuner backend (factory side).
pub struct MockTuner {
    control: MockTunerControl,
    stations: Vec<Frequency>,
    hold_scans: bool,
}

impl MockTuner {
    pub fn new() -> Self {
        Self::from_config(&Configuration::default())
    }

    /// Mock tuned to the profile's initial frequency with its station list.
    pub fn from_config(config: &Configuration) -> Self {
        let mut stations: Vec<Frequency> =
            config.stations_khz.iter().copied().map(Frequency::khz).collect();
        stations.sort();
        stations.dedup();

        let frequency = Frequency::khz(config.initial_frequency_khz);
        log::info!("[MOCK TUNER] Initialized at {frequency}, {} stations", stations.len());
        Self {
            control: MockTunerControl {
                device: Arc::new(Mutex::new(MockDevice {
                    sink: None,
                    state: BackendState::Null,
                    frequency,
                    muted: false,
                    calls: Vec::new(),
                    failures: HashMap::new(),
                    open_failure: None,
                })),
            },
            stations,
            hold_scans: false,
        }
    }

    /// Leave scans running after `scan_start` until `scan_stop` or
    /// `MockTunerControl::complete_scan`.
    pub fn hold_scans(mut self) -> Self {
        self.hold_scans = true;
        self
    }

    pub fn control(&self) -> MockTunerControl {
        self.control.clone()
    }
}

impl Default for MockTuner {
    fn default() -> Self {
        Self::new()
    }
}

impl TunerFactory for MockTuner {
    fn open(&self, sink: MessageSink) -> BackendResult<Box<dyn TunerSession>> {
        let mut device = self.control.device();
        if let Some(code) = device.open_failure.take() {
            log::info!("[MOCK TUNER] open → injected failure {code}");
            return Err(code);
        }
        log::info!("[MOCK TUNER] open");
        device.sink = Some(sink);
        device.state = BackendState::Null;
        drop(device);

        Ok(Box::new(MockTunerSession {
            control: self.control.clone(),
            stations: self.stations.clone(),
            hold_scans: self.hold_scans,
        }))
    }
}

/// One open mock session
struct MockTunerSession {
    control: MockTunerControl,
    stations: Vec<Frequency>,
    hold_scans: bool,
}

impl MockTunerSession {
    /// Next station strictly above (or below) `from`, wrapping at the band edge.
    fn next_station(&self, from: Frequency, direction: SeekDirection) -> Frequency {
        let found = match direction {
            SeekDirection::Up => self
                .stations
                .iter()
                .find(|&&f| f > from)
                .or_else(|| self.stations.first()),
            SeekDirection::Down => self
                .stations
                .iter()
                .rev()
                .find(|&&f| f < from)
                .or_else(|| self.stations.last()),
        };
        found.copied().unwrap_or(from)
    }
}

impl TunerSession for MockTunerSession {
    fn realize(&mut self) -> BackendResult<()> {
        let mut device = self.control.device();
        device.call("realize", None)?;
        device.state = BackendState::Ready;
        Ok(())
    }

    fn unrealize(&mut self) -> BackendResult<()> {
        let mut device = self.control.device();
        device.call("unrealize", None)?;
        device.state = BackendState::Null;
        Ok(())
    }

    fn destroy(&mut self) -> BackendResult<()> {
        let mut device = self.control.device();
        device.call("destroy", None)?;
        device.sink = None;
        device.state = BackendState::Null;
        Ok(())
    }

    fn get_state(&mut self) -> BackendResult<BackendState> {
        let mut device = self.control.device();
        device.call("get_state", None)?;
        Ok(device.state)
    }

    fn start(&mut self) -> BackendResult<()> {
        let mut device = self.control.device();
        device.call("start", None)?;
        device.state = BackendState::Playing;
        Ok(())
    }

    fn stop(&mut self) -> BackendResult<()> {
        let mut device = self.control.device();
        device.call("stop", None)?;
        device.state = BackendState::Ready;
        Ok(())
    }

    fn set_frequency(&mut self, freq: Frequency) -> BackendResult<()> {
        let mut device = self.control.device();
        device.call("set_frequency", Some(freq.as_khz().to_string()))?;
        device.frequency = freq;
        Ok(())
    }

    fn get_frequency(&mut self) -> BackendResult<Frequency> {
        let mut device = self.control.device();
        device.call("get_frequency", None)?;
        Ok(device.frequency)
    }

    fn seek(&mut self, direction: SeekDirection) -> BackendResult<()> {
        let mut device = self.control.device();
        device.call("seek", Some(format!("{direction:?}")))?;
        let landed = self.next_station(device.frequency, direction);
        device.frequency = landed;
        device.post(BackendMessage::SeekStarted);
        device.post(BackendMessage::SeekFinished { frequency: landed });
        Ok(())
    }

    fn scan_start(&mut self) -> BackendResult<()> {
        let mut device = self.control.device();
        device.call("scan_start", None)?;
        device.post(BackendMessage::ScanStarted);
        device.state = BackendState::Scanning;
        if !self.hold_scans {
            for &frequency in &self.stations {
                device.post(BackendMessage::ScanInfo { frequency });
            }
            device.post(BackendMessage::ScanFinished);
            device.change_state(BackendState::Ready);
        }
        Ok(())
    }

    fn scan_stop(&mut self) -> BackendResult<()> {
        let mut device = self.control.device();
        device.call("scan_stop", None)?;
        device.post(BackendMessage::ScanStopped);
        device.state = BackendState::Ready;
        Ok(())
    }

    fn set_mute(&mut self, muted: bool) -> BackendResult<()> {
        let mut device = self.control.device();
        device.call("set_mute", Some(muted.to_string()))?;
        device.muted = muted;
        Ok(())
    }

    fn get_signal_strength(&mut self) -> BackendResult<i32> {
        let mut device = self.control.device();
        device.call("get_signal_strength", None)?;
        if self.stations.contains(&device.frequency) {
            Ok(STATION_SIGNAL)
        } else {
            Ok(NOISE_FLOOR_SIGNAL)
        }
    }

    fn get_frequency_range(&mut self) -> BackendResult<FrequencyRange> {
        self.control.device().call("get_frequency_range", None)?;
        Ok(FrequencyRange {
            min: Frequency::khz(FM_MIN_KHZ),
            max: Frequency::khz(FM_MAX_KHZ),
        })
    }

    fn get_channel_spacing(&mut self) -> BackendResult<i32> {
        self.control.device().call("get_channel_spacing", None)?;
        Ok(CHANNEL_SPACING_KHZ)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::Receiver;

    fn open(tuner: &MockTuner) -> (Box<dyn TunerSession>, Receiver<BackendMessage>) {
        let (tx, rx) = crossbeam_channel::unbounded();
        let session = tuner.open(MessageSink::new(tx)).unwrap();
        (session, rx)
    }

    #[test]
    fn seek_up_lands_on_next_station_and_wraps() {
        let tuner = MockTuner::new();
        let (mut session, rx) = open(&tuner);
        session.set_frequency(Frequency::khz(101_300)).unwrap();

        session.seek(SeekDirection::Up).unwrap();
        assert_eq!(rx.try_recv().unwrap(), BackendMessage::SeekStarted);
        assert_eq!(
            rx.try_recv().unwrap(),
            BackendMessage::SeekFinished { frequency: Frequency::khz(107_700) }
        );

        session.seek(SeekDirection::Up).unwrap();
        let _ = rx.try_recv();
        assert_eq!(
            rx.try_recv().unwrap(),
            BackendMessage::SeekFinished { frequency: Frequency::khz(89_100) }
        );
    }

    #[test]
    fn seek_down_from_between_stations() {
        let tuner = MockTuner::new();
        let (mut session, _rx) = open(&tuner);
        session.set_frequency(Frequency::khz(95_000)).unwrap();
        session.seek(SeekDirection::Down).unwrap();
        assert_eq!(tuner.control().frequency(), Frequency::khz(91_900));
    }

    #[test]
    fn injected_failure_fires_once() {
        let tuner = MockTuner::new();
        let control = tuner.control();
        let (mut session, _rx) = open(&tuner);
        control.fail_next("start", BackendErrorCode::NoAntenna);

        assert_eq!(session.start(), Err(BackendErrorCode::NoAntenna));
        assert_eq!(session.start(), Ok(()));
        assert_eq!(control.calls(), vec!["start", "start"]);
    }

    #[test]
    fn open_failure_is_reported() {
        let tuner = MockTuner::new();
        tuner.control().fail_open(BackendErrorCode::DeviceNotFound);
        let (tx, _rx) = crossbeam_channel::unbounded();
        assert!(matches!(tuner.open(MessageSink::new(tx)), Err(BackendErrorCode::DeviceNotFound)));
    }

    #[test]
    fn unheld_scan_reports_every_station_then_finishes() {
        let tuner = MockTuner::new();
        let (mut session, rx) = open(&tuner);
        session.scan_start().unwrap();

        let messages: Vec<BackendMessage> = rx.try_iter().collect();
        let found: Vec<u32> = messages
            .iter()
            .filter_map(|m| match m {
                BackendMessage::ScanInfo { frequency } => Some(frequency.as_khz()),
                _ => None,
            })
            .collect();
        assert_eq!(found, vec![89_100, 91_900, 96_500, 101_300, 107_700]);
        assert!(messages.contains(&BackendMessage::ScanFinished));
        assert_eq!(tuner.control().state(), BackendState::Ready);
    }

    #[test]
    fn held_scan_waits_for_stop() {
        let tuner = MockTuner::new().hold_scans();
        let (mut session, rx) = open(&tuner);
        session.scan_start().unwrap();
        assert_eq!(tuner.control().state(), BackendState::Scanning);
        assert!(!rx.try_iter().any(|m| m == BackendMessage::ScanFinished));

        session.scan_stop().unwrap();
        assert_eq!(rx.try_recv().unwrap(), BackendMessage::ScanStopped);
        assert_eq!(tuner.control().state(), BackendState::Ready);
    }

    #[test]
    fn signal_strength_is_higher_on_a_station() {
        let tuner = MockTuner::new();
        let (mut session, _rx) = open(&tuner);
        session.set_frequency(Frequency::khz(96_500)).unwrap();
        let on_station = session.get_signal_strength().unwrap();
        session.set_frequency(Frequency::khz(96_600)).unwrap();
        let off_station = session.get_signal_strength().unwrap();
        assert!(on_station > off_station);
    }
}
