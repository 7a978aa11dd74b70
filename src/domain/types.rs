//! Core domain types

use serde::{Deserialize, Serialize};

/// Lowest tunable FM frequency in kHz
pub const FM_MIN_KHZ: u32 = 87_500;
/// Highest tunable FM frequency in kHz
pub const FM_MAX_KHZ: u32 = 108_000;

/// Frequency in kHz
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Frequency(pub u32);

impl Frequency {
    pub fn khz(khz: u32) -> Self {
        Self(khz)
    }

    pub fn as_khz(&self) -> u32 {
        self.0
    }

    /// True if the frequency lies inside the FM broadcast band (inclusive).
    pub fn is_fm_band(&self) -> bool {
        (FM_MIN_KHZ..=FM_MAX_KHZ).contains(&self.0)
    }
}

impl std::fmt::Display for Frequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.1} MHz", f64::from(self.0) / 1_000.0)
    }
}

/// Region frequency range reported by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrequencyRange {
    pub min: Frequency,
    pub max: Frequency,
}

/// Handle state as seen by callers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RadioState {
    /// Ready to play or scan
    #[default]
    Ready,
    /// Playing audio from the tuner
    Playing,
    /// Scanning for stations
    Scanning,
}

/// Seek direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeekDirection {
    Up,
    Down,
}

/// Reason passed to the interrupted callback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InterruptedCode {
    /// The interruption is over
    Completed,
    /// Interrupted by a non-resumable media application
    ByMedia,
    /// Interrupted by an incoming call
    ByCall,
    /// Interrupted by unplugging headphones
    ByEarjackUnplug,
    ByResourceConflict,
    ByAlarm,
    ByEmergency,
    /// Interrupted by a resumable media application
    ByResumableMedia,
    ByNotification,
}

/// Callback slot identifiers. Each kind owns exactly one slot in the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    ScanUpdated,
    ScanStopped,
    ScanCompleted,
    SeekCompleted,
    Interrupted,
}

impl EventKind {
    /// Number of callback slots
    pub const COUNT: usize = 5;

    pub const ALL: [EventKind; EventKind::COUNT] = [
        EventKind::ScanUpdated,
        EventKind::ScanStopped,
        EventKind::ScanCompleted,
        EventKind::SeekCompleted,
        EventKind::Interrupted,
    ];

    pub fn index(self) -> usize {
        self as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fm_band_bounds_are_inclusive() {
        assert!(Frequency::khz(FM_MIN_KHZ).is_fm_band());
        assert!(Frequency::khz(FM_MAX_KHZ).is_fm_band());
        assert!(!Frequency::khz(FM_MIN_KHZ - 1).is_fm_band());
        assert!(!Frequency::khz(FM_MAX_KHZ + 1).is_fm_band());
    }

    #[test]
    fn frequency_displays_in_mhz() {
        assert_eq!(Frequency::khz(91_900).to_string(), "91.9 MHz");
    }

    #[test]
    fn event_kind_indices_are_distinct() {
        let mut seen = [false; EventKind::COUNT];
        for kind in EventKind::ALL {
            assert!(!seen[kind.index()], "{kind:?} shares a slot");
            seen[kind.index()] = true;
        }
    }
}
