//! Callback slot table
//!
//! One slot per `EventKind`. Registration replaces whatever the slot held;
//! the dispatcher clones the callback out of the slot and invokes it with no
//! lock held, so callbacks may re-register freely.

use std::sync::Arc;

use crate::domain::{EventKind, Frequency, InterruptedCode};

/// Callback receiving a frequency (scan updated, seek completed)
pub type FrequencyCallback = Box<dyn Fn(Frequency) + Send + Sync + 'static>;

/// Callback with no payload (scan stopped, scan completed)
pub type NotifyCallback = Box<dyn Fn() + Send + Sync + 'static>;

/// Callback receiving an interruption reason
pub type InterruptedCallback = Box<dyn Fn(InterruptedCode) + Send + Sync + 'static>;

/// A registered callback, tagged by payload shape
#[derive(Clone)]
pub(crate) enum Callback {
    Frequency(Arc<dyn Fn(Frequency) + Send + Sync>),
    Notify(Arc<dyn Fn() + Send + Sync>),
    Interrupted(Arc<dyn Fn(InterruptedCode) + Send + Sync>),
}

impl Callback {
    pub(crate) fn frequency(cb: FrequencyCallback) -> Self {
        Callback::Frequency(Arc::from(cb))
    }

    pub(crate) fn notify(cb: NotifyCallback) -> Self {
        Callback::Notify(Arc::from(cb))
    }

    pub(crate) fn interrupted(cb: InterruptedCallback) -> Self {
        Callback::Interrupted(Arc::from(cb))
    }
}

impl std::fmt::Debug for Callback {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let shape = match self {
            Callback::Frequency(_) => "Frequency",
            Callback::Notify(_) => "Notify",
            Callback::Interrupted(_) => "Interrupted",
        };
        write!(f, "Callback::{shape}")
    }
}

/// Fixed-size table of callback slots indexed by `EventKind`
#[derive(Debug, Default)]
pub(crate) struct CallbackTable {
    slots: [Option<Callback>; EventKind::COUNT],
}

impl CallbackTable {
    pub(crate) fn set(&mut self, kind: EventKind, callback: Callback) {
        log::info!("[set_callback] Event type : {kind:?}");
        self.slots[kind.index()] = Some(callback);
    }

    pub(crate) fn clear(&mut self, kind: EventKind) {
        log::info!("[unset_callback] Event type : {kind:?}");
        self.slots[kind.index()] = None;
    }

    pub(crate) fn clear_all(&mut self) {
        self.slots = Default::default();
    }

    /// Clone the callback out of its slot
    pub(crate) fn get(&self, kind: EventKind) -> Option<Callback> {
        self.slots[kind.index()].clone()
    }

    pub(crate) fn is_set(&self, kind: EventKind) -> bool {
        self.slots[kind.index()].is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[test]
    fn slots_start_empty() {
        let table = CallbackTable::default();
        for kind in EventKind::ALL {
            assert!(!table.is_set(kind));
        }
    }

    #[test]
    fn setting_one_slot_leaves_others_alone() {
        let mut table = CallbackTable::default();
        table.set(EventKind::SeekCompleted, Callback::frequency(Box::new(|_| {})));
        for kind in EventKind::ALL {
            assert_eq!(table.is_set(kind), kind == EventKind::SeekCompleted, "{kind:?}");
        }
        table.clear(EventKind::ScanUpdated);
        assert!(table.is_set(EventKind::SeekCompleted));
    }

    #[test]
    fn set_replaces_previous_registration() {
        let hits = Arc::new(AtomicU32::new(0));
        let mut table = CallbackTable::default();
        table.set(EventKind::ScanStopped, Callback::notify(Box::new(|| panic!("replaced callback ran"))));
        let counter = Arc::clone(&hits);
        table.set(
            EventKind::ScanStopped,
            Callback::notify(Box::new(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            })),
        );

        match table.get(EventKind::ScanStopped) {
            Some(Callback::Notify(cb)) => cb(),
            other => panic!("unexpected slot content: {other:?}"),
        }
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn clear_all_empties_every_slot() {
        let mut table = CallbackTable::default();
        table.set(EventKind::Interrupted, Callback::interrupted(Box::new(|_| {})));
        table.set(EventKind::ScanCompleted, Callback::notify(Box::new(|| {})));
        table.clear_all();
        assert!(EventKind::ALL.iter().all(|&k| !table.is_set(k)));
    }
}
