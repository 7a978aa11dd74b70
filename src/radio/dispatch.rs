//! Backend message pump
//!
//! Each handle owns one dispatch thread. The backend posts `BackendMessage`s
//! into an unbounded channel through its `MessageSink`; the thread drains the
//! channel in order and turns each message into a callback invocation, a
//! cached state update, or a log line.
//!
//! Flow: backend → MessageSink → channel → dispatch thread → callback table

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle, ThreadId};

use crossbeam_channel::{select, Receiver, Sender};

use crate::domain::{
    BackendMessage, EventKind, Frequency, InterruptedCode, RadioError, RadioResult, RadioState,
};

use super::callbacks::{Callback, CallbackTable};
use super::convert::{map_backend_error, map_backend_state, map_interrupt_code};

/// State shared between a handle and its dispatch thread
#[derive(Debug, Default)]
pub(crate) struct HandleShared {
    pub(crate) state: Mutex<RadioState>,
    pub(crate) callbacks: Mutex<CallbackTable>,
}

/// Lock a mutex, recovering the data if a previous holder panicked.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Owns the dispatch thread. Dropping it stops and joins the thread.
pub(crate) struct Dispatcher {
    shutdown: Sender<()>,
    thread: Option<JoinHandle<()>>,
}

impl Dispatcher {
    pub(crate) fn spawn(
        messages: Receiver<BackendMessage>,
        shared: Arc<HandleShared>,
    ) -> RadioResult<Self> {
        let (shutdown, shutdown_rx) = crossbeam_channel::bounded::<()>(1);

        let thread = thread::Builder::new()
            .name("fmtuner-dispatch".into())
            .spawn(move || run_dispatch_loop(messages, shutdown_rx, shared))
            .map_err(|e| {
                log::error!("[create] failed to spawn dispatch thread: {e}");
                RadioError::OutOfMemory
            })?;

        Ok(Self {
            shutdown,
            thread: Some(thread),
        })
    }

    fn thread_id(&self) -> Option<ThreadId> {
        self.thread.as_ref().map(|t| t.thread().id())
    }
}

impl Drop for Dispatcher {
    fn drop(&mut self) {
        let _ = self.shutdown.try_send(());

        // A callback tearing down its own handle can't join itself
        if self.thread_id() == Some(thread::current().id()) {
            log::warn!("dispatch thread released from inside a callback; detaching");
            return;
        }
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                log::error!("dispatch thread panicked");
            }
        }
    }
}

fn run_dispatch_loop(
    messages: Receiver<BackendMessage>,
    shutdown: Receiver<()>,
    shared: Arc<HandleShared>,
) {
    log::debug!("dispatch thread started");
    loop {
        select! {
            recv(messages) -> msg => match msg {
                Ok(message) => dispatch(&shared, message),
                // Every sink was dropped; nothing more can arrive
                Err(_) => break,
            },
            recv(shutdown) -> _ => break,
        }
    }
    log::debug!("dispatch thread stopped");
}

/// Apply one backend message to the handle.
pub(crate) fn dispatch(shared: &HandleShared, message: BackendMessage) {
    log::debug!("[dispatch] Got message : {message:?}");

    match message {
        BackendMessage::ScanInfo { frequency } => {
            invoke_frequency(shared, EventKind::ScanUpdated, frequency)
        }
        BackendMessage::ScanStopped => invoke_notify(shared, EventKind::ScanStopped),
        BackendMessage::ScanFinished => invoke_notify(shared, EventKind::ScanCompleted),
        BackendMessage::SeekFinished { frequency } => {
            invoke_frequency(shared, EventKind::SeekCompleted, frequency)
        }
        BackendMessage::StateInterrupted { code } => {
            invoke_interrupted(shared, map_interrupt_code(code))
        }
        BackendMessage::ReadyToResume => invoke_interrupted(shared, InterruptedCode::Completed),
        BackendMessage::StateChanged { previous, current } => {
            let current = map_backend_state(current);
            *lock(&shared.state) = current;
            log::info!(
                "[dispatch] State Changed --- from : {:?} , to : {current:?}",
                map_backend_state(previous)
            );
        }
        BackendMessage::Error { code } => {
            log::error!("[dispatch] {} : backend error {code}", map_backend_error(code));
        }
        BackendMessage::ScanStarted => log::info!("[dispatch] Scan Started"),
        BackendMessage::SeekStarted => log::info!("[dispatch] Seek Started"),
    }
}

fn registered(shared: &HandleShared, kind: EventKind) -> Option<Callback> {
    lock(&shared.callbacks).get(kind)
}

fn invoke_frequency(shared: &HandleShared, kind: EventKind, frequency: Frequency) {
    if let Some(Callback::Frequency(cb)) = registered(shared, kind) {
        cb(frequency);
    }
}

fn invoke_notify(shared: &HandleShared, kind: EventKind) {
    if let Some(Callback::Notify(cb)) = registered(shared, kind) {
        cb();
    }
}

fn invoke_interrupted(shared: &HandleShared, code: InterruptedCode) {
    if let Some(Callback::Interrupted(cb)) = registered(shared, EventKind::Interrupted) {
        cb(code);
    }
}
