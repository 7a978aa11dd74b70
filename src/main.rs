//! Scripted demo session against the mock tuner.
//!
//!   RUST_LOG=fmtuner=info cargo run -- [profile-dir] [profile-name]
//!
//! Loads the profile (built-in defaults if absent), then walks a handle
//! through tune → play → seek → scan → stop → destroy.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use fmtuner::adapters::{MockTuner, StaticCapability};
use fmtuner::profiles::{self, DEFAULT_PROFILE};
use fmtuner::{Frequency, RadioHandle, RadioResult};

/// How long to wait for an asynchronous completion before giving up
const EVENT_TIMEOUT: Duration = Duration::from_secs(2);

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("fmtuner=info"))
        .init();

    let mut args = std::env::args().skip(1);
    let dir = args.next().map(PathBuf::from).unwrap_or_else(|| PathBuf::from("configs"));
    let name = args.next().unwrap_or_else(|| DEFAULT_PROFILE.to_string());

    if let Err(e) = run(&dir, &name) {
        log::error!("demo session failed: {e}");
        std::process::exit(1);
    }
}

fn run(dir: &std::path::Path, name: &str) -> RadioResult<()> {
    let config = profiles::load(dir, name)?;
    log::info!("using profile '{}'", config.name);

    let tuner = MockTuner::from_config(&config);
    let capability = Arc::new(StaticCapability::new([config.feature_id.clone()]));
    let mut radio = RadioHandle::create_with_config(&tuner, capability, &config)?;

    radio.set_frequency(Frequency::khz(config.initial_frequency_khz))?;
    radio.start()?;
    log::info!("playing {} (state {:?})", radio.get_frequency()?, radio.get_state()?);

    let (tx, rx) = crossbeam_channel::bounded(1);
    radio.seek_up(Some(Box::new(move |f| {
        let _ = tx.try_send(f);
    })))?;
    match rx.recv_timeout(EVENT_TIMEOUT) {
        Ok(f) => log::info!("seek landed on {f}, signal {}", radio.get_signal_strength()?),
        Err(_) => log::warn!("seek did not complete"),
    }
    radio.stop()?;

    let (done_tx, done_rx) = crossbeam_channel::bounded(1);
    radio.set_scan_completed_cb(Some(Box::new(move || {
        let _ = done_tx.try_send(());
    })))?;
    radio.scan_start(Some(Box::new(|f| log::info!("found station {f}"))))?;
    if done_rx.recv_timeout(EVENT_TIMEOUT).is_err() {
        log::warn!("scan did not complete");
    }

    radio.destroy()
}
