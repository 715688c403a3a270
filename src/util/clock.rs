// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Live clock for the date/time field.
//!
//! A [`ClockTicker`] owns a background thread that publishes the formatted
//! local time once per interval. Dropping the ticker stops and joins the
//! thread, so a torn-down window never receives another tick.

use std::sync::mpsc::{channel, Receiver, RecvTimeoutError, Sender};
use std::thread::JoinHandle;
use std::time::Duration;

/// Display format for the current time, e.g. `10/18/2026, 3:04:05 PM`.
pub const DATE_TIME_FORMAT: &str = "%m/%d/%Y, %-I:%M:%S %p";

/// Current local time in [`DATE_TIME_FORMAT`].
pub fn now_string() -> String {
    chrono::Local::now().format(DATE_TIME_FORMAT).to_string()
}

/// Cancellable periodic clock.
pub struct ClockTicker {
    ticks: Receiver<String>,
    stop: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl ClockTicker {
    /// Start ticking every `interval`. `on_tick` runs on the ticker thread
    /// after each new time is queued (used to wake the UI).
    pub fn start<F>(interval: Duration, on_tick: F) -> Self
    where
        F: Fn() + Send + 'static,
    {
        let (tick_tx, tick_rx) = channel();
        let (stop_tx, stop_rx) = channel::<()>();

        let handle = std::thread::spawn(move || loop {
            match stop_rx.recv_timeout(interval) {
                Err(RecvTimeoutError::Timeout) => {
                    if tick_tx.send(now_string()).is_err() {
                        break;
                    }
                    on_tick();
                }
                Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
            }
        });

        log::debug!("Clock ticker started ({:?} interval)", interval);

        Self {
            ticks: tick_rx,
            stop: Some(stop_tx),
            handle: Some(handle),
        }
    }

    /// Most recent time published since the last call, if any.
    pub fn latest(&self) -> Option<String> {
        self.ticks.try_iter().last()
    }

    /// Stop the ticker and wait for its thread to exit.
    pub fn stop(&mut self) {
        // Disconnecting the stop channel wakes the thread immediately.
        self.stop.take();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::warn!("Clock ticker thread panicked");
            } else {
                log::debug!("Clock ticker stopped");
            }
        }
    }

    #[cfg(test)]
    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }
}

impl Drop for ClockTicker {
    fn drop(&mut self) {
        self.stop();
    }
}
