//! Diagnostic and progress sinks
//!
//! Resamplers report what they are doing through a [`Messenger`] and how
//! far along they are through a [`Progressor`]. Both are injected into
//! each resampler; neither affects the computed result.

use std::sync::Mutex;

/// Target used for every diagnostic emitted through `tracing`
pub const LOG_TARGET: &str = "resample";

/// Receiver of diagnostic messages
pub trait Messenger: Send + Sync {
    /// Record one message
    fn log(&self, message: &str);
}

/// Messenger forwarding to `tracing` at debug level
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingMessenger;

impl Messenger for TracingMessenger {
    fn log(&self, message: &str) {
        tracing::debug!(target: LOG_TARGET, "{}", message);
    }
}

/// Messenger discarding every message
#[derive(Debug, Clone, Copy, Default)]
pub struct NullMessenger;

impl Messenger for NullMessenger {
    fn log(&self, _message: &str) {}
}

/// Messenger keeping every message in memory
#[derive(Debug, Default)]
pub struct MessageLog {
    messages: Mutex<Vec<String>>,
}

impl MessageLog {
    /// Create an empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the messages recorded so far
    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .map(|m| m.clone())
            .unwrap_or_default()
    }

    /// Whether any recorded message contains `needle`
    pub fn contains(&self, needle: &str) -> bool {
        self.messages().iter().any(|m| m.contains(needle))
    }
}

impl Messenger for MessageLog {
    fn log(&self, message: &str) {
        if let Ok(mut messages) = self.messages.lock() {
            messages.push(message.to_string());
        }
    }
}

/// Receiver of progress notifications.
///
/// Work is announced as a number of steps with [`Progressor::steps`];
/// the completed fraction of those steps is mapped into the range set by
/// [`Progressor::range`]. Every method defaults to doing nothing.
pub trait Progressor: Send + Sync {
    /// Map subsequent progress into `[min, max]` of the whole task
    fn range(&self, _min: f64, _max: f64) {}

    /// Announce the number of steps of the current stage
    fn steps(&self, _total: usize) {}

    /// Begin the current stage
    fn start(&self) {}

    /// Complete `n` more steps
    fn step(&self, _n: usize) {}

    /// End the current stage
    fn stop(&self) {}

    /// Describe the current activity
    fn status(&self, _message: &str) {}
}

/// Progress range occupied by component `index` of an element with
/// `count` components
pub fn component_range(count: usize, index: usize) -> (f64, f64) {
    match (count, index) {
        (3, 0) => (0.0, 0.33),
        (3, 1) => (0.33, 0.67),
        (3, _) => (0.67, 1.0),
        (n, k) => {
            let n = n.max(1) as f64;
            (k as f64 / n, (k + 1) as f64 / n)
        }
    }
}

/// Progressor discarding every notification
#[derive(Debug, Clone, Copy, Default)]
pub struct NullProgressor;

impl Progressor for NullProgressor {}

#[derive(Debug)]
struct TrackerState {
    min: f64,
    max: f64,
    total: usize,
    done: usize,
    fraction: f64,
    decile: u32,
    status: String,
}

impl Default for TrackerState {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: 1.0,
            total: 0,
            done: 0,
            fraction: 0.0,
            decile: 0,
            status: String::new(),
        }
    }
}

impl TrackerState {
    fn update(&mut self) {
        let local = if self.total == 0 {
            0.0
        } else {
            (self.done as f64 / self.total as f64).min(1.0)
        };
        self.set_fraction(self.min + (self.max - self.min) * local);
    }

    fn set_fraction(&mut self, fraction: f64) {
        self.fraction = fraction;
        let decile = (self.fraction * 10.0 + 1e-9).floor() as u32;
        if decile > self.decile {
            self.decile = decile;
            tracing::info!(
                target: LOG_TARGET,
                "{} {}%",
                self.status,
                decile * 10
            );
        }
    }
}

/// Progressor tracking the completed fraction of the whole task
#[derive(Debug, Default)]
pub struct ProgressTracker {
    state: Mutex<TrackerState>,
}

impl ProgressTracker {
    /// Create a tracker at 0 % with range `[0, 1]`
    pub fn new() -> Self {
        Self::default()
    }

    /// Completed fraction of the whole task
    pub fn fraction(&self) -> f64 {
        self.state.lock().map(|s| s.fraction).unwrap_or(0.0)
    }

    /// Most recent status message
    pub fn last_status(&self) -> String {
        self.state
            .lock()
            .map(|s| s.status.clone())
            .unwrap_or_default()
    }

    /// Active range
    pub fn current_range(&self) -> (f64, f64) {
        self.state
            .lock()
            .map(|s| (s.min, s.max))
            .unwrap_or((0.0, 1.0))
    }

    fn with_state(&self, f: impl FnOnce(&mut TrackerState)) {
        if let Ok(mut state) = self.state.lock() {
            f(&mut state);
        }
    }
}

impl Progressor for ProgressTracker {
    fn range(&self, min: f64, max: f64) {
        self.with_state(|s| {
            s.min = min;
            s.max = max;
        });
    }

    fn steps(&self, total: usize) {
        self.with_state(|s| {
            s.total = total;
            s.done = 0;
        });
    }

    fn start(&self) {
        self.with_state(|s| {
            s.done = 0;
            if s.min == 0.0 {
                s.decile = 0;
            }
            s.update();
        });
    }

    fn step(&self, n: usize) {
        self.with_state(|s| {
            s.done = s.done.saturating_add(n);
            s.update();
        });
    }

    fn stop(&self) {
        self.with_state(|s| {
            s.done = s.total;
            s.set_fraction(s.max);
        });
    }

    fn status(&self, message: &str) {
        self.with_state(|s| s.status = message.to_string());
    }
}
