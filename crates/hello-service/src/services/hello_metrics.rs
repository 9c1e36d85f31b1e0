//! Access counter and the facade the greeting handler talks to.

use crate::observability::{MeterRegistry, TrackedCounter};

/// Registry name of the access counter.
pub const HELLO_COUNTER_NAME: &str = "hello_counter";

/// Help text of the access counter.
pub const HELLO_COUNTER_DESCRIPTION: &str = "Access counter";

/// Register the access counter in the process registry.
///
/// Called once at startup. A repeated call hands back the same counter.
pub fn register_hello_counter(registry: &MeterRegistry) -> TrackedCounter {
    registry.counter(HELLO_COUNTER_NAME, HELLO_COUNTER_DESCRIPTION)
}

/// Greeting metrics, independent of the metrics backend.
#[derive(Clone)]
pub struct HelloMetrics {
    counter: TrackedCounter,
}

impl HelloMetrics {
    pub fn new(counter: TrackedCounter) -> Self {
        Self { counter }
    }

    /// Count one greeting.
    pub fn increment(&self) {
        self.counter.increment();
    }

    /// Greetings counted so far.
    ///
    /// A snapshot; concurrent increments may or may not be reflected.
    pub fn value(&self) -> u64 {
        self.counter.count() as u64
    }
}
