//! Readiness state for the Kubernetes readiness probe.
//!
//! The service accepts traffic from startup until shutdown begins. During
//! the shutdown drain the readiness probe reports OUT_OF_SERVICE so the
//! pod leaves the load balancer before the listener closes.

use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Debug)]
pub struct Availability {
    accepting_traffic: AtomicBool,
}

impl Availability {
    /// New state, accepting traffic.
    pub fn new() -> Self {
        Self {
            accepting_traffic: AtomicBool::new(true),
        }
    }

    pub fn is_accepting_traffic(&self) -> bool {
        self.accepting_traffic.load(Ordering::Acquire)
    }

    /// Stop advertising readiness. Not reversible.
    pub fn refuse_traffic(&self) {
        self.accepting_traffic.store(false, Ordering::Release);
    }
}

impl Default for Availability {
    fn default() -> Self {
        Self::new()
    }
}
