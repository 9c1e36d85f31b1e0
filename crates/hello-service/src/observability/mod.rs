//! Observability for Hello Service.
//!
//! Provides the process meter registry and metric definitions.

pub mod metrics;
pub mod registry;

pub use registry::{MeterRegistry, MeterSnapshot, TrackedCounter};
