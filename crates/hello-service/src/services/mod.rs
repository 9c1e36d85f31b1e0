//! Service layer for Hello Service.
//!
//! # Components
//!
//! - `availability` - Readiness state toggled at shutdown
//! - `hello_metrics` - Access counter registration and its facade
//! - `hostname` - Local host name resolution

pub mod availability;
pub mod hello_metrics;
pub mod hostname;

pub use availability::Availability;
pub use hello_metrics::{register_hello_counter, HelloMetrics, HELLO_COUNTER_NAME};
pub use hostname::{HostnameResolver, SystemHostnameResolver};
// Fixed resolvers for tests and local runs
pub use hostname::{FailingHostnameResolver, StaticHostnameResolver};
