//! HTTP request handlers for Hello Service.

pub mod actuator;
pub mod health;
pub mod hello;
pub mod metrics;

pub use actuator::index as actuator_index;
pub use health::{health, health_group};
pub use hello::hello;
pub use metrics::{list_metrics, metric_detail, prometheus};
