//! Observability: structured logging setup and request tracing.

pub mod tracing;

pub use self::tracing::{OutputFormat, TracingConfig, init_tracing};
