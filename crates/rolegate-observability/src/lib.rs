//! Rolegate observability.
//!
//! - [`logging`]: tracing subscriber setup and the HTTP request logging middleware
//! - [`metrics`]: Prometheus recorder, HTTP metrics middleware and role/authorization counters
//!
//! Metrics can be switched off at runtime with `OBSERVABILITY_ENABLED=false`;
//! logging is always on.
//!
//! # Examples
//!
//! ```no_run
//! use rolegate_observability::{init_metrics, init_tracing};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let _guards = init_tracing()?;
//!     let _handle = init_metrics()?;
//!     Ok(())
//! }
//! ```

pub mod logging;
pub mod metrics;

pub use logging::{LogGuards, init_tracing, logging_middleware};
pub use metrics::{
    PrometheusHandle, init_metrics, is_observability_enabled, metrics_middleware, metrics_router,
    track_authorization_denied, track_login, track_role_changed,
};
