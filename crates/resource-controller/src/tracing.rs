//! # Observability & Tracing
//!
//! The controller logs every lifecycle step with `tracing`, using a
//! `resource` field so interleaved controllers can be told apart:
//!
//! ```text
//! DEBUG Load resource="business-specification" path="/api/business-specification" epoch=1
//! INFO  Loaded resource="business-specification" class=WellFormed
//! WARN  Submit failed resource="testimonials" error=Request to /api/testimonials failed with HTTP 503
//! ```
//!
//! ## Usage Examples
//!
//! ```bash
//! # Lifecycle outcomes only
//! RUST_LOG=info cargo run
//!
//! # Dispatches, ignored calls and submitted bodies
//! RUST_LOG=debug cargo run
//!
//! # Filter to the controller crate
//! RUST_LOG=resource_controller=debug cargo run
//! ```

/// Initializes the tracing/logging infrastructure for the application.
///
/// Filtering comes from `RUST_LOG`. The compact format hides module paths;
/// the `resource` field already says where a line comes from.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
