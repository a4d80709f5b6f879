//! # Resource Controller
//!
//! This crate provides a generic **remote-resource view-state controller**:
//! the fetch / loading / error / success lifecycle that every data-backed
//! page repeats, pulled out into one tested component.
//!
//! ## Architecture Overview
//!
//! The crate separates concerns into three layers:
//!
//! 1. **State Layer** ([`ResourceState`]) - a single tagged enum; impossible
//!    combinations like "loading with an error" cannot be expressed
//! 2. **Lifecycle Layer** ([`ResourceController`]) - dispatch, in-flight
//!    exclusivity, validation of fetched payloads, change notification
//! 3. **Transport Layer** ([`Transport`]) - async JSON `get`/`post`, with an
//!    HTTP implementation and an in-memory mock
//!
//! The presentation layer is a pure consumer: it renders from
//! [`ResourceController::current_state`] and calls `load`, `submit` or
//! `reset` in response to user interaction.
//!
//! ## Quick Start
//!
//! ```rust
//! use resource_controller::mock::MockTransport;
//! use resource_controller::validation::{FieldKind, PayloadShape, RecordShape};
//! use resource_controller::{ResourceController, Status};
//! use serde::Deserialize;
//! use serde_json::json;
//!
//! #[derive(Clone, Debug, Deserialize)]
//! struct Product { id: u64, name: String }
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let mock = MockTransport::new();
//!     mock.expect_get("/api/data")
//!         .return_ok(json!([{ "id": 1, "name": "Product A" }]));
//!
//!     let products = ResourceController::<Vec<Product>>::new("products", "/api/data", mock.transport())
//!         .with_shape(PayloadShape::Collection(
//!             RecordShape::new()
//!                 .required("id", FieldKind::Unsigned)
//!                 .required("name", FieldKind::String)
//!                 .identified_by("id"),
//!         ));
//!
//!     // Pending is visible before the transport answers.
//!     let dispatch = products.load();
//!     assert_eq!(products.current_state().status(), Status::Pending);
//!
//!     dispatch.settled().await.unwrap();
//!     let state = products.current_state();
//!     assert_eq!(state.data().unwrap()[0].name, "Product A");
//! }
//! ```
//!
//! ## Error Handling
//!
//! Transport failures, non-2xx responses, malformed payloads and rejected
//! form input all end up as [`ResourceState::Failure`] carrying a
//! [`ControllerError`]. Nothing panics and nothing is retried automatically;
//! the controller stays usable for the next `load`/`submit`/`reset`.
//!
//! ## Testing
//!
//! [`mock::MockTransport`] queues canned responses and records every call.
//! See the [`mock`] module for the full API and usage patterns.

pub mod controller;
pub mod error;
pub mod http;
pub mod mock;
pub mod state;
pub mod tracing;
pub mod transport;
pub mod validation;

// Re-export core types for convenience
pub use controller::{Dispatch, FormInput, Listener, ResourceController};
pub use error::{ControllerError, FieldError, TransportError, UserInputError, ValidationError};
pub use http::{HttpTransport, TransportConfig};
pub use state::{ResourceState, Status};
pub use transport::Transport;
pub use validation::{FieldKind, PayloadClass, PayloadShape, RecordShape};
