#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! # About Service Helpers
//!
//! Small helpers for talking to a JSON backend from a [Leptos](https://github.com/leptos-rs/leptos) front end.
//!
//! The crate provides:
//! - a [`RequestGateway`] that issues one request per call, tracks a shared loading signal,
//!   classifies failed responses and reports them to a replaceable error sink
//! - change detection predicates for comparing edited values against an original snapshot
//! - ISO-8601 date helpers and a query string builder
//!
//! # Feature Flags
//! - `reqwest` (default): Enables [`HttpTransport`](crate::transport::HttpTransport), the default transport backed by `reqwest`.
//!
//! # A Simple Example
//!
//! In the root of your App, provide a request gateway with [provide_request_gateway] or
//! [provide_request_gateway_with_options] if you want to override the default options.
//!
//! ```rust
//! use leptos::*;
//! use leptos_service_helpers::*;
//!
//! #[component]
//! pub fn App() -> impl IntoView {
//!     // Provides the gateway for the entire app.
//!     provide_request_gateway();
//!
//!     // Rest of App...
//! }
//! ```
//!
//! Then fetch through it anywhere below.
//!
//! ```
//! use leptos::*;
//! use leptos_service_helpers::*;
//!
//! #[derive(Debug, Clone, serde::Deserialize)]
//! struct Monkey {
//!     name: String,
//! }
//!
//! async fn get_monkeys(zoo: u32) -> Result<Vec<Monkey>, GatewayError> {
//!     let query = QueryString::new().param("zoo", zoo).build();
//!     use_request_gateway()
//!         .request_many(&format!("/api/monkeys{query}"), Method::GET, RequestBody::Empty)
//!         .await
//! }
//!
//! #[component]
//! fn Spinner() -> impl IntoView {
//!     let loading = use_request_gateway().loading();
//!     view! { <Show when=move || loading.get()>"Loading..."</Show> }
//! }
//! ```
//!

/// Change detection against an original snapshot.
pub mod changed;
/// ISO-8601 conversions.
pub mod dates;
mod error_body;
mod error_sink;
mod gateway_error;
mod gateway_options;
mod loading_state;
mod query_string;
mod request_gateway;
/// The seam that performs HTTP requests for the gateway.
pub mod transport;

pub use changed::Changeable;
pub use error_body::*;
pub use error_sink::*;
pub use gateway_error::*;
pub use gateway_options::*;
pub use loading_state::*;
pub use query_string::*;
pub use request_gateway::*;
pub use transport::{GatewayRequest, RequestBody, TransportResponse};

pub use http::Method;
