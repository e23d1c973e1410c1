//! Inbound protocol adapters for lead and feedback traffic.
//!
//! This library turns inbound HTTP requests into a tree of variables and
//! turns a tree of variables back into an HTTP response, negotiating the
//! encoding from the request's `Accept` and `Content-Type` headers.
//!
//! # Features
//!
//! - Accept/Content-Type negotiation over a fixed registry of four types
//! - Form, JSON and XML request bodies decoded into one variable tree
//! - Dotted-path field projection with declared field order
//! - JSON, indented XML and line-based response encodings
//! - Three adapters: feedback, verbose and classic
//!
//! # Examples
//!
//! ## Reading a request
//!
//! ```
//! use lead_adapters::inbound::feedback;
//! use lead_adapters::InboundRequest;
//! use serde_json::json;
//!
//! let request = InboundRequest::new("GET", "/feedback?event_id=1&type=return&reason=Wrong+number")
//!     .with_header("Accept", "application/json");
//!
//! let vars = feedback::request(&request).unwrap();
//! assert_eq!(vars, json!({"type": "return", "reason": "Wrong number"}));
//! ```
//!
//! ## Writing a response
//!
//! ```
//! use lead_adapters::inbound::feedback;
//! use lead_adapters::{InboundRequest, StatusCode};
//! use serde_json::json;
//!
//! let request = InboundRequest::new("GET", "/feedback").with_header("Accept", "application/json");
//! let vars = json!({"outcome": "failure", "price": 2});
//!
//! let response = feedback::response(&request, &vars, Some(&["outcome", "price"]));
//! assert_eq!(response.status, StatusCode::Created);
//! assert_eq!(response.body_str(), r#"{"outcome":"failure","price":-2}"#);
//! ```
//!
//! ## Error handling
//!
//! ```
//! use lead_adapters::{find_adapter, HttpError, InboundAdapter, InboundRequest};
//!
//! let adapter = find_adapter("Standard Verbose").unwrap();
//! let request = InboundRequest::new("DELETE", "/verbose");
//!
//! match adapter.request(&request) {
//!     Err(HttpError::MethodNotAllowed(method)) => assert_eq!(method, "DELETE"),
//!     other => panic!("unexpected: {other:?}"),
//! }
//! ```
//!
//! See `demos/feedback_server.rs` for the adapters behind a TCP listener.

pub mod codec;
pub mod inbound;
pub mod wire;

// Re-export commonly used items for convenience
pub use codec::{select_mime_type, HttpError, HttpResponse, MimeType, Projection, StatusCode, VariableTree};
pub use inbound::{find_adapter, ClassicConfig, InboundAdapter, PricePolicy};
pub use wire::{parse_request, Error as WireError, InboundRequest, Method};
