//! HTTP gateway to the Arkos backend.
//!
//! This crate provides the reqwest-backed implementation of
//! [`arkos_core::gateway::BackendGateway`]. The core never depends on it
//! directly; the application layer constructs an [`HttpGateway`] and hands
//! it to the controllers behind an `Arc<dyn BackendGateway>`.

mod http_gateway;

pub use http_gateway::HttpGateway;
