//! Domain layer of the Arkos client.
//!
//! This crate owns the interaction and request-lifecycle logic behind both
//! client experiences: the document-grounded assistant (upload + query flow)
//! and the analytics dashboard (feature selection + fetch/cache cycle).
//!
//! # Module Structure
//!
//! - `error`: shared error taxonomy (`ArkosError`)
//! - `config`: client configuration (`ClientConfig`)
//! - `gateway`: the `BackendGateway` trait seam to the HTTP backend
//! - `session`: conversation history and the query send/receive cycle
//! - `upload`: document upload lifecycle state machine
//! - `dashboard`: feature selection and per-feature fetch/cache/suppress
//! - `chart`: pure adapters from raw backend JSON to renderable series
//!
//! State ownership follows a strict rule: message history, upload state, and
//! the feature data map are each owned by exactly one controller and mutated
//! only through that controller's public operations. Cross-component effects
//! (upload readiness producing an assistant greeting) travel through the
//! explicit event subscriptions, never shared mutable state.

pub mod chart;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod gateway;
pub mod session;
pub mod upload;

// Re-export common error type
pub use error::{ArkosError, Result};
