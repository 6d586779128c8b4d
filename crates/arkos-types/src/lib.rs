//! Shared leaf types for the Arkos client.
//!
//! These types cross crate boundaries (core, gateway, application) and carry
//! no behavior beyond construction and accessors. Everything here is plain
//! data: conversation messages, upload lifecycle states, dashboard features,
//! and the chart-ready series shapes produced by the adapters.

mod feature;
mod message;
mod series;
mod upload;

pub use feature::{Feature, FeatureData};
pub use message::{ConversationMessage, MessageRole};
pub use series::{EmissionsSummary, ForecastSeries, OptimizerSlot, Series};
pub use upload::UploadState;
