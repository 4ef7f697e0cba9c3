//! Core types shared across Pressroom facilities
//!
//! Foundational types used by the error and logging facilities of every
//! crate in the workspace:
//!
//! - **Correlation types**: RequestId, TraceId, RequestContext
//! - **Schema constants**: Canonical log field keys and event names

pub mod correlation;
pub mod schema;

pub use correlation::{RequestContext, RequestId, TraceId};
