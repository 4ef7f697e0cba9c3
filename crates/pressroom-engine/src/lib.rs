//! Pressroom Engine - Orchestration layer
//!
//! Composes the pure pipeline stages of `pressroom-core` with the snapshot
//! store into the publish operation and its read-side companions.

pub mod commands;
