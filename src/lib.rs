//! Fanout - a multi-target notification dispatcher
//!
//! This library provides the core functionality for fanning a single message
//! out to a set of configured delivery targets. Targets are filtered by an
//! optional ID allowlist at construction time; each dispatch renders the
//! message per target, builds the target's endpoint URL, and hands both to an
//! injected delivery capability. Per-target failures are collected and
//! returned together so one bad target never blocks the rest of the batch.

pub mod cli;
pub mod config;
pub mod core;
pub mod delivery;
pub mod dispatch;
pub mod endpoint;
pub mod formatting;

// Re-export core types for convenience
pub use crate::core::*;
pub use dispatch::{AggregateError, DeliveryError, Provider};
