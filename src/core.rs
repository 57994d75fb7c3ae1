//! Core domain types and service traits for Fanout
//!
//! This module defines the fundamental data structures and trait contracts
//! that govern component interactions throughout the dispatcher.

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// One configured notification destination.
///
/// Descriptors are loaded from configuration and never mutated afterward.
/// The address fields are opaque to the dispatch loop; only the endpoint
/// builder interprets them when composing the delivery URL.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TargetDescriptor {
    /// Opaque identifier used for allowlist filtering. May be empty.
    #[serde(default)]
    pub id: String,
    /// URL scheme the delegate transport expects (e.g. "smtp").
    #[serde(default = "default_scheme")]
    pub scheme: String,
    /// Server host, optionally with port (e.g. "mail.example.com:587").
    #[serde(default)]
    pub server: String,
    /// Account name for the transport.
    #[serde(default)]
    pub username: String,
    /// Account credential; percent-encoded before it is embedded in a URL.
    #[serde(default)]
    pub password: String,
    /// Originating address reported to recipients.
    #[serde(default)]
    pub sender: String,
    /// Destination addresses. At least one is required.
    #[serde(default)]
    pub recipients: Vec<String>,
    /// Subject line passed through to the transport.
    #[serde(default)]
    pub subject: String,
    /// Default output format for this target: a named mode ("text", "html",
    /// "json") or a template containing `{{data}}`-style placeholders.
    /// A per-call override takes precedence when non-empty.
    #[serde(default)]
    pub format: String,
    /// Ask the transport to render the payload with rich markup.
    #[serde(default)]
    pub rich_formatting: bool,
    /// Opt out of the transport's opportunistic security upgrade (STARTTLS
    /// for mail transports). The upgrade is on by default.
    #[serde(default)]
    pub disable_transport_upgrade: bool,
}

fn default_scheme() -> String {
    "smtp".to_string()
}

impl Default for TargetDescriptor {
    fn default() -> Self {
        Self {
            id: String::new(),
            scheme: default_scheme(),
            server: String::new(),
            username: String::new(),
            password: String::new(),
            sender: String::new(),
            recipients: Vec::new(),
            subject: String::new(),
            format: String::new(),
            rich_formatting: false,
            disable_transport_upgrade: false,
        }
    }
}

// =============================================================================
// Service Traits
// =============================================================================

/// Transmits one rendered payload to one endpoint.
///
/// Implementations own every protocol concern: connections, authentication,
/// timeouts. The dispatcher treats the endpoint string and the payload as
/// opaque and only observes success or failure.
#[async_trait]
pub trait Deliverer: Send + Sync {
    /// Delivers `payload` to `endpoint`.
    ///
    /// # Returns
    /// * `Ok(())` once the transport accepted the message
    /// * `Err` for any transport-level failure; the dispatcher records it
    ///   against the target and continues with the remaining targets
    async fn deliver(&self, endpoint: &str, payload: &str) -> Result<()>;
}
