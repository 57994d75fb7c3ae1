//! The dispatch engine: target filtering at construction time and the
//! fan-out send loop with continue-on-error accumulation.

use crate::config::ConfigError;
use crate::core::{Deliverer, TargetDescriptor};
use crate::endpoint::build_endpoint;
use crate::formatting::{format_message, select_format};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// A single target's delivery failure, tagged with the offending target ID.
#[derive(Debug)]
pub struct DeliveryError {
    /// ID of the target whose delegate call failed.
    pub target_id: String,
    /// The underlying transport error.
    pub source: anyhow::Error,
}

impl fmt::Display for DeliveryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "failed to send notification for id: {}: {}",
            self.target_id, self.source
        )
    }
}

impl std::error::Error for DeliveryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.source.as_ref())
    }
}

/// The combined result of one or more per-target failures from a single
/// dispatch call. This is the only error [`Provider::send`] returns.
#[derive(Debug, Error)]
pub struct AggregateError {
    /// Individual failures in target processing order.
    failures: Vec<DeliveryError>,
}

impl fmt::Display for AggregateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "dispatch failed for {} target(s):", self.failures.len())?;
        for (i, e) in self.failures.iter().enumerate() {
            writeln!(f, "  #{}: {}", i + 1, e)?;
        }
        Ok(())
    }
}

impl AggregateError {
    /// The individual per-target failures, in processing order.
    pub fn failures(&self) -> &[DeliveryError] {
        &self.failures
    }

    /// Number of failed targets.
    pub fn len(&self) -> usize {
        self.failures.len()
    }

    /// True when no failures were recorded. `send` never returns an empty
    /// aggregate, but the accessor keeps the type honest for callers.
    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }
}

impl From<DeliveryError> for AggregateError {
    fn from(error: DeliveryError) -> Self {
        Self {
            failures: vec![error],
        }
    }
}

/// The long-lived dispatch object.
///
/// Holds the active target subset selected at construction and a
/// monotonically increasing call counter shared by all targets within one
/// `send` and across repeated sends. The counter is atomic, so concurrent
/// `send` calls on a shared `Provider` each observe a distinct sequence
/// number; failure accumulation is call-local and needs no synchronization.
pub struct Provider {
    targets: Vec<TargetDescriptor>,
    deliverer: Arc<dyn Deliverer>,
    counter: AtomicU64,
}

impl std::fmt::Debug for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Provider")
            .field("targets", &self.targets)
            .field("counter", &self.counter)
            .finish_non_exhaustive()
    }
}

impl Provider {
    /// Builds a `Provider` from the full configured target list and an
    /// optional ID allowlist.
    ///
    /// An empty allowlist activates every target; otherwise a target is
    /// retained iff its ID is a member of `ids` (exact match, no patterns).
    /// Selecting zero targets is valid and makes `send` a no-op success.
    ///
    /// Every input descriptor is validated up front, active or not: a
    /// malformed configuration is fatal regardless of this run's selection.
    pub fn new(
        targets: Vec<TargetDescriptor>,
        ids: &[String],
        deliverer: Arc<dyn Deliverer>,
    ) -> Result<Self, ConfigError> {
        for target in &targets {
            validate(target)?;
        }

        let active = targets
            .into_iter()
            .filter(|t| ids.is_empty() || ids.iter().any(|id| id == &t.id))
            .collect();

        Ok(Self {
            targets: active,
            deliverer,
            counter: AtomicU64::new(0),
        })
    }

    /// The active targets, in configuration order.
    pub fn targets(&self) -> &[TargetDescriptor] {
        &self.targets
    }

    /// Number of `send` calls made so far on this provider.
    pub fn sequence(&self) -> u64 {
        self.counter.load(Ordering::SeqCst)
    }

    /// Dispatches `message` to every active target.
    ///
    /// The call counter advances exactly once per invocation, even when no
    /// targets are active, and the snapshot taken here is the sequence
    /// number every target sees for this call. Targets are attempted in
    /// order; one failure never prevents attempts on subsequent targets and
    /// nothing is retried. Returns `Ok(())` iff every attempted delivery
    /// succeeded (vacuously for zero targets), else every failure wrapped
    /// into a single [`AggregateError`].
    pub async fn send(&self, message: &str, format_override: &str) -> Result<(), AggregateError> {
        let sequence = self.counter.fetch_add(1, Ordering::SeqCst) + 1;
        let mut failures = Vec::new();

        for target in &self.targets {
            let format = select_format(format_override, &target.format);
            let payload = format_message(message, format, sequence);
            let endpoint = build_endpoint(target);

            match self.deliverer.deliver(&endpoint, &payload).await {
                Ok(()) => info!(id = %target.id, "notification sent"),
                Err(source) => failures.push(DeliveryError {
                    target_id: target.id.clone(),
                    source,
                }),
            }
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(AggregateError { failures })
        }
    }
}

fn validate(target: &TargetDescriptor) -> Result<(), ConfigError> {
    if target.server.is_empty() {
        return Err(ConfigError::MissingField {
            id: target.id.clone(),
            field: "server",
        });
    }
    if target.recipients.is_empty() {
        return Err(ConfigError::MissingField {
            id: target.id.clone(),
            field: "recipients",
        });
    }
    Ok(())
}
