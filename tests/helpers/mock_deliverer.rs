#![allow(dead_code)]
use async_trait::async_trait;
use fanout::core::Deliverer;
use std::sync::{Arc, Mutex};

/// One recorded delegate invocation.
#[derive(Debug, Clone)]
pub struct DeliveryCall {
    pub endpoint: String,
    pub payload: String,
}

/// A mock Deliverer that records every call and can be told to fail for
/// specific endpoints.
#[derive(Clone, Default)]
pub struct MockDeliverer {
    calls: Arc<Mutex<Vec<DeliveryCall>>>,
    fail_when_endpoint_contains: Arc<Mutex<Vec<String>>>,
}

impl MockDeliverer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes `deliver` fail for any endpoint containing `needle` (e.g. a
    /// username unique to one target).
    pub fn fail_for(&self, needle: &str) {
        self.fail_when_endpoint_contains
            .lock()
            .unwrap()
            .push(needle.to_string());
    }

    pub fn calls(&self) -> Vec<DeliveryCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl Deliverer for MockDeliverer {
    async fn deliver(&self, endpoint: &str, payload: &str) -> anyhow::Result<()> {
        self.calls.lock().unwrap().push(DeliveryCall {
            endpoint: endpoint.to_string(),
            payload: payload.to_string(),
        });

        let needles = self.fail_when_endpoint_contains.lock().unwrap();
        if let Some(needle) = needles.iter().find(|n| endpoint.contains(n.as_str())) {
            anyhow::bail!("transport refused endpoint matching `{needle}`");
        }
        Ok(())
    }
}
