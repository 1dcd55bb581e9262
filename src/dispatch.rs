//! Bounded-concurrency probe dispatch.
//!
//! Every target gets its task up front; an [`AdmissionGate`] decides how
//! many of them may actually probe at once. Results are drained in
//! completion order, so a slow host never holds back the lines of faster
//! ones.

use std::sync::Arc;
use std::time::Duration;

use futures_util::StreamExt;
use futures_util::stream::FuturesUnordered;
use thiserror::Error;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tracing::{debug, warn};

use crate::input::Target;
use crate::probe::{ProbeClient, ProbeResult, probe};

const MIN_CONCURRENCY: usize = 1;
const MAX_CONCURRENCY: usize = 10_000;

/// Default number of probes allowed in flight at once.
pub const DEFAULT_CONCURRENCY: usize = 200;

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("concurrency must be between {MIN_CONCURRENCY} and {MAX_CONCURRENCY}, got {value}")]
    InvalidConcurrency { value: usize },

    #[error("admission gate closed while probes were pending")]
    GateClosed,
}

/// Caps the number of probes running concurrently.
///
/// Clones share the same gate. A probe holds its slot from admission until
/// its permit drops, which covers every request the probe makes.
#[derive(Debug, Clone)]
pub struct AdmissionGate {
    semaphore: Arc<Semaphore>,
    capacity: usize,
}

impl AdmissionGate {
    /// # Errors
    ///
    /// Returns [`DispatchError::InvalidConcurrency`] when `capacity` is
    /// outside `1..=10_000`.
    pub fn new(capacity: usize) -> Result<Self, DispatchError> {
        if !(MIN_CONCURRENCY..=MAX_CONCURRENCY).contains(&capacity) {
            return Err(DispatchError::InvalidConcurrency { value: capacity });
        }
        Ok(Self {
            semaphore: Arc::new(Semaphore::new(capacity)),
            capacity,
        })
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Waits until a slot is free and claims it for the caller.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::GateClosed`] when the gate was torn down
    /// while callers were still waiting.
    pub async fn admit(&self) -> Result<OwnedSemaphorePermit, DispatchError> {
        Arc::clone(&self.semaphore)
            .acquire_owned()
            .await
            .map_err(|_| DispatchError::GateClosed)
    }
}

/// Counters for one dispatch run.
#[derive(Debug, Default, Clone, Copy)]
pub struct DispatchSummary {
    probed: usize,
    authenticated: usize,
    errored: usize,
    panicked: usize,
}

impl DispatchSummary {
    fn record(&mut self, result: &ProbeResult) {
        self.probed += 1;
        if result.is_error() {
            self.errored += 1;
        } else if result.auth.is_success() {
            self.authenticated += 1;
        }
    }

    fn record_panic(&mut self) {
        self.panicked += 1;
    }

    /// Probes that ran to completion, successful or not.
    #[must_use]
    pub fn probed(&self) -> usize {
        self.probed
    }

    /// Hosts where the vendor default credentials got in.
    #[must_use]
    pub fn authenticated(&self) -> usize {
        self.authenticated
    }

    /// Probes that ended in a per-host error line.
    #[must_use]
    pub fn errored(&self) -> usize {
        self.errored
    }

    /// Probe tasks that panicked and produced no result line.
    #[must_use]
    pub fn panicked(&self) -> usize {
        self.panicked
    }
}

/// Runs probes over a target list under the admission gate.
pub struct Dispatcher {
    client: ProbeClient,
    gate: AdmissionGate,
    timeout: Duration,
}

impl Dispatcher {
    /// # Errors
    ///
    /// Returns [`DispatchError::InvalidConcurrency`] when `concurrency` is
    /// outside `1..=10_000`.
    pub fn new(
        client: ProbeClient,
        concurrency: usize,
        timeout: Duration,
    ) -> Result<Self, DispatchError> {
        Ok(Self {
            client,
            gate: AdmissionGate::new(concurrency)?,
            timeout,
        })
    }

    #[must_use]
    pub fn concurrency(&self) -> usize {
        self.gate.capacity()
    }

    /// Probes every target, feeding each result to `sink` as soon as its
    /// probe finishes. Exactly one sink call per completed probe; a panicked
    /// task is counted in the summary instead.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::GateClosed`] when the gate was torn down
    /// mid-run.
    pub async fn run<F>(
        &self,
        targets: Vec<Target>,
        mut sink: F,
    ) -> Result<DispatchSummary, DispatchError>
    where
        F: FnMut(&ProbeResult),
    {
        debug!(
            targets = targets.len(),
            concurrency = self.gate.capacity(),
            timeout_secs = self.timeout.as_secs(),
            "dispatching probes"
        );

        let mut tasks = FuturesUnordered::new();
        for target in targets {
            let client = self.client.clone();
            let gate = self.gate.clone();
            let timeout = self.timeout;
            tasks.push(tokio::spawn(async move {
                let _permit = gate.admit().await?;
                Ok::<ProbeResult, DispatchError>(probe(&client, &target, timeout).await)
            }));
        }

        let mut summary = DispatchSummary::default();
        while let Some(joined) = tasks.next().await {
            match joined {
                Ok(Ok(result)) => {
                    summary.record(&result);
                    sink(&result);
                }
                Ok(Err(error)) => return Err(error),
                Err(join_error) => {
                    warn!(%join_error, "probe task panicked");
                    summary.record_panic();
                }
            }
        }
        Ok(summary)
    }
}
