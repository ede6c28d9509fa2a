//! Fan-out dispatcher
//!
//! Sends one payload to every configured destination with per-destination
//! failure isolation: each send's error is captured into its outcome, the
//! iteration always completes, and nothing escapes the dispatcher.

use herald_core::{
    DestinationId, DispatchOutcome, DispatchReport, OutboundMessage, Transport,
};
use std::sync::Arc;

/// Delivers one payload to N destinations, isolating failures
///
/// Destinations are visited sequentially in the given order; the contract is
/// all-or-isolated-failure, not cross-destination ordering. No automatic
/// retry: callers may re-invoke `broadcast`, which the dedup window upstream
/// makes safe for repeated identical text.
#[derive(Debug, Clone)]
pub struct FanoutDispatcher {
    transport: Arc<dyn Transport>,
}

impl FanoutDispatcher {
    /// Dispatcher over the given transport
    #[inline]
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Send `message` to every destination, collecting per-destination outcomes
    ///
    /// One outcome per destination, in input order. A destination's failure
    /// never aborts delivery to the rest.
    pub async fn broadcast(
        &self,
        message: &OutboundMessage,
        destinations: &[DestinationId],
    ) -> DispatchReport {
        let mut outcomes = Vec::with_capacity(destinations.len());

        for destination in destinations {
            match self.transport.send(destination, message).await {
                Ok(()) => {
                    tracing::info!(destination = %destination, "payload delivered");
                    outcomes.push(DispatchOutcome::success(destination.clone()));
                }
                Err(e) => {
                    tracing::warn!(
                        destination = %destination,
                        error = %e,
                        "delivery failed, continuing fan-out"
                    );
                    outcomes.push(DispatchOutcome::failure(destination.clone(), e));
                }
            }
        }

        let report = DispatchReport::new(outcomes);
        tracing::info!(
            delivered = report.success_count(),
            failed = report.failure_count(),
            "fan-out complete"
        );
        report
    }
}
