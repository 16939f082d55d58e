//! Purchases and post-payment status polling.

use std::time::Duration;

use tracing::{debug, info, instrument, warn};

use ticketera_core::Result;
use ticketera_core::types::Purchase;

use super::validate_id;
use crate::endpoints;
use crate::gateway::{Gateway, Request, millis};

/// How often, and for how long, to poll a purchase after payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    /// Pause between polls.
    pub interval: Duration,
    /// Give up after this many observations that are not yet approved.
    pub max_attempts: u32,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(3),
            max_attempts: 10,
        }
    }
}

/// Result of [`PurchasesApi::wait_for_approval`].
#[derive(Debug, Clone, PartialEq)]
pub enum PollOutcome {
    /// Payment confirmed and tickets issued.
    Approved(Purchase),
    /// Payment settled without approval.
    Declined(Purchase),
    /// Still pending when the attempts ran out. Holds the last observation.
    TimedOut { last: Purchase, attempts: u32 },
}

#[derive(Debug, Clone)]
pub struct PurchasesApi {
    gateway: Gateway,
}

impl PurchasesApi {
    pub fn new(gateway: Gateway) -> Self {
        Self { gateway }
    }

    /// Fetch a purchase with its tickets.
    #[instrument(skip(self))]
    pub async fn get(&self, purchase_id: &str) -> Result<Purchase> {
        let purchase_id = validate_id("purchase id", purchase_id)?;
        self.gateway
            .fetch(Request::get(endpoints::purchase(purchase_id)))
            .await
    }

    /// Poll a purchase until it is approved, declined, or the policy runs out.
    ///
    /// Approval clears the stored reservation. A failed request ends polling
    /// with that error.
    #[instrument(skip(self, policy), fields(interval_ms = millis(policy.interval)))]
    pub async fn wait_for_approval(
        &self,
        purchase_id: &str,
        policy: &PollPolicy,
    ) -> Result<PollOutcome> {
        let mut attempts = 0;

        loop {
            let purchase = self.get(purchase_id).await?;

            if purchase.status.is_approved() {
                self.gateway.store().clear_current_reservation().await?;
                info!(purchase = %purchase.id, "Purchase approved");
                return Ok(PollOutcome::Approved(purchase));
            }

            if purchase.status.is_declined() {
                warn!(purchase = %purchase.id, status = ?purchase.status, "Purchase declined");
                return Ok(PollOutcome::Declined(purchase));
            }

            attempts += 1;
            if attempts > policy.max_attempts {
                warn!(attempts, "Purchase still pending; giving up");
                return Ok(PollOutcome::TimedOut {
                    last: purchase,
                    attempts,
                });
            }

            debug!(attempts, status = ?purchase.status, "Purchase not approved yet");
            tokio::time::sleep(policy.interval).await;
        }
    }
}
