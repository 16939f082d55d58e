//! Public event catalogue.

use tracing::instrument;

use ticketera_core::Result;
use ticketera_core::types::{Availability, EventDetail, EventFilters, EventsList};

use super::validate_id;
use crate::endpoints;
use crate::gateway::{Gateway, Request};

/// Browse events. None of these calls need a session.
#[derive(Debug, Clone)]
pub struct EventsApi {
    gateway: Gateway,
}

impl EventsApi {
    pub fn new(gateway: Gateway) -> Self {
        Self { gateway }
    }

    /// List events matching the filters.
    #[instrument(skip(self))]
    pub async fn list(&self, filters: &EventFilters) -> Result<EventsList> {
        let request = Request::get(endpoints::EVENTS)
            .query(filters.query_pairs())
            .skip_auth();
        self.gateway.fetch(request).await
    }

    /// Full detail of one event, including zones and prices.
    #[instrument(skip(self))]
    pub async fn detail(&self, event_id: &str) -> Result<EventDetail> {
        let event_id = validate_id("event id", event_id)?;
        self.gateway
            .fetch(Request::get(endpoints::event(event_id)).skip_auth())
            .await
    }

    /// Live ticket counts for one event.
    #[instrument(skip(self))]
    pub async fn availability(&self, event_id: &str) -> Result<Availability> {
        let event_id = validate_id("event id", event_id)?;
        self.gateway
            .fetch(Request::get(endpoints::event_availability(event_id)).skip_auth())
            .await
    }
}
