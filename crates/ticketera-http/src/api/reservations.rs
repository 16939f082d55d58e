//! Ticket reservations.

use tracing::{info, instrument};

use ticketera_core::Result;
use ticketera_core::error::InvalidInputError;
use ticketera_core::types::{CreateReservation, Reservation};

use super::validate_id;
use crate::endpoints;
use crate::gateway::{Gateway, Request};

#[derive(Debug, Clone)]
pub struct ReservationsApi {
    gateway: Gateway,
}

impl ReservationsApi {
    pub fn new(gateway: Gateway) -> Self {
        Self { gateway }
    }

    /// Hold tickets in a zone and remember the reservation for checkout.
    #[instrument(skip(self))]
    pub async fn create(&self, request: &CreateReservation) -> Result<Reservation> {
        validate_id("event id", &request.event_id)?;
        validate_id("zone id", &request.zone_id)?;
        if request.quantity == 0 {
            return Err(InvalidInputError::Field {
                field: "quantity",
                reason: "must be at least 1".to_string(),
            }
            .into());
        }

        let reservation: Reservation = self
            .gateway
            .fetch(Request::post(endpoints::RESERVATIONS).json(request)?)
            .await?;

        self.gateway
            .store()
            .set_current_reservation(&reservation)
            .await?;

        info!(
            reservation = %reservation.reservation_id,
            expires_at = %reservation.expires_at,
            "Tickets reserved"
        );
        Ok(reservation)
    }

    /// The reservation awaiting checkout, if any.
    pub async fn current(&self) -> Result<Option<Reservation>> {
        self.gateway.store().current_reservation().await
    }
}
