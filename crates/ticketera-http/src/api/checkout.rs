//! Checkout: validate a reservation and start payment.

use tracing::{info, instrument};

use ticketera_core::types::{
    CheckoutRedirect, DEFAULT_PAYMENT_METHOD, ProcessCheckout, ValidateCheckout,
    ValidationResult,
};
use ticketera_core::{Error, ErrorCode, Result};

use super::validate_id;
use crate::endpoints;
use crate::gateway::{Gateway, Request};

#[derive(Debug, Clone)]
pub struct CheckoutApi {
    gateway: Gateway,
}

impl CheckoutApi {
    pub fn new(gateway: Gateway) -> Self {
        Self { gateway }
    }

    /// Check that a reservation can still be paid for.
    #[instrument(skip(self))]
    pub async fn validate(&self, reservation_id: &str) -> Result<ValidationResult> {
        let reservation_id = validate_id("reservation id", reservation_id)?;
        let request =
            Request::post(endpoints::CHECKOUT_VALIDATE).json(&ValidateCheckout { reservation_id })?;
        self.gateway.fetch(request).await
    }

    /// Start payment and return where to send the buyer.
    ///
    /// `payment_method` defaults to MercadoPago.
    #[instrument(skip(self))]
    pub async fn process(
        &self,
        reservation_id: &str,
        payment_method: Option<&str>,
    ) -> Result<CheckoutRedirect> {
        let reservation_id = validate_id("reservation id", reservation_id)?;
        let payment_method = payment_method
            .filter(|m| !m.trim().is_empty())
            .unwrap_or(DEFAULT_PAYMENT_METHOD);

        let request = Request::post(endpoints::CHECKOUT_PROCESS).json(&ProcessCheckout {
            reservation_id,
            payment_method,
        })?;
        let redirect: CheckoutRedirect = self.gateway.fetch(request).await?;

        info!(payment_method, "Checkout started");
        Ok(redirect)
    }
}

/// What went wrong during checkout, from the buyer's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutFailure {
    /// Payment did not go through; the reservation was released.
    PaymentFailed,
    /// Payment went through but tickets could not be issued.
    TicketsGenerationFailed,
    /// The reservation ran out before payment.
    ReservationExpired,
    Other,
}

impl CheckoutFailure {
    pub fn classify(err: &Error) -> Self {
        match err.code() {
            ErrorCode::PaymentFailed => CheckoutFailure::PaymentFailed,
            ErrorCode::TicketsGenerationFailed => CheckoutFailure::TicketsGenerationFailed,
            ErrorCode::ReservationExpired => CheckoutFailure::ReservationExpired,
            _ => CheckoutFailure::Other,
        }
    }

    /// Guidance to show the buyer.
    pub fn guidance(&self) -> &'static str {
        match self {
            CheckoutFailure::PaymentFailed => {
                "El pago no se completó. Tu reserva fue liberada automáticamente."
            }
            CheckoutFailure::TicketsGenerationFailed => {
                "Hubo un error al generar tus tickets. Se procesará un reembolso automático en 3-5 días hábiles."
            }
            CheckoutFailure::ReservationExpired => {
                "Tu reserva expiró. Por favor intenta nuevamente."
            }
            CheckoutFailure::Other => "Ocurrió un error al procesar el pago. Intenta nuevamente.",
        }
    }

    /// Where the buyer should go next.
    pub fn next_path(&self) -> &'static str {
        match self {
            CheckoutFailure::TicketsGenerationFailed => "/dashboard/customer",
            _ => "/events",
        }
    }

    /// True when the held reservation can no longer be used.
    pub fn releases_reservation(&self) -> bool {
        !matches!(self, CheckoutFailure::Other)
    }
}
