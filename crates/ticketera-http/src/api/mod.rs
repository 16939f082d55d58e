//! Typed services over the gateway, one per endpoint group.

mod auth;
mod checkout;
mod events;
mod purchases;
mod reservations;

pub use auth::AuthApi;
pub use checkout::{CheckoutApi, CheckoutFailure};
pub use events::EventsApi;
pub use purchases::{PollOutcome, PollPolicy, PurchasesApi};
pub use reservations::ReservationsApi;

use ticketera_core::Result;
use ticketera_core::error::InvalidInputError;

use crate::Gateway;

impl Gateway {
    pub fn auth(&self) -> AuthApi {
        AuthApi::new(self.clone())
    }

    pub fn events(&self) -> EventsApi {
        EventsApi::new(self.clone())
    }

    pub fn reservations(&self) -> ReservationsApi {
        ReservationsApi::new(self.clone())
    }

    pub fn checkout(&self) -> CheckoutApi {
        CheckoutApi::new(self.clone())
    }

    pub fn purchases(&self) -> PurchasesApi {
        PurchasesApi::new(self.clone())
    }
}

/// Reject identifiers that would change the shape of the request path.
pub(crate) fn validate_id<'a>(field: &'static str, id: &'a str) -> Result<&'a str> {
    let id = id.trim();
    if id.is_empty() {
        return Err(InvalidInputError::Field {
            field,
            reason: "must not be empty".to_string(),
        }
        .into());
    }
    if let Some(c) = id
        .chars()
        .find(|c| matches!(c, '/' | '?' | '#' | '%') || c.is_whitespace() || c.is_control())
    {
        return Err(InvalidInputError::Field {
            field,
            reason: format!("contains invalid character {:?}", c),
        }
        .into());
    }
    Ok(id)
}
