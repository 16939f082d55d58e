//! Checkout contracts.

use serde::{Deserialize, Serialize};

/// Payment method used when none is given.
pub const DEFAULT_PAYMENT_METHOD: &str = "mercadopago";

/// Body for `POST /checkout/validate`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateCheckout<'a> {
    pub reservation_id: &'a str,
}

/// A single problem found while validating a reservation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    #[serde(default)]
    pub field: String,
    pub message: String,
}

/// Response from `POST /checkout/validate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    #[serde(default)]
    pub errors: Vec<ValidationIssue>,
}

/// Body for `POST /checkout/process`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessCheckout<'a> {
    pub reservation_id: &'a str,
    pub payment_method: &'a str,
}

/// Response from `POST /checkout/process`: where to send the buyer to pay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRedirect {
    pub redirect_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn validation_result_without_errors_field() {
        let result: ValidationResult = serde_json::from_value(json!({"valid": true})).unwrap();
        assert!(result.valid);
        assert!(result.errors.is_empty());
    }

    #[test]
    fn process_body_wire_format() {
        let body = ProcessCheckout {
            reservation_id: "res-1",
            payment_method: DEFAULT_PAYMENT_METHOD,
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({"reservationId": "res-1", "paymentMethod": "mercadopago"})
        );
    }
}
