//! API services against a mock server.

mod common;

use std::time::Duration;

use serde_json::{Value, json};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

use common::{Harness, api, error_body, purchase_json, user_json};
use ticketera_core::types::{CreateReservation, EventFilters, SortField, SortOrder};
use ticketera_core::{Credentials, Error, ErrorCode, SessionStore};
use ticketera_http::api::{CheckoutFailure, PollOutcome, PollPolicy};

fn auth_response() -> Value {
    json!({
        "user": user_json(),
        "accessToken": "T1",
        "refreshToken": "R1",
        "expiresIn": 900
    })
}

fn reservation_json() -> Value {
    json!({
        "reservationId": "res-1",
        "expiresAt": "2025-01-16T20:15:00Z",
        "tickets": [{"zoneId": "z1", "zoneName": "Cancha", "quantity": 2, "unitPrice": 15000}],
        "totalAmount": 30000
    })
}

fn fast_poll(max_attempts: u32) -> PollPolicy {
    PollPolicy {
        interval: Duration::from_millis(10),
        max_attempts,
    }
}

// ============================================================================
// Auth
// ============================================================================

#[tokio::test]
async fn login_persists_tokens_and_user() {
    let h = Harness::start().await;

    Mock::given(method("POST"))
        .and(path(api("/auth/login")))
        .and(body_json(json!({"email": "ana@example.cl", "password": "secreta"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(auth_response()))
        .expect(1)
        .mount(&h.server)
        .await;

    let response = h
        .gateway
        .auth()
        .login(&Credentials::new("ana@example.cl", "secreta").unwrap())
        .await
        .unwrap();

    assert_eq!(response.user.first_name, "Ana");
    assert_eq!(response.expires_in, 900);

    let session = h.store.snapshot();
    assert_eq!(session.access_token.unwrap().as_str(), "T1");
    assert_eq!(session.refresh_token.unwrap().as_str(), "R1");
    assert_eq!(session.user.unwrap().email, "ana@example.cl");
}

#[tokio::test]
async fn bad_credentials_do_not_touch_the_session() {
    let h = Harness::with_tokens("OLD", "OLDR").await;

    Mock::given(method("POST"))
        .and(path(api("/auth/login")))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(error_body("INVALID_CREDENTIALS", "Credenciales inválidas")),
        )
        .mount(&h.server)
        .await;

    let err = h
        .gateway
        .auth()
        .login(&Credentials::new("ana@example.cl", "mala").unwrap())
        .await
        .unwrap_err();

    assert_eq!(err.code(), ErrorCode::InvalidCredentials);
    assert!(err.user_message().starts_with("Credenciales inválidas"));
    assert_eq!(h.store.snapshot().access_token.unwrap().as_str(), "OLD");
    assert_eq!(h.expired_count(), 0);
}

#[tokio::test]
async fn google_login_sends_id_token() {
    let h = Harness::start().await;

    Mock::given(method("POST"))
        .and(path(api("/auth/google")))
        .and(body_json(json!({"idToken": "google-jwt"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(auth_response()))
        .expect(1)
        .mount(&h.server)
        .await;

    h.gateway
        .auth()
        .login_with_google("google-jwt")
        .await
        .unwrap();
    assert!(h.store.snapshot().user.is_some());
}

#[tokio::test]
async fn logout_clears_session_even_when_server_fails() {
    let h = Harness::with_tokens("T1", "R1").await;

    Mock::given(method("POST"))
        .and(path(api("/auth/logout")))
        .and(header("Authorization", "Bearer T1"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&h.server)
        .await;

    h.gateway.auth().logout().await.unwrap();

    assert!(h.store.snapshot().is_empty());
    h.server.verify().await;
}

#[tokio::test]
async fn restore_without_token_makes_no_request() {
    let h = Harness::start().await;

    let user = h.gateway.auth().restore().await.unwrap();

    assert!(user.is_none());
    assert!(h.server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn restore_caches_the_current_user() {
    let h = Harness::with_tokens("T1", "R1").await;

    Mock::given(method("GET"))
        .and(path(api("/auth/me")))
        .and(header("Authorization", "Bearer T1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_json()))
        .mount(&h.server)
        .await;

    let user = h.gateway.auth().restore().await.unwrap().unwrap();

    assert_eq!(user.full_name(), "Ana Rojas");
    assert_eq!(h.store.user().await.unwrap().unwrap().id, "u-1");
}

#[tokio::test]
async fn restore_with_rejected_session_clears_it() {
    let h = Harness::with_tokens("T1", "R1").await;

    Mock::given(method("GET"))
        .and(path(api("/auth/me")))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(error_body("TOKEN_EXPIRED", "Expirado")),
        )
        .mount(&h.server)
        .await;
    Mock::given(method("POST"))
        .and(path(api("/auth/refresh")))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(error_body("INVALID_TOKEN", "Expirado")),
        )
        .mount(&h.server)
        .await;

    let user = h.gateway.auth().restore().await.unwrap();

    assert!(user.is_none());
    assert!(h.store.snapshot().is_empty());
}

#[tokio::test]
async fn restore_keeps_session_on_server_errors() {
    let h = Harness::with_tokens("T1", "R1").await;

    Mock::given(method("GET"))
        .and(path(api("/auth/me")))
        .respond_with(ResponseTemplate::new(500))
        .mount(&h.server)
        .await;

    let err = h.gateway.auth().restore().await.unwrap_err();

    assert_eq!(err.status(), Some(500));
    assert!(h.store.snapshot().access_token.is_some());
}

// ============================================================================
// Events
// ============================================================================

#[tokio::test]
async fn event_list_sends_filters_without_credentials() {
    let h = Harness::with_tokens("T1", "R1").await;

    Mock::given(method("GET"))
        .and(path(api("/events")))
        .and(query_param("city", "Santiago"))
        .and(query_param("page", "2"))
        .and(query_param("limit", "20"))
        .and(query_param("sort", "price"))
        .and(query_param("order", "desc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{
                "id": "ev-1",
                "title": "Festival de Verano",
                "startDateTime": "2025-01-16T23:00:00Z",
                "venue": {"name": "Parque O'Higgins", "city": "Santiago"},
                "minPrice": 15000,
                "maxPrice": 90000,
                "availableTickets": 120
            }],
            "pagination": {"page": 2, "limit": 20, "total": 21, "totalPages": 2, "hasPrev": true}
        })))
        .expect(1)
        .mount(&h.server)
        .await;

    let filters = EventFilters {
        city: Some("Santiago".into()),
        page: Some(2),
        sort: Some(SortField::Price),
        order: Some(SortOrder::Desc),
        ..Default::default()
    };
    let list = h.gateway.events().list(&filters).await.unwrap();

    assert_eq!(list.data.len(), 1);
    assert_eq!(list.data[0].venue.city, "Santiago");
    assert!(list.pagination.has_prev);

    let requests = h.requests_to("/events").await;
    assert!(requests[0].headers.get("authorization").is_none());
    assert!(!requests[0].url.query().unwrap_or("").contains("price_min"));
}

#[tokio::test]
async fn availability_and_missing_event() {
    let h = Harness::start().await;

    Mock::given(method("GET"))
        .and(path(api("/events/ev-1/availability")))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"available": 10, "reserved": 5, "total": 100})),
        )
        .mount(&h.server)
        .await;
    Mock::given(method("GET"))
        .and(path(api("/events/ev-404")))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(error_body("EVENT_NOT_FOUND", "No existe")),
        )
        .mount(&h.server)
        .await;

    let events = h.gateway.events();
    let availability = events.availability("ev-1").await.unwrap();
    assert_eq!(availability.available, 10);

    let err = events.detail("ev-404").await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::EventNotFound);
    assert_eq!(err.status(), Some(404));
}

#[tokio::test]
async fn malformed_event_id_is_rejected_locally() {
    let h = Harness::start().await;

    let err = h.gateway.events().detail("../admin").await.unwrap_err();

    assert!(matches!(err, Error::InvalidInput(_)));
    assert!(h.server.received_requests().await.unwrap().is_empty());
}

// ============================================================================
// Reservations and checkout
// ============================================================================

#[tokio::test]
async fn reservation_is_remembered_for_checkout() {
    let h = Harness::with_tokens("T1", "R1").await;

    Mock::given(method("POST"))
        .and(path(api("/reservations")))
        .and(body_json(json!({"eventId": "ev-1", "zoneId": "z1", "quantity": 2})))
        .respond_with(ResponseTemplate::new(201).set_body_json(reservation_json()))
        .expect(1)
        .mount(&h.server)
        .await;

    let reservations = h.gateway.reservations();
    let reservation = reservations
        .create(&CreateReservation {
            event_id: "ev-1".into(),
            zone_id: "z1".into(),
            quantity: 2,
        })
        .await
        .unwrap();

    assert_eq!(reservation.ticket_count(), 2);
    assert_eq!(
        reservations.current().await.unwrap().unwrap().reservation_id,
        "res-1"
    );
}

#[tokio::test]
async fn zero_quantity_is_rejected_locally() {
    let h = Harness::with_tokens("T1", "R1").await;

    let err = h
        .gateway
        .reservations()
        .create(&CreateReservation {
            event_id: "ev-1".into(),
            zone_id: "z1".into(),
            quantity: 0,
        })
        .await
        .unwrap_err();

    assert!(err.to_string().contains("quantity"));
}

#[tokio::test]
async fn checkout_defaults_to_mercadopago() {
    let h = Harness::with_tokens("T1", "R1").await;

    Mock::given(method("POST"))
        .and(path(api("/checkout/validate")))
        .and(body_json(json!({"reservationId": "res-1"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"valid": true})))
        .mount(&h.server)
        .await;
    Mock::given(method("POST"))
        .and(path(api("/checkout/process")))
        .and(body_json(json!({"reservationId": "res-1", "paymentMethod": "mercadopago"})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"redirectUrl": "https://mp.example/pay/123"})),
        )
        .expect(1)
        .mount(&h.server)
        .await;

    let checkout = h.gateway.checkout();
    assert!(checkout.validate("res-1").await.unwrap().valid);

    let redirect = checkout.process("res-1", None).await.unwrap();
    assert_eq!(redirect.redirect_url, "https://mp.example/pay/123");
    h.server.verify().await;
}

#[tokio::test]
async fn failed_payment_is_classified() {
    let h = Harness::with_tokens("T1", "R1").await;

    Mock::given(method("POST"))
        .and(path(api("/checkout/process")))
        .respond_with(
            ResponseTemplate::new(402).set_body_json(error_body("PAYMENT_FAILED", "Rechazado")),
        )
        .mount(&h.server)
        .await;

    let err = h
        .gateway
        .checkout()
        .process("res-1", Some("mercadopago"))
        .await
        .unwrap_err();

    let failure = CheckoutFailure::classify(&err);
    assert_eq!(failure, CheckoutFailure::PaymentFailed);
    assert_eq!(failure.next_path(), "/events");
}

// ============================================================================
// Purchases
// ============================================================================

#[tokio::test]
async fn polling_stops_at_approval_and_clears_reservation() {
    let h = Harness::with_tokens("T1", "R1").await;
    h.store
        .set_current_reservation(&serde_json::from_value(reservation_json()).unwrap())
        .await
        .unwrap();

    Mock::given(method("GET"))
        .and(path(api("/purchases/p-1")))
        .respond_with(ResponseTemplate::new(200).set_body_json(purchase_json("pending")))
        .up_to_n_times(2)
        .expect(2)
        .mount(&h.server)
        .await;
    Mock::given(method("GET"))
        .and(path(api("/purchases/p-1")))
        .respond_with(ResponseTemplate::new(200).set_body_json(purchase_json("approved")))
        .expect(1)
        .mount(&h.server)
        .await;

    let outcome = h
        .gateway
        .purchases()
        .wait_for_approval("p-1", &fast_poll(10))
        .await
        .unwrap();

    assert!(matches!(outcome, PollOutcome::Approved(ref p) if p.id == "p-1"));
    assert!(h.store.snapshot().current_reservation.is_none());
    h.server.verify().await;
}

#[tokio::test]
async fn polling_gives_up_after_max_attempts() {
    let h = Harness::with_tokens("T1", "R1").await;

    Mock::given(method("GET"))
        .and(path(api("/purchases/p-1")))
        .respond_with(ResponseTemplate::new(200).set_body_json(purchase_json("pending")))
        .expect(4)
        .mount(&h.server)
        .await;

    let outcome = h
        .gateway
        .purchases()
        .wait_for_approval("p-1", &fast_poll(3))
        .await
        .unwrap();

    match outcome {
        PollOutcome::TimedOut { attempts, last } => {
            assert_eq!(attempts, 4);
            assert_eq!(last.id, "p-1");
        }
        other => panic!("expected timeout, got {other:?}"),
    }
    h.server.verify().await;
}

#[tokio::test]
async fn polling_stops_when_payment_is_rejected() {
    let h = Harness::with_tokens("T1", "R1").await;

    Mock::given(method("GET"))
        .and(path(api("/purchases/p-1")))
        .respond_with(ResponseTemplate::new(200).set_body_json(purchase_json("rejected")))
        .expect(1)
        .mount(&h.server)
        .await;

    let outcome = h
        .gateway
        .purchases()
        .wait_for_approval("p-1", &fast_poll(10))
        .await
        .unwrap();

    assert!(matches!(outcome, PollOutcome::Declined(_)));
    h.server.verify().await;
}

#[tokio::test]
async fn polling_ends_on_request_error() {
    let h = Harness::with_tokens("T1", "R1").await;

    Mock::given(method("GET"))
        .and(path(api("/purchases/p-1")))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&h.server)
        .await;

    let err = h
        .gateway
        .purchases()
        .wait_for_approval("p-1", &fast_poll(10))
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(500));
    h.server.verify().await;
}
