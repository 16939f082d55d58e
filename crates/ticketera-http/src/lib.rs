//! ticketera-http - Authenticated HTTP gateway and API services.
//!
//! [`Gateway`] performs every call against the Ticketera API: it attaches
//! the stored bearer token, enforces per-call deadlines and renews an expired
//! access token exactly once for all callers that need it. The services in
//! [`api`] wrap the gateway with typed operations for each endpoint group.

pub mod api;
pub mod endpoints;
mod gateway;

pub use api::{AuthApi, CheckoutApi, EventsApi, PurchasesApi, ReservationsApi};
pub use gateway::{Gateway, GatewayBuilder, Request, RequestOptions, Response};
