//! API contracts.
//!
//! These types mirror the JSON the server sends and expects. Permission
//! flags (`*Actions`) are computed server-side and only rendered here.

mod api_url;
pub mod checkout;
pub mod event;
pub mod purchase;
pub mod reservation;
pub mod user;

pub use api_url::ApiUrl;
pub use checkout::{
    CheckoutRedirect, DEFAULT_PAYMENT_METHOD, ProcessCheckout, ValidateCheckout, ValidationIssue,
    ValidationResult,
};
pub use event::{
    Availability, Coordinates, EventActions, EventDetail, EventFilters, EventListItem, EventsList,
    Pagination, Producer, RefundPolicy, SortField, SortOrder, Venue, VenueSummary, Zone,
};
pub use purchase::{
    Purchase, PurchaseActions, PurchaseStatus, Ticket, TicketActions, TicketStatus,
};
pub use reservation::{CreateReservation, Reservation, ReservedTickets};
pub use user::{
    AuthResponse, Country, DocumentType, GoogleLoginRequest, LoginRequest, RefreshTokenRequest,
    RegisterRequest, User, UserRole,
};
