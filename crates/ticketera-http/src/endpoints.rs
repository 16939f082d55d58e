//! API paths, relative to the versioned base address.

pub const AUTH_LOGIN: &str = "/auth/login";
pub const AUTH_REGISTER: &str = "/auth/register";
pub const AUTH_GOOGLE: &str = "/auth/google";
pub const AUTH_REFRESH: &str = "/auth/refresh";
pub const AUTH_ME: &str = "/auth/me";
pub const AUTH_LOGOUT: &str = "/auth/logout";

pub const EVENTS: &str = "/events";

pub const RESERVATIONS: &str = "/reservations";

pub const CHECKOUT_VALIDATE: &str = "/checkout/validate";
pub const CHECKOUT_PROCESS: &str = "/checkout/process";

pub const PURCHASES: &str = "/purchases";

/// `/events/{id}`
pub fn event(id: &str) -> String {
    format!("{}/{}", EVENTS, id)
}

/// `/events/{id}/availability`
pub fn event_availability(id: &str) -> String {
    format!("{}/{}/availability", EVENTS, id)
}

/// `/purchases/{id}`
pub fn purchase(id: &str) -> String {
    format!("{}/{}", PURCHASES, id)
}
