//! Seams the gateway is built around.

mod notifier;
mod store;

pub use notifier::{NoopNotifier, SessionExpiredNotifier};
pub use store::{MemorySessionStore, SessionStore, SessionUpdate, StoredSession};
