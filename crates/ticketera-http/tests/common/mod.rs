//! Shared helpers for gateway integration tests.

#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use serde_json::{Value, json};
use wiremock::MockServer;

use ticketera_core::{ApiConfig, MemorySessionStore, SessionStore, StoredSession, TokenPair};
use ticketera_http::Gateway;

/// A gateway wired to a mock server, an in-memory store and a counting notifier.
pub struct Harness {
    pub server: MockServer,
    pub store: Arc<MemorySessionStore>,
    pub gateway: Gateway,
    expired: Arc<AtomicUsize>,
}

impl Harness {
    pub async fn start() -> Self {
        Self::with_session(StoredSession::default()).await
    }

    pub async fn with_tokens(access: &str, refresh: &str) -> Self {
        let pair = TokenPair::new(access, refresh);
        Self::with_session(StoredSession {
            access_token: Some(pair.access_token),
            refresh_token: Some(pair.refresh_token),
            ..Default::default()
        })
        .await
    }

    pub async fn with_session(session: StoredSession) -> Self {
        let server = MockServer::start().await;
        let store = Arc::new(MemorySessionStore::with_session(session));
        let expired = Arc::new(AtomicUsize::new(0));

        let counter = expired.clone();
        let session_store: Arc<dyn SessionStore> = store.clone();
        let gateway = Gateway::builder(config_for(&server))
            .store(session_store)
            .notifier(Arc::new(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            }))
            .build()
            .unwrap();

        Self {
            server,
            store,
            gateway,
            expired,
        }
    }

    /// How many times the session-expired notifier fired.
    pub fn expired_count(&self) -> usize {
        self.expired.load(Ordering::SeqCst)
    }

    /// Every request the mock server saw for a path.
    pub async fn requests_to(&self, api_path: &str) -> Vec<wiremock::Request> {
        let full = api(api_path);
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .into_iter()
            .filter(|r| r.url.path() == full)
            .collect()
    }
}

pub fn config_for(server: &MockServer) -> ApiConfig {
    ApiConfig::for_server(&server.uri(), "v1").unwrap()
}

/// Path under the versioned API prefix, as the mock server sees it.
pub fn api(path: &str) -> String {
    format!("/api/v1{}", path)
}

pub fn error_body(code: &str, message: &str) -> Value {
    json!({ "code": code, "message": message })
}

pub fn user_json() -> Value {
    json!({
        "id": "u-1",
        "email": "ana@example.cl",
        "firstName": "Ana",
        "lastName": "Rojas",
        "role": "customer",
        "country": "CL"
    })
}

pub fn purchase_json(status: &str) -> Value {
    json!({
        "id": "p-1",
        "eventId": "ev-1",
        "eventTitle": "Festival de Verano",
        "eventDate": "2025-01-16T23:00:00Z",
        "totalAmount": 30000,
        "status": status,
        "paymentMethod": "mercadopago",
        "tickets": []
    })
}
