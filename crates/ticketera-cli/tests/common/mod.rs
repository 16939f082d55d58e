//! Helpers for running the CLI binary against a mock API server.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use serde_json::{Value, json};
use tempfile::TempDir;
use wiremock::MockServer;

/// A mock API server plus an isolated home directory for the session file.
pub struct Env {
    pub server: MockServer,
    pub home: TempDir,
}

impl Env {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
            home: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    pub fn session_file(&self) -> PathBuf {
        self.home.path().join("session.json")
    }

    /// Write a session file before running a command.
    pub fn write_session(&self, session: Value) {
        std::fs::write(self.session_file(), session.to_string()).expect("Failed to write session");
    }

    /// Read the session file back, if it exists.
    pub fn read_session(&self) -> Option<Value> {
        let content = std::fs::read_to_string(self.session_file()).ok()?;
        Some(serde_json::from_str(&content).expect("Session file is not JSON"))
    }

    /// Run the CLI with the session file and API address pointed at this env.
    pub async fn run(&self, args: &[&str]) -> Output {
        let mut cmd = command(self.home.path());
        cmd.args(args);
        cmd.arg("--api-url").arg(self.server.uri());
        cmd.arg("--session-file").arg(self.session_file());

        tokio::task::spawn_blocking(move || cmd.output())
            .await
            .expect("CLI task panicked")
            .expect("Failed to execute CLI")
    }

    /// Run the CLI and expect success, returning stdout.
    pub async fn run_success(&self, args: &[&str]) -> String {
        let output = self.run(args).await;
        if !output.status.success() {
            panic!(
                "CLI command failed: {:?}\nstderr: {}",
                args,
                String::from_utf8_lossy(&output.stderr)
            );
        }
        String::from_utf8_lossy(&output.stdout).to_string()
    }
}

fn command(home: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_ticketera"));
    cmd.env("HOME", home);
    cmd.env("XDG_DATA_HOME", home.join("data"));
    cmd.env("NO_COLOR", "1");
    for key in [
        "TICKETERA_API_URL",
        "TICKETERA_API_VERSION",
        "TICKETERA_TIMEOUT_SECS",
        "TICKETERA_SESSION_FILE",
        "TICKETERA_PASSWORD",
        "RUST_LOG",
    ] {
        cmd.env_remove(key);
    }
    cmd
}

/// Path under the versioned API prefix, as the mock server sees it.
pub fn api(path: &str) -> String {
    format!("/api/v1{}", path)
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

pub fn logged_in_session() -> Value {
    json!({
        "accessToken": "at-1",
        "refreshToken": "rt-1",
        "user": user_json()
    })
}

pub fn reservation_json() -> Value {
    json!({
        "reservationId": "res-1",
        "expiresAt": "2099-01-16T20:15:00Z",
        "tickets": [
            {"zoneId": "z-1", "zoneName": "Cancha", "quantity": 2, "unitPrice": 15000}
        ],
        "totalAmount": 30000
    })
}
