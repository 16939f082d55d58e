//! Embeds the release version at compile time.
//!
//! Packagers can pin it with `TICKETERA_BUILD_VERSION`; otherwise it comes
//! from `git describe`, falling back to the crate version outside a checkout.

use std::env;
use std::process::Command;

fn main() {
    println!("cargo:rerun-if-env-changed=TICKETERA_BUILD_VERSION");
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs/");

    let version = env::var("TICKETERA_BUILD_VERSION")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .or_else(describe)
        .unwrap_or_else(|| env!("CARGO_PKG_VERSION").to_string());

    println!(
        "cargo:rustc-env=TICKETERA_VERSION={}",
        version.trim().trim_start_matches('v')
    );
}

fn describe() -> Option<String> {
    let output = Command::new("git")
        .args(["describe", "--tags", "--always", "--dirty"])
        .output()
        .ok()
        .filter(|o| o.status.success())?;

    let described = String::from_utf8(output.stdout).ok()?;
    let described = described.trim();
    (!described.is_empty()).then(|| described.to_string())
}
