//! Per-host result line rendering.
//!
//! One line per probed host, colored by login outcome: green when the
//! default credentials got in, red when they were rejected, yellow when the
//! outcome is unclear. Error lines are left uncolored. Output goes to
//! stdout untouched by the logging layer, so the stream stays grep-able.

use colored::Colorize;

use crate::probe::{AuthStatus, ProbeResult};

/// Placeholder for identity fields the host did not reveal.
const ABSENT: &str = "n/a";

/// Renders one probe result as its final output line.
#[must_use]
pub fn render(result: &ProbeResult) -> String {
    if let Some(error) = &result.error {
        return format!("Error: {error}");
    }

    let line = format!(
        "url={}, version={}, name={}, model={}, fw={}, authResult={}",
        result.origin.as_deref().unwrap_or(&result.target),
        result.variant,
        result.hostname.as_deref().unwrap_or(ABSENT),
        result.model.as_deref().unwrap_or(ABSENT),
        result.firmware.as_deref().unwrap_or(ABSENT),
        result.auth_code.as_deref().unwrap_or(ABSENT),
    );

    match result.auth {
        AuthStatus::Success | AuthStatus::SuccessPasswordChangeRequired => line.green(),
        AuthStatus::Failed => line.red(),
        AuthStatus::Unknown | AuthStatus::NotAttempted => line.yellow(),
    }
    .to_string()
}
