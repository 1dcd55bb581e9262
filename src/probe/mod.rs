//! Host probing pipeline.
//!
//! A probe fetches the landing page of one target, classifies the management
//! interface generation from markers in the page body, harvests identity
//! properties where that generation exposes them, and finally tries the
//! vendor default login. Every step after classification is
//! generation-specific; the outcome of all of them lands in a [`ProbeResult`].

use url::Url;

mod classify;
mod client;
mod engine;
mod error;
mod login;
mod properties;

pub use classify::{ProductVariant, classify};
pub use client::{DEFAULT_TIMEOUT_SECS, ProbeClient};
pub use engine::probe;
pub use error::ProbeError;
pub use properties::DeviceProperties;

/// Outcome of a default credential attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthStatus {
    /// Vendor code `0`: the default credentials were accepted.
    Success,
    /// Vendor code `7`: accepted, but the controller demands a password
    /// change before the session is usable.
    SuccessPasswordChangeRequired,
    /// Vendor code `1`: the credentials were rejected.
    Failed,
    /// Any other code, or a response that carried none.
    Unknown,
    /// The login attempt never ran for this host.
    NotAttempted,
}

impl AuthStatus {
    /// Maps a vendor auth code onto a status. Codes are passed around as
    /// strings since the two login endpoints disagree on their JSON type.
    #[must_use]
    pub fn from_code(code: Option<&str>) -> Self {
        match code {
            Some("0") => Self::Success,
            Some("7") => Self::SuccessPasswordChangeRequired,
            Some("1") => Self::Failed,
            _ => Self::Unknown,
        }
    }

    /// True when the default credentials got in, password change pending or
    /// not.
    #[must_use]
    pub fn is_success(self) -> bool {
        matches!(self, Self::Success | Self::SuccessPasswordChangeRequired)
    }
}

impl std::fmt::Display for AuthStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Success => "success",
            Self::SuccessPasswordChangeRequired => "success (password change required)",
            Self::Failed => "failed",
            Self::Unknown => "unknown",
            Self::NotAttempted => "not attempted",
        };
        f.write_str(label)
    }
}

/// Everything learned about one target host.
#[derive(Debug)]
pub struct ProbeResult {
    /// The target line as read from the input file.
    pub target: String,
    /// Normalized origin the probe actually talked to, once the target
    /// parsed as a URL.
    pub origin: Option<String>,
    pub variant: ProductVariant,
    pub auth: AuthStatus,
    /// Vendor auth code exactly as the controller reported it.
    pub auth_code: Option<String>,
    pub hostname: Option<String>,
    pub firmware: Option<String>,
    pub model: Option<String>,
    /// The failure that ended this probe early, if any.
    pub error: Option<ProbeError>,
}

impl ProbeResult {
    pub(crate) fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            origin: None,
            variant: ProductVariant::Unrecognized,
            auth: AuthStatus::NotAttempted,
            auth_code: None,
            hostname: None,
            firmware: None,
            model: None,
            error: None,
        }
    }

    pub(crate) fn apply_properties(&mut self, properties: DeviceProperties) {
        self.hostname = properties.hostname;
        self.firmware = properties.firmware;
        self.model = properties.model;
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// Rebases `path` (and optionally `query`) onto the origin of `base`,
/// discarding whatever path, query or fragment the target line carried.
pub(crate) fn endpoint_url(base: &Url, path: &str, query: Option<&str>) -> Url {
    let mut url = base.clone();
    url.set_path(path);
    url.set_query(query);
    url.set_fragment(None);
    url
}
