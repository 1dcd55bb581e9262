//! Error types for the probe module.
//!
//! Every variant carries the URL of the request that failed and renders with
//! a trailing `url:<target>` so the report layer can print it verbatim as an
//! `Error: <cause> url:<target>` line.

use std::time::Duration;

use thiserror::Error;

/// Errors that terminate a single probe.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// Transport-level failure (DNS resolution, connection refused, TLS errors, etc.)
    #[error("{source} url:{url}")]
    Transport {
        /// The URL of the request that failed.
        url: String,
        /// The underlying transport error.
        #[source]
        source: reqwest::Error,
    },

    /// Request exceeded its per-request deadline.
    #[error("request timed out after {timeout_secs}s url:{url}")]
    Timeout {
        /// The URL that timed out.
        url: String,
        /// The configured per-request timeout, in seconds.
        timeout_secs: u64,
    },

    /// The server closed the connection before a complete response arrived.
    ///
    /// Old iDRAC 6 firmware does this on redirected requests; routing the
    /// scan through a proxy usually works around it.
    #[error("no response line received url:{url} (Try running through a proxy)")]
    TruncatedResponse {
        /// The URL whose response was cut short.
        url: String,
    },

    /// The target line is not an absolute URL.
    #[error("{source} url:{url}")]
    InvalidUrl {
        /// The offending input line.
        url: String,
        /// The underlying parse error.
        #[source]
        source: url::ParseError,
    },

    /// No classification marker matched the landing page body.
    #[error("Host is not iDRAC or Dell BMC url:{url}")]
    UnrecognizedHost {
        /// The target that could not be classified.
        url: String,
    },

    /// The login response carried no extractable authResult.
    #[error("{detail} url:{url}")]
    AuthParse {
        /// The login endpoint that answered.
        url: String,
        /// What was wrong with the response.
        detail: String,
    },
}

impl ProbeError {
    /// Creates a transport error from a reqwest error.
    pub fn transport(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Transport {
            url: url.into(),
            source,
        }
    }

    /// Creates a timeout error recording the configured deadline.
    pub fn timeout(url: impl Into<String>, timeout: Duration) -> Self {
        Self::Timeout {
            url: url.into(),
            timeout_secs: timeout.as_secs(),
        }
    }

    /// Creates a truncated-response error.
    pub fn truncated_response(url: impl Into<String>) -> Self {
        Self::TruncatedResponse { url: url.into() }
    }

    /// Creates an invalid-URL error.
    pub fn invalid_url(url: impl Into<String>, source: url::ParseError) -> Self {
        Self::InvalidUrl {
            url: url.into(),
            source,
        }
    }

    /// Creates an unrecognized-host error.
    pub fn unrecognized_host(url: impl Into<String>) -> Self {
        Self::UnrecognizedHost { url: url.into() }
    }

    /// Creates an auth-response parse error.
    pub fn auth_parse(url: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::AuthParse {
            url: url.into(),
            detail: detail.into(),
        }
    }
}

// No From<reqwest::Error> or From<url::ParseError> impls: every variant needs
// the failing URL for its report line, so conversions go through the
// context-taking constructors above.
