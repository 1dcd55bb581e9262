//! TLS-permissive HTTP client pair used by the probe engine.
//!
//! Management controllers ship self-signed certificates and old firmware
//! negotiates nothing newer than TLS 1.0, so certificate and hostname
//! verification are off and the protocol floor is lowered. Redirect policy
//! is fixed per client in reqwest, so the pair covers both cases: one client
//! follows redirects for the initial page fetch, its sibling keeps redirects
//! off for the property and login endpoints.

use std::time::Duration;

use reqwest::redirect::Policy;
use reqwest::{Client, ClientBuilder, RequestBuilder, Response};
use url::Url;

use super::error::ProbeError;
use crate::user_agent::BROWSER_USER_AGENT;

/// Default per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Shared HTTP client pair for probe requests.
///
/// Cheap to clone; both inner clients are reference-counted and safe for
/// concurrent use across probe tasks.
#[derive(Debug, Clone)]
pub struct ProbeClient {
    /// Follows redirects; used for the initial landing page fetch.
    redirecting: Client,
    /// Redirects disabled; used for property and login endpoints.
    direct: Client,
}

impl ProbeClient {
    /// Builds the client pair with the shared probe policy.
    ///
    /// # Errors
    ///
    /// Returns the builder error when the TLS backend cannot be initialized.
    pub fn new() -> Result<Self, reqwest::Error> {
        Ok(Self {
            redirecting: base_builder().build()?,
            direct: base_builder().redirect(Policy::none()).build()?,
        })
    }

    /// GETs the target page, following redirects.
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError`] when the request fails at the transport level.
    pub async fn fetch_page(&self, url: &Url, timeout: Duration) -> Result<Response, ProbeError> {
        dispatch_request(self.redirecting.get(url.clone()), url, timeout).await
    }

    /// GETs an API endpoint without following redirects.
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError`] when the request fails at the transport level.
    pub async fn fetch_endpoint(
        &self,
        url: &Url,
        timeout: Duration,
    ) -> Result<Response, ProbeError> {
        dispatch_request(self.direct.get(url.clone()), url, timeout).await
    }

    /// POSTs a form body without following redirects.
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError`] when the request fails at the transport level.
    pub async fn post_form(
        &self,
        url: &Url,
        form: &[(&str, &str)],
        timeout: Duration,
    ) -> Result<Response, ProbeError> {
        dispatch_request(self.direct.post(url.clone()).form(form), url, timeout).await
    }

    /// POSTs an empty body with extra headers, without following redirects.
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError`] when the request fails at the transport level.
    pub async fn post_with_headers(
        &self,
        url: &Url,
        headers: &[(&str, &str)],
        timeout: Duration,
    ) -> Result<Response, ProbeError> {
        let mut request = self.direct.post(url.clone());
        for (name, value) in headers {
            request = request.header(*name, *value);
        }
        dispatch_request(request, url, timeout).await
    }
}

async fn dispatch_request(
    request: RequestBuilder,
    url: &Url,
    timeout: Duration,
) -> Result<Response, ProbeError> {
    request
        .timeout(timeout)
        .send()
        .await
        .map_err(|error| map_request_error(url, timeout, error))
}

/// Maps a reqwest failure onto the probe error taxonomy.
///
/// Body-read failures (`Response::text`, `Response::json`) go through the
/// same mapping as send failures, so callers reading bodies reuse this.
pub(crate) fn map_request_error(url: &Url, timeout: Duration, error: reqwest::Error) -> ProbeError {
    if error.is_timeout() {
        ProbeError::timeout(url.as_str(), timeout)
    } else if connection_closed_early(&error) {
        ProbeError::truncated_response(url.as_str())
    } else {
        ProbeError::transport(url.as_str(), error)
    }
}

/// True when the server closed the connection before a complete HTTP message
/// arrived. hyper reports this condition as an incomplete message; old
/// iDRAC 6 firmware triggers it on redirected requests.
fn connection_closed_early(error: &reqwest::Error) -> bool {
    let mut source = std::error::Error::source(error);
    while let Some(cause) = source {
        if cause
            .to_string()
            .contains("connection closed before message completed")
        {
            return true;
        }
        source = cause.source();
    }
    false
}

fn base_builder() -> ClientBuilder {
    Client::builder()
        .danger_accept_invalid_certs(true)
        .danger_accept_invalid_hostnames(true)
        .min_tls_version(reqwest::tls::Version::TLS_1_0)
        .gzip(true)
        .user_agent(BROWSER_USER_AGENT)
}
