//! Single-target probe sequence.

use std::time::Duration;

use tracing::{debug, instrument};
use url::Url;

use super::client::{ProbeClient, map_request_error};
use super::error::ProbeError;
use super::login::{BMC_DEFAULT_PASSWORD, IDRAC_DEFAULT_PASSWORD, form_login, session_login};
use super::properties::{fetch_idrac78_properties, fetch_idrac9_properties};
use super::{AuthStatus, ProbeResult, ProductVariant, classify, endpoint_url};
use crate::input::Target;

/// Probes one target end to end: landing page, classification, identity
/// properties, default credential attempt.
///
/// Never returns an error; whatever went wrong is recorded inside the
/// [`ProbeResult`] so the caller can report it as a per-host line.
#[instrument(level = "debug", skip_all, fields(url = %target.url()))]
pub async fn probe(client: &ProbeClient, target: &Target, timeout: Duration) -> ProbeResult {
    let mut result = ProbeResult::new(target.url());

    let base = match Url::parse(target.url()) {
        Ok(base) => base,
        Err(source) => {
            result.error = Some(ProbeError::invalid_url(target.url(), source));
            return result;
        }
    };
    result.origin = Some(endpoint_url(&base, "/", None).to_string());

    let body = match fetch_landing_page(client, &base, timeout).await {
        Ok(body) => body,
        Err(error) => {
            result.error = Some(error);
            return result;
        }
    };

    result.variant = classify(&body);
    debug!(variant = %result.variant, "classified landing page");

    let attempt = match result.variant {
        ProductVariant::Idrac6 => {
            form_login(client, &base, IDRAC_DEFAULT_PASSWORD, timeout).await
        }
        ProductVariant::Idrac78 => {
            result.apply_properties(fetch_idrac78_properties(client, &base, timeout).await);
            form_login(client, &base, IDRAC_DEFAULT_PASSWORD, timeout).await
        }
        ProductVariant::Idrac9 => {
            result.apply_properties(fetch_idrac9_properties(client, &base, timeout).await);
            session_login(client, &base, timeout).await
        }
        ProductVariant::GenericBmc => {
            form_login(client, &base, BMC_DEFAULT_PASSWORD, timeout).await
        }
        ProductVariant::Unrecognized => {
            result.error = Some(ProbeError::unrecognized_host(target.url()));
            return result;
        }
    };

    match attempt {
        Ok(code) => {
            result.auth = AuthStatus::from_code(code.as_deref());
            result.auth_code = code;
            debug!(auth = %result.auth, "default credential attempt finished");
        }
        Err(error) => result.error = Some(error),
    }

    result
}

/// Fetches the target page (following redirects) and hands back its body.
async fn fetch_landing_page(
    client: &ProbeClient,
    base: &Url,
    timeout: Duration,
) -> Result<String, ProbeError> {
    let response = client.fetch_page(base, timeout).await?;
    response
        .text()
        .await
        .map_err(|error| map_request_error(base, timeout, error))
}
