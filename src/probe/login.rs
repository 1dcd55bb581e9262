//! Vendor default credential login attempts.
//!
//! Two generations of login endpoint are in the field. iDRAC 6, 7/8 and the
//! older BMC web interface take a form POST to `/data/login` and answer with
//! an XML document carrying an `authResult` element. iDRAC 9 takes an empty
//! POST to `/sysmgmt/2015/bmc/session` with the credentials in request
//! headers and answers with JSON. Both report the outcome as a vendor code
//! which is passed through verbatim.

use std::time::Duration;

use url::Url;

use super::client::{ProbeClient, map_request_error};
use super::endpoint_url;
use super::error::ProbeError;

pub(crate) const IDRAC_DEFAULT_USER: &str = "root";
pub(crate) const IDRAC_DEFAULT_PASSWORD: &str = "calvin";
pub(crate) const BMC_DEFAULT_PASSWORD: &str = "root";

const FORM_LOGIN_PATH: &str = "/data/login";
const SESSION_LOGIN_PATH: &str = "/sysmgmt/2015/bmc/session";

/// Posts `root` plus the given password to the form login endpoint and
/// returns the vendor auth code, if the response carried one.
///
/// The controller reports login failures inside the XML body, often under a
/// non-2xx status, so the HTTP status is deliberately ignored.
///
/// # Errors
///
/// Returns [`ProbeError`] when the request fails at the transport level or
/// the response body is not the expected XML shape.
pub(crate) async fn form_login(
    client: &ProbeClient,
    base: &Url,
    password: &str,
    timeout: Duration,
) -> Result<Option<String>, ProbeError> {
    let url = endpoint_url(base, FORM_LOGIN_PATH, None);
    let response = client
        .post_form(
            &url,
            &[("user", IDRAC_DEFAULT_USER), ("password", password)],
            timeout,
        )
        .await?;
    let body = response
        .text()
        .await
        .map_err(|error| map_request_error(&url, timeout, error))?;
    extract_auth_result_xml(&url, &body)
}

/// Posts the iDRAC 9 default credentials to the session endpoint and
/// returns the vendor auth code, if the response carried one.
///
/// # Errors
///
/// Returns [`ProbeError`] when the request fails at the transport level or
/// the response body is not the expected JSON shape.
pub(crate) async fn session_login(
    client: &ProbeClient,
    base: &Url,
    timeout: Duration,
) -> Result<Option<String>, ProbeError> {
    let url = endpoint_url(base, SESSION_LOGIN_PATH, None);
    // The endpoint expects the header values wrapped in literal quotes.
    let user = format!("\"{IDRAC_DEFAULT_USER}\"");
    let password = format!("\"{IDRAC_DEFAULT_PASSWORD}\"");
    let response = client
        .post_with_headers(&url, &[("user", &user), ("password", &password)], timeout)
        .await?;
    let payload = response
        .json::<serde_json::Value>()
        .await
        .map_err(|error| {
            if error.is_decode() {
                ProbeError::auth_parse(url.as_str(), format!("invalid JSON login response: {error}"))
            } else {
                map_request_error(&url, timeout, error)
            }
        })?;
    match payload.get("authResult") {
        Some(serde_json::Value::Number(code)) => Ok(Some(code.to_string())),
        Some(serde_json::Value::String(code)) => Ok(Some(code.clone())),
        Some(serde_json::Value::Bool(code)) => Ok(Some(code.to_string())),
        Some(_) => Ok(None),
        None => Err(ProbeError::auth_parse(
            url.as_str(),
            "login response has no authResult field",
        )),
    }
}

/// Pulls the text of the `authResult` element sitting directly under the
/// document root. An empty element yields `None`.
fn extract_auth_result_xml(url: &Url, body: &str) -> Result<Option<String>, ProbeError> {
    let document = roxmltree::Document::parse(body).map_err(|error| {
        ProbeError::auth_parse(url.as_str(), format!("invalid XML login response: {error}"))
    })?;
    let node = document
        .root_element()
        .children()
        .find(|node| node.has_tag_name("authResult"))
        .ok_or_else(|| {
            ProbeError::auth_parse(url.as_str(), "login response has no authResult element")
        })?;
    Ok(node
        .text()
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    use serde_json::json;
    use wiremock::matchers::{body_string, header, method, path};
    use wiremock::{Mock, ResponseTemplate};

    use crate::test_support::socket_guard::start_mock_server_or_skip;

    fn test_client() -> ProbeClient {
        ProbeClient::new().unwrap()
    }

    fn login_url(base: &Url) -> Url {
        endpoint_url(base, FORM_LOGIN_PATH, None)
    }

    #[test]
    fn test_auth_result_is_extracted_from_root_child() {
        let base = Url::parse("https://10.0.0.1/").unwrap();
        let body = "<?xml version=\"1.0\"?><root><authResult>0</authResult></root>";

        let code = extract_auth_result_xml(&login_url(&base), body).unwrap();
        assert_eq!(code.as_deref(), Some("0"));
    }

    #[test]
    fn test_auth_result_text_is_trimmed() {
        let base = Url::parse("https://10.0.0.1/").unwrap();
        let body = "<root><authResult>\n  7\n</authResult></root>";

        let code = extract_auth_result_xml(&login_url(&base), body).unwrap();
        assert_eq!(code.as_deref(), Some("7"));
    }

    #[test]
    fn test_empty_auth_result_element_yields_none() {
        let base = Url::parse("https://10.0.0.1/").unwrap();
        let body = "<root><authResult></authResult></root>";

        let code = extract_auth_result_xml(&login_url(&base), body).unwrap();
        assert_eq!(code, None);
    }

    #[test]
    fn test_nested_auth_result_does_not_count() {
        let base = Url::parse("https://10.0.0.1/").unwrap();
        let body = "<root><blk><authResult>0</authResult></blk></root>";

        let error = extract_auth_result_xml(&login_url(&base), body).unwrap_err();
        assert!(
            error.to_string().contains("no authResult element"),
            "unexpected error: {error}"
        );
    }

    #[test]
    fn test_invalid_xml_is_an_auth_parse_error() {
        let base = Url::parse("https://10.0.0.1/").unwrap();

        let error = extract_auth_result_xml(&login_url(&base), "<html><body>nope").unwrap_err();
        match error {
            ProbeError::AuthParse { detail, .. } => {
                assert!(detail.contains("invalid XML"), "unexpected detail: {detail}");
            }
            other => panic!("Expected AuthParse, got: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_form_login_posts_bmc_default_credentials() {
        let Some(mock_server) = start_mock_server_or_skip().await else {
            return;
        };

        Mock::given(method("POST"))
            .and(path("/data/login"))
            .and(body_string("user=root&password=root"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("<root><authResult>1</authResult></root>"),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let base = Url::parse(&mock_server.uri()).unwrap();
        let code = form_login(
            &test_client(),
            &base,
            BMC_DEFAULT_PASSWORD,
            Duration::from_secs(5),
        )
        .await
        .unwrap();

        assert_eq!(code.as_deref(), Some("1"));
    }

    #[tokio::test]
    async fn test_form_login_reads_body_despite_error_status() {
        let Some(mock_server) = start_mock_server_or_skip().await else {
            return;
        };

        Mock::given(method("POST"))
            .and(path("/data/login"))
            .respond_with(
                ResponseTemplate::new(500)
                    .set_body_string("<root><authResult>1</authResult></root>"),
            )
            .mount(&mock_server)
            .await;

        let base = Url::parse(&mock_server.uri()).unwrap();
        let code = form_login(
            &test_client(),
            &base,
            IDRAC_DEFAULT_PASSWORD,
            Duration::from_secs(5),
        )
        .await
        .unwrap();

        assert_eq!(code.as_deref(), Some("1"));
    }

    #[tokio::test]
    async fn test_session_login_sends_quoted_headers_and_reads_numeric_code() {
        let Some(mock_server) = start_mock_server_or_skip().await else {
            return;
        };

        Mock::given(method("POST"))
            .and(path("/sysmgmt/2015/bmc/session"))
            .and(header("user", "\"root\""))
            .and(header("password", "\"calvin\""))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "authResult": 0 })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let base = Url::parse(&mock_server.uri()).unwrap();
        let code = session_login(&test_client(), &base, Duration::from_secs(5))
            .await
            .unwrap();

        assert_eq!(code.as_deref(), Some("0"));
    }

    #[tokio::test]
    async fn test_session_login_accepts_string_code() {
        let Some(mock_server) = start_mock_server_or_skip().await else {
            return;
        };

        Mock::given(method("POST"))
            .and(path("/sysmgmt/2015/bmc/session"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "authResult": "7" })))
            .mount(&mock_server)
            .await;

        let base = Url::parse(&mock_server.uri()).unwrap();
        let code = session_login(&test_client(), &base, Duration::from_secs(5))
            .await
            .unwrap();

        assert_eq!(code.as_deref(), Some("7"));
    }

    #[tokio::test]
    async fn test_session_login_without_auth_result_is_an_error() {
        let Some(mock_server) = start_mock_server_or_skip().await else {
            return;
        };

        Mock::given(method("POST"))
            .and(path("/sysmgmt/2015/bmc/session"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "ok" })))
            .mount(&mock_server)
            .await;

        let base = Url::parse(&mock_server.uri()).unwrap();
        let error = session_login(&test_client(), &base, Duration::from_secs(5))
            .await
            .unwrap_err();

        match error {
            ProbeError::AuthParse { detail, .. } => {
                assert!(
                    detail.contains("no authResult field"),
                    "unexpected detail: {detail}"
                );
            }
            other => panic!("Expected AuthParse, got: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_session_login_with_non_json_body_is_an_error() {
        let Some(mock_server) = start_mock_server_or_skip().await else {
            return;
        };

        Mock::given(method("POST"))
            .and(path("/sysmgmt/2015/bmc/session"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>login</html>"))
            .mount(&mock_server)
            .await;

        let base = Url::parse(&mock_server.uri()).unwrap();
        let error = session_login(&test_client(), &base, Duration::from_secs(5))
            .await
            .unwrap_err();

        match error {
            ProbeError::AuthParse { detail, .. } => {
                assert!(detail.contains("invalid JSON"), "unexpected detail: {detail}");
            }
            other => panic!("Expected AuthParse, got: {other:?}"),
        }
    }
}
