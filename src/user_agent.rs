//! User-Agent identity for probe requests.
//!
//! iDRAC login pages vary their markup by client, so every request
//! impersonates a desktop browser instead of identifying the tool. The body
//! markers the classifier looks for are the ones served to browsers.

/// Browser User-Agent sent with every probe request.
pub(crate) const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10.15; rv:105.0) Gecko/20100101 Firefox/105.0";
