//! Product classification from landing page body markers.
//!
//! Each Dell management interface generation serves a login page with a
//! distinguishing substring. The table below is checked top-down and the
//! first matching predicate wins, so marker overlap (iDRAC 6 through 8 share
//! `var isSSOenabled`) resolves to the most specific generation.

use std::fmt;

/// Marker shared by the iDRAC 6/7/8 login pages.
const SSO_MARKER: &str = "var isSSOenabled";

/// Marker present on iDRAC 7/8 but not iDRAC 6.
const IDRAC_78_MARKER: &str = "when the iDRAC";

/// Marker in the iDRAC 9 single-page login app.
const IDRAC_9_MARKER: &str = "idrac-start-screen";

/// Marker on the pre-iDRAC BMC web interface.
const BMC_MARKER: &str = "Dell Remote Management Controller";

/// Dell out-of-band management product generations this tool recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductVariant {
    /// iDRAC 6.
    Idrac6,
    /// iDRAC 7 or 8. Telling the two apart would cost an extra request and
    /// they share the same default-credential handshake.
    Idrac78,
    /// iDRAC 9.
    Idrac9,
    /// Pre-iDRAC Dell Remote Management Controller (BMC web interface).
    GenericBmc,
    /// No marker matched.
    Unrecognized,
}

impl fmt::Display for ProductVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idrac6 => write!(f, "iDRAC 6"),
            Self::Idrac78 => write!(f, "iDRAC 7/8"),
            Self::Idrac9 => write!(f, "iDRAC 9"),
            Self::GenericBmc => write!(f, "BMC Web Interface"),
            Self::Unrecognized => write!(f, "unknown"),
        }
    }
}

/// Ordered classification table; evaluated top-down, first match wins.
const CLASSIFIERS: &[(fn(&str) -> bool, ProductVariant)] = &[
    (
        |body: &str| body.contains(SSO_MARKER) && body.contains(IDRAC_78_MARKER),
        ProductVariant::Idrac78,
    ),
    (
        |body: &str| body.contains(SSO_MARKER),
        ProductVariant::Idrac6,
    ),
    (
        |body: &str| body.contains(IDRAC_9_MARKER),
        ProductVariant::Idrac9,
    ),
    (
        |body: &str| body.contains(BMC_MARKER),
        ProductVariant::GenericBmc,
    ),
];

/// Classifies a landing page body into a [`ProductVariant`].
#[must_use]
pub fn classify(body: &str) -> ProductVariant {
    for (matches, variant) in CLASSIFIERS {
        if matches(body) {
            return *variant;
        }
    }
    ProductVariant::Unrecognized
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_idrac6_from_sso_marker_alone() {
        assert_eq!(
            classify("<script>var isSSOenabled = false;</script>"),
            ProductVariant::Idrac6
        );
    }

    #[test]
    fn test_classify_idrac78_wins_over_idrac6() {
        // Both markers present must never classify as iDRAC 6.
        let body = "var isSSOenabled ... shown when the iDRAC is initializing";
        assert_eq!(classify(body), ProductVariant::Idrac78);
    }

    #[test]
    fn test_classify_idrac78_marker_alone_is_not_enough() {
        // "when the iDRAC" without the shared SSO marker matches nothing.
        assert_eq!(
            classify("text shown when the iDRAC restarts"),
            ProductVariant::Unrecognized
        );
    }

    #[test]
    fn test_classify_idrac9() {
        assert_eq!(
            classify("<div class=\"idrac-start-screen\"></div>"),
            ProductVariant::Idrac9
        );
    }

    #[test]
    fn test_classify_generic_bmc() {
        assert_eq!(
            classify("<title>Dell Remote Management Controller</title>"),
            ProductVariant::GenericBmc
        );
    }

    #[test]
    fn test_classify_sso_marker_outranks_idrac9_marker() {
        // Table order: the shared iDRAC 6-8 marker is checked before iDRAC 9.
        let body = "var isSSOenabled idrac-start-screen";
        assert_eq!(classify(body), ProductVariant::Idrac6);
    }

    #[test]
    fn test_classify_unrecognized_body() {
        assert_eq!(
            classify("<html><body>It works!</body></html>"),
            ProductVariant::Unrecognized
        );
        assert_eq!(classify(""), ProductVariant::Unrecognized);
    }

    #[test]
    fn test_classify_markers_are_case_sensitive() {
        assert_eq!(
            classify("VAR ISSSOENABLED"),
            ProductVariant::Unrecognized
        );
    }

    #[test]
    fn test_variant_display_strings() {
        assert_eq!(ProductVariant::Idrac6.to_string(), "iDRAC 6");
        assert_eq!(ProductVariant::Idrac78.to_string(), "iDRAC 7/8");
        assert_eq!(ProductVariant::Idrac9.to_string(), "iDRAC 9");
        assert_eq!(ProductVariant::GenericBmc.to_string(), "BMC Web Interface");
        assert_eq!(ProductVariant::Unrecognized.to_string(), "unknown");
    }
}
