//! Best-effort device property lookup.
//!
//! iDRAC 7/8 and iDRAC 9 expose unauthenticated endpoints that leak the
//! controller hostname, firmware version and server model. Property fetches
//! never fail a probe: anything the endpoint withholds simply stays absent
//! from the result line.

use std::time::Duration;

use serde::Deserialize;
use tracing::debug;
use url::Url;

use super::client::ProbeClient;
use super::endpoint_url;

const SESSION_PROPERTIES_PATH: &str = "/session";
const AIM_GET_PROP_QUERY: &str =
    "aimGetProp=hostname,gui_str_title_bar,OEMHostName,fwVersion,sysDesc";
const BMC_INFO_PATH: &str = "/sysmgmt/2015/bmc/info";

/// Identity details harvested from a management controller.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DeviceProperties {
    pub hostname: Option<String>,
    pub firmware: Option<String>,
    pub model: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AimGetPropResponse {
    #[serde(rename = "aimGetProp")]
    properties: AimGetPropFields,
}

#[derive(Debug, Deserialize)]
struct AimGetPropFields {
    hostname: Option<String>,
    #[serde(rename = "fwVersion")]
    fw_version: Option<String>,
    #[serde(rename = "sysDesc")]
    sys_desc: Option<String>,
}

#[derive(Debug, Deserialize)]
struct BmcInfoResponse {
    #[serde(rename = "Attributes")]
    attributes: BmcInfoAttributes,
}

#[derive(Debug, Deserialize)]
struct BmcInfoAttributes {
    #[serde(rename = "iDRACName")]
    idrac_name: Option<String>,
    #[serde(rename = "FwVer")]
    fw_ver: Option<String>,
    #[serde(rename = "SystemModelName")]
    system_model_name: Option<String>,
}

/// Queries the iDRAC 7/8 session endpoint for hostname, firmware and model.
pub(crate) async fn fetch_idrac78_properties(
    client: &ProbeClient,
    base: &Url,
    timeout: Duration,
) -> DeviceProperties {
    let url = endpoint_url(base, SESSION_PROPERTIES_PATH, Some(AIM_GET_PROP_QUERY));
    let response = match client.fetch_endpoint(&url, timeout).await {
        Ok(response) => response,
        Err(error) => {
            debug!(url = %url, %error, "property fetch failed");
            return DeviceProperties::default();
        }
    };
    match response.json::<AimGetPropResponse>().await {
        Ok(payload) => DeviceProperties {
            hostname: payload.properties.hostname,
            firmware: payload.properties.fw_version,
            model: payload.properties.sys_desc,
        },
        Err(error) => {
            debug!(url = %url, %error, "property response not understood");
            DeviceProperties::default()
        }
    }
}

/// Queries the iDRAC 9 BMC info endpoint for hostname, firmware and model.
pub(crate) async fn fetch_idrac9_properties(
    client: &ProbeClient,
    base: &Url,
    timeout: Duration,
) -> DeviceProperties {
    let url = endpoint_url(base, BMC_INFO_PATH, None);
    let response = match client.fetch_endpoint(&url, timeout).await {
        Ok(response) => response,
        Err(error) => {
            debug!(url = %url, %error, "property fetch failed");
            return DeviceProperties::default();
        }
    };
    match response.json::<BmcInfoResponse>().await {
        Ok(payload) => DeviceProperties {
            hostname: payload.attributes.idrac_name,
            firmware: payload.attributes.fw_ver,
            model: payload.attributes.system_model_name,
        },
        Err(error) => {
            debug!(url = %url, %error, "property response not understood");
            DeviceProperties::default()
        }
    }
}
