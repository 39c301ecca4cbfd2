// GNU Affero General Public License v3.0 or later (see LICENSE or https://www.gnu.org/licenses/agpl.txt)
//! Container platform versions
//!
//! The `/v1/versions` resource returns one list of version records per
//! platform (`openshift`, `kubernetes`). This module picks one platform and
//! flattens its list into dotted version strings plus the default version.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{ApiError, DataError, Error};

/// Body of `/v1/versions`, keyed by platform name
///
/// Only the requested platform is decoded into [`VersionRecord`]s, so other
/// keys may hold anything.
pub type VersionsResponse = Map<String, Value>;

/// One version entry as returned by the API
///
/// The API sends more fields (end of service dates etc.); only these are used.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VersionRecord {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
    #[serde(default)]
    pub default: Option<bool>,
}

impl VersionRecord {
    /// Version as "major.minor.patch"
    #[must_use]
    pub fn dotted(&self) -> String {
        format!("{}.{}.{}", self.major, self.minor, self.patch)
    }

    #[must_use]
    pub fn is_default(&self) -> bool {
        self.default.unwrap_or(false)
    }
}

/// Versions available for one platform
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformVersions {
    /// Every version in API order
    pub valid_versions: Vec<String>,
    /// The version marked as default, if any
    pub default: Option<String>,
}

impl PlatformVersions {
    /// Flatten version records, keeping their order
    ///
    /// When more than one record is marked default the last one wins.
    #[must_use]
    pub fn from_records(records: &[VersionRecord]) -> Self {
        let mut default = None;
        let valid_versions = records
            .iter()
            .map(|record| {
                let dotted = record.dotted();
                if record.is_default() {
                    default = Some(dotted.clone());
                }
                dotted
            })
            .collect();
        Self {
            valid_versions,
            default,
        }
    }
}

/// Extract the versions of `platform` from an API response
///
/// # Errors
/// Returns [`DataError::PlatformNotFound`] if the platform is missing or its
/// value is empty or falsy, and [`ApiError::MalformedBody`] if its value is
/// not a list of version records
pub fn transform_versions(
    response: &VersionsResponse,
    platform: &str,
) -> Result<BTreeMap<String, PlatformVersions>, Error> {
    let value = response
        .get(platform)
        .filter(|value| !is_falsy(value))
        .ok_or_else(|| DataError::PlatformNotFound(platform.to_string()))?;
    let records = Vec::<VersionRecord>::deserialize(value).map_err(ApiError::MalformedBody)?;

    Ok(BTreeMap::from([(
        platform.to_string(),
        PlatformVersions::from_records(&records),
    )]))
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(json: &str) -> VersionsResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn openshift_versions_and_default() {
        let api = response(
            r#"{"openshift": [
                {"major": 4, "minor": 10, "patch": 3, "default": true},
                {"major": 4, "minor": 11, "patch": 0}
            ]}"#,
        );
        let result = transform_versions(&api, "openshift").unwrap();
        let openshift = &result["openshift"];
        assert_eq!(openshift.valid_versions, vec!["4.10.3", "4.11.0"]);
        assert_eq!(openshift.default.as_deref(), Some("4.10.3"));
        assert_eq!(result.len(), 1);
    }

    #[test]
    fn only_requested_platform_is_returned() {
        let api = response(
            r#"{
                "openshift": [{"major": 4, "minor": 14, "patch": 1}],
                "kubernetes": [
                    {"major": 1, "minor": 29, "patch": 8, "end_of_service": "2025-04-30"},
                    {"major": 1, "minor": 30, "patch": 4, "default": true}
                ]
            }"#,
        );
        let result = transform_versions(&api, "kubernetes").unwrap();
        assert!(!result.contains_key("openshift"));
        assert_eq!(result["kubernetes"].valid_versions, vec!["1.29.8", "1.30.4"]);
        assert_eq!(result["kubernetes"].default.as_deref(), Some("1.30.4"));
    }

    #[test]
    fn no_default_marker_gives_null() {
        let api = response(r#"{"openshift": [{"major": 4, "minor": 15, "patch": 2, "default": false}]}"#);
        let result = transform_versions(&api, "openshift").unwrap();
        assert_eq!(result["openshift"].default, None);
        assert_eq!(
            serde_json::to_string(&result["openshift"]).unwrap(),
            r#"{"valid_versions":["4.15.2"],"default":null}"#
        );
    }

    #[test]
    fn last_default_marker_wins() {
        let api = response(
            r#"{"openshift": [
                {"major": 4, "minor": 12, "patch": 0, "default": true},
                {"major": 4, "minor": 13, "patch": 0, "default": true}
            ]}"#,
        );
        let result = transform_versions(&api, "openshift").unwrap();
        assert_eq!(result["openshift"].default.as_deref(), Some("4.13.0"));
    }

    #[test]
    fn empty_missing_or_falsy_platform_is_a_data_error() {
        let api = response(
            r#"{"kubernetes": [], "openshift": null, "a": false, "b": "", "c": 0, "d": {}}"#,
        );
        for platform in ["kubernetes", "openshift", "a", "b", "c", "d", "satellite"] {
            let err = transform_versions(&api, platform).unwrap_err();
            assert!(
                matches!(&err, Error::Data(DataError::PlatformNotFound(p)) if p == platform),
                "{platform}"
            );
        }
    }

    #[test]
    fn other_keys_are_not_decoded() {
        let api = response(
            r#"{
                "openshift": [{"major": 4, "minor": 16, "patch": 1, "default": true}],
                "kubernetes": [{"major": "1", "minor": 30, "patch": 4}],
                "generated": "2025-01-01"
            }"#,
        );
        let result = transform_versions(&api, "openshift").unwrap();
        assert_eq!(result["openshift"].valid_versions, vec!["4.16.1"]);
        assert_eq!(result["openshift"].default.as_deref(), Some("4.16.1"));
    }

    #[test]
    fn malformed_target_records_are_an_api_error() {
        let api = response(r#"{"kubernetes": [{"major": "1", "minor": 30, "patch": 4}], "openshift": true}"#);
        for platform in ["kubernetes", "openshift"] {
            let err = transform_versions(&api, platform).unwrap_err();
            assert!(matches!(err, Error::Api(ApiError::MalformedBody(_))), "{platform}");
        }
    }
}
