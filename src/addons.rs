// GNU Affero General Public License v3.0 or later (see LICENSE or https://www.gnu.org/licenses/agpl.txt)
//! Cluster add-on versions
//!
//! The `/v1/addons` resource returns a flat list with one record per add-on
//! version. This module groups it by add-on name, then by version.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::DataError;

/// Range reported when the API does not state one
pub const UNSUPPORTED: &str = "unsupported";

/// One add-on version as returned by the API
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AddonRecord {
    pub name: String,
    pub version: String,
    #[serde(
        rename = "supportedOCPRange",
        default = "unsupported",
        deserialize_with = "range_or_unsupported"
    )]
    pub supported_ocp_range: String,
    #[serde(
        rename = "supportedKubeRange",
        default = "unsupported",
        deserialize_with = "range_or_unsupported"
    )]
    pub supported_kube_range: String,
}

fn unsupported() -> String {
    UNSUPPORTED.to_string()
}

fn range_or_unsupported<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_else(unsupported))
}

/// Compatibility ranges of one add-on version
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddonSupport {
    pub supported_openshift_range: String,
    pub supported_kubernetes_range: String,
}

/// Version string to compatibility ranges
pub type AddonVersions = BTreeMap<String, AddonSupport>;

/// Group add-on records by name and version
///
/// A later record with the same name and version replaces the earlier one.
///
/// # Errors
/// Returns [`DataError::NoAddons`] if there are no records
pub fn transform_addons(
    records: Vec<AddonRecord>,
) -> Result<BTreeMap<String, AddonVersions>, DataError> {
    let mut result: BTreeMap<String, AddonVersions> = BTreeMap::new();

    for record in records {
        result.entry(record.name).or_default().insert(
            record.version,
            AddonSupport {
                supported_openshift_range: record.supported_ocp_range,
                supported_kubernetes_range: record.supported_kube_range,
            },
        );
    }

    if result.is_empty() {
        return Err(DataError::NoAddons);
    }
    Ok(result)
}
