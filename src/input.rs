// GNU Affero General Public License v3.0 or later (see LICENSE or https://www.gnu.org/licenses/agpl.txt)
//! Reading and validating the Terraform query payload
//!
//! Terraform's `external` data source passes its `query` block as a single
//! JSON object on stdin. Every value in that object is a string.

use std::io::Read;

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::InputError;

/// Platform used when the payload does not name one
pub const DEFAULT_PLATFORM: &str = "openshift";

/// Raw payload keys as Terraform sends them
#[derive(Deserialize)]
struct RawQuery {
    #[serde(rename = "IAM_TOKEN", default)]
    iam_token: Option<String>,
    #[serde(rename = "PLATFORM", default)]
    platform: Option<String>,
    #[serde(rename = "REGION", default)]
    region: Option<String>,
}

/// Validated input for `csver versions`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionsQuery {
    pub iam_token: String,
    pub platform: String,
}

/// Validated input for `csver addons`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddonsQuery {
    pub iam_token: String,
    pub region: String,
}

impl VersionsQuery {
    /// Parse and validate a versions payload
    ///
    /// # Errors
    /// Returns an error if the payload is not a JSON object or `IAM_TOKEN` is
    /// missing or empty
    pub fn parse(text: &str) -> Result<Self, InputError> {
        let raw = parse_raw(text)?;
        let iam_token = required(raw.iam_token, "IAM_TOKEN")?;
        let platform = raw
            .platform
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| DEFAULT_PLATFORM.to_string());
        Ok(Self {
            iam_token,
            platform,
        })
    }
}

impl AddonsQuery {
    /// Parse and validate an add-ons payload
    ///
    /// # Errors
    /// Returns an error if the payload is not a JSON object, or `IAM_TOKEN` or
    /// `REGION` is missing or empty
    pub fn parse(text: &str) -> Result<Self, InputError> {
        let raw = parse_raw(text)?;
        let iam_token = required(raw.iam_token, "IAM_TOKEN")?;
        let region = required(raw.region, "REGION")?;
        Ok(Self { iam_token, region })
    }
}

/// Read all of `reader` into a string before any processing starts
///
/// # Errors
/// Returns an error if the stream cannot be read or is not UTF-8
pub fn read_to_string<R: Read>(mut reader: R) -> Result<String, InputError> {
    let mut text = String::new();
    reader
        .read_to_string(&mut text)
        .map_err(InputError::Read)?;
    Ok(text)
}

fn parse_raw(text: &str) -> Result<RawQuery, InputError> {
    // Going through a Map first rejects arrays, which serde would otherwise
    // accept as a positional struct.
    let object: Map<String, Value> = serde_json::from_str(text).map_err(InputError::Malformed)?;
    serde_json::from_value(Value::Object(object)).map_err(InputError::Malformed)
}

fn required(value: Option<String>, field: &'static str) -> Result<String, InputError> {
    value
        .filter(|v| !v.is_empty())
        .ok_or(InputError::MissingField(field))
}
