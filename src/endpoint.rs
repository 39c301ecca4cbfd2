// GNU Affero General Public License v3.0 or later (see LICENSE or https://www.gnu.org/licenses/agpl.txt)
//! API endpoint resolution
//!
//! Turns whatever the operator configured (a bare hostname, a full URL, a URL
//! with a custom base path) into a well-formed HTTPS base URL, and builds the
//! request URLs for the individual API resources from it.

use std::fmt;

use url::Url;

use crate::error::InputError;

/// Production IBM Cloud Kubernetes Service API endpoint
pub const DEFAULT_API_ENDPOINT: &str = "https://containers.cloud.ibm.com/global";

/// Environment variable that overrides [`DEFAULT_API_ENDPOINT`]
pub const API_ENDPOINT_ENV: &str = "IBMCLOUD_CS_API_ENDPOINT";

/// Base path used when the configured endpoint has none
pub const DEFAULT_BASE_PATH: &str = "/global";

/// API resources served under the base path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    /// Kubernetes and OpenShift versions
    Versions,
    /// Cluster add-ons
    Addons,
}

impl Resource {
    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::Versions => "v1/versions",
            Self::Addons => "v1/addons",
        }
    }
}

/// Normalized HTTPS base URL of the API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiEndpoint {
    base: Url,
}

impl ApiEndpoint {
    /// Resolve the endpoint from an optional override
    ///
    /// `None` or an empty override falls back to [`DEFAULT_API_ENDPOINT`].
    ///
    /// # Errors
    /// Returns an error if the value cannot be parsed as a URL or has no host
    pub fn resolve(configured: Option<&str>) -> Result<Self, InputError> {
        let raw = configured
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_API_ENDPOINT);

        let rest = strip_scheme(raw, "https://")
            .or_else(|| strip_scheme(raw, "http://"))
            .unwrap_or(raw);
        let with_scheme = format!("https://{rest}");

        let invalid = |reason: String| InputError::InvalidEndpoint {
            endpoint: raw.to_string(),
            reason,
        };

        let mut base = Url::parse(&with_scheme).map_err(|e| invalid(e.to_string()))?;
        if base.host_str().is_none_or(str::is_empty) {
            return Err(invalid("missing host".to_string()));
        }

        let segments: Vec<&str> = base.path().split('/').filter(|s| !s.is_empty()).collect();
        let base_path = if segments.is_empty() {
            DEFAULT_BASE_PATH.to_string()
        } else {
            format!("/{}", segments.join("/"))
        };

        base.set_path(&base_path);
        base.set_query(None);
        base.set_fragment(None);

        Ok(Self { base })
    }

    /// Absolute request URL for a resource
    #[must_use]
    pub fn request_url(&self, resource: Resource) -> Url {
        let mut url = self.base.clone();
        url.set_path(&format!("{}/{}", self.base.path(), resource.path()));
        url
    }
}

/// Strip `scheme` from the front of `raw`, ignoring ASCII case
fn strip_scheme<'a>(raw: &'a str, scheme: &str) -> Option<&'a str> {
    raw.get(..scheme.len())
        .filter(|prefix| prefix.eq_ignore_ascii_case(scheme))
        .map(|_| &raw[scheme.len()..])
}

impl fmt::Display for ApiEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.base.as_str())
    }
}
