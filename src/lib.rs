// GNU Affero General Public License v3.0 or later (see LICENSE or https://www.gnu.org/licenses/agpl.txt)
//! IBM Cloud Kubernetes Service version lookup for Terraform
//!
//! This library reads a Terraform `external` data source query, calls the IBM
//! Cloud Kubernetes Service API once, and reshapes the answer into the flat
//! string map Terraform expects.

pub mod addons;
pub mod client;
pub mod endpoint;
pub mod error;
pub mod input;
pub mod output;
pub mod pipeline;
pub mod versions;

// Re-export commonly used items at the crate root for convenience
pub use addons::{AddonRecord, AddonSupport, AddonVersions, UNSUPPORTED, transform_addons};
pub use client::{CsClient, FetchOptions, HttpTransport, RawResponse, Request, Transport};
pub use endpoint::{API_ENDPOINT_ENV, ApiEndpoint, DEFAULT_API_ENDPOINT, Resource};
pub use error::{ApiError, DataError, Error, ErrorKind, InputError, NetworkError};
pub use input::{AddonsQuery, DEFAULT_PLATFORM, VersionsQuery};
pub use output::{ExternalData, emit, encode};
pub use pipeline::{fetch_addons, fetch_versions};
pub use versions::{PlatformVersions, VersionRecord, VersionsResponse, transform_versions};
