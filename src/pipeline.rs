// GNU Affero General Public License v3.0 or later (see LICENSE or https://www.gnu.org/licenses/agpl.txt)
//! Input to output for each subcommand
//!
//! Both pipelines validate the payload before touching the network, so a bad
//! payload never results in a request.

use tracing::debug;

use crate::addons::transform_addons;
use crate::client::{CsClient, FetchOptions, Transport};
use crate::endpoint::ApiEndpoint;
use crate::error::Error;
use crate::input::{AddonsQuery, VersionsQuery};
use crate::output::{ExternalData, encode};
use crate::versions::transform_versions;

/// Fetch the versions of the platform named in `input`
///
/// # Errors
/// Returns the first failure of any stage; see [`Error`]
pub fn fetch_versions<T: Transport>(
    input: &str,
    endpoint: &ApiEndpoint,
    options: FetchOptions,
    transport: &T,
) -> Result<ExternalData, Error> {
    let query = VersionsQuery::parse(input)?;
    debug!(platform = %query.platform, "fetching platform versions");

    let client = CsClient::new(endpoint, &query.iam_token, options, transport);
    let response = client.versions()?;
    let versions = transform_versions(&response, &query.platform)?;

    Ok(encode(&versions)?)
}

/// Fetch the add-ons available in the region named in `input`
///
/// # Errors
/// Returns the first failure of any stage; see [`Error`]
pub fn fetch_addons<T: Transport>(
    input: &str,
    endpoint: &ApiEndpoint,
    options: FetchOptions,
    transport: &T,
) -> Result<ExternalData, Error> {
    let query = AddonsQuery::parse(input)?;
    debug!(region = %query.region, "fetching add-on versions");

    let client = CsClient::new(endpoint, &query.iam_token, options, transport);
    let records = client.addons(&query.region)?;
    debug!(records = records.len(), "transforming add-ons");
    let addons = transform_addons(records)?;

    Ok(encode(&addons)?)
}
