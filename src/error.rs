// GNU Affero General Public License v3.0 or later (see LICENSE or https://www.gnu.org/licenses/agpl.txt)
//! Error types for csver
//!
//! Every stage of the pipeline fails with one of the enums below. They are all
//! terminal: nothing is retried and `main` reports the error once on stderr.

use thiserror::Error;

/// Boxed cause carried by transport failures
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Top-level error returned by the fetch pipeline
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Network(#[from] NetworkError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Data(#[from] DataError),

    /// The transformed data could not be serialized
    #[error("failed to encode output: {0}")]
    Encode(#[from] serde_json::Error),

    /// Writing the result to stdout failed
    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

/// Coarse classification of an [`Error`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Input,
    Network,
    Api,
    Data,
    Output,
}

impl Error {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Input(_) => ErrorKind::Input,
            Self::Network(_) => ErrorKind::Network,
            Self::Api(_) => ErrorKind::Api,
            Self::Data(_) => ErrorKind::Data,
            Self::Encode(_) | Self::Output(_) => ErrorKind::Output,
        }
    }
}

/// Problems with the stdin payload or the configured endpoint
#[derive(Debug, Error)]
pub enum InputError {
    #[error("failed to read input: {0}")]
    Read(#[source] std::io::Error),

    #[error("invalid JSON input: {0}")]
    Malformed(#[source] serde_json::Error),

    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("invalid API endpoint '{endpoint}': {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },
}

/// The upstream API could not be reached at all
#[derive(Debug, Error)]
#[error("HTTP request to {url} failed: {source}")]
pub struct NetworkError {
    pub url: String,
    #[source]
    pub source: BoxError,
}

/// The upstream API answered, but not with a usable success response
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("API request failed: {status} {reason} - {body}")]
    Status {
        status: u16,
        reason: String,
        body: String,
    },

    #[error("API returned an unparsable response body: {0}")]
    MalformedBody(#[source] serde_json::Error),
}

/// The response parsed fine but holds nothing to transform
#[derive(Debug, Error)]
pub enum DataError {
    #[error("No versions found for platform '{0}'")]
    PlatformNotFound(String),

    #[error("No add-on data found")]
    NoAddons,
}
