// GNU Affero General Public License v3.0 or later (see LICENSE or https://www.gnu.org/licenses/agpl.txt)
//! Blocking client for the IBM Cloud Kubernetes Service API
//!
//! [`Transport`] performs the actual GET and hands back the raw status and
//! body. [`CsClient`] builds the request, checks the status and parses the
//! JSON, so everything except the socket work can be exercised with a fake
//! transport.

use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::addons::AddonRecord;
use crate::endpoint::{ApiEndpoint, Resource};
use crate::error::{ApiError, BoxError, Error, NetworkError};
use crate::versions::VersionsResponse;

/// Options passed down to the transport
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchOptions {
    /// Give up on the request after this long (no limit when `None`)
    pub timeout: Option<Duration>,
}

/// A single outgoing GET request
#[derive(Debug, Clone)]
pub struct Request {
    pub url: Url,
    /// Header names are lowercase
    pub headers: Vec<(&'static str, String)>,
    pub timeout: Option<Duration>,
}

/// Status line and body of a response, before any interpretation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub reason: String,
    pub body: String,
}

/// Something that can perform a GET request
pub trait Transport {
    /// Send `request` and wait for the full response
    ///
    /// # Errors
    /// Returns an error only for transport failures (DNS, connect, TLS,
    /// timeout). Non-2xx statuses are regular responses.
    fn get(&self, request: &Request) -> Result<RawResponse, BoxError>;
}

/// [`Transport`] backed by attohttpc
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpTransport;

impl Transport for HttpTransport {
    fn get(&self, request: &Request) -> Result<RawResponse, BoxError> {
        let mut builder = attohttpc::get(request.url.as_str())
            .try_header("user-agent", format!("csver/{}", env!("CARGO_PKG_VERSION")))?;
        for (name, value) in &request.headers {
            builder = builder.try_header(*name, value.as_str())?;
        }
        if let Some(timeout) = request.timeout {
            builder = builder.timeout(timeout);
        }

        let response = builder.send()?;
        let status = response.status();
        let body = response.text()?;

        Ok(RawResponse {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or_default().to_string(),
            body,
        })
    }
}

/// Authenticated client for one API endpoint
pub struct CsClient<'a, T: Transport> {
    endpoint: &'a ApiEndpoint,
    iam_token: &'a str,
    options: FetchOptions,
    transport: &'a T,
}

impl<'a, T: Transport> CsClient<'a, T> {
    #[must_use]
    pub fn new(
        endpoint: &'a ApiEndpoint,
        iam_token: &'a str,
        options: FetchOptions,
        transport: &'a T,
    ) -> Self {
        Self {
            endpoint,
            iam_token,
            options,
            transport,
        }
    }

    /// List all container platform versions
    ///
    /// # Errors
    /// Returns a network error if the API is unreachable, or an API error for
    /// a non-200 status or an unparsable body
    pub fn versions(&self) -> Result<VersionsResponse, Error> {
        self.fetch(Resource::Versions, None)
    }

    /// List the add-ons available in `region`
    ///
    /// # Errors
    /// Same as [`CsClient::versions`]
    pub fn addons(&self, region: &str) -> Result<Vec<AddonRecord>, Error> {
        self.fetch(Resource::Addons, Some(region))
    }

    fn request(&self, resource: Resource, region: Option<&str>) -> Request {
        let mut headers = vec![
            ("authorization", format!("Bearer {}", self.iam_token)),
            ("accept", "application/json".to_string()),
        ];
        if let Some(region) = region {
            headers.push(("x-region", region.to_string()));
        }
        Request {
            url: self.endpoint.request_url(resource),
            headers,
            timeout: self.options.timeout,
        }
    }

    fn fetch<R: DeserializeOwned>(
        &self,
        resource: Resource,
        region: Option<&str>,
    ) -> Result<R, Error> {
        let request = self.request(resource, region);
        debug!(url = %request.url, "sending request");

        let response = self
            .transport
            .get(&request)
            .map_err(|source| NetworkError {
                url: request.url.to_string(),
                source,
            })?;
        debug!(status = response.status, bytes = response.body.len(), "received response");

        parse_response(response)
    }
}

/// Check the status and decode the body of a response
///
/// # Errors
/// Returns [`ApiError::Status`] for anything but 200 (the body is not parsed)
/// and [`ApiError::MalformedBody`] if a 200 body does not decode into `R`
pub fn parse_response<R: DeserializeOwned>(response: RawResponse) -> Result<R, Error> {
    if response.status != 200 {
        return Err(ApiError::Status {
            status: response.status,
            reason: response.reason,
            body: response.body,
        }
        .into());
    }
    serde_json::from_str(&response.body).map_err(|e| ApiError::MalformedBody(e).into())
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::error::ErrorKind;

    struct Recorder {
        response: RawResponse,
        seen: RefCell<Vec<Request>>,
    }

    impl Recorder {
        fn ok(body: &str) -> Self {
            Self {
                response: RawResponse {
                    status: 200,
                    reason: "OK".into(),
                    body: body.into(),
                },
                seen: RefCell::new(Vec::new()),
            }
        }
    }

    impl Transport for Recorder {
        fn get(&self, request: &Request) -> Result<RawResponse, BoxError> {
            self.seen.borrow_mut().push(request.clone());
            Ok(self.response.clone())
        }
    }

    struct Unreachable;

    impl Transport for Unreachable {
        fn get(&self, _request: &Request) -> Result<RawResponse, BoxError> {
            Err("connection refused".into())
        }
    }

    fn header<'r>(request: &'r Request, name: &str) -> Option<&'r str> {
        request
            .headers
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }

    #[test]
    fn versions_request_carries_token_and_accept() {
        let endpoint = ApiEndpoint::resolve(Some("example.com")).unwrap();
        let transport = Recorder::ok(r#"{"openshift": []}"#);
        let options = FetchOptions {
            timeout: Some(Duration::from_secs(5)),
        };
        let client = CsClient::new(&endpoint, "tok", options, &transport);

        client.versions().unwrap();

        let seen = transport.seen.borrow();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].url.as_str(), "https://example.com/global/v1/versions");
        assert_eq!(header(&seen[0], "authorization"), Some("Bearer tok"));
        assert_eq!(header(&seen[0], "accept"), Some("application/json"));
        assert_eq!(header(&seen[0], "x-region"), None);
        assert_eq!(seen[0].timeout, Some(Duration::from_secs(5)));
    }

    #[test]
    fn addons_request_carries_region() {
        let endpoint = ApiEndpoint::resolve(None).unwrap();
        let transport = Recorder::ok("[]");
        let client = CsClient::new(&endpoint, "tok", FetchOptions::default(), &transport);

        let addons = client.addons("us-south").unwrap();
        assert!(addons.is_empty());

        let seen = transport.seen.borrow();
        assert_eq!(
            seen[0].url.as_str(),
            "https://containers.cloud.ibm.com/global/v1/addons"
        );
        assert_eq!(header(&seen[0], "x-region"), Some("us-south"));
    }

    #[test]
    fn non_200_is_an_api_error_with_body() {
        let response = RawResponse {
            status: 401,
            reason: "Unauthorized".into(),
            body: "{\"incidentID\": \"abc\"}".into(),
        };
        let err = parse_response::<VersionsResponse>(response).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Api);
        let message = err.to_string();
        assert!(message.contains("401"), "{message}");
        assert!(message.contains("Unauthorized"), "{message}");
        assert!(message.contains("incidentID"), "{message}");
    }

    #[test]
    fn unparsable_success_body_is_an_api_error() {
        let response = RawResponse {
            status: 200,
            reason: "OK".into(),
            body: "<html>maintenance</html>".into(),
        };
        let err = parse_response::<VersionsResponse>(response).unwrap_err();
        assert!(matches!(err, Error::Api(ApiError::MalformedBody(_))));
    }

    #[test]
    fn transport_failure_is_a_network_error() {
        let endpoint = ApiEndpoint::resolve(None).unwrap();
        let client = CsClient::new(&endpoint, "tok", FetchOptions::default(), &Unreachable);

        let err = client.versions().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Network);
        assert!(err.to_string().contains("connection refused"));
    }
}
