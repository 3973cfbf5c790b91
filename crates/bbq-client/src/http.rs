//! Blocking HTTP implementation of [`GardenClient`].
//!
//! Speaks the Garden REST dialect:
//! - `POST /containers` with a JSON container spec
//! - `GET /containers` with the property filter as query pairs
//! - `DELETE /containers/{handle}`

use std::time::{Duration, Instant};

use bbq_common::types::{ContainerRecord, ContainerSpec, Handle, Properties};
use reqwest::Url;
use reqwest::blocking::{Client, Response};
use serde::de::DeserializeOwned;

use crate::client::GardenClient;
use crate::error::{ClientError, Result};
use crate::wire::{CreateResponse, ErrorResponse, ListResponse};

const CREATE: &str = "create container";
const LIST: &str = "list containers";
const DESTROY: &str = "destroy container";

/// Builder for configuring an [`HttpGardenClient`].
#[derive(Debug)]
pub struct HttpGardenClientBuilder {
    address: String,
    timeout: Option<Duration>,
}

impl HttpGardenClientBuilder {
    /// Sets the per-request deadline. `None` (the default) waits for the
    /// service however long a call takes.
    #[must_use]
    pub fn timeout(mut self, timeout: impl Into<Option<Duration>>) -> Self {
        self.timeout = timeout.into();
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::InvalidAddress` if the address is not a usable
    /// HTTP base URL, or `ClientError::Transport` if the HTTP client cannot
    /// be initialized.
    pub fn build(self) -> Result<HttpGardenClient> {
        let base = base_url(&self.address)?;
        let http = Client::builder()
            .timeout(self.timeout)
            .no_proxy()
            .build()
            .map_err(|source| ClientError::Transport {
                operation: "initialize client",
                source,
            })?;
        tracing::debug!(
            base = %base,
            timeout_secs = self.timeout.map(|t| t.as_secs_f64()),
            "garden client ready"
        );
        Ok(HttpGardenClient { base, http })
    }
}

/// Garden client over plain HTTP.
#[derive(Debug, Clone)]
pub struct HttpGardenClient {
    base: Url,
    http: Client,
}

impl HttpGardenClient {
    /// Starts configuring a client for the service at `address`.
    ///
    /// `address` is either `host:port` or a full `http://` URL.
    #[must_use]
    pub fn builder(address: impl Into<String>) -> HttpGardenClientBuilder {
        HttpGardenClientBuilder {
            address: address.into(),
            timeout: None,
        }
    }

    /// Returns the base URL requests are sent to.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base
    }

    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            let _ = path.pop_if_empty().extend(segments);
        }
        url
    }
}

impl GardenClient for HttpGardenClient {
    fn create(&self, spec: &ContainerSpec) -> Result<ContainerRecord> {
        let started = Instant::now();
        let response = self
            .http
            .post(self.url(&["containers"]))
            .json(spec)
            .send()
            .map_err(|source| ClientError::Transport {
                operation: CREATE,
                source,
            })?;
        let body: CreateResponse = decode(CREATE, response)?;
        tracing::debug!(
            handle = %body.handle,
            elapsed_ms = started.elapsed().as_millis(),
            "container created"
        );
        Ok(ContainerRecord {
            handle: body.handle,
        })
    }

    fn list(&self, properties: &Properties) -> Result<Vec<ContainerRecord>> {
        let started = Instant::now();
        let mut url = self.url(&["containers"]);
        if !properties.is_empty() {
            let _ = url.query_pairs_mut().extend_pairs(properties);
        }
        let response = self
            .http
            .get(url)
            .send()
            .map_err(|source| ClientError::Transport {
                operation: LIST,
                source,
            })?;
        let body: ListResponse = decode(LIST, response)?;
        tracing::debug!(
            count = body.handles.len(),
            elapsed_ms = started.elapsed().as_millis(),
            "containers listed"
        );
        Ok(body
            .handles
            .into_iter()
            .map(|handle| ContainerRecord { handle })
            .collect())
    }

    fn destroy(&self, handle: &Handle) -> Result<()> {
        let started = Instant::now();
        let response = self
            .http
            .delete(self.url(&["containers", handle.as_str()]))
            .send()
            .map_err(|source| ClientError::Transport {
                operation: DESTROY,
                source,
            })?;
        let _ = read_success(DESTROY, response)?;
        tracing::debug!(
            handle = %handle,
            elapsed_ms = started.elapsed().as_millis(),
            "container destroyed"
        );
        Ok(())
    }
}

/// Turns `host:port` or a URL into a base URL for requests.
fn base_url(address: &str) -> Result<Url> {
    let address = address.trim();
    let invalid = |message: String| ClientError::InvalidAddress {
        address: address.to_string(),
        message,
    };
    if address.is_empty() {
        return Err(invalid("address is empty".to_string()));
    }

    let candidate = if address.contains("://") {
        address.to_string()
    } else {
        format!("http://{address}")
    };
    let url = Url::parse(&candidate).map_err(|e| invalid(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        other => return Err(invalid(format!("unsupported scheme '{other}'"))),
    }
    if url.host_str().is_none_or(str::is_empty) {
        return Err(invalid("missing host".to_string()));
    }
    Ok(url)
}

/// Reads the body of a response, turning non-success statuses into errors.
fn read_success(operation: &'static str, response: Response) -> Result<String> {
    let status = response.status();
    let body = response
        .text()
        .map_err(|source| ClientError::Transport { operation, source })?;
    if status.is_success() {
        return Ok(body);
    }
    let err = ErrorResponse::parse(&body);
    Err(ClientError::Service {
        operation,
        status: status.as_u16(),
        kind: err.kind,
        message: err.message,
    })
}

fn decode<T: DeserializeOwned>(operation: &'static str, response: Response) -> Result<T> {
    let body = read_success(operation, response)?;
    serde_json::from_str(&body).map_err(|source| ClientError::Decode { operation, source })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_adds_http_scheme() {
        let url = base_url("127.0.0.1:7777").expect("valid address");
        assert_eq!(url.as_str(), "http://127.0.0.1:7777/");
    }

    #[test]
    fn base_url_keeps_explicit_scheme_and_path() {
        let url = base_url("http://garden.local:7777/api").expect("valid address");
        assert_eq!(url.host_str(), Some("garden.local"));
        assert_eq!(url.path(), "/api");
    }

    #[test]
    fn base_url_rejects_empty_address() {
        assert!(matches!(
            base_url("   "),
            Err(ClientError::InvalidAddress { .. })
        ));
    }

    #[test]
    fn base_url_rejects_unknown_scheme() {
        assert!(base_url("unix:///var/run/garden.sock").is_err());
    }

    #[test]
    fn container_urls_are_joined_under_base() {
        let client = HttpGardenClient::builder("127.0.0.1:7777")
            .build()
            .expect("client builds");
        assert_eq!(
            client.url(&["containers", "bbq-3"]).as_str(),
            "http://127.0.0.1:7777/containers/bbq-3"
        );
    }

    #[test]
    fn container_urls_respect_base_path() {
        let client = HttpGardenClient::builder("http://10.0.0.1:7777/garden")
            .build()
            .expect("client builds");
        assert_eq!(
            client.url(&["containers"]).as_str(),
            "http://10.0.0.1:7777/garden/containers"
        );
    }
}
