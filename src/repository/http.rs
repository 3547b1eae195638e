//! HTTP backend
//!
//! Read-only: resources are probed with `HEAD` (falling back to `GET` for
//! servers that refuse it), fetched with `GET` and listed by scraping the
//! directory index. Uploads are a permanent capability gap, not a transient
//! failure.

use std::io::Read;
use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use reqwest::blocking::{Client, Response};
use reqwest::header::{CONTENT_LENGTH, HeaderMap, LAST_MODIFIED};
use tracing::debug;

use super::Transport;
use super::lister::{DirectoryLister, HtmlIndexLister};
use super::location::{self, Scheme};
use super::resource::Resource;
use crate::error::{Result, repository};

/// Request timeout for probes, downloads and index pages
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// `reqwest`-backed transport for `http://` and `https://` locations
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    lister: HtmlIndexLister,
}

impl HttpTransport {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("ivyfetch/", env!("CARGO_PKG_VERSION")))
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| repository::network("http", e.to_string()))?;
        Ok(Self::with_client(client))
    }

    /// Transport sharing an existing client
    pub fn with_client(client: Client) -> Self {
        let lister = HtmlIndexLister::new(client.clone());
        Self { client, lister }
    }

    fn send_head(&self, location: &str) -> Result<Response> {
        let url = location::parse(location)?;
        self.client
            .head(url)
            .send()
            .map_err(|e| repository::network(location, e.to_string()))
    }

    fn send_get(&self, location: &str) -> Result<Response> {
        let url = location::parse(location)?;
        self.client
            .get(url)
            .send()
            .map_err(|e| repository::network(location, e.to_string()))
    }
}

fn is_missing(status: StatusCode) -> bool {
    status == StatusCode::NOT_FOUND || status == StatusCode::GONE
}

fn header_content_length(headers: &HeaderMap) -> Option<u64> {
    headers
        .get(CONTENT_LENGTH)?
        .to_str()
        .ok()?
        .trim()
        .parse()
        .ok()
}

fn header_last_modified(headers: &HeaderMap) -> Option<DateTime<Utc>> {
    let value = headers.get(LAST_MODIFIED)?.to_str().ok()?;
    DateTime::parse_from_rfc2822(value)
        .ok()
        .map(|date| date.with_timezone(&Utc))
}

impl Transport for HttpTransport {
    fn kind(&self) -> &'static str {
        Scheme::Http.name()
    }

    fn serves(&self, location: &str) -> bool {
        Scheme::of(location) == Some(Scheme::Http)
    }

    fn probe(&self, location: &str) -> Result<Resource> {
        let mut response = self.send_head(location)?;
        if response.status() == StatusCode::METHOD_NOT_ALLOWED
            || response.status() == StatusCode::NOT_IMPLEMENTED
        {
            debug!("HEAD refused for {}, probing with GET", location);
            response = self.send_get(location)?;
        }

        let status = response.status();
        if is_missing(status) {
            return Ok(Resource::missing(location));
        }
        if !status.is_success() {
            return Err(repository::network(location, format!("HTTP {status}")));
        }

        let headers = response.headers();
        Ok(Resource::new(
            location,
            true,
            header_content_length(headers),
            header_last_modified(headers),
        ))
    }

    fn open(&self, resource: &Resource) -> Result<Box<dyn Read + Send>> {
        let response = self.send_get(resource.location())?;
        let status = response.status();
        if is_missing(status) {
            return Err(repository::not_found(resource.location()));
        }
        if !status.is_success() {
            return Err(repository::network(
                resource.location(),
                format!("HTTP {status}"),
            ));
        }
        Ok(Box::new(response))
    }

    fn list(&self, parent: &str) -> Result<Option<Vec<String>>> {
        self.lister.list(parent)
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;
    use crate::error::IvyError;
    use crate::test_fixtures::http_client;
    use httpmock::Method::{GET, HEAD};
    use httpmock::MockServer;

    fn transport() -> HttpTransport {
        HttpTransport::with_client(http_client())
    }

    #[test]
    fn test_probe_uses_head() {
        let server = MockServer::start();
        let head = server.mock(|when, then| {
            when.method(HEAD).path("/repo/a.jar");
            then.status(200)
                .header("Last-Modified", "Wed, 21 Oct 2015 07:28:00 GMT");
        });

        let resource = transport().probe(&server.url("/repo/a.jar")).expect("probe");
        assert!(resource.exists());
        assert!(resource.last_modified().is_some());
        head.assert();
    }

    #[test]
    fn test_probe_falls_back_to_get_when_head_refused() {
        let server = MockServer::start();
        let head = server.mock(|when, then| {
            when.method(HEAD).path("/repo/a.jar");
            then.status(405);
        });
        let get = server.mock(|when, then| {
            when.method(GET).path("/repo/a.jar");
            then.status(200).body("hello");
        });

        let resource = transport().probe(&server.url("/repo/a.jar")).expect("probe");
        assert!(resource.exists());
        assert_eq!(resource.content_length(), Some(5));
        head.assert();
        get.assert();
    }

    #[test]
    fn test_probe_missing_resource() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(HEAD).path("/repo/gone.jar");
            then.status(410);
        });

        let transport = transport();
        // No mock for this path; the server answers 404
        assert!(!transport.probe(&server.url("/repo/missing.jar")).expect("probe").exists());
        assert!(!transport.probe(&server.url("/repo/gone.jar")).expect("probe").exists());
    }

    #[test]
    fn test_probe_server_error_is_network_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(HEAD).path("/repo/broken.jar");
            then.status(500);
        });

        let err = transport()
            .probe(&server.url("/repo/broken.jar"))
            .expect_err("server error");
        assert!(matches!(err, IvyError::Network { .. }));
    }

    #[test]
    fn test_probe_unreachable_host_is_network_error() {
        // Port 9 (discard) on localhost is closed in test environments
        let err = transport()
            .probe("http://127.0.0.1:9/repo/a.jar")
            .expect_err("connection refused");
        assert!(matches!(err, IvyError::Network { .. }));
    }

    #[test]
    fn test_open_streams_body() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/repo/a.jar");
            then.status(200).body("hello");
        });

        let resource = Resource::new(server.url("/repo/a.jar"), true, Some(5), None);
        let mut body = String::new();
        transport()
            .open(&resource)
            .expect("open")
            .read_to_string(&mut body)
            .expect("read");
        assert_eq!(body, "hello");
    }

    #[test]
    fn test_open_vanished_resource_is_not_found() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/repo/a.jar");
            then.status(404);
        });

        let resource = Resource::new(server.url("/repo/a.jar"), true, None, None);
        let err = transport().open(&resource).err().expect("missing");
        assert!(matches!(err, IvyError::ResourceNotFound { .. }));
    }

    #[test]
    fn test_header_parsing() {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_LENGTH, "42".parse().expect("header"));
        headers.insert(
            LAST_MODIFIED,
            "Wed, 21 Oct 2015 07:28:00 GMT".parse().expect("header"),
        );
        assert_eq!(header_content_length(&headers), Some(42));
        let modified = header_last_modified(&headers).expect("date");
        assert_eq!(modified.to_rfc3339(), "2015-10-21T07:28:00+00:00");
    }
}
