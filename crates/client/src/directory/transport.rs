//! Outbound transport seam for the directory client.

use bytes::Bytes;
use std::time::{Duration, Instant};

use super::DirectoryError;

/// A fully prepared directory request.
#[derive(Debug, Clone)]
pub struct DirectoryRequest {
    pub url: String,
    pub headers: Vec<(&'static str, String)>,
    pub timeout: Duration,
}

impl DirectoryRequest {
    /// Value of the first header with this name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Status and body of a directory response.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub body: Bytes,
}

/// Performs the single GET the directory client needs.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, req: &DirectoryRequest) -> Result<RawResponse, DirectoryError>;
}

/// reqwest-backed transport.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self, DirectoryError> {
        let http = reqwest::Client::builder().build()?;
        Ok(Self { http })
    }
}

#[async_trait::async_trait]
impl Transport for HttpTransport {
    async fn get(&self, req: &DirectoryRequest) -> Result<RawResponse, DirectoryError> {
        let start = Instant::now();

        let mut builder = self.http.get(&req.url).timeout(req.timeout);
        for (name, value) in &req.headers {
            builder = builder.header(*name, value);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?;

        tracing::debug!("directory responded in {:?}: status={}, {} bytes", start.elapsed(), status, body.len());

        Ok(RawResponse { status, body })
    }
}
