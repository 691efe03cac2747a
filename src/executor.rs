use async_trait::async_trait;
use http::{HeaderMap, StatusCode};
use serde::de::DeserializeOwned;
use std::fmt;

use crate::error::{BoxError, Error, Result};
use crate::method::HttpMethod;

#[cfg(feature = "reqwest")]
use crate::config::Options;

pub const USER_AGENT: &str = concat!("WooCommerce API Client-Rust/", env!("CARGO_PKG_VERSION"));

/// A fully built request, query string included.
#[derive(Debug)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: HeaderMap,
    pub body: Option<Vec<u8>>,
}

#[derive(Debug)]
pub struct HttpResponse {
    pub status: StatusCode,
    pub body: ResponseBody,
}

/// Sends requests. Connection pooling, TLS and timeouts live behind this.
#[async_trait]
pub trait HttpExecutor: Send + Sync {
    async fn execute(&self, request: HttpRequest) -> std::result::Result<HttpResponse, BoxError>;
}

/// Response body handed to the caller.
///
/// Dropping it releases the underlying connection.
pub struct ResponseBody {
    inner: BodyInner,
}

enum BodyInner {
    Buffered(Option<Vec<u8>>),
    #[cfg(feature = "reqwest")]
    Reqwest(reqwest::Response),
}

impl ResponseBody {
    pub fn from_bytes<B: Into<Vec<u8>>>(bytes: B) -> Self {
        ResponseBody {
            inner: BodyInner::Buffered(Some(bytes.into())),
        }
    }

    /// Next piece of the body, `None` once it is exhausted.
    pub async fn chunk(&mut self) -> Result<Option<Vec<u8>>> {
        match &mut self.inner {
            BodyInner::Buffered(bytes) => Ok(bytes.take().filter(|b| !b.is_empty())),
            #[cfg(feature = "reqwest")]
            BodyInner::Reqwest(response) => Ok(response.chunk().await?.map(|c| c.to_vec())),
        }
    }

    pub async fn bytes(self) -> Result<Vec<u8>> {
        match self.inner {
            BodyInner::Buffered(bytes) => Ok(bytes.unwrap_or_default()),
            #[cfg(feature = "reqwest")]
            BodyInner::Reqwest(response) => Ok(response.bytes().await?.to_vec()),
        }
    }

    pub async fn text(self) -> Result<String> {
        let bytes = self.bytes().await?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    pub async fn json<T: DeserializeOwned>(self) -> Result<T> {
        let bytes = self.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Reads at most `limit` bytes and drops the rest.
    pub(crate) async fn excerpt(mut self, limit: usize) -> String {
        let mut buf = Vec::new();
        while buf.len() < limit {
            match self.chunk().await {
                Ok(Some(chunk)) => buf.extend_from_slice(&chunk),
                _ => break,
            }
        }
        buf.truncate(limit);
        String::from_utf8_lossy(&buf).into_owned()
    }
}

impl fmt::Debug for ResponseBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.inner {
            BodyInner::Buffered(bytes) => f
                .debug_struct("ResponseBody")
                .field("buffered", &bytes.as_ref().map_or(0, Vec::len))
                .finish(),
            #[cfg(feature = "reqwest")]
            BodyInner::Reqwest(response) => f
                .debug_struct("ResponseBody")
                .field("content_length", &response.content_length())
                .finish(),
        }
    }
}

#[cfg(feature = "reqwest")]
impl From<reqwest::Response> for ResponseBody {
    fn from(response: reqwest::Response) -> Self {
        ResponseBody {
            inner: BodyInner::Reqwest(response),
        }
    }
}

/// [`HttpExecutor`] backed by a pooled `reqwest::Client`.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug)]
pub struct ReqwestExecutor {
    client: reqwest::Client,
}

#[cfg(feature = "reqwest")]
impl ReqwestExecutor {
    /// Honors `verify_ssl`, `timeout_secs` and `user_agent`.
    pub fn new(options: &Options) -> Result<Self> {
        let mut builder = reqwest::Client::builder()
            .user_agent(options.user_agent.as_deref().unwrap_or(USER_AGENT))
            .danger_accept_invalid_certs(!options.verify_ssl);
        if let Some(timeout) = options.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| Error::Config(format!("cannot build HTTP client: {}", e)))?;
        Ok(ReqwestExecutor { client })
    }

    pub fn from_client(client: reqwest::Client) -> Self {
        ReqwestExecutor { client }
    }
}

#[cfg(feature = "reqwest")]
#[async_trait]
impl HttpExecutor for ReqwestExecutor {
    async fn execute(&self, request: HttpRequest) -> std::result::Result<HttpResponse, BoxError> {
        let mut builder = self
            .client
            .request(request.method.into(), request.url.as_str())
            .headers(request.headers);
        if let Some(body) = request.body {
            builder = builder.body(body);
        }
        let response = builder.send().await?;
        Ok(HttpResponse {
            status: response.status(),
            body: ResponseBody::from(response),
        })
    }
}
