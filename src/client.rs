use http::header::{HeaderValue, CONTENT_TYPE};
use http::{HeaderMap, StatusCode};
use serde::Serialize;
use std::{fmt, sync::Arc};
use tracing::{debug, instrument};
use url::Url;

use crate::auth::{AuthMode, QuerySigner};
use crate::basic::BasicSigner;
use crate::config::{Credentials, Options};
use crate::error::{Error, Result};
use crate::executor::{HttpExecutor, HttpRequest, ResponseBody};
use crate::method::HttpMethod;
use crate::parameters::RequestParams;
use crate::util;
use crate::v1::{FixedClock, Signer};

#[cfg(feature = "reqwest")]
use crate::executor::ReqwestExecutor;

/// How much of a rejected response is kept in [`Error::Status`].
const ERROR_BODY_LIMIT: usize = 4096;

/// Store API client.
///
/// Holds only immutable state, so one instance can be shared between tasks.
/// Every request goes validate → sign → dispatch → check status; nothing is
/// retried.
pub struct Client {
    base_url: Url,
    credentials: Credentials,
    basic: BasicSigner,
    oauth: Signer,
    executor: Arc<dyn HttpExecutor>,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.base_url.as_str())
            .field("credentials", &self.credentials)
            .field("oauth", &self.oauth)
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Client using the default `reqwest` executor.
    #[cfg(feature = "reqwest")]
    pub fn new<K: Into<String>, S: Into<String>>(
        store: &str,
        consumer_key: K,
        consumer_secret: S,
        options: Options,
    ) -> Result<Self> {
        let executor = ReqwestExecutor::new(&options)?;
        Self::with_executor(
            store,
            Credentials::new(consumer_key, consumer_secret),
            options,
            executor,
        )
    }

    pub fn with_executor<E: HttpExecutor + 'static>(
        store: &str,
        credentials: Credentials,
        options: Options,
        executor: E,
    ) -> Result<Self> {
        let base_url = resolve_base_url(store, &options)?;
        let mut oauth = Signer::new();
        if let Some(timestamp) = options.oauth_timestamp {
            oauth = oauth.with_clock(FixedClock::from(timestamp));
        }
        Ok(Client {
            base_url,
            credentials,
            basic: BasicSigner,
            oauth,
            executor: Arc::new(executor),
        })
    }

    /// Replaces the OAuth signer, e.g. to inject a clock or nonce source.
    pub fn with_signer(mut self, signer: Signer) -> Self {
        self.oauth = signer;
        self
    }

    /// Store URL with prefix and version, always ending in `/`.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn auth_mode(&self) -> AuthMode {
        AuthMode::for_url(&self.base_url)
    }

    fn signer(&self, mode: AuthMode) -> &dyn QuerySigner {
        match mode {
            AuthMode::Basic => &self.basic,
            AuthMode::OAuth1 => &self.oauth,
        }
    }

    /// Full URL for a request, auth query included. No I/O.
    ///
    /// `endpoint` is appended to [`Client::base_url`] and must stay under it:
    /// dot segments that climb out of the API path are rejected. A query
    /// already present on `endpoint` is folded into the signed parameters,
    /// so the result carries exactly one query string.
    pub fn signed_url(
        &self,
        method: HttpMethod,
        endpoint: &str,
        params: RequestParams,
    ) -> Result<String> {
        let target = self.resolve_endpoint(endpoint)?;
        let (endpoint_url, inline) = util::url_to_endpoint_and_queries(&target);
        let mut params = params;
        params.extend(inline);

        let query = self.signer(AuthMode::for_url(&target)).sign_query(
            method,
            endpoint_url,
            params,
            &self.credentials,
        )?;
        Ok(format!("{}?{}", endpoint_url, query))
    }

    fn resolve_endpoint(&self, endpoint: &str) -> Result<Url> {
        let joined = format!(
            "{}{}",
            self.base_url.as_str(),
            endpoint.trim_start_matches('/')
        );
        let target =
            Url::parse(&joined).map_err(|_| Error::InvalidEndpoint(endpoint.to_string()))?;
        if target.origin() != self.base_url.origin()
            || !target.path().starts_with(self.base_url.path())
        {
            return Err(Error::InvalidEndpoint(endpoint.to_string()));
        }
        Ok(target)
    }

    /// Sends one request.
    ///
    /// `method` must be one of GET, POST, PUT, DELETE or OPTIONS; POST and
    /// PUT need a body, other methods drop it. Returns the body for 200 and
    /// 201, [`Error::Status`] for anything else.
    #[instrument(skip(self, params, body), fields(mode = %self.auth_mode()))]
    pub async fn request(
        &self,
        method: &str,
        endpoint: &str,
        params: Option<RequestParams>,
        body: Option<Vec<u8>>,
    ) -> Result<ResponseBody> {
        let method: HttpMethod = method.parse()?;
        let body = if method.is_write() {
            Some(body.ok_or(Error::MissingBody(method.as_str()))?)
        } else {
            None
        };

        let url = self.signed_url(method, endpoint, params.unwrap_or_default())?;

        let mut headers = HeaderMap::new();
        if method.is_write() {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }

        debug!("dispatching request");
        let response = self
            .executor
            .execute(HttpRequest {
                method,
                url,
                headers,
                body,
            })
            .await
            .map_err(Error::Transport)?;

        match response.status {
            StatusCode::OK | StatusCode::CREATED => Ok(response.body),
            status => {
                let body = response.body.excerpt(ERROR_BODY_LIMIT).await;
                debug!(%status, "request rejected");
                Err(Error::Status { status, body })
            }
        }
    }

    pub async fn get(&self, endpoint: &str, params: RequestParams) -> Result<ResponseBody> {
        self.request("GET", endpoint, Some(params), None).await
    }

    pub async fn post<B: Into<Vec<u8>>>(&self, endpoint: &str, body: B) -> Result<ResponseBody> {
        self.request("POST", endpoint, None, Some(body.into())).await
    }

    pub async fn put<B: Into<Vec<u8>>>(&self, endpoint: &str, body: B) -> Result<ResponseBody> {
        self.request("PUT", endpoint, None, Some(body.into())).await
    }

    pub async fn delete(&self, endpoint: &str, params: RequestParams) -> Result<ResponseBody> {
        self.request("DELETE", endpoint, Some(params), None).await
    }

    pub async fn options(&self, endpoint: &str) -> Result<ResponseBody> {
        self.request("OPTIONS", endpoint, None, None).await
    }

    pub async fn post_json<T: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        body: &T,
    ) -> Result<ResponseBody> {
        self.post(endpoint, serde_json::to_vec(body)?).await
    }

    pub async fn put_json<T: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        body: &T,
    ) -> Result<ResponseBody> {
        self.put(endpoint, serde_json::to_vec(body)?).await
    }
}

/// Keeps any path on the store URL and appends the API prefix and version.
fn resolve_base_url(store: &str, options: &Options) -> Result<Url> {
    let mut url = Url::parse(store)?;
    if url.cannot_be_a_base() || url.host_str().is_none() {
        return Err(Error::Config(format!("store URL has no host: {}", store)));
    }
    let path = format!(
        "{}{}",
        url.path().trim_end_matches('/'),
        options.base_path()
    );
    url.set_path(&path);
    url.set_query(None);
    url.set_fragment(None);
    Ok(url)
}
