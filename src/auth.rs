use std::fmt;

use crate::config::Credentials;
use crate::error::Result;
use crate::method::HttpMethod;
use crate::parameters::RequestParams;

/// Turns the caller's parameters into the one query string sent on the wire.
pub trait QuerySigner: Send + Sync {
    /// # Parameters
    /// - method: the verb that will be dispatched.
    /// - endpoint: full target URL without query.
    /// - params: caller parameters; consumed since they are per request.
    /// - credentials: consumer key and secret.
    /// # Returns
    /// form-encoded query, without the leading `?`.
    fn sign_query(
        &self,
        method: HttpMethod,
        endpoint: &str,
        params: RequestParams,
        credentials: &Credentials,
    ) -> Result<String>;
}

/// How a request authenticates, decided by the transport.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthMode {
    /// Credentials ride in the query; only safe under TLS.
    Basic,
    /// HMAC-SHA256 signed query.
    OAuth1,
}

impl AuthMode {
    pub fn for_url(url: &url::Url) -> Self {
        if url.scheme() == "https" {
            AuthMode::Basic
        } else {
            AuthMode::OAuth1
        }
    }
}

impl fmt::Display for AuthMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthMode::Basic => f.write_str("basic"),
            AuthMode::OAuth1 => f.write_str("oauth1"),
        }
    }
}
