use base64::engine::general_purpose;
use base64::Engine;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::{fmt, sync::Arc};
use tracing::trace;

use crate::auth::QuerySigner;
use crate::config::Credentials;
use crate::error::Result;
use crate::method::HttpMethod;
use crate::parameters::RequestParams;
use crate::util;
use crate::v1::source::{Clock, FixedClock, FixedNonce, NonceSource, OsNonce, SystemClock};
use crate::v1::values::*;

type HmacSha256 = Hmac<Sha256>;

/// Everything produced while signing one request.
#[derive(Clone, Debug)]
pub struct SignedContent {
    pub signature: String,
    pub nonce: String,
    pub timestamp: i64,
    /// Sorted `key=value` pairs that were signed, values unencoded.
    pub parameter_string: String,
    pub base_string: String,
    /// Caller parameters plus every `oauth_*` field, signature included.
    pub payload: RequestParams,
}

impl SignedContent {
    /// Form-encoded query in canonical order.
    pub fn to_query(&self) -> String {
        util::encode_query(self.payload.canonical())
    }
}

/// OAuth 1.0a query signer for stores served over plain HTTP.
///
/// Timestamp and nonce come from injected sources so a signature can be
/// reproduced; by default they are the system clock and OS entropy.
#[derive(Clone)]
pub struct Signer {
    clock: Arc<dyn Clock>,
    nonce_source: Arc<dyn NonceSource>,
}

impl Default for Signer {
    fn default() -> Self {
        Signer {
            clock: Arc::new(SystemClock),
            nonce_source: Arc::new(OsNonce),
        }
    }
}

impl fmt::Debug for Signer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signer").finish_non_exhaustive()
    }
}

impl Signer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_clock<C: Clock + 'static>(mut self, clock: C) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    pub fn with_nonce_source<N: NonceSource + 'static>(mut self, source: N) -> Self {
        self.nonce_source = Arc::new(source);
        self
    }

    /// Pins `oauth_timestamp` for every request.
    pub fn oauth_timestamp(self, timestamp: i64) -> Self {
        self.with_clock(FixedClock(timestamp))
    }

    /// Pins `oauth_nonce` for every request.
    pub fn oauth_nonce<N: Into<String>>(self, nonce: N) -> Self {
        self.with_nonce_source(FixedNonce(nonce.into()))
    }

    /// Signs one request and keeps the intermediate strings.
    pub fn sign_with_context(
        &self,
        method: HttpMethod,
        endpoint: &str,
        params: RequestParams,
        credentials: &Credentials,
    ) -> Result<SignedContent> {
        let timestamp = self.clock.timestamp();
        let nonce = self.nonce_source.nonce()?;

        let mut payload = params;
        payload
            .push(OAUTH_PARAM_KEY_CONSUMER_KEY, credentials.consumer_key())
            .push(OAUTH_PARAM_KEY_TIMESTAMP, timestamp)
            .push(OAUTH_PARAM_KEY_NONCE, nonce.as_str())
            .push(
                OAUTH_PARAM_KEY_SIGNATURE_METHOD,
                OAUTH_VALUE_SIGMETHOD_HMACSHA256,
            );

        let parameter_string = parameter_string(&payload);
        let base_string = signature_base_string(method.as_str(), endpoint, &parameter_string);
        let signature = sign_hmac_sha256(credentials.consumer_secret(), &base_string);
        trace!(
            params = payload.len(),
            base_len = base_string.len(),
            "signed oauth1 request"
        );
        payload.push(OAUTH_PARAM_KEY_SIGNATURE, signature.as_str());

        Ok(SignedContent {
            signature,
            nonce,
            timestamp,
            parameter_string,
            base_string,
            payload,
        })
    }
}

impl QuerySigner for Signer {
    fn sign_query(
        &self,
        method: HttpMethod,
        endpoint: &str,
        params: RequestParams,
        credentials: &Credentials,
    ) -> Result<String> {
        self.sign_with_context(method, endpoint, params, credentials)
            .map(|signed| signed.to_query())
    }
}

/// Sorted `key=value` pairs joined by `&`, values left raw.
pub fn parameter_string(params: &RequestParams) -> String {
    params
        .canonical()
        .into_iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<String>>()
        .join("&")
}

/// `METHOD&enc(endpoint)&enc(parameter_string)`.
pub fn signature_base_string(http_method: &str, endpoint: &str, parameter_string: &str) -> String {
    format!(
        "{}&{}&{}",
        http_method,
        util::percent_encode(endpoint),
        util::percent_encode(parameter_string)
    )
}

/// Base64 HMAC-SHA256 of `base_string`, keyed with `consumer_secret&`.
///
/// The trailing `&` is there for every API version.
pub fn sign_hmac_sha256(consumer_secret: &str, base_string: &str) -> String {
    let sign_key = format!("{}&", consumer_secret);
    // NOTE: HMAC takes keys of any length, so this never fails.
    let mut mac = HmacSha256::new_from_slice(sign_key.as_bytes())
        .expect("HMAC accepts keys of any size");
    mac.update(base_string.as_bytes());
    general_purpose::STANDARD.encode(mac.finalize().into_bytes())
}
