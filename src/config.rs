use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::{env, fmt, time::Duration};

use crate::error::{Error, Result};

pub const DEFAULT_API_PREFIX: &str = "/wc-api/";
pub const DEFAULT_WP_API_PREFIX: &str = "/wp-json/wc/";

/// Consumer key and secret issued by the store.
///
/// The secret is only readable inside the crate; `Debug` redacts it.
pub struct Credentials {
    consumer_key: String,
    consumer_secret: Secret<String>,
}

impl Credentials {
    pub fn new<K: Into<String>, S: Into<String>>(consumer_key: K, consumer_secret: S) -> Self {
        Credentials {
            consumer_key: consumer_key.into(),
            consumer_secret: Secret::new(consumer_secret.into()),
        }
    }

    /// Reads `{PREFIX}_CONSUMER_KEY` and `{PREFIX}_CONSUMER_SECRET`.
    pub fn from_env(prefix: &str) -> Result<Self> {
        let prefix = prefix.to_uppercase();
        let consumer_key = require_env(&format!("{}_CONSUMER_KEY", prefix))?;
        let consumer_secret = require_env(&format!("{}_CONSUMER_SECRET", prefix))?;
        Ok(Credentials::new(consumer_key, consumer_secret))
    }

    pub fn consumer_key(&self) -> &str {
        &self.consumer_key
    }

    pub(crate) fn consumer_secret(&self) -> &str {
        self.consumer_secret.expose_secret()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("consumer_key", &self.consumer_key)
            .field("consumer_secret", &"[REDACTED]")
            .finish()
    }
}

fn require_env(name: &str) -> Result<String> {
    env::var(name).map_err(|_| Error::Config(format!("missing environment variable {}", name)))
}

/// Version segment of the API path.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ApiVersion {
    V1,
    V2,
    #[default]
    V3,
    Custom(String),
}

impl ApiVersion {
    pub fn as_str(&self) -> &str {
        match self {
            ApiVersion::V1 => "v1",
            ApiVersion::V2 => "v2",
            ApiVersion::V3 => "v3",
            ApiVersion::Custom(s) => s,
        }
    }
}

impl From<&str> for ApiVersion {
    fn from(s: &str) -> Self {
        match s {
            "v1" => ApiVersion::V1,
            "v2" => ApiVersion::V2,
            "v3" => ApiVersion::V3,
            other => ApiVersion::Custom(other.to_owned()),
        }
    }
}

impl From<String> for ApiVersion {
    fn from(s: String) -> Self {
        ApiVersion::from(s.as_str())
    }
}

impl From<ApiVersion> for String {
    fn from(v: ApiVersion) -> Self {
        v.as_str().to_owned()
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Client options.
///
/// `api` switches the path prefix from `/wc-api/` to `api_prefix`, which is
/// how the WordPress REST integration (`/wp-json/wc/`) is reached.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    pub version: ApiVersion,
    pub api: bool,
    pub api_prefix: String,
    pub verify_ssl: bool,
    /// Pins `oauth_timestamp`; the system clock is read per request otherwise.
    pub oauth_timestamp: Option<DateTime<Utc>>,
    pub timeout_secs: Option<u64>,
    pub user_agent: Option<String>,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            version: ApiVersion::default(),
            api: false,
            api_prefix: DEFAULT_WP_API_PREFIX.to_owned(),
            verify_ssl: true,
            oauth_timestamp: None,
            timeout_secs: None,
            user_agent: None,
        }
    }
}

impl Options {
    /// Reads the optional `{PREFIX}_VERSION`, `{PREFIX}_API_PREFIX`,
    /// `{PREFIX}_VERIFY_SSL` and `{PREFIX}_TIMEOUT_SECS`.
    ///
    /// Setting `{PREFIX}_API_PREFIX` also turns on `api`.
    pub fn from_env(prefix: &str) -> Result<Self> {
        let prefix = prefix.to_uppercase();
        let mut options = Options::default();
        if let Ok(version) = env::var(format!("{}_VERSION", prefix)) {
            options.version = ApiVersion::from(version);
        }
        if let Ok(api_prefix) = env::var(format!("{}_API_PREFIX", prefix)) {
            options.api = true;
            options.api_prefix = api_prefix;
        }
        if let Ok(verify) = env::var(format!("{}_VERIFY_SSL", prefix)) {
            options.verify_ssl = verify.parse::<bool>().map_err(|_| {
                Error::Config(format!("{}_VERIFY_SSL must be true or false", prefix))
            })?;
        }
        if let Ok(timeout) = env::var(format!("{}_TIMEOUT_SECS", prefix)) {
            options.timeout_secs = Some(timeout.parse::<u64>().map_err(|_| {
                Error::Config(format!("{}_TIMEOUT_SECS must be a whole number", prefix))
            })?);
        }
        Ok(options)
    }

    pub fn version<V: Into<ApiVersion>>(mut self, version: V) -> Self {
        self.version = version.into();
        self
    }

    pub fn api_prefix<P: Into<String>>(mut self, prefix: P) -> Self {
        self.api = true;
        self.api_prefix = prefix.into();
        self
    }

    pub fn verify_ssl(mut self, verify: bool) -> Self {
        self.verify_ssl = verify;
        self
    }

    pub fn oauth_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.oauth_timestamp = Some(timestamp);
        self
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Prefix plus version, with a leading and a trailing `/`.
    pub fn base_path(&self) -> String {
        let prefix = if self.api {
            self.api_prefix.as_str()
        } else {
            DEFAULT_API_PREFIX
        };
        let prefix = prefix.trim_matches('/');
        let version = self.version.as_str().trim_matches('/');
        let mut path = String::from("/");
        for segment in [prefix, version] {
            if !segment.is_empty() {
                path.push_str(segment);
                path.push('/');
            }
        }
        path
    }
}
