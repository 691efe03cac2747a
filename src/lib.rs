//! Request signer and client for the WooCommerce REST API.
//!
//! Stores served over HTTPS get their consumer key and secret as plain query
//! parameters. Stores served over plain HTTP get a one-legged OAuth 1.0a
//! query signed with HMAC-SHA256 (see [`v1`]). The mode follows the URL
//! scheme and cannot be chosen separately.
//!
//! ```no_run
//! use wc_oauthsign::{Client, Options, RequestParams};
//!
//! # async fn run() -> wc_oauthsign::Result<()> {
//! let client = Client::new(
//!     "https://shop.example.com",
//!     "ck_xxx",
//!     "cs_xxx",
//!     Options::default(),
//! )?;
//! let body = client
//!     .get("orders", RequestParams::new().param("status", "processing"))
//!     .await?;
//! println!("{}", body.text().await?);
//! # Ok(())
//! # }
//! ```

pub mod v1;

mod auth;
mod basic;
mod client;
mod config;
mod error;
mod executor;
mod method;
mod parameters;
mod util;

pub use auth::{AuthMode, QuerySigner};
pub use basic::BasicSigner;
pub use client::Client;
pub use config::{ApiVersion, Credentials, Options, DEFAULT_API_PREFIX, DEFAULT_WP_API_PREFIX};
pub use error::{BoxError, Error, Result};
pub use executor::{HttpExecutor, HttpRequest, HttpResponse, ResponseBody, USER_AGENT};
pub use method::HttpMethod;
pub use parameters::{ParamValue, RequestParams};

#[cfg(feature = "reqwest")]
pub use executor::ReqwestExecutor;
