//! OAuth 1.0a one-legged signing, as the store expects it over plain HTTP.
//!
//! Parameters are sorted and joined with their raw values, the base string
//! is `METHOD&enc(url)&enc(params)`, and the key is `consumer_secret&`.

mod signer;
mod source;
mod values;

pub use signer::{parameter_string, sign_hmac_sha256, signature_base_string, SignedContent, Signer};
pub use source::{digest_nonce, Clock, FixedClock, FixedNonce, NonceSource, OsNonce, SystemClock};
pub use values::*;
