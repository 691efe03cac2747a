//! Clock and nonce capabilities handed to the [`Signer`](super::Signer).
//!
//! Production code reads the system clock and the OS entropy source; tests
//! swap in [`FixedClock`] and [`FixedNonce`] to get reproducible signatures.

use chrono::{DateTime, Utc};
use rand::rngs::OsRng;
use rand::RngCore;
use sha1::{Digest, Sha1};

use crate::error::Result;

const NONCE_BYTES: usize = 16;

pub trait Clock: Send + Sync {
    /// Unix time in seconds.
    fn timestamp(&self) -> i64;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn timestamp(&self) -> i64 {
        Utc::now().timestamp()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixedClock(pub i64);

impl From<DateTime<Utc>> for FixedClock {
    fn from(time: DateTime<Utc>) -> Self {
        FixedClock(time.timestamp())
    }
}

impl Clock for FixedClock {
    fn timestamp(&self) -> i64 {
        self.0
    }
}

pub trait NonceSource: Send + Sync {
    fn nonce(&self) -> Result<String>;
}

/// Hex SHA-1 of 16 bytes read from the operating system.
#[derive(Clone, Copy, Debug, Default)]
pub struct OsNonce;

impl NonceSource for OsNonce {
    fn nonce(&self) -> Result<String> {
        let mut bytes = [0u8; NONCE_BYTES];
        OsRng.try_fill_bytes(&mut bytes)?;
        Ok(digest_nonce(&bytes))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FixedNonce(pub String);

impl NonceSource for FixedNonce {
    fn nonce(&self) -> Result<String> {
        Ok(self.0.clone())
    }
}

pub fn digest_nonce(bytes: &[u8]) -> String {
    hex::encode(Sha1::digest(bytes))
}
