use std::{fmt, str::FromStr};

use crate::error::Error;

/// The verbs the store API accepts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Options,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Options => "OPTIONS",
        }
    }

    /// POST and PUT carry a JSON body.
    pub fn is_write(self) -> bool {
        matches!(self, HttpMethod::Post | HttpMethod::Put)
    }
}

/// Only the exact upper-case names are recognised.
impl FromStr for HttpMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "GET" => Ok(HttpMethod::Get),
            "POST" => Ok(HttpMethod::Post),
            "PUT" => Ok(HttpMethod::Put),
            "DELETE" => Ok(HttpMethod::Delete),
            "OPTIONS" => Ok(HttpMethod::Options),
            other => Err(Error::UnsupportedMethod(other.to_owned())),
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<HttpMethod> for http::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => http::Method::GET,
            HttpMethod::Post => http::Method::POST,
            HttpMethod::Put => http::Method::PUT,
            HttpMethod::Delete => http::Method::DELETE,
            HttpMethod::Options => http::Method::OPTIONS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_known_methods() {
        for name in ["GET", "POST", "PUT", "DELETE", "OPTIONS"] {
            let method: HttpMethod = name.parse().unwrap();
            assert_eq!(method.as_str(), name);
            assert_eq!(http::Method::from(method).as_str(), name);
        }
    }

    #[test]
    fn test_rejects_others() {
        for name in ["PATCH", "HEAD", "get", "", "CONNECT"] {
            match name.parse::<HttpMethod>() {
                Err(Error::UnsupportedMethod(m)) => assert_eq!(m, name),
                other => panic!("{:?} should be rejected, got {:?}", name, other),
            }
        }
    }

    #[test]
    fn test_write_methods() {
        assert!(HttpMethod::Post.is_write());
        assert!(HttpMethod::Put.is_write());
        assert!(!HttpMethod::Get.is_write());
        assert!(!HttpMethod::Delete.is_write());
        assert!(!HttpMethod::Options.is_write());
    }
}
