use crate::auth::QuerySigner;
use crate::config::Credentials;
use crate::error::Result;
use crate::method::HttpMethod;
use crate::parameters::RequestParams;
use crate::util;

pub const BASIC_PARAM_KEY_CONSUMER_KEY: &str = "consumer_key";
pub const BASIC_PARAM_KEY_CONSUMER_SECRET: &str = "consumer_secret";

/// Query-string credentials for HTTPS stores. Nothing is signed.
#[derive(Clone, Copy, Debug, Default)]
pub struct BasicSigner;

impl QuerySigner for BasicSigner {
    fn sign_query(
        &self,
        _method: HttpMethod,
        _endpoint: &str,
        mut params: RequestParams,
        credentials: &Credentials,
    ) -> Result<String> {
        params
            .push(BASIC_PARAM_KEY_CONSUMER_KEY, credentials.consumer_key())
            .push(BASIC_PARAM_KEY_CONSUMER_SECRET, credentials.consumer_secret());
        Ok(util::encode_query(params.canonical()))
    }
}
