use percent_encoding::{utf8_percent_encode, AsciiSet, PercentEncode};
use url::form_urlencoded;

// https://tools.ietf.org/html/rfc5849#section-3.6
// * ALPHA, DIGIT, '-', '.', '_', '~' MUST NOT be encoded.
// * All other characters MUST be encoded.
// * The two hexadecimal characters used to represent encoded
//   characters MUST be uppercase.
const TARGETS_FOR_SIGN: &AsciiSet = &percent_encoding::NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

pub fn percent_encode(input: &str) -> PercentEncode<'_> {
    utf8_percent_encode(input, TARGETS_FOR_SIGN)
}

/// Splits a URL into the part that gets signed (scheme, host, path) and its
/// decoded query pairs.
pub fn url_to_endpoint_and_queries(url: &url::Url) -> (&str, Vec<(String, String)>) {
    let queries = url.query_pairs().into_owned().collect();
    (&url[..url::Position::AfterPath], queries)
}

/// Form-encodes pairs in the order given.
pub fn encode_query<'a, I>(pairs: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs)
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_to_endpoint_and_queries() {
        let u = url::Url::parse(
            "http://example.com/wc-api/v3/orders?status=on-hold&filter%5Blimit%5D=5#top",
        )
        .unwrap();
        let (core, pairs) = url_to_endpoint_and_queries(&u);
        assert_eq!(core, "http://example.com/wc-api/v3/orders");
        assert_eq!(
            pairs,
            vec![
                ("status".to_string(), "on-hold".to_string()),
                ("filter[limit]".to_string(), "5".to_string()),
            ]
        );

        let n = url::Url::parse("https://example.com/").unwrap();
        let (core, pairs) = url_to_endpoint_and_queries(&n);
        assert_eq!(core, "https://example.com/");
        assert!(pairs.is_empty());
    }

    #[test]
    fn test_percent_encode_unreserved() {
        assert_eq!(percent_encode("a-b.c_d~e").to_string(), "a-b.c_d~e");
        assert_eq!(
            percent_encode("http://example.com/a b").to_string(),
            "http%3A%2F%2Fexample.com%2Fa%20b"
        );
        assert_eq!(percent_encode("k=v&x=[1]").to_string(), "k%3Dv%26x%3D%5B1%5D");
        assert_eq!(percent_encode("é").to_string(), "%C3%A9");
    }

    #[test]
    fn test_encode_query() {
        let q = encode_query(vec![("a", "1 2"), ("b&c", "=")]);
        assert_eq!(q, "a=1+2&b%26c=%3D");
        assert_eq!(encode_query(Vec::new()), "");
    }
}
