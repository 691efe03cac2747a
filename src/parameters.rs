use serde::Serialize;
use serde_json::Value;
use std::fmt;

use crate::error::{Error, Result};

/// A single parameter value before it is rendered into the query.
#[derive(Clone, Debug, PartialEq)]
pub enum ParamValue {
    StringValue(String),
    IntValue(i64),
    FloatValue(f64),
    BoolValue(bool),
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::StringValue(s) => f.write_str(s),
            ParamValue::IntValue(n) => write!(f, "{}", n),
            ParamValue::FloatValue(n) => write!(f, "{}", n),
            ParamValue::BoolValue(b) => write!(f, "{}", b),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        ParamValue::StringValue(s.to_owned())
    }
}

impl From<String> for ParamValue {
    fn from(s: String) -> Self {
        ParamValue::StringValue(s)
    }
}

impl From<&String> for ParamValue {
    fn from(s: &String) -> Self {
        ParamValue::StringValue(s.clone())
    }
}

impl From<i64> for ParamValue {
    fn from(n: i64) -> Self {
        ParamValue::IntValue(n)
    }
}

impl From<u32> for ParamValue {
    fn from(n: u32) -> Self {
        ParamValue::IntValue(i64::from(n))
    }
}

impl From<f64> for ParamValue {
    fn from(n: f64) -> Self {
        ParamValue::FloatValue(n)
    }
}

impl From<bool> for ParamValue {
    fn from(b: bool) -> Self {
        ParamValue::BoolValue(b)
    }
}

/// Query parameters of one request.
///
/// Kept as a list of pairs so a key may repeat (`filter[x]=1&filter[x]=2`).
/// Insertion order is preserved; [`RequestParams::canonical`] gives the
/// `(key, value)` byte order used for signing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RequestParams {
    pairs: Vec<(String, String)>,
}

impl RequestParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a pair, builder style.
    pub fn param<K: Into<String>, V: Into<ParamValue>>(mut self, key: K, value: V) -> Self {
        self.push(key, value);
        self
    }

    pub fn push<K: Into<String>, V: Into<ParamValue>>(&mut self, key: K, value: V) -> &mut Self {
        self.pairs.push((key.into(), value.into().to_string()));
        self
    }

    /// Appends everything `query` serializes to.
    ///
    /// Accepts anything that serializes to a map (a struct, a `HashMap`) or a
    /// sequence of two-element pairs. `None` fields are skipped and sequence
    /// values repeat their key once per element.
    pub fn query<T: Serialize + ?Sized>(mut self, query: &T) -> Result<Self> {
        match serde_json::to_value(query)? {
            Value::Null => {}
            Value::Object(map) => {
                for (key, value) in map {
                    self.push_json(key, value)?;
                }
            }
            Value::Array(items) => {
                for item in items {
                    match item {
                        Value::Array(mut pair) if pair.len() == 2 => {
                            let value = pair.pop().unwrap_or(Value::Null);
                            let key = match pair.pop() {
                                Some(Value::String(k)) => k,
                                other => {
                                    return Err(Error::Serialize(format!(
                                        "query key must be a string, got {:?}",
                                        other
                                    )))
                                }
                            };
                            self.push_json(key, value)?;
                        }
                        other => {
                            return Err(Error::Serialize(format!(
                                "expected a (key, value) pair, got {}",
                                other
                            )))
                        }
                    }
                }
            }
            other => {
                return Err(Error::Serialize(format!(
                    "query must be a map or a sequence of pairs, got {}",
                    other
                )))
            }
        }
        Ok(self)
    }

    fn push_json(&mut self, key: String, value: Value) -> Result<()> {
        match value {
            Value::Null => {}
            Value::String(s) => {
                self.pairs.push((key, s));
            }
            Value::Bool(b) => {
                self.pairs.push((key, b.to_string()));
            }
            Value::Number(n) => {
                self.pairs.push((key, n.to_string()));
            }
            Value::Array(items) => {
                for item in items {
                    self.push_json(key.clone(), item)?;
                }
            }
            Value::Object(_) => {
                return Err(Error::Serialize(format!(
                    "nested object for key {:?} cannot be a query value",
                    key
                )))
            }
        }
        Ok(())
    }

    pub fn extend_from(&mut self, other: RequestParams) -> &mut Self {
        self.pairs.extend(other.pairs);
        self
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// First value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.pairs.iter().any(|(k, _)| k == key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Pairs sorted by key, then by value, comparing bytes.
    pub fn canonical(&self) -> Vec<(&str, &str)> {
        let mut sorted = self.iter().collect::<Vec<_>>();
        sorted.sort_unstable();
        sorted
    }
}

impl<K: Into<String>, V: Into<ParamValue>> FromIterator<(K, V)> for RequestParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = RequestParams::new();
        params.extend(iter);
        params
    }
}

impl<K: Into<String>, V: Into<ParamValue>> Extend<(K, V)> for RequestParams {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.push(k, v);
        }
    }
}

impl IntoIterator for RequestParams {
    type Item = (String, String);
    type IntoIter = std::vec::IntoIter<(String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.pairs.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[derive(Serialize)]
    struct ProductFilter {
        per_page: u32,
        status: &'static str,
        search: Option<String>,
        include: Vec<u32>,
    }

    #[test]
    fn test_param_values() {
        let params = RequestParams::new()
            .param("page", 2i64)
            .param("ratio", 0.5)
            .param("featured", true)
            .param("status", "publish");
        assert_eq!(params.get("page"), Some("2"));
        assert_eq!(params.get("ratio"), Some("0.5"));
        assert_eq!(params.get("featured"), Some("true"));
        assert_eq!(params.get("status"), Some("publish"));
        assert_eq!(params.get("missing"), None);
    }

    #[test]
    fn test_canonical_sorts_by_key_then_value() {
        let params: RequestParams = vec![
            ("filter[x]", "2"),
            ("b", "1"),
            ("filter[x]", "1"),
            ("B", "9"),
            ("a", "z"),
        ]
        .into_iter()
        .collect();
        assert_eq!(
            params.canonical(),
            vec![
                ("B", "9"),
                ("a", "z"),
                ("b", "1"),
                ("filter[x]", "1"),
                ("filter[x]", "2"),
            ]
        );
        // insertion order is untouched
        assert_eq!(params.iter().next(), Some(("filter[x]", "2")));
    }

    #[test]
    fn test_query_from_struct() {
        let params = RequestParams::new()
            .query(&ProductFilter {
                per_page: 10,
                status: "draft",
                search: None,
                include: vec![3, 4],
            })
            .unwrap();
        assert_eq!(params.len(), 4);
        assert_eq!(params.get("per_page"), Some("10"));
        assert_eq!(params.get("status"), Some("draft"));
        assert!(!params.contains_key("search"));
        assert_eq!(
            params.iter().filter(|(k, _)| *k == "include").count(),
            2
        );
    }

    #[test]
    fn test_query_from_pairs_and_map() {
        let params = RequestParams::new()
            .query(&[("orderby", "date"), ("order", "asc")])
            .unwrap();
        assert_eq!(params.get("orderby"), Some("date"));
        assert_eq!(params.get("order"), Some("asc"));

        let mut map = BTreeMap::new();
        map.insert("sku", "ABC-1");
        let params = params.query(&map).unwrap();
        assert_eq!(params.len(), 3);
        assert_eq!(params.get("sku"), Some("ABC-1"));
    }

    #[test]
    fn test_query_rejects_scalars_and_nested_objects() {
        assert!(matches!(
            RequestParams::new().query(&42),
            Err(Error::Serialize(_))
        ));

        let mut nested = BTreeMap::new();
        nested.insert("filter", BTreeMap::from([("x", 1)]));
        assert!(matches!(
            RequestParams::new().query(&nested),
            Err(Error::Serialize(_))
        ));
    }
}
