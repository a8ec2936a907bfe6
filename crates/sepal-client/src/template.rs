use std::collections::BTreeMap;
use std::fmt;

/// Placeholder name to raw (unencoded) value.
///
/// Ordered so two equal parameter sets always produce the same cache key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct QueryParams(BTreeMap<String, String>);

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl ToString) {
        self.0.insert(key.into(), value.to_string());
    }

    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: ToString> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (key, value) in iter {
            params.insert(key, value);
        }
        params
    }
}

/// Endpoint path with `{name}` placeholders, relative to the API root
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UrlTemplate(&'static str);

impl UrlTemplate {
    pub const fn new(raw: &'static str) -> Self {
        Self(raw)
    }

    pub const fn as_str(&self) -> &'static str {
        self.0
    }

    /// Path segment before the query string, used as a log/metric label
    pub fn path(&self) -> &'static str {
        self.0.split_once('?').map_or(self.0, |(path, _)| path)
    }

    /// Names of every `{name}` token, in template order
    pub fn placeholders(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        let mut rest = self.0;
        while let Some(open) = rest.find('{') {
            let after = &rest[open + 1..];
            let Some(close) = after.find('}') else {
                break;
            };
            names.push(&after[..close]);
            rest = &after[close + 1..];
        }
        names
    }

    /// Replaces each `{name}` with the percent-encoded value from `params`.
    ///
    /// Tokens without a matching parameter are left as literal text.
    pub fn populate(&self, params: &QueryParams) -> String {
        let mut out = String::with_capacity(self.0.len());
        let mut rest = self.0;

        while let Some(open) = rest.find('{') {
            out.push_str(&rest[..open]);
            let after = &rest[open + 1..];
            let Some(close) = after.find('}') else {
                out.push_str(&rest[open..]);
                return out;
            };

            let name = &after[..close];
            match params.get(name) {
                Some(value) => out.push_str(&encode_component(value)),
                None => {
                    out.push('{');
                    out.push_str(name);
                    out.push('}');
                }
            }
            rest = &after[close + 1..];
        }

        out.push_str(rest);
        out
    }
}

impl fmt::Display for UrlTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

fn encode_component(value: &str) -> String {
    // form encoding turns spaces into '+', a URL component wants %20
    url::form_urlencoded::byte_serialize(value.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGED: UrlTemplate = UrlTemplate::new(
        "/trade/get-for-interval-paged?accountNumber={accountNumber}&start={start}&page={page}&symbol={symbol}",
    );

    #[test]
    fn test_populate_substitutes_and_encodes() {
        let params = QueryParams::new()
            .with("accountNumber", 1234)
            .with("start", "2024-01-01")
            .with("page", 0)
            .with("symbol", "EUR/USD & co");

        assert_eq!(
            PAGED.populate(&params),
            "/trade/get-for-interval-paged?accountNumber=1234&start=2024-01-01&page=0&symbol=EUR%2FUSD%20%26%20co"
        );
    }

    #[test]
    fn test_unknown_placeholder_stays_literal() {
        let params = QueryParams::new().with("accountNumber", 1).with("unused", "x");

        assert_eq!(
            PAGED.populate(&params),
            "/trade/get-for-interval-paged?accountNumber=1&start={start}&page={page}&symbol={symbol}"
        );
    }

    #[test]
    fn test_value_containing_braces_is_not_reexpanded() {
        let template = UrlTemplate::new("/x?a={a}&b={b}");
        let params = QueryParams::new().with("a", "{b}").with("b", "2");

        assert_eq!(template.populate(&params), "/x?a=%7Bb%7D&b=2");
    }

    #[test]
    fn test_placeholders_and_path() {
        assert_eq!(
            PAGED.placeholders(),
            vec!["accountNumber", "start", "page", "symbol"]
        );
        assert_eq!(PAGED.path(), "/trade/get-for-interval-paged");
        assert_eq!(UrlTemplate::new("/system/healthcheck").path(), "/system/healthcheck");
    }

    #[test]
    fn test_params_are_order_independent() {
        let a: QueryParams = [("page", "1"), ("sort", "asc")].into_iter().collect();
        let b: QueryParams = [("sort", "asc"), ("page", "1")].into_iter().collect();
        assert_eq!(a, b);
        assert_eq!(a.len(), 2);
    }
}
