//! Query encoding for search requests.
//!
//! Query text is percent-encoded as UTF-8 with everything except the
//! unreserved characters (`A-Z a-z 0-9 - _ . ~`) escaped, so characters like
//! `&`, `#`, `/`, `+` or spaces cannot corrupt the request line.

/// Percent-encodes query text for use as a URL query parameter value.
pub fn encode_query(text: &str) -> String {
    urlencoding::encode(text).into_owned()
}

/// Builds the request URL for a query against a search endpoint.
///
/// Appends `param=<encoded text>` with `?`, or with `&` when the endpoint
/// already carries a query string.
pub fn request_url(endpoint: &str, param: &str, text: &str) -> String {
    let separator = if endpoint.contains('?') { '&' } else { '?' };
    format!(
        "{endpoint}{separator}{}={}",
        encode_query(param),
        encode_query(text)
    )
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use url::Url;

    use super::*;

    fn decoded_param(url: &str, param: &str) -> Option<String> {
        let parsed = Url::parse(url).ok()?;
        parsed
            .query_pairs()
            .find(|(key, _)| key == param)
            .map(|(_, value)| value.into_owned())
    }

    #[test]
    fn test_reserved_characters_are_escaped() {
        assert_eq!(encode_query("a b&c#d/e"), "a%20b%26c%23d%2Fe");
        assert_eq!(encode_query("1+1=2?"), "1%2B1%3D2%3F");
        assert_eq!(encode_query("naïve"), "na%C3%AFve");
        assert_eq!(encode_query(""), "");
        assert_eq!(encode_query("safe-_.~"), "safe-_.~");
    }

    #[test]
    fn test_request_url_separator() {
        assert_eq!(
            request_url("http://localhost:8080/search", "q", "disk full"),
            "http://localhost:8080/search?q=disk%20full"
        );
        assert_eq!(
            request_url("http://localhost:8080/search?index=main", "q", "x"),
            "http://localhost:8080/search?index=main&q=x"
        );
    }

    #[test]
    fn test_empty_query_is_forwarded() {
        let url = request_url("http://localhost:8080/search", "q", "");
        assert_eq!(url, "http://localhost:8080/search?q=");
        assert_eq!(decoded_param(&url, "q").as_deref(), Some(""));
    }

    #[test]
    fn test_known_tricky_queries_round_trip() {
        for text in ["a&b=c", "#fragment", "/path/like", "two  spaces", "日本語 ログ", "100%", "+plus+"] {
            let url = request_url("http://localhost:8080/search", "q", text);
            assert_eq!(decoded_param(&url, "q").as_deref(), Some(text), "query {text:?}");
        }
    }

    proptest! {
        #[test]
        fn prop_encoded_query_round_trips(text in any::<String>()) {
            let url = request_url("http://localhost:8080/search", "q", &text);
            prop_assert_eq!(decoded_param(&url, "q"), Some(text.clone()));
            prop_assert_eq!(urlencoding::decode(&encode_query(&text)).unwrap().into_owned(), text);
        }
    }
}
