use url::Url;

/// Parse `input` as an absolute `http` or `https` URL
///
/// Malformed input is a normal negative result, never an error.
pub fn parse_http_url(input: &str) -> Option<Url> {
    Url::parse(input)
        .ok()
        .filter(|url| matches!(url.scheme(), "http" | "https"))
}

/// Whether `input` is a syntactically valid absolute `http`/`https` URL
pub fn is_valid_http_url(input: &str) -> bool {
    parse_http_url(input).is_some()
}
