use std::borrow::Cow;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use crate::data::ConnectionConfig;

/// Everything except ASCII alphanumerics and `-._~` is escaped, so a space
/// becomes `%20` rather than `+`.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Percent encode a matrix or query key or value.
pub fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, COMPONENT).to_string()
}

/// `host` as it appears in a URL authority or `Host` header.
///
/// IPv6 literals are bracketed unless they already are.
pub fn url_host(host: &str) -> Cow<'_, str> {
    if host.contains(':') && !host.starts_with('[') {
        Cow::Owned(format!("[{host}]"))
    } else {
        Cow::Borrowed(host)
    }
}

fn join_params(params: &[(String, String)], prefix: char, separator: &str) -> String {
    if params.is_empty() {
        return String::new();
    }

    let joined = params
        .iter()
        .map(|(k, v)| format!("{}={}", encode_component(k), encode_component(v)))
        .collect::<Vec<_>>()
        .join(separator);

    format!("{prefix}{joined}")
}

/// Assemble `scheme://host:port/path;matrix?query`.
///
/// A single leading `/` on `path` is dropped. Matrix parameters are joined
/// by `;`, query parameters by `&`; either section is omitted when empty.
///
/// # Examples
///
/// ```
/// use bundler_vidispine::{build_url, ConnectionConfig};
///
/// let config = ConnectionConfig::new("http", "vs.local", 8080);
/// let matrix = vec![("a".to_string(), "1".to_string())];
/// let query = vec![("b".to_string(), "2 c".to_string())];
///
/// assert_eq!(
///     build_url(&config, "/x/y", &matrix, &query),
///     "http://vs.local:8080/x/y;a=1?b=2%20c"
/// );
/// ```
pub fn build_url(
    config: &ConnectionConfig,
    path: &str,
    matrix: &[(String, String)],
    query: &[(String, String)],
) -> String {
    let path = path.strip_prefix('/').unwrap_or(path);

    format!(
        "{}://{}:{}/{}{}{}",
        config.scheme,
        url_host(&config.host),
        config.port,
        path,
        join_params(matrix, ';', ";"),
        join_params(query, '?', "&"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ConnectionConfig {
        ConnectionConfig::new("https", "vs.example.com", 8443)
    }

    fn params(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_build_url_matrix_and_query() {
        let url = build_url(&config(), "/x/y", &params(&[("a", "1")]), &params(&[("b", "2 c")]));
        assert_eq!(url, "https://vs.example.com:8443/x/y;a=1?b=2%20c");
    }

    #[test]
    fn test_build_url_without_params() {
        let url = build_url(&config(), "/API/storage/VX-2/file/VX-1", &[], &[]);
        assert_eq!(url, "https://vs.example.com:8443/API/storage/VX-2/file/VX-1");
    }

    #[test]
    fn test_build_url_relative_path() {
        let url = build_url(&config(), "API/version", &[], &[]);
        assert_eq!(url, "https://vs.example.com:8443/API/version");
    }

    #[test]
    fn test_build_url_strips_only_one_slash() {
        let url = build_url(&config(), "//API", &[], &[]);
        assert_eq!(url, "https://vs.example.com:8443//API");
    }

    #[test]
    fn test_build_url_joins_in_order() {
        let url = build_url(
            &config(),
            "/p",
            &params(&[("m1", "x"), ("m2", "y")]),
            &params(&[("q1", "1"), ("q2", "2")]),
        );
        assert_eq!(url, "https://vs.example.com:8443/p;m1=x;m2=y?q1=1&q2=2");
    }

    #[test]
    fn test_build_url_brackets_ipv6_host() {
        let config = ConnectionConfig::new("http", "::1", 8080);
        let url = build_url(&config, "/API/version", &[], &[]);
        assert_eq!(url, "http://[::1]:8080/API/version");
        assert!(::url::Url::parse(&url).is_ok());

        let bracketed = ConnectionConfig::new("http", "[::1]", 8080);
        assert_eq!(build_url(&bracketed, "/API/version", &[], &[]), url);
    }

    #[test]
    fn test_url_host_leaves_names_alone() {
        assert_eq!(url_host("vs.example.com"), "vs.example.com");
        assert_eq!(url_host("127.0.0.1"), "127.0.0.1");
        assert_eq!(url_host("fe80::1"), "[fe80::1]");
    }

    #[test]
    fn test_encode_reserved_characters() {
        assert_eq!(encode_component("a&b=c;d?e/f"), "a%26b%3Dc%3Bd%3Fe%2Ff");
        assert_eq!(encode_component("keep-._~"), "keep-._~");
        assert_eq!(encode_component("héllo"), "h%C3%A9llo");
    }
}
