//! Minimal query-string parsing for page parameters.

/// Extracts the value of `name` from a raw `location.search` string.
/// Empty values count as absent.
pub fn query_param(search: &str, name: &str) -> Option<String> {
    let query_string = search.strip_prefix('?').unwrap_or(search);
    for param in query_string.split('&') {
        if let Some((key, value)) = param.split_once('=') {
            if key == name && !value.is_empty() {
                return Some(value.to_string());
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::query_param;

    #[test]
    fn finds_param_with_and_without_leading_question_mark() {
        assert_eq!(
            query_param("?client_id=abc", "client_id"),
            Some("abc".to_string())
        );
        assert_eq!(
            query_param("client_id=abc", "client_id"),
            Some("abc".to_string())
        );
    }

    #[test]
    fn finds_param_among_others() {
        assert_eq!(
            query_param("?utm=x&client_id=abc&ref=y", "client_id"),
            Some("abc".to_string())
        );
    }

    #[test]
    fn missing_or_empty_param_is_none() {
        assert_eq!(query_param("", "client_id"), None);
        assert_eq!(query_param("?other=1", "client_id"), None);
        assert_eq!(query_param("?client_id=", "client_id"), None);
    }
}
