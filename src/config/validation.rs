use regex::Regex;

/// Expand environment variables in a string using ${VAR_NAME} syntax.
/// Unknown variables are left in place.
pub fn expand_with<F>(value: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let re = Regex::new(r"\$\{([^}]+)\}").expect("static regex is valid");
    re.replace_all(value, |caps: &regex::Captures| {
        lookup(&caps[1]).unwrap_or_else(|| caps[0].to_string())
    })
    .into_owned()
}

/// Normalize a configured endpoint to the `.../models` base the client appends to.
pub fn normalize_endpoint(endpoint: &str) -> String {
    let endpoint = endpoint.trim_end_matches('/');
    if endpoint.ends_with("/models") {
        endpoint.to_string()
    } else {
        format!("{}/models", endpoint)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_with_known_and_unknown_vars() {
        let lookup = |name: &str| (name == "KEY").then(|| "secret".to_string());
        assert_eq!(expand_with("${KEY}", lookup), "secret");
        assert_eq!(expand_with("a-${MISSING}-b", lookup), "a-${MISSING}-b");
        assert_eq!(expand_with("plain", lookup), "plain");
    }

    #[test]
    fn test_normalize_endpoint() {
        assert_eq!(
            normalize_endpoint("https://example.test/v1beta"),
            "https://example.test/v1beta/models"
        );
        assert_eq!(
            normalize_endpoint("https://example.test/v1beta/models/"),
            "https://example.test/v1beta/models"
        );
    }
}
