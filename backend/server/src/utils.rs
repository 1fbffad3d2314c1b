use std::sync::LazyLock;

use regex::Regex;

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^[^\s@<>",;]+@[^\s@<>",;.]+(\.[^\s@<>",;.]+)+$"#).expect("valid email pattern")
});

pub fn sanitize_input(input: Option<String>) -> Option<String> {
    input
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL.is_match(email)
}

/// Collapses line breaks so user text cannot add mail headers.
pub fn header_safe(value: &str) -> String {
    value
        .split(['\r', '\n'])
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
