//! Input sanitization applied before request bodies are built.
//!
//! Defense against markup smuggled through free-form fields. Like the
//! policy checks in [`crate::validation`], this is a client-side courtesy;
//! the server sanitizes again.

/// HTML-escape and trim free-form input.
pub fn sanitize_input(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.trim().chars() {
        match c {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            '/' => out.push_str("&#x2F;"),
            other => out.push(other),
        }
    }
    out
}

/// Escaped, lowercased email.
pub fn sanitize_email(email: &str) -> String {
    sanitize_input(email).to_lowercase()
}

/// Username stripped to letters, digits, whitespace, dots, hyphens and
/// underscores. Filters the raw input directly — escaping first would leak
/// entity characters into the result.
pub fn sanitize_username(username: &str) -> String {
    username
        .trim()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || c.is_whitespace() || matches!(c, '.' | '-' | '_'))
        .collect()
}
