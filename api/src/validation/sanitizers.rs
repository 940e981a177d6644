//! Input sanitization functions
//!
//! Only whitespace around machine-readable fields (email, URL) is touched.
//! Names, passwords and free text are echoed exactly as submitted.

/// Trim leading and trailing whitespace from a string
pub fn trim(value: &str) -> String {
    value.trim().to_string()
}

/// Trim an optional string in-place, collapsing blank values to `None`
pub fn trim_optional(value: &mut Option<String>) {
    if let Some(ref mut s) = value {
        *s = s.trim().to_string();
        if s.is_empty() {
            *value = None;
        }
    }
}

/// Normalize an email address: trim only, case is preserved
pub fn sanitize_email(email: &str) -> String {
    trim(email)
}

/// Sanitize an optional URL field
pub fn sanitize_url_optional(url: &mut Option<String>) {
    trim_optional(url);
}
