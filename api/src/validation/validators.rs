//! Field validators for input validation
//!
//! Each validator returns `Err(message)` describing the violated constraint;
//! the caller attaches the field name through `ValidationBuilder::check`.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Email address: local part, '@', dotted domain
    static ref EMAIL_REGEX: Regex = Regex::new(
        r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)+$"
    ).unwrap();

    /// Absolute http(s) URL with a host
    static ref URL_REGEX: Regex = Regex::new(
        r"^https?://[^\s/$.?#][^\s]*$"
    ).unwrap();
}

/// Validate that a string is not empty after trimming
pub fn validate_required(value: &str, field_name: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("{} is required", field_name));
    }
    Ok(())
}

/// Validate string length within bounds (inclusive, counted in chars)
pub fn validate_length(value: &str, min: usize, max: usize) -> Result<(), String> {
    validate_min_length(value, min)?;
    let len = value.chars().count();
    if len > max {
        return Err(format!("must be at most {} characters", max));
    }
    Ok(())
}

/// Validate a lower length bound only
pub fn validate_min_length(value: &str, min: usize) -> Result<(), String> {
    let len = value.chars().count();
    if len < min {
        return Err(format!("must be at least {} characters", min));
    }
    Ok(())
}

/// Validate length bounds on an optional string (only validates if Some)
pub fn validate_length_optional(value: &Option<String>, min: usize, max: usize) -> Result<(), String> {
    match value {
        Some(v) => validate_length(v, min, max),
        None => Ok(()),
    }
}

/// Validate that an integer is strictly greater than `gt`
pub fn validate_gt(value: i64, gt: i64) -> Result<(), String> {
    if value <= gt {
        return Err(format!("must be greater than {}", gt));
    }
    Ok(())
}

/// Validate an optional integer against a strict lower bound
pub fn validate_gt_optional(value: Option<i64>, gt: i64) -> Result<(), String> {
    match value {
        Some(v) => validate_gt(v, gt),
        None => Ok(()),
    }
}

/// Validate `gt < value <= le`
pub fn validate_int_range(value: i64, gt: i64, le: i64) -> Result<(), String> {
    validate_gt(value, gt)?;
    if value > le {
        return Err(format!("must be less than or equal to {}", le));
    }
    Ok(())
}

/// Validate email address syntax
pub fn validate_email(email: &str) -> Result<(), String> {
    if email.is_empty() {
        return Err("email is required".to_string());
    }
    if !EMAIL_REGEX.is_match(email) {
        return Err("must be a valid email address".to_string());
    }
    Ok(())
}

/// Validate URL format
pub fn validate_url(url: &str) -> Result<(), String> {
    if !URL_REGEX.is_match(url) {
        return Err("must be a valid URL (starting with http:// or https://)".to_string());
    }
    Ok(())
}

/// Validate optional URL
pub fn validate_url_optional(url: &Option<String>) -> Result<(), String> {
    match url {
        Some(u) => validate_url(u),
        None => Ok(()),
    }
}
