//! Input validation for account and ad flows.
//!
//! Validators return `Result<(), String>` so callers can collect several
//! field errors into one `Error::Validation` via `ValidationErrorBuilder`.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Matches the format check the registration form performs: one "@",
    /// no whitespace, and a dot somewhere in the domain part.
    static ref EMAIL_REGEX: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
}

/// Canonical form used for storage and comparison everywhere: the in-memory
/// prototype lowercased and trimmed while the device store compared exact
/// strings, so one rule is applied at the flow boundary.
pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Validate an email address
pub fn validate_email(email: &str) -> Result<(), String> {
    if email.trim().is_empty() {
        return Err("Email is required".to_string());
    }

    if !EMAIL_REGEX.is_match(email.trim()) {
        return Err("Invalid email format".to_string());
    }

    Ok(())
}

/// Validate password strength: at least 6 characters with one uppercase
/// letter, one lowercase letter and one digit.
pub fn validate_password(password: &str) -> Result<(), String> {
    if password.len() < 6 {
        return Err("Password must be at least 6 characters".to_string());
    }

    if !password.chars().any(|c| c.is_uppercase()) {
        return Err("Password must contain at least one uppercase letter".to_string());
    }

    if !password.chars().any(|c| c.is_lowercase()) {
        return Err("Password must contain at least one lowercase letter".to_string());
    }

    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err("Password must contain at least one digit".to_string());
    }

    Ok(())
}

/// Validate a display name
pub fn validate_nome(nome: &str) -> Result<(), String> {
    if nome.trim().is_empty() {
        return Err("Name is required".to_string());
    }

    if nome.len() > 100 {
        return Err("Name is too long (max 100 characters)".to_string());
    }

    Ok(())
}

/// Validate an ad title
pub fn validate_titulo(titulo: &str) -> Result<(), String> {
    if titulo.trim().is_empty() {
        return Err("Title is required".to_string());
    }

    if titulo.len() > 200 {
        return Err("Title is too long (max 200 characters)".to_string());
    }

    Ok(())
}
