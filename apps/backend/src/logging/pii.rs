//! PII-safe logging helpers.
//!
//! Emails are the only PII this service logs; they are masked down to the
//! first character of the local part plus the domain. Raw token strings are
//! never logged at all.

use std::fmt;

/// Masks an email address, keeping the first character of the local part and
/// the full domain. Inputs without an `@` are masked entirely.
pub fn redact_email(input: &str) -> String {
    match input.find('@') {
        Some(at_pos) if at_pos > 0 => {
            // First char may be multibyte, so slice on a char boundary.
            let first_char = input.chars().next().map(String::from).unwrap_or_default();
            let domain = &input[at_pos..];
            format!("{first_char}***{domain}")
        }
        Some(at_pos) => input[at_pos..].to_string(),
        None => "***".to_string(),
    }
}

/// Display/Debug wrapper that redacts its contents when formatted.
///
/// Usage: `info!(email = %Redacted(&email), "login")`.
pub struct Redacted<'a>(pub &'a str);

impl fmt::Display for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", redact_email(self.0))
    }
}

impl fmt::Debug for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", redact_email(self.0))
    }
}
