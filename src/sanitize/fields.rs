//! Field-level sanitization for email addresses and subject lines.

use thiserror::Error;

use super::markup::sanitize_text;

/// Maximum subject length, in characters.
pub const MAX_SUBJECT_CHARS: usize = 200;

/// Validation failures from the field sanitizers. Messages are short and
/// safe to show to end users.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SanitizeError {
    /// Input does not match the basic `local@domain.tld` shape.
    #[error("Invalid email format")]
    InvalidFormat,

    /// Input carries control characters used for mail header injection.
    #[error("Email contains forbidden control characters")]
    InjectionAttempt,

    /// Input exceeds the allowed length.
    #[error("Subject exceeds {limit} characters")]
    TooLong { limit: usize, len: usize },
}

impl SanitizeError {
    /// Stable label for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            SanitizeError::InvalidFormat => "invalid_format",
            SanitizeError::InjectionAttempt => "injection_attempt",
            SanitizeError::TooLong { .. } => "too_long",
        }
    }
}

/// Normalize and validate an email address.
///
/// Trims and lowercases before any check. Empty input means "absent" and
/// returns an empty string. The injection check runs before the shape
/// test so smuggled headers are classified as attacks, not typos.
pub fn sanitize_email(input: &str) -> Result<String, SanitizeError> {
    let normalized = input.trim().to_lowercase();
    if normalized.is_empty() {
        return Ok(String::new());
    }
    if normalized
        .chars()
        .any(|c| matches!(c, '\r' | '\n' | '\t' | '\0'))
    {
        return Err(SanitizeError::InjectionAttempt);
    }
    if !has_email_shape(&normalized) {
        return Err(SanitizeError::InvalidFormat);
    }
    Ok(normalized)
}

fn has_email_shape(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let mut parts = email.split('@');
    let local = parts.next().unwrap_or_default();
    let domain = parts.next().unwrap_or_default();
    if parts.next().is_some() || local.is_empty() || domain.is_empty() {
        return false;
    }
    // domain needs at least one dot and no empty labels
    domain.contains('.') && domain.split('.').all(|label| !label.is_empty())
}

/// Sanitize a subject line: markup stripped, trimmed, bounded length.
/// Empty input returns an empty string.
pub fn sanitize_subject(input: &str) -> Result<String, SanitizeError> {
    let text = sanitize_text(input);
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(String::new());
    }
    let len = trimmed.chars().count();
    if len > MAX_SUBJECT_CHARS {
        return Err(SanitizeError::TooLong {
            limit: MAX_SUBJECT_CHARS,
            len,
        });
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_trimmed_and_lowercased() {
        assert_eq!(sanitize_email(" USER@Example.com ").unwrap(), "user@example.com");
    }

    #[test]
    fn test_email_empty_is_absent_not_error() {
        assert_eq!(sanitize_email("").unwrap(), "");
        assert_eq!(sanitize_email("   ").unwrap(), "");
    }

    #[test]
    fn test_email_double_at_rejected() {
        assert_eq!(sanitize_email("a@b@c"), Err(SanitizeError::InvalidFormat));
    }

    #[test]
    fn test_email_missing_tld_rejected() {
        assert_eq!(sanitize_email("a@b"), Err(SanitizeError::InvalidFormat));
        assert_eq!(sanitize_email("a@b..com"), Err(SanitizeError::InvalidFormat));
    }

    #[test]
    fn test_email_missing_parts_rejected() {
        assert_eq!(sanitize_email("@b.com"), Err(SanitizeError::InvalidFormat));
        assert_eq!(sanitize_email("a@"), Err(SanitizeError::InvalidFormat));
        assert_eq!(sanitize_email("plainaddress"), Err(SanitizeError::InvalidFormat));
    }

    #[test]
    fn test_email_header_injection_rejected() {
        assert_eq!(
            sanitize_email("a@b.com\r\nBcc: x@y.com"),
            Err(SanitizeError::InjectionAttempt)
        );
        assert_eq!(sanitize_email("a\t@b.com"), Err(SanitizeError::InjectionAttempt));
        assert_eq!(sanitize_email("a@b.com\0x"), Err(SanitizeError::InjectionAttempt));
    }

    #[test]
    fn test_subject_at_limit_accepted() {
        let subject = "x".repeat(MAX_SUBJECT_CHARS);
        assert_eq!(sanitize_subject(&subject).unwrap(), subject);
    }

    #[test]
    fn test_subject_over_limit_rejected() {
        let subject = "x".repeat(MAX_SUBJECT_CHARS + 1);
        assert_eq!(
            sanitize_subject(&subject),
            Err(SanitizeError::TooLong {
                limit: MAX_SUBJECT_CHARS,
                len: MAX_SUBJECT_CHARS + 1,
            })
        );
    }

    #[test]
    fn test_subject_strips_markup_and_trims() {
        assert_eq!(sanitize_subject("  <b>Weekly</b> news  ").unwrap(), "Weekly news");
    }

    #[test]
    fn test_subject_empty_is_absent() {
        assert_eq!(sanitize_subject("").unwrap(), "");
        assert_eq!(sanitize_subject("   ").unwrap(), "");
    }
}
