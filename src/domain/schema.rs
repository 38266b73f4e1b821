//! Store-side record schema. Checked by every store adapter before a write,
//! independently of request validation.

use crate::domain::SubmissionDraft;
use lazy_static::lazy_static;
use regex::Regex;

pub const NAME_MAX_CHARS: usize = 100;
pub const EMAIL_MAX_CHARS: usize = 254;
pub const SUBJECT_MAX_CHARS: usize = 200;
pub const MESSAGE_MAX_CHARS: usize = 5000;

lazy_static! {
    /// `local@domain.tld` with no whitespace and a single `@`.
    static ref EMAIL_REGEX: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
}

/// Trim whitespace and the byte-order mark (U+FEFF) from both ends.
pub fn trim_text(s: &str) -> &str {
    s.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
}

/// Check a draft against the stored-record schema.
///
/// Returns one message per offending field, in field order. Empty means the record is acceptable.
pub fn check_record(draft: &SubmissionDraft) -> Vec<String> {
    let mut errors = Vec::new();

    check_text("Name", &draft.name, NAME_MAX_CHARS, &mut errors);
    check_text("Email", &draft.email, EMAIL_MAX_CHARS, &mut errors);
    if !trim_text(&draft.email).is_empty() && !looks_like_email(&draft.email) {
        errors.push("Please enter a valid email address".to_string());
    }
    check_text("Subject", &draft.subject, SUBJECT_MAX_CHARS, &mut errors);
    check_text("Message", &draft.message, MESSAGE_MAX_CHARS, &mut errors);

    errors
}

fn check_text(label: &str, value: &str, max: usize, errors: &mut Vec<String>) {
    if trim_text(value).is_empty() {
        errors.push(format!("{label} is required"));
    } else if value.chars().count() > max {
        errors.push(format!("{label} cannot be more than {max} characters"));
    }
}

fn looks_like_email(s: &str) -> bool {
    EMAIL_REGEX.is_match(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(name: &str, email: &str, subject: &str, message: &str) -> SubmissionDraft {
        SubmissionDraft {
            name: name.into(),
            email: email.into(),
            subject: subject.into(),
            message: message.into(),
        }
    }

    #[test]
    fn test_valid_record_passes() {
        assert!(check_record(&draft("Ann", "a@b.com", "Hi", "Hello there")).is_empty());
    }

    #[test]
    fn test_bad_email_is_rejected() {
        for email in ["ann", "a@b", "@b.com", "a b@c.com", "a@@b.com", "a@.com"] {
            let errors = check_record(&draft("Ann", email, "Hi", "Hello"));
            assert_eq!(
                errors,
                vec!["Please enter a valid email address".to_string()],
                "email {email:?}"
            );
        }
    }

    #[test]
    fn test_length_limits_are_per_field() {
        let long_name = "x".repeat(NAME_MAX_CHARS + 1);
        let long_message = "y".repeat(MESSAGE_MAX_CHARS + 1);
        let errors = check_record(&draft(&long_name, "a@b.com", "Hi", &long_message));
        assert_eq!(errors.len(), 2);
        assert!(errors[0].starts_with("Name cannot be more than"));
        assert!(errors[1].starts_with("Message cannot be more than"));
    }

    #[test]
    fn test_blank_fields_are_required() {
        let errors = check_record(&draft(" ", "a@b.com", "", "Hello"));
        assert_eq!(
            errors,
            vec!["Name is required".to_string(), "Subject is required".to_string()]
        );
    }

    #[test]
    fn test_byte_order_mark_counts_as_blank() {
        assert_eq!(trim_text("\u{feff} Ann \u{feff}"), "Ann");
        let errors = check_record(&draft("\u{feff}", "a@b.com", "Hi", "Hello"));
        assert_eq!(errors, vec!["Name is required".to_string()]);
    }

    #[test]
    fn test_length_counts_chars_not_bytes() {
        let name = "é".repeat(NAME_MAX_CHARS);
        assert!(check_record(&draft(&name, "a@b.com", "Hi", "Hello")).is_empty());
    }
}
