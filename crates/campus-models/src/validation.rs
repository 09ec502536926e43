//! Field validators shared by the request DTOs.
//!
//! Each function follows the `validator` custom-function contract and is wired up
//! with `#[validate(custom(function = "..."))]`.

use chrono::{Datelike, NaiveDate, Utc};
use validator::ValidationError;

pub const MIN_STUDENT_AGE: u32 = 10;
pub const MAX_STUDENT_AGE: u32 = 100;
pub const MAX_AVATAR_URL_LENGTH: usize = 2048;

fn invalid(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(message.into())
}

/// Names must contain visible text and no markup characters.
pub fn validate_person_name(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(invalid("blank", "must not be blank"));
    }
    if value
        .chars()
        .any(|c| c.is_control() || matches!(c, '<' | '>' | '{' | '}'))
    {
        return Err(invalid("characters", "contains invalid characters"));
    }
    Ok(())
}

/// Accepts an optional leading `+`, digits, spaces, dashes, dots and parentheses,
/// with 7 to 15 digits in total.
pub fn validate_phone(value: &str) -> Result<(), ValidationError> {
    let trimmed = value.trim();
    let body = trimmed.strip_prefix('+').unwrap_or(trimmed);

    if !body
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, ' ' | '-' | '.' | '(' | ')'))
    {
        return Err(invalid("phone", "must be a valid phone number"));
    }

    let digits = body.chars().filter(char::is_ascii_digit).count();
    if !(7..=15).contains(&digits) {
        return Err(invalid("phone", "must be a valid phone number"));
    }
    Ok(())
}

/// Avatars are either an absolute http(s) URL or an inline base64 image data URI.
pub fn validate_avatar_url(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Ok(());
    }

    if let Some(rest) = value.strip_prefix("data:image/") {
        return match rest.split_once(";base64,") {
            Some((subtype, data))
                if !subtype.is_empty()
                    && subtype.chars().all(|c| c.is_ascii_alphanumeric() || c == '+')
                    && !data.is_empty() =>
            {
                Ok(())
            }
            _ => Err(invalid("avatar_url", "must be a base64 image data URI")),
        };
    }

    let is_http = value.starts_with("https://") || value.starts_with("http://");
    if !is_http || value.chars().any(char::is_whitespace) {
        return Err(invalid("avatar_url", "must be a valid URL"));
    }
    if value.len() > MAX_AVATAR_URL_LENGTH {
        return Err(invalid("avatar_url", "must be at most 2048 characters"));
    }
    Ok(())
}

/// Age on `today` in whole years.
pub fn age_on(dob: NaiveDate, today: NaiveDate) -> u32 {
    let mut age = today.year() - dob.year();
    if (today.month(), today.day()) < (dob.month(), dob.day()) {
        age -= 1;
    }
    age.max(0) as u32
}

pub fn validate_date_of_birth(dob: &NaiveDate) -> Result<(), ValidationError> {
    let today = Utc::now().date_naive();
    if *dob > today {
        return Err(invalid("dob", "must be in the past"));
    }
    let age = age_on(*dob, today);
    if !(MIN_STUDENT_AGE..=MAX_STUDENT_AGE).contains(&age) {
        return Err(invalid("dob", "age must be between 10 and 100 years"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_person_name() {
        assert!(validate_person_name("Mary-Jane O'Neil").is_ok());
        assert!(validate_person_name("Stu2").is_ok());
        assert!(validate_person_name("   ").is_err());
        assert!(validate_person_name("<script>").is_err());
    }

    #[test]
    fn test_phone() {
        assert!(validate_phone("+234 803 123 4567").is_ok());
        assert!(validate_phone("(555) 123-4567").is_ok());
        assert!(validate_phone("12345").is_err());
        assert!(validate_phone("call me").is_err());
    }

    #[test]
    fn test_avatar_url() {
        assert!(validate_avatar_url("https://cdn.example.com/a.png").is_ok());
        assert!(validate_avatar_url("data:image/png;base64,iVBORw0KGgo=").is_ok());
        assert!(validate_avatar_url("data:text/html;base64,PGh0bWw+").is_err());
        assert!(validate_avatar_url("ftp://example.com/a.png").is_err());
        assert!(validate_avatar_url("").is_ok());
    }

    #[test]
    fn test_age_on_birthday_boundary() {
        let dob = NaiveDate::from_ymd_opt(2000, 6, 15).unwrap();
        let before = NaiveDate::from_ymd_opt(2020, 6, 14).unwrap();
        let on = NaiveDate::from_ymd_opt(2020, 6, 15).unwrap();
        assert_eq!(age_on(dob, before), 19);
        assert_eq!(age_on(dob, on), 20);
    }

    #[test]
    fn test_date_of_birth_range() {
        let today = Utc::now().date_naive();
        let too_young = today - chrono::Duration::days(365 * 5);
        let adult = today - chrono::Duration::days(365 * 20);
        assert!(validate_date_of_birth(&too_young).is_err());
        assert!(validate_date_of_birth(&adult).is_ok());
    }
}
