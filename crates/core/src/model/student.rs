use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::StudentId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum StudentError {
    #[error("phone number cannot be empty")]
    EmptyPhone,

    #[error("phone number contains an invalid character: {0:?}")]
    InvalidPhone(char),
}

/// Identity record returned by the eligibility check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: StudentId,
    pub name: String,
    pub phone: String,
    #[serde(default)]
    pub email: Option<String>,
}

impl Student {
    /// Email used for result records; the backend accepts an empty string.
    #[must_use]
    pub fn email_or_empty(&self) -> &str {
        self.email.as_deref().unwrap_or_default()
    }
}

/// Normalize a phone number typed by a student.
///
/// Arabic-Indic and extended Arabic-Indic digits are mapped to ASCII and
/// whitespace is dropped. A single leading `+` is kept.
///
/// # Errors
///
/// Returns `StudentError::EmptyPhone` when nothing is left after trimming and
/// `StudentError::InvalidPhone` for any character that is not a digit.
pub fn normalize_phone(raw: &str) -> Result<String, StudentError> {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars().filter(|c| !c.is_whitespace()) {
        let mapped = match ch {
            '0'..='9' => ch,
            '\u{0660}'..='\u{0669}' => ascii_digit(u32::from(ch) - 0x0660),
            '\u{06F0}'..='\u{06F9}' => ascii_digit(u32::from(ch) - 0x06F0),
            '+' if out.is_empty() => ch,
            other => return Err(StudentError::InvalidPhone(other)),
        };
        out.push(mapped);
    }

    if out.is_empty() || out == "+" {
        return Err(StudentError::EmptyPhone);
    }
    Ok(out)
}

fn ascii_digit(offset: u32) -> char {
    char::from_digit(offset, 10).unwrap_or('0')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_arabic_indic_digits() {
        assert_eq!(normalize_phone("٠١٢٣٤٥٦٧٨٩").unwrap(), "0123456789");
        assert_eq!(normalize_phone("۰۵۵").unwrap(), "055");
    }

    #[test]
    fn strips_spaces_and_keeps_leading_plus() {
        assert_eq!(normalize_phone(" +966 55 123 ").unwrap(), "+96655123");
    }

    #[test]
    fn rejects_empty_and_garbage() {
        assert_eq!(normalize_phone("   "), Err(StudentError::EmptyPhone));
        assert_eq!(normalize_phone("+"), Err(StudentError::EmptyPhone));
        assert_eq!(normalize_phone("05-5"), Err(StudentError::InvalidPhone('-')));
        assert_eq!(normalize_phone("1+2"), Err(StudentError::InvalidPhone('+')));
    }

    #[test]
    fn student_deserializes_without_email() {
        let student: Student =
            serde_json::from_str(r#"{"id": 5, "name": "Sara", "phone": "0555"}"#).unwrap();
        assert_eq!(student.id, StudentId::new(5));
        assert_eq!(student.email_or_empty(), "");
    }
}
