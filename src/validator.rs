//! Validation of Swedish personal identity numbers, coordination numbers and
//! organisation numbers.
//!
//! The pipeline runs syntax, classification, date and checksum checks in that order and
//! stops at the first failure. [`check`] hands back the failure for diagnostics; [`validate`]
//! only answers yes or no.

use crate::checks::{check_birth_date, check_syntax, classify, verify_control_digit, Category};
use log::debug;
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Wrong length, characters or separator position.
    #[error("does not match the identifier pattern")]
    Syntax,

    /// Both organisation and coordination markers are present.
    #[error("has both organisation and coordination markers")]
    ConflictingCategory,

    /// The date part is not a calendar date.
    #[error("date part {0} is not a valid date")]
    InvalidDate(String),

    #[error("control digit is {found}, expected {expected}")]
    Checksum { expected: u32, found: u32 },

    #[error("no identifier given")]
    NullInput,
}

impl ValidationError {
    /// Stable short name, used in reports and statistics.
    pub fn kind(&self) -> &'static str {
        match self {
            ValidationError::Syntax => "syntax",
            ValidationError::ConflictingCategory => "conflicting-category",
            ValidationError::InvalidDate(_) => "invalid-date",
            ValidationError::Checksum { .. } => "checksum",
            ValidationError::NullInput => "null-input",
        }
    }
}

/// An identifier that passed every check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identifier {
    pub category: Category,
    pub century_included: bool,
    /// `YYMMDD` as written, century removed, coordination offset kept.
    pub date_part: String,
    /// Birth number and control digit.
    pub serial_part: String,
    pub separator: Option<char>,
    pub control_digit: u32,
}

impl Identifier {
    pub fn separator_present(&self) -> bool {
        self.separator.is_some()
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}",
            self.date_part,
            self.separator.unwrap_or('-'),
            self.serial_part
        )
    }
}

/// Runs every check on `input` and returns the parsed identifier or the first failure.
pub fn check(input: &str) -> Result<Identifier, ValidationError> {
    let result = run_checks(input);
    if let Err(e) = &result {
        debug!("Rejected '{}' ({}): {}", input, e.kind(), e);
    }
    result
}

/// Like [`check`], but treats a missing input as [`ValidationError::NullInput`].
pub fn check_opt(input: Option<&str>) -> Result<Identifier, ValidationError> {
    match input {
        Some(value) => check(value),
        None => {
            debug!("Rejected missing identifier");
            Err(ValidationError::NullInput)
        }
    }
}

/// Returns true if `input` is a valid personal, coordination or organisation number.
pub fn validate(input: &str) -> bool {
    check(input).is_ok()
}

pub fn validate_opt(input: Option<&str>) -> bool {
    check_opt(input).is_ok()
}

fn run_checks(input: &str) -> Result<Identifier, ValidationError> {
    let shape = check_syntax(input)?;
    let category = classify(shape.century, shape.date_part)?;
    check_birth_date(shape.date_part, category)?;

    let supplied = shape.supplied_control_digit();
    verify_control_digit(&shape.checksum_payload(), supplied)?;
    let control_digit = supplied
        .chars()
        .next()
        .and_then(|ch| ch.to_digit(10))
        .ok_or(ValidationError::Syntax)?;

    Ok(Identifier {
        category,
        century_included: shape.century.is_some(),
        date_part: shape.date_part.to_string(),
        serial_part: shape.serial_part.to_string(),
        separator: shape.separator,
        control_digit,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_form_personal_number() {
        let id = check("201701102384").unwrap();
        assert_eq!(id.category, Category::Personal);
        assert!(id.century_included);
        assert!(!id.separator_present());
        assert_eq!(id.date_part, "170110");
        assert_eq!(id.serial_part, "2384");
        assert_eq!(id.control_digit, 4);
        assert_eq!(id.to_string(), "170110-2384");
    }

    #[test]
    fn display_keeps_plus_separator() {
        let id = check("900118+9811").unwrap();
        assert_eq!(id.to_string(), "900118+9811");
    }

    #[test]
    fn stops_at_first_failing_stage() {
        assert_eq!(check("141206*2380"), Err(ValidationError::Syntax));
        assert_eq!(
            check("557260-1234"),
            Err(ValidationError::ConflictingCategory)
        );
        assert_eq!(
            check("190302299813"),
            Err(ValidationError::InvalidDate("030229".to_string()))
        );
        assert_eq!(
            check("201701272394"),
            Err(ValidationError::Checksum {
                expected: 3,
                found: 4
            })
        );
    }

    #[test]
    fn missing_input_is_null_input() {
        assert_eq!(check_opt(None), Err(ValidationError::NullInput));
        assert!(!validate_opt(None));
        assert!(validate_opt(Some("141206-2380")));
    }

    #[test]
    fn empty_input_is_syntax_error() {
        assert_eq!(check(""), Err(ValidationError::Syntax));
    }

    #[test]
    fn error_kinds_are_stable() {
        assert_eq!(ValidationError::Syntax.kind(), "syntax");
        assert_eq!(ValidationError::ConflictingCategory.kind(), "conflicting-category");
        assert_eq!(ValidationError::InvalidDate(String::new()).kind(), "invalid-date");
        assert_eq!(
            ValidationError::Checksum {
                expected: 1,
                found: 2
            }
            .kind(),
            "checksum"
        );
        assert_eq!(ValidationError::NullInput.kind(), "null-input");
    }
}
