use super::DATE_PART_LEN;
use crate::validator::ValidationError;
use regex::Regex;
use std::sync::LazyLock;

/// Six or eight leading digits, an optional `-`/`+`, then the four serial digits.
/// `[0-9]` instead of `\d` keeps non-ASCII digits out.
static IDENTIFIER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]{6}|[0-9]{8})[-+]?[0-9]{4}$").expect("Invalid identifier regex")
});

/// Inputs longer than this carry an explicit century.
const SHORT_FORM_MAX_LEN: usize = 11;
const SERIAL_PART_LEN: usize = 4;

/// The pieces of an identifier that passed the syntax gate.
///
/// Every field borrows from the input. The century, when present, has already been
/// split off so `date_part` is always `YYMMDD` as written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shape<'a> {
    pub century: Option<&'a str>,
    pub date_part: &'a str,
    pub separator: Option<char>,
    pub serial_part: &'a str,
}

impl<'a> Shape<'a> {
    /// The nine digits the control digit is computed over.
    pub fn checksum_payload(&self) -> String {
        let serial_digits = SERIAL_PART_LEN - 1;
        let mut payload = String::with_capacity(DATE_PART_LEN + serial_digits);
        payload.push_str(self.date_part);
        payload.push_str(&self.serial_part[..serial_digits]);
        payload
    }

    /// The supplied control digit, i.e. the last character of the input.
    pub fn supplied_control_digit(&self) -> &'a str {
        &self.serial_part[SERIAL_PART_LEN - 1..]
    }
}

pub fn check_syntax(input: &str) -> Result<Shape<'_>, ValidationError> {
    if !IDENTIFIER_REGEX.is_match(input) {
        return Err(ValidationError::Syntax);
    }

    // The regex only admits ASCII, so byte slicing below stays on char boundaries.
    let (century, rest) = if input.len() > SHORT_FORM_MAX_LEN {
        (Some(&input[..2]), &input[2..])
    } else {
        (None, input)
    };

    let separator = if rest.len() == SHORT_FORM_MAX_LEN {
        rest[DATE_PART_LEN..].chars().next()
    } else {
        None
    };

    Ok(Shape {
        century,
        date_part: &rest[..DATE_PART_LEN],
        separator,
        serial_part: &rest[rest.len() - SERIAL_PART_LEN..],
    })
}
