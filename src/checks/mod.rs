pub mod category;
pub mod checksum;
pub mod date;
pub mod syntax;

pub use category::{classify, Category};
pub use checksum::{control_digit, verify_control_digit};
pub use date::check_birth_date;
pub use syntax::{check_syntax, Shape};

use crate::validator::ValidationError;

/// Length of the `YYMMDD` part once any century is removed.
pub(crate) const DATE_PART_LEN: usize = 6;

/// Reads a run of ASCII digits as a base-10 number.
pub(crate) fn parse_digits(value: &str) -> Result<u32, ValidationError> {
    value.bytes().try_fold(0u32, |acc, byte| {
        if byte.is_ascii_digit() {
            Ok(acc * 10 + u32::from(byte - b'0'))
        } else {
            Err(ValidationError::Syntax)
        }
    })
}
