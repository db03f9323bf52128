use super::category::{Category, COORDINATION_DAY_OFFSET};
use super::{parse_digits, DATE_PART_LEN};
use crate::validator::ValidationError;
use chrono::NaiveDate;

/// Checks that the `YYMMDD` date part names a real calendar day.
///
/// Organisation numbers are skipped. Coordination numbers have their day offset removed
/// first. The two-digit year is taken literally (no century is inferred), which puts the
/// leap years at every multiple of four including `00`.
pub fn check_birth_date(date_part: &str, category: Category) -> Result<(), ValidationError> {
    if category == Category::Organisation {
        return Ok(());
    }

    if date_part.len() != DATE_PART_LEN || !date_part.is_ascii() {
        return Err(ValidationError::Syntax);
    }

    let year = parse_digits(&date_part[..2])?;
    let month = parse_digits(&date_part[2..4])?;
    let written_day = parse_digits(&date_part[4..6])?;
    let day = if category == Category::Coordination {
        written_day
            .checked_sub(COORDINATION_DAY_OFFSET * 10)
            .ok_or_else(|| ValidationError::InvalidDate(date_part.to_string()))?
    } else {
        written_day
    };

    // year is at most 99
    match NaiveDate::from_ymd_opt(year as i32, month, day) {
        Some(_) => Ok(()),
        None => Err(ValidationError::InvalidDate(format!(
            "{:02}{:02}{:02}",
            year, month, day
        ))),
    }
}
