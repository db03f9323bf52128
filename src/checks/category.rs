use super::{parse_digits, DATE_PART_LEN};
use crate::validator::ValidationError;
use serde::Serialize;
use std::fmt;

/// A century prefix of `16` always marks an organisation number.
const ORGANISATION_CENTURY: &str = "16";
/// Month fields at or above this value are organisation numbers.
const ORGANISATION_MONTH_FLOOR: u32 = 20;
/// Coordination numbers add 60 to the day, so the tens digit lands in 6..=9.
pub(crate) const COORDINATION_DAY_OFFSET: u32 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Birthdate plus serial and control digit
    Personal,
    /// Personal number variant with the day offset by 60
    Coordination,
    /// Legal entity; the date-shaped digits are not a date
    Organisation,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Personal => "personal",
            Category::Coordination => "coordination",
            Category::Organisation => "organisation",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decides the category from the century prefix (if any) and the `YYMMDD` date part.
pub fn classify(century: Option<&str>, date_part: &str) -> Result<Category, ValidationError> {
    if date_part.len() != DATE_PART_LEN || !date_part.is_ascii() {
        return Err(ValidationError::Syntax);
    }
    let month_field = parse_digits(&date_part[2..4])?;
    let day_tens = parse_digits(&date_part[4..5])?;

    let organisation =
        century == Some(ORGANISATION_CENTURY) || month_field >= ORGANISATION_MONTH_FLOOR;
    let coordination = (COORDINATION_DAY_OFFSET..=9).contains(&day_tens);

    match (organisation, coordination) {
        (true, true) => Err(ValidationError::ConflictingCategory),
        (true, false) => Ok(Category::Organisation),
        (false, true) => Ok(Category::Coordination),
        (false, false) => Ok(Category::Personal),
    }
}
