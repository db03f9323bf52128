use crate::validator::ValidationError;

/// Luhn control digit over `digits`.
///
/// Digits are weighted 2, 1, 2, 1, ... from the left. Each product is reduced to its
/// digit sum before being added to the total, and the control digit is whatever brings
/// the total up to the next multiple of ten. Returns `None` if `digits` holds anything
/// other than ASCII digits.
///
/// ```
/// assert_eq!(idcheck::control_digit("811228987"), Some(4));
/// assert_eq!(idcheck::control_digit("81122898x"), None);
/// ```
pub fn control_digit(digits: &str) -> Option<u32> {
    let mut total = 0;

    for (index, ch) in digits.chars().enumerate() {
        if !ch.is_ascii_digit() {
            return None;
        }
        let digit = ch.to_digit(10)?;
        let weighted = if index % 2 == 0 { digit * 2 } else { digit };
        total += digit_sum(weighted);
    }

    Some((10 - total % 10) % 10)
}

fn digit_sum(mut number: u32) -> u32 {
    let mut sum = 0;
    while number > 0 {
        sum += number % 10;
        number /= 10;
    }
    sum
}

/// Compares the computed control digit for `payload` with the one written in the input.
pub fn verify_control_digit(payload: &str, supplied: &str) -> Result<(), ValidationError> {
    let expected = control_digit(payload).ok_or(ValidationError::Syntax)?;

    let mut supplied_chars = supplied.chars();
    let found = match (supplied_chars.next(), supplied_chars.next()) {
        (Some(ch), None) => ch.to_digit(10).ok_or(ValidationError::Syntax)?,
        _ => return Err(ValidationError::Syntax),
    };

    if expected == found {
        Ok(())
    } else {
        Err(ValidationError::Checksum { expected, found })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn computes_known_control_digits() {
        assert_eq!(control_digit("811228987"), Some(4));
        assert_eq!(control_digit("670919953"), Some(0));
        assert_eq!(control_digit("556614318"), Some(5));
        assert_eq!(control_digit("701063239"), Some(1));
    }

    #[test]
    fn doubled_digits_are_digit_summed() {
        // 9 * 2 = 18 -> 9, total 9 -> control 1
        assert_eq!(control_digit("9"), Some(1));
        // 5 * 2 = 10 -> 1, then 5, total 6 -> control 4
        assert_eq!(control_digit("55"), Some(4));
    }

    #[test]
    fn total_on_multiple_of_ten_gives_zero() {
        assert_eq!(control_digit(""), Some(0));
        assert_eq!(control_digit("0000000000"), Some(0));
        assert_eq!(control_digit("5"), Some(9));
    }

    #[test]
    fn rejects_non_digits() {
        assert_eq!(control_digit("12-34"), None);
        assert_eq!(control_digit("١٢"), None);
    }

    #[test]
    fn verify_reports_expected_and_found() {
        assert!(verify_control_digit("141206238", "0").is_ok());
        assert_eq!(
            verify_control_digit("141206238", "1"),
            Err(ValidationError::Checksum {
                expected: 0,
                found: 1
            })
        );
    }

    #[test]
    fn verify_rejects_malformed_control_digit() {
        assert_eq!(
            verify_control_digit("141206238", "10"),
            Err(ValidationError::Syntax)
        );
        assert_eq!(
            verify_control_digit("141206238", ""),
            Err(ValidationError::Syntax)
        );
    }
}
