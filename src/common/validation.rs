// src/common/validation.rs
// Validadores customizados usados nos payloads (`#[validate(custom(...))]`).

use rust_decimal::Decimal;
use validator::ValidationError;

pub const WEEKDAYS: [&str; 7] = [
    "Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday", "Sunday",
];

fn error(code: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(code.into());
    err
}

pub fn validate_weekday(day: &str) -> Result<(), ValidationError> {
    if WEEKDAYS.contains(&day) {
        Ok(())
    } else {
        Err(error("invalid_weekday"))
    }
}

pub fn validate_weekdays(days: &[String]) -> Result<(), ValidationError> {
    days.iter().try_for_each(|d| validate_weekday(d))
}

pub fn validate_not_negative(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(error("must_not_be_negative"));
    }
    Ok(())
}

pub fn validate_hex_color(color: &str) -> Result<(), ValidationError> {
    let hex = color.strip_prefix('#').ok_or_else(|| error("invalid_color"))?;
    if (hex.len() == 6 || hex.len() == 3) && hex.chars().all(|c| c.is_ascii_hexdigit()) {
        Ok(())
    } else {
        Err(error("invalid_color"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_weekday() {
        assert!(validate_weekday("Monday").is_ok());
        assert!(validate_weekday("monday").is_err());
        assert!(validate_weekdays(&["Tuesday".into(), "Friday".into()]).is_ok());
        assert!(validate_weekdays(&["Tuesday".into(), "Funday".into()]).is_err());
    }

    #[test]
    fn test_non_negative() {
        assert!(validate_not_negative(&dec!(0)).is_ok());
        assert!(validate_not_negative(&dec!(12.50)).is_ok());
        assert!(validate_not_negative(&dec!(-0.01)).is_err());
    }

    #[test]
    fn test_hex_color() {
        assert!(validate_hex_color("#3B82F6").is_ok());
        assert!(validate_hex_color("#fff").is_ok());
        assert!(validate_hex_color("3B82F6").is_err());
        assert!(validate_hex_color("#GGGGGG").is_err());
    }
}
