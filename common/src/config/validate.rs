use std::fmt::Display;
use std::ops::RangeInclusive;

pub trait Validate {
    fn validate(&self) -> Result<(), String>;
}

pub fn validate_range<T>(name: &str, value: T, range: RangeInclusive<T>) -> Result<(), String>
where
    T: PartialOrd + Display + Copy,
{
    if range.contains(&value) {
        Ok(())
    } else {
        Err(format!(
            "{} must be between {} and {}, got {}",
            name,
            range.start(),
            range.end(),
            value
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_range_accepts_bounds() {
        assert!(validate_range("lives", 1u32, 1..=9).is_ok());
        assert!(validate_range("lives", 9u32, 1..=9).is_ok());
    }

    #[test]
    fn test_validate_range_rejects_outside() {
        let err = validate_range("lives", 0u32, 1..=9).unwrap_err();
        assert_eq!(err, "lives must be between 1 and 9, got 0");
    }
}
