use crate::utils::error::{DiversionError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_finite(field_name: &str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(DiversionError::invalid_input(
            field_name,
            value,
            "Value must be a finite number",
        ));
    }
    Ok(())
}

pub fn validate_range(field_name: &str, value: f64, min: f64, max: f64) -> Result<()> {
    validate_finite(field_name, value)?;
    if value < min || value > max {
        return Err(DiversionError::invalid_input(
            field_name,
            value,
            format!("Value must be between {} and {}", min, max),
        ));
    }
    Ok(())
}

pub fn validate_latitude(field_name: &str, value: f64) -> Result<()> {
    validate_range(field_name, value, -90.0, 90.0)
}

pub fn validate_longitude(field_name: &str, value: f64) -> Result<()> {
    validate_range(field_name, value, -180.0, 180.0)
}

pub fn validate_positive(field_name: &str, value: f64) -> Result<()> {
    validate_finite(field_name, value)?;
    if value <= 0.0 {
        return Err(DiversionError::invalid_input(
            field_name,
            value,
            "Value must be greater than zero",
        ));
    }
    Ok(())
}

pub fn validate_non_negative(field_name: &str, value: f64) -> Result<()> {
    validate_finite(field_name, value)?;
    if value < 0.0 {
        return Err(DiversionError::invalid_input(
            field_name,
            value,
            "Value cannot be negative",
        ));
    }
    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(DiversionError::invalid_input(
            field_name,
            value,
            format!("Value must be at least {}", min_value),
        ));
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(DiversionError::invalid_input(
            field_name,
            value,
            "Value cannot be empty or whitespace-only",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_latitude() {
        assert!(validate_latitude("lat", 51.47).is_ok());
        assert!(validate_latitude("lat", -90.0).is_ok());
        assert!(validate_latitude("lat", 90.0).is_ok());
        assert!(validate_latitude("lat", 90.01).is_err());
        assert!(validate_latitude("lat", f64::NAN).is_err());
    }

    #[test]
    fn test_validate_longitude() {
        assert!(validate_longitude("lon", -180.0).is_ok());
        assert!(validate_longitude("lon", 179.9).is_ok());
        assert!(validate_longitude("lon", 180.5).is_err());
        assert!(validate_longitude("lon", f64::INFINITY).is_err());
    }

    #[test]
    fn test_validate_positive_and_non_negative() {
        assert!(validate_positive("fuel_flow_kg_per_hr", 2500.0).is_ok());
        assert!(validate_positive("fuel_flow_kg_per_hr", 0.0).is_err());
        assert!(validate_non_negative("fuel_reserve_kg", 0.0).is_ok());
        assert!(validate_non_negative("fuel_reserve_kg", -1.0).is_err());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("concurrent_flights", 4, 1).is_ok());
        assert!(validate_positive_number("concurrent_flights", 0, 1).is_err());
    }

    #[test]
    fn test_validate_non_empty_string() {
        assert!(validate_non_empty_string("name", "EGLL").is_ok());
        assert!(validate_non_empty_string("name", "   ").is_err());
    }
}
