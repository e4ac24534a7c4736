use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::classes::entities::{CLASS_NUMBERS, DIVISIONS};

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Z|a-z]{2,}$").expect("Invalid email regex")
});

pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if !EMAIL_RE.is_match(email) {
        return Err("Email format is invalid");
    }
    Ok(())
}

pub fn validate_name(name: &str) -> Result<(), &'static str> {
    if name.trim().is_empty() {
        return Err("Name is required");
    }
    if name.chars().count() > 255 {
        return Err("Name must be at most 255 characters");
    }
    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), &'static str> {
    if password.is_empty() {
        return Err("Password is required");
    }
    if password.len() > 128 {
        return Err("Password must be at most 128 characters");
    }
    Ok(())
}

pub fn validate_class_number(class_number: i32) -> Result<(), &'static str> {
    if !CLASS_NUMBERS.contains(&class_number) {
        return Err("Class number must be between 8 and 10");
    }
    Ok(())
}

pub fn validate_division(division: &str) -> Result<(), &'static str> {
    if !DIVISIONS.contains(&division) {
        return Err("Division must be one of A, B, C");
    }
    Ok(())
}

/// 学生的年级与分班字段
pub fn validate_student_class_fields(
    class_name: Option<&str>,
    division: Option<&str>,
) -> Result<(), &'static str> {
    if class_name.is_some_and(|c| c.chars().count() > 10) {
        return Err("className must be at most 10 characters");
    }
    if division.is_some_and(|d| d.chars().count() != 1) {
        return Err("Division must be a single letter");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email() {
        assert!(validate_email("teacher@school.in").is_ok());
        assert!(validate_email("no-at-sign").is_err());
        assert!(validate_email("a@b").is_err());
    }

    #[test]
    fn test_name() {
        assert!(validate_name("Asha Rao").is_ok());
        assert!(validate_name("   ").is_err());
        assert!(validate_name(&"x".repeat(256)).is_err());
    }

    #[test]
    fn test_class_fields() {
        assert!(validate_class_number(8).is_ok());
        assert!(validate_class_number(10).is_ok());
        assert!(validate_class_number(7).is_err());
        assert!(validate_division("B").is_ok());
        assert!(validate_division("D").is_err());
        assert!(validate_student_class_fields(Some("9"), Some("A")).is_ok());
        assert!(validate_student_class_fields(Some("9"), Some("AB")).is_err());
    }
}
