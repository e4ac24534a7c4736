//! 班级名称（如 "9A"）的拼接与解析

use once_cell::sync::Lazy;
use regex::Regex;

static CLASS_LABEL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+)([A-Z]+)$").expect("Invalid class label regex"));

pub fn class_label(class_number: i32, division: &str) -> String {
    format!("{class_number}{division}")
}

/// 解析 "9A" 为 (9, "A")，无法解析时返回 None
pub fn parse_class_label(label: &str) -> Option<(i32, String)> {
    let caps = CLASS_LABEL_RE.captures(label.trim())?;
    let number = caps.get(1)?.as_str().parse::<i32>().ok()?;
    let division = caps.get(2)?.as_str().to_string();
    Some((number, division))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_label() {
        assert_eq!(class_label(9, "A"), "9A");
        assert_eq!(class_label(10, "C"), "10C");
    }

    #[test]
    fn test_parse_class_label() {
        assert_eq!(parse_class_label("9A"), Some((9, "A".to_string())));
        assert_eq!(parse_class_label(" 10B "), Some((10, "B".to_string())));
        assert_eq!(parse_class_label("9"), None);
        assert_eq!(parse_class_label("A9"), None);
        assert_eq!(parse_class_label("9a"), None);
    }
}
