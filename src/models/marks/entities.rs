use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../client/src/types/generated/mark.ts")]
pub struct Mark {
    pub id: i64,
    pub student_id: i64,
    pub student_name: Option<String>,
    pub subject: String,
    // 与 subject 相同，兼容旧客户端
    pub subject_name: String,
    // 考试类型，如 "Unit Test 1"、"Mid Term"
    pub exam_type: String,
    pub marks_obtained: f64,
    pub total_marks: f64,
    pub percentage: f64,
    pub remarks: Option<String>,
    pub class_name: Option<String>,
    pub division: Option<String>,
    pub teacher_id: Option<i64>,
    pub teacher_name: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// 百分比 = 得分 / 总分 * 100，保留两位小数；总分非正时为 0
pub fn compute_percentage(marks_obtained: f64, total_marks: f64) -> f64 {
    if total_marks <= 0.0 {
        return 0.0;
    }
    (marks_obtained / total_marks * 100.0 * 100.0).round() / 100.0
}

/// 分数合法性：总分为正，得分在 [0, 总分] 之间
pub fn validate_scores(marks_obtained: f64, total_marks: f64) -> Result<(), &'static str> {
    if !marks_obtained.is_finite() || !total_marks.is_finite() {
        return Err("Marks must be finite numbers");
    }
    if total_marks <= 0.0 {
        return Err("total_marks must be greater than 0");
    }
    if marks_obtained < 0.0 {
        return Err("marks_obtained cannot be negative");
    }
    if marks_obtained > total_marks {
        return Err("marks_obtained cannot exceed total_marks");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_percentage_rounds_to_two_decimals() {
        assert_eq!(compute_percentage(45.0, 50.0), 90.0);
        assert_eq!(compute_percentage(1.0, 3.0), 33.33);
        assert_eq!(compute_percentage(2.0, 3.0), 66.67);
        assert_eq!(compute_percentage(0.0, 80.0), 0.0);
        assert_eq!(compute_percentage(10.0, 0.0), 0.0);
    }

    #[test]
    fn test_validate_scores() {
        assert!(validate_scores(40.0, 50.0).is_ok());
        assert!(validate_scores(50.0, 50.0).is_ok());
        assert!(validate_scores(51.0, 50.0).is_err());
        assert!(validate_scores(-1.0, 50.0).is_err());
        assert!(validate_scores(10.0, 0.0).is_err());
        assert!(validate_scores(f64::NAN, 10.0).is_err());
    }
}
