use serde::Serialize;
use ts_rs::TS;

use super::entities::Attendance;
use crate::models::common::PaginatedResponse;

// 考勤列表响应
pub type AttendanceListResponse = PaginatedResponse<Attendance>;

// 批量考勤结果
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../client/src/types/generated/attendance.ts")]
pub struct BulkMarkResponse {
    pub message: String,
    pub count: i64,
}

// 学生出勤汇总
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../client/src/types/generated/attendance.ts")]
pub struct AttendanceSummary {
    pub total: i64,
    pub present: i64,
    pub absent: i64,
    // 出勤率，保留两位小数
    pub percentage: f64,
}

impl AttendanceSummary {
    pub fn new(present: i64, absent: i64) -> Self {
        let total = present + absent;
        let percentage = if total > 0 {
            (present as f64 / total as f64 * 10000.0).round() / 100.0
        } else {
            0.0
        };
        Self {
            total,
            present,
            absent,
            percentage,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_percentage() {
        let s = AttendanceSummary::new(2, 1);
        assert_eq!(s.total, 3);
        assert_eq!(s.percentage, 66.67);

        let empty = AttendanceSummary::new(0, 0);
        assert_eq!(empty.percentage, 0.0);
    }
}
