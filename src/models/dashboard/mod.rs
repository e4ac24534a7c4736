//! 管理员看板统计

use serde::Serialize;
use ts_rs::TS;

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../client/src/types/generated/dashboard.ts")]
pub struct AdminStats {
    pub students: i64,
    pub teachers: i64,
    pub classes: i64,
    // 今日出勤率，取整后带百分号，如 "87%"
    #[serde(rename = "attendanceToday")]
    pub attendance_today: String,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../client/src/types/generated/dashboard.ts")]
pub struct RecentActivity {
    pub text: String,
    pub time: String,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../client/src/types/generated/dashboard.ts")]
pub struct AdminStatsResponse {
    pub stats: AdminStats,
    #[serde(rename = "recentActivity")]
    pub recent_activity: Vec<RecentActivity>,
}

/// 最近动态的时间格式，如 "05 Mar, 14:30"
pub const ACTIVITY_TIME_FORMAT: &str = "%d %b, %H:%M";

/// 今日出勤率：Present 数 / 今日记录数，截断为整数
pub fn attendance_rate_label(present: u64, total: u64) -> String {
    let rate = if total > 0 {
        (present as f64 / total as f64 * 100.0) as i64
    } else {
        0
    };
    format!("{rate}%")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attendance_rate_label_truncates() {
        assert_eq!(attendance_rate_label(0, 0), "0%");
        assert_eq!(attendance_rate_label(2, 3), "66%");
        assert_eq!(attendance_rate_label(3, 3), "100%");
    }

    #[test]
    fn test_activity_time_format() {
        let ts = chrono::DateTime::<chrono::Utc>::from_timestamp(1_741_185_000, 0).unwrap();
        assert_eq!(ts.format(ACTIVITY_TIME_FORMAT).to_string(), "05 Mar, 14:30");
    }
}
