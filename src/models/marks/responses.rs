use serde::Serialize;
use ts_rs::TS;

use super::entities::Mark;

// 班级成绩汇总
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../client/src/types/generated/mark.ts")]
pub struct MarksByClassResponse {
    pub marks: Vec<Mark>,
    pub total_records: i64,
}

/// 存储层的更新或创建结果
#[derive(Debug)]
pub struct MarkUpsert {
    pub mark: Mark,
    pub created: bool,
}
