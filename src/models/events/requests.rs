use serde::Deserialize;
use ts_rs::TS;

use super::entities::EventAudience;

// 活动列表查询参数
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../client/src/types/generated/event.ts")]
pub struct EventListParams {
    // audience=X 表示 ALL 或 X
    pub audience: Option<EventAudience>,
    // className=C 表示 ALL 或 class_name = C
    #[serde(rename = "className", alias = "class_name")]
    pub class_name: Option<String>,
}

// 创建活动请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../client/src/types/generated/event.ts")]
pub struct CreateEventRequest {
    pub title: String,
    pub description: Option<String>,
    pub date: chrono::NaiveDate,
    #[serde(default)]
    pub audience: EventAudience,
    pub class_name: Option<String>,
    pub division: Option<String>,
    pub created_by: Option<String>,
}

impl CreateEventRequest {
    /// 面向班级的活动必须指定班级
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.title.trim().is_empty() {
            return Err("Event title is required");
        }
        if self.audience == EventAudience::Class
            && self.class_name.as_deref().is_none_or(|c| c.trim().is_empty())
        {
            return Err("class_name is required when audience is CLASS");
        }
        Ok(())
    }
}

// 更新活动请求
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../client/src/types/generated/event.ts")]
pub struct UpdateEventRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<chrono::NaiveDate>,
    pub audience: Option<EventAudience>,
    pub class_name: Option<String>,
    pub division: Option<String>,
    pub created_by: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_audience_requires_class_name() {
        let req: CreateEventRequest = serde_json::from_str(
            r#"{"title":"Science fair","date":"2025-04-02","audience":"CLASS"}"#,
        )
        .unwrap();
        assert!(req.validate().is_err());

        let req: CreateEventRequest =
            serde_json::from_str(r#"{"title":"Sports day","date":"2025-04-02"}"#).unwrap();
        assert_eq!(req.audience, EventAudience::All);
        assert!(req.validate().is_ok());
    }
}
