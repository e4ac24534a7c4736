use super::entities::UserRole;
use crate::models::common::PaginationQuery;
use serde::Deserialize;
use ts_rs::TS;

// 用户查询参数（来自HTTP请求）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../client/src/types/generated/user.ts")]
pub struct UserListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub role: Option<UserRole>,
    #[serde(rename = "className")]
    pub class_name: Option<String>,
    pub division: Option<String>,
    pub search: Option<String>,
}

// 用户创建请求（注册共用）
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../client/src/types/generated/user.ts")]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    // 服务层哈希后再交给存储层；为空时账号无法通过密码登录
    pub password: Option<String>,
    pub role: UserRole,
    #[serde(rename = "className", alias = "class_name")]
    pub class_name: Option<String>,
    pub division: Option<String>,
    pub subject: Option<String>,
    pub phone: Option<String>,
    pub is_active: Option<bool>,
}

impl CreateUserRequest {
    /// 按角色清理不适用的字段
    pub fn normalize_role_fields(&mut self) {
        if !self.role.keeps_class_fields() {
            self.class_name = None;
            self.division = None;
        }
        if !self.role.keeps_subject() {
            self.subject = None;
        }
    }
}

// 用户更新请求
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../client/src/types/generated/user.ts")]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<UserRole>,
    #[serde(rename = "className", alias = "class_name")]
    pub class_name: Option<String>,
    pub division: Option<String>,
    pub subject: Option<String>,
    pub phone: Option<String>,
    pub is_active: Option<bool>,
}

// 用户列表查询参数（用于存储层）
#[derive(Debug, Clone, Default)]
pub struct UserListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub role: Option<UserRole>,
    pub class_name: Option<String>,
    pub division: Option<String>,
    pub search: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_clears_fields_for_other_roles() {
        let mut req: CreateUserRequest = serde_json::from_str(
            r#"{"name":"Ravi","email":"ravi@school.in","role":"teacher",
                "className":"9","division":"A","subject":"Maths"}"#,
        )
        .unwrap();
        req.normalize_role_fields();
        assert_eq!(req.class_name, None);
        assert_eq!(req.division, None);
        assert_eq!(req.subject.as_deref(), Some("Maths"));
        assert!(req.password.is_none());
    }

    #[test]
    fn test_normalize_keeps_student_class() {
        let mut req: CreateUserRequest = serde_json::from_str(
            r#"{"name":"Asha","email":"asha@school.in","password":"pw","role":"student",
                "className":"9","division":"B","subject":"Maths"}"#,
        )
        .unwrap();
        req.normalize_role_fields();
        assert_eq!(req.class_name.as_deref(), Some("9"));
        assert_eq!(req.division.as_deref(), Some("B"));
        assert_eq!(req.subject, None);
    }
}
