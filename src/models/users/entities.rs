use serde::{Deserialize, Serialize};
use ts_rs::TS;

string_enum! {
    // 用户角色
    #[ts(export, export_to = "../client/src/types/generated/user.ts")]
    pub enum UserRole {
        Admin => "admin",
        Teacher => "teacher",
        Student => "student",
    }
}

impl UserRole {
    /// 班级与分班只对学生有意义
    pub fn keeps_class_fields(&self) -> bool {
        matches!(self, UserRole::Student)
    }

    /// 任教科目只对教师有意义
    pub fn keeps_subject(&self) -> bool {
        matches!(self, UserRole::Teacher)
    }

    /// 登录时的 userType 比较，忽略大小写
    pub fn matches_user_type(&self, user_type: &str) -> bool {
        self.as_str().eq_ignore_ascii_case(user_type.trim())
    }
}

// 用户实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../client/src/types/generated/user.ts")]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing, default)] // 不序列化到JSON响应中
    #[ts(skip)]
    pub password_hash: String,
    pub role: UserRole,
    // 学生所在年级，如 "9"
    #[serde(rename = "className")]
    pub class_name: Option<String>,
    pub division: Option<String>,
    // 教师任教科目
    pub subject: Option<String>,
    pub phone: Option<String>,
    pub is_active: bool,
    pub last_login: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    pub fn is_teacher(&self) -> bool {
        self.role == UserRole::Teacher
    }

    pub fn is_student(&self) -> bool {
        self.role == UserRole::Student
    }

    /// 学生是否属于指定年级与分班
    pub fn belongs_to(&self, class_number: i32, division: &str) -> bool {
        self.is_student()
            && self.class_name.as_deref() == Some(class_number.to_string().as_str())
            && self.division.as_deref() == Some(division)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip_strings() {
        assert_eq!("teacher".parse::<UserRole>(), Ok(UserRole::Teacher));
        assert_eq!(UserRole::Student.to_string(), "student");
        assert!("Teacher".parse::<UserRole>().is_err());
        assert_eq!(
            serde_json::to_string(&UserRole::Admin).unwrap(),
            "\"admin\""
        );
    }

    #[test]
    fn test_user_type_is_case_insensitive() {
        assert!(UserRole::Teacher.matches_user_type("Teacher"));
        assert!(UserRole::Teacher.matches_user_type("TEACHER "));
        assert!(!UserRole::Teacher.matches_user_type("student"));
    }

    #[test]
    fn test_role_conditional_fields() {
        assert!(UserRole::Student.keeps_class_fields());
        assert!(!UserRole::Teacher.keeps_class_fields());
        assert!(UserRole::Teacher.keeps_subject());
        assert!(!UserRole::Admin.keeps_subject());
    }
}
