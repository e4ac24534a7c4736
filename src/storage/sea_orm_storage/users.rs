use super::SeaOrmStorage;
use crate::entity::classes::{Column as ClassColumn, Entity as Classes};
use crate::entity::users::{ActiveModel, Column, Entity as Users};
use crate::errors::{Result, SchoolHubError};
use crate::models::{
    PaginationInfo, PaginationQuery,
    users::{
        entities::{User, UserRole},
        requests::{CreateUserRequest, UpdateUserRequest, UserListQuery},
        responses::UserListResponse,
    },
};
use crate::utils::escape_like_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set, TransactionTrait, sea_query::Expr,
};

impl SeaOrmStorage {
    /// 创建用户
    pub async fn create_user_impl(&self, mut req: CreateUserRequest) -> Result<User> {
        let now = chrono::Utc::now().timestamp();

        // 密码哈希必须由服务层生成
        let password_hash = req.password.take().ok_or_else(|| {
            SchoolHubError::database_operation("password hash must be set before calling create_user")
        })?;
        req.normalize_role_fields();

        let model = ActiveModel {
            name: Set(req.name),
            email: Set(req.email),
            password_hash: Set(password_hash),
            role: Set(req.role.to_string()),
            class_name: Set(req.class_name),
            division: Set(req.division),
            subject: Set(req.subject),
            phone: Set(req.phone),
            is_active: Set(req.is_active.unwrap_or(true)),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("创建用户失败: {e}")))?;

        Ok(result.into_user())
    }

    /// 通过 ID 获取用户
    pub async fn get_user_by_id_impl(&self, id: i64) -> Result<Option<User>> {
        let result = Users::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("查询用户失败: {e}")))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 通过邮箱获取用户
    pub async fn get_user_by_email_impl(&self, email: &str) -> Result<Option<User>> {
        let result = Users::find()
            .filter(Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("查询用户失败: {e}")))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 分页列出用户
    pub async fn list_users_with_pagination_impl(
        &self,
        query: UserListQuery,
    ) -> Result<UserListResponse> {
        let (page, size) = PaginationQuery::normalized(query.page, query.size);

        let mut select = Users::find();

        // 搜索条件
        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(
                Condition::any()
                    .add(Column::Name.contains(&escaped))
                    .add(Column::Email.contains(&escaped)),
            );
        }

        // 角色筛选
        if let Some(role) = query.role {
            select = select.filter(Column::Role.eq(role.to_string()));
        }

        // 年级与分班筛选
        if let Some(ref class_name) = query.class_name {
            select = select.filter(Column::ClassName.eq(class_name.as_str()));
        }
        if let Some(ref division) = query.division {
            select = select.filter(Column::Division.eq(division.as_str()));
        }

        // 排序
        select = select
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id);

        // 分页查询
        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("查询用户总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("查询用户页数失败: {e}")))?;

        let users = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("查询用户列表失败: {e}")))?;

        Ok(UserListResponse {
            items: users.into_iter().map(|m| m.into_user()).collect(),
            pagination: PaginationInfo::new(page, size, total, pages),
        })
    }

    /// 更新用户最后登录时间
    pub async fn update_last_login_impl(&self, id: i64) -> Result<bool> {
        let now = chrono::Utc::now().timestamp();

        let result = Users::update_many()
            .col_expr(Column::LastLogin, Expr::value(now))
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| {
                SchoolHubError::database_operation(format!("更新最后登录时间失败: {e}"))
            })?;

        Ok(result.rows_affected > 0)
    }

    /// 更新用户信息
    ///
    /// 角色相关字段按更新后的角色处理：非学生清空年级与分班，非教师清空任教科目。
    pub async fn update_user_impl(
        &self,
        id: i64,
        update: UpdateUserRequest,
    ) -> Result<Option<User>> {
        // 先检查用户是否存在
        let Some(existing) = self.get_user_by_id_impl(id).await? else {
            return Ok(None);
        };

        let now = chrono::Utc::now().timestamp();
        let role = update.role.unwrap_or(existing.role);

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(now),
            ..Default::default()
        };

        if let Some(name) = update.name {
            model.name = Set(name);
        }

        if let Some(email) = update.email {
            model.email = Set(email);
        }

        if let Some(password) = update.password {
            model.password_hash = Set(password);
        }

        if update.role.is_some() {
            model.role = Set(role.to_string());
        }

        if role.keeps_class_fields() {
            if let Some(class_name) = update.class_name {
                model.class_name = Set(Some(class_name));
            }
            if let Some(division) = update.division {
                model.division = Set(Some(division));
            }
        } else {
            model.class_name = Set(None);
            model.division = Set(None);
        }

        if role.keeps_subject() {
            if let Some(subject) = update.subject {
                model.subject = Set(Some(subject));
            }
        } else {
            model.subject = Set(None);
        }

        if let Some(phone) = update.phone {
            model.phone = Set(Some(phone));
        }

        if let Some(is_active) = update.is_active {
            model.is_active = Set(is_active);
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("更新用户失败: {e}")))?;

        self.get_user_by_id_impl(id).await
    }

    /// 删除用户
    ///
    /// 考勤、请假、成绩随外键级联删除；班主任与任课教师关联置空。
    pub async fn delete_user_impl(&self, id: i64) -> Result<bool> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("开启事务失败: {e}")))?;

        Classes::update_many()
            .col_expr(ClassColumn::ClassTeacherName, Expr::value(Option::<String>::None))
            .filter(ClassColumn::ClassTeacherId.eq(id))
            .exec(&txn)
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("解除班主任关联失败: {e}")))?;

        let result = Users::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("删除用户失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 按角色统计用户数量
    pub async fn count_users_by_role_impl(&self, role: UserRole) -> Result<u64> {
        let count = Users::find()
            .filter(Column::Role.eq(role.to_string()))
            .count(&self.db)
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("统计用户数量失败: {e}")))?;

        Ok(count)
    }

    /// 列出班级学生
    pub async fn list_students_in_class_impl(
        &self,
        class_number: i32,
        division: &str,
    ) -> Result<Vec<User>> {
        let students = Users::find()
            .filter(Column::Role.eq(UserRole::Student.to_string()))
            .filter(Column::ClassName.eq(class_number.to_string()))
            .filter(Column::Division.eq(division))
            .order_by_asc(Column::Name)
            .all(&self.db)
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("查询班级学生失败: {e}")))?;

        Ok(students.into_iter().map(|m| m.into_user()).collect())
    }

    /// 统计班级学生人数
    pub(crate) async fn count_students_in_class(
        &self,
        class_number: i32,
        division: &str,
    ) -> Result<i64> {
        let count = Users::find()
            .filter(Column::Role.eq(UserRole::Student.to_string()))
            .filter(Column::ClassName.eq(class_number.to_string()))
            .filter(Column::Division.eq(division))
            .count(&self.db)
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("统计班级学生失败: {e}")))?;

        Ok(count as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::password::make_unusable_password;

    fn student(name: &str, email: &str, class_name: &str, division: &str) -> CreateUserRequest {
        CreateUserRequest {
            name: name.to_string(),
            email: email.to_string(),
            password: Some(make_unusable_password()),
            role: UserRole::Student,
            class_name: Some(class_name.to_string()),
            division: Some(division.to_string()),
            subject: Some("Maths".to_string()),
            phone: None,
            is_active: None,
        }
    }

    #[actix_web::test]
    async fn test_create_user_applies_role_fields() {
        let storage = SeaOrmStorage::new_in_memory().await.unwrap();
        let user = storage
            .create_user_impl(student("Asha", "asha@school.in", "9", "A"))
            .await
            .unwrap();

        assert_eq!(user.role, UserRole::Student);
        assert_eq!(user.class_name.as_deref(), Some("9"));
        assert_eq!(user.subject, None);
        assert!(user.is_active);
    }

    #[actix_web::test]
    async fn test_duplicate_email_is_unique_violation() {
        let storage = SeaOrmStorage::new_in_memory().await.unwrap();
        storage
            .create_user_impl(student("Asha", "asha@school.in", "9", "A"))
            .await
            .unwrap();
        let err = storage
            .create_user_impl(student("Asha 2", "asha@school.in", "9", "B"))
            .await
            .unwrap_err();

        assert!(err.is_unique_violation());
    }

    #[actix_web::test]
    async fn test_role_change_clears_class_fields() {
        let storage = SeaOrmStorage::new_in_memory().await.unwrap();
        let user = storage
            .create_user_impl(student("Ravi", "ravi@school.in", "10", "C"))
            .await
            .unwrap();

        let updated = storage
            .update_user_impl(
                user.id,
                UpdateUserRequest {
                    role: Some(UserRole::Teacher),
                    subject: Some("Physics".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.role, UserRole::Teacher);
        assert_eq!(updated.class_name, None);
        assert_eq!(updated.division, None);
        assert_eq!(updated.subject.as_deref(), Some("Physics"));
    }

    #[actix_web::test]
    async fn test_list_students_filters_and_sorts() {
        let storage = SeaOrmStorage::new_in_memory().await.unwrap();
        for (name, email, division) in [
            ("Zoya", "zoya@school.in", "A"),
            ("Arjun", "arjun@school.in", "A"),
            ("Meera", "meera@school.in", "B"),
        ] {
            storage
                .create_user_impl(student(name, email, "9", division))
                .await
                .unwrap();
        }

        let students = storage.list_students_in_class_impl(9, "A").await.unwrap();
        let names: Vec<_> = students.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["Arjun", "Zoya"]);
        assert_eq!(storage.count_users_by_role_impl(UserRole::Student).await.unwrap(), 3);

        let page = storage
            .list_users_with_pagination_impl(UserListQuery {
                page: Some(1),
                size: Some(2),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.pagination.total, 3);
        assert_eq!(page.pagination.total_pages, 2);
    }
}
