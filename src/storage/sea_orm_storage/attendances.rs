//! 考勤存储操作

use super::SeaOrmStorage;
use crate::entity::attendances::{ActiveModel, Column, Entity as Attendances, Model};
use crate::entity::users::Entity as Users;
use crate::errors::{Result, SchoolHubError};
use crate::models::{
    PaginationInfo, PaginationQuery,
    attendance::{
        entities::{Attendance, AttendanceStatus},
        requests::{
            AttendanceListQuery, BulkAttendanceWrite, CreateAttendanceRequest,
            UpdateAttendanceRequest,
        },
        responses::{AttendanceListResponse, AttendanceSummary},
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

impl SeaOrmStorage {
    /// 附带学生姓名转换
    async fn attach_student_names(&self, models: Vec<Model>) -> Result<Vec<Attendance>> {
        let students =
            Self::load_users_map(&self.db, models.iter().map(|m| m.student_id)).await?;
        Ok(models
            .into_iter()
            .map(|m| {
                let student = students.get(&m.student_id);
                m.into_attendance(student)
            })
            .collect())
    }

    /// 创建考勤记录
    pub async fn create_attendance_impl(&self, req: CreateAttendanceRequest) -> Result<Attendance> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            student_id: Set(req.student_id),
            teacher_id: Set(req.teacher_id),
            date: Set(req.date),
            status: Set(req.status.to_string()),
            class_name: Set(req.class_name),
            division: Set(req.division),
            marked_by: Set(req.marked_by.unwrap_or_default()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("创建考勤记录失败: {e}")))?;

        let mut items = self.attach_student_names(vec![result]).await?;
        items
            .pop()
            .ok_or_else(|| SchoolHubError::database_operation("创建考勤记录失败: 无返回记录"))
    }

    /// 通过 ID 获取考勤记录
    pub async fn get_attendance_by_id_impl(&self, id: i64) -> Result<Option<Attendance>> {
        let result = Attendances::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("查询考勤记录失败: {e}")))?;

        let Some(model) = result else {
            return Ok(None);
        };
        Ok(self.attach_student_names(vec![model]).await?.pop())
    }

    /// 分页列出考勤记录
    pub async fn list_attendance_with_pagination_impl(
        &self,
        query: AttendanceListQuery,
    ) -> Result<AttendanceListResponse> {
        let (page, size) = PaginationQuery::normalized(query.page, query.size);

        let mut select = Attendances::find();

        if let Some(student_id) = query.student_id {
            select = select.filter(Column::StudentId.eq(student_id));
        }
        if let Some(date) = query.date {
            select = select.filter(Column::Date.eq(date));
        }
        if let Some(ref class_name) = query.class_name {
            select = select.filter(Column::ClassName.eq(class_name.as_str()));
        }
        if let Some(ref division) = query.division {
            select = select.filter(Column::Division.eq(division.as_str()));
        }

        select = select.order_by_desc(Column::Date).order_by_desc(Column::Id);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("查询考勤总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("查询考勤页数失败: {e}")))?;

        let models = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("查询考勤列表失败: {e}")))?;

        Ok(AttendanceListResponse {
            items: self.attach_student_names(models).await?,
            pagination: PaginationInfo::new(page, size, total, pages),
        })
    }

    /// 更新考勤记录
    pub async fn update_attendance_impl(
        &self,
        id: i64,
        update: UpdateAttendanceRequest,
    ) -> Result<Option<Attendance>> {
        if self.get_attendance_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(now),
            ..Default::default()
        };

        if let Some(date) = update.date {
            model.date = Set(date);
        }
        if let Some(status) = update.status {
            model.status = Set(status.to_string());
        }
        if let Some(class_name) = update.class_name {
            model.class_name = Set(class_name);
        }
        if let Some(division) = update.division {
            model.division = Set(Some(division));
        }
        if let Some(marked_by) = update.marked_by {
            model.marked_by = Set(marked_by);
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("更新考勤记录失败: {e}")))?;

        self.get_attendance_by_id_impl(id).await
    }

    /// 删除考勤记录
    pub async fn delete_attendance_impl(&self, id: i64) -> Result<bool> {
        let result = Attendances::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("删除考勤记录失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 批量考勤
    ///
    /// 每条记录按 (学生, 日期) 更新或创建。任一学生不存在时返回 NotFound，事务回滚。
    pub async fn bulk_mark_attendance_impl(&self, batch: BulkAttendanceWrite) -> Result<usize> {
        let now = chrono::Utc::now().timestamp();

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("开启事务失败: {e}")))?;

        let mut count = 0;
        for entry in batch.entries {
            let student = Users::find_by_id(entry.student_id)
                .one(&txn)
                .await
                .map_err(|e| SchoolHubError::database_operation(format!("查询学生失败: {e}")))?;
            if student.is_none() {
                return Err(SchoolHubError::not_found(format!(
                    "Student with id {} not found",
                    entry.student_id
                )));
            }

            let existing = Attendances::find()
                .filter(Column::StudentId.eq(entry.student_id))
                .filter(Column::Date.eq(batch.date))
                .one(&txn)
                .await
                .map_err(|e| SchoolHubError::database_operation(format!("查询考勤记录失败: {e}")))?;

            match existing {
                Some(row) => {
                    let mut model: ActiveModel = row.into();
                    model.status = Set(entry.status.to_string());
                    model.teacher_id = Set(batch.teacher_id);
                    model.class_name = Set(batch.class_name.clone());
                    model.division = Set(Some(batch.division.clone()));
                    model.marked_by = Set(batch.marked_by.clone());
                    model.updated_at = Set(now);
                    model.update(&txn).await.map_err(|e| {
                        SchoolHubError::database_operation(format!("更新考勤记录失败: {e}"))
                    })?;
                }
                None => {
                    let model = ActiveModel {
                        student_id: Set(entry.student_id),
                        teacher_id: Set(batch.teacher_id),
                        date: Set(batch.date),
                        status: Set(entry.status.to_string()),
                        class_name: Set(batch.class_name.clone()),
                        division: Set(Some(batch.division.clone())),
                        marked_by: Set(batch.marked_by.clone()),
                        created_at: Set(now),
                        updated_at: Set(now),
                        ..Default::default()
                    };
                    model.insert(&txn).await.map_err(|e| {
                        SchoolHubError::database_operation(format!("创建考勤记录失败: {e}"))
                    })?;
                }
            }
            count += 1;
        }

        txn.commit()
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(count)
    }

    /// 学生出勤汇总
    pub async fn get_attendance_summary_impl(&self, student_id: i64) -> Result<AttendanceSummary> {
        let present = self
            .count_attendance(Some(student_id), None, AttendanceStatus::Present)
            .await?;
        let absent = self
            .count_attendance(Some(student_id), None, AttendanceStatus::Absent)
            .await?;

        Ok(AttendanceSummary::new(present as i64, absent as i64))
    }

    /// 某班某天的考勤
    pub async fn list_class_attendance_on_impl(
        &self,
        class_name: &str,
        division: &str,
        date: chrono::NaiveDate,
    ) -> Result<Vec<Attendance>> {
        let models = Attendances::find()
            .filter(Column::ClassName.eq(class_name))
            .filter(Column::Division.eq(division))
            .filter(Column::Date.eq(date))
            .order_by_asc(Column::StudentId)
            .all(&self.db)
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("查询班级考勤失败: {e}")))?;

        self.attach_student_names(models).await
    }

    /// 某天的出勤统计
    pub async fn count_attendance_on_impl(&self, date: chrono::NaiveDate) -> Result<(u64, u64)> {
        let present = self
            .count_attendance(None, Some(date), AttendanceStatus::Present)
            .await?;
        let absent = self
            .count_attendance(None, Some(date), AttendanceStatus::Absent)
            .await?;

        Ok((present, present + absent))
    }

    async fn count_attendance(
        &self,
        student_id: Option<i64>,
        date: Option<chrono::NaiveDate>,
        status: AttendanceStatus,
    ) -> Result<u64> {
        let mut select = Attendances::find().filter(Column::Status.eq(status.to_string()));
        if let Some(student_id) = student_id {
            select = select.filter(Column::StudentId.eq(student_id));
        }
        if let Some(date) = date {
            select = select.filter(Column::Date.eq(date));
        }

        select
            .count(&self.db)
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("统计考勤记录失败: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::attendance::requests::BulkAttendanceEntry;
    use crate::models::users::{entities::UserRole, requests::CreateUserRequest};
    use crate::utils::password::make_unusable_password;

    async fn seed_user(storage: &SeaOrmStorage, name: &str, role: UserRole) -> i64 {
        storage
            .create_user_impl(CreateUserRequest {
                name: name.to_string(),
                email: format!("{}@school.in", name.to_lowercase()),
                password: Some(make_unusable_password()),
                role,
                class_name: Some("9".to_string()),
                division: Some("A".to_string()),
                subject: None,
                phone: None,
                is_active: None,
            })
            .await
            .unwrap()
            .id
    }

    fn date(s: &str) -> chrono::NaiveDate {
        s.parse().unwrap()
    }

    fn batch(teacher_id: i64, entries: Vec<(i64, AttendanceStatus)>) -> BulkAttendanceWrite {
        BulkAttendanceWrite {
            date: date("2025-03-10"),
            teacher_id,
            marked_by: "Mrs Iyer".to_string(),
            class_name: "9".to_string(),
            division: "A".to_string(),
            entries: entries
                .into_iter()
                .map(|(student_id, status)| BulkAttendanceEntry { student_id, status })
                .collect(),
        }
    }

    #[actix_web::test]
    async fn test_bulk_mark_upserts_per_student_and_date() {
        let storage = SeaOrmStorage::new_in_memory().await.unwrap();
        let teacher = seed_user(&storage, "Iyer", UserRole::Teacher).await;
        let asha = seed_user(&storage, "Asha", UserRole::Student).await;
        let ravi = seed_user(&storage, "Ravi", UserRole::Student).await;

        let count = storage
            .bulk_mark_attendance_impl(batch(
                teacher,
                vec![(asha, AttendanceStatus::Present), (ravi, AttendanceStatus::Absent)],
            ))
            .await
            .unwrap();
        assert_eq!(count, 2);

        // 同一天再次考勤只更新状态
        storage
            .bulk_mark_attendance_impl(batch(teacher, vec![(ravi, AttendanceStatus::Present)]))
            .await
            .unwrap();

        let rows = storage
            .list_class_attendance_on_impl("9", "A", date("2025-03-10"))
            .await
            .unwrap();
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.status == AttendanceStatus::Present));
        assert!(rows.iter().all(|r| r.marked_by == "Mrs Iyer"));
        assert_eq!(rows[0].student_name.as_deref(), Some("Asha"));

        let (present, total) = storage
            .count_attendance_on_impl(date("2025-03-10"))
            .await
            .unwrap();
        assert_eq!((present, total), (2, 2));
    }

    #[actix_web::test]
    async fn test_bulk_mark_rolls_back_on_missing_student() {
        let storage = SeaOrmStorage::new_in_memory().await.unwrap();
        let teacher = seed_user(&storage, "Iyer", UserRole::Teacher).await;
        let asha = seed_user(&storage, "Asha", UserRole::Student).await;

        let err = storage
            .bulk_mark_attendance_impl(batch(
                teacher,
                vec![(asha, AttendanceStatus::Present), (9999, AttendanceStatus::Present)],
            ))
            .await
            .unwrap_err();
        assert!(matches!(err, SchoolHubError::NotFound(_)));

        let list = storage
            .list_attendance_with_pagination_impl(AttendanceListQuery::default())
            .await
            .unwrap();
        assert_eq!(list.pagination.total, 0);
    }

    #[actix_web::test]
    async fn test_summary_and_duplicate_create() {
        let storage = SeaOrmStorage::new_in_memory().await.unwrap();
        let teacher = seed_user(&storage, "Iyer", UserRole::Teacher).await;
        let asha = seed_user(&storage, "Asha", UserRole::Student).await;

        let create = |day: &str, status| CreateAttendanceRequest {
            student_id: asha,
            teacher_id: teacher,
            date: date(day),
            status,
            class_name: "9".to_string(),
            division: Some("A".to_string()),
            marked_by: Some("Mrs Iyer".to_string()),
        };

        storage
            .create_attendance_impl(create("2025-03-10", AttendanceStatus::Present))
            .await
            .unwrap();
        storage
            .create_attendance_impl(create("2025-03-11", AttendanceStatus::Present))
            .await
            .unwrap();
        storage
            .create_attendance_impl(create("2025-03-12", AttendanceStatus::Absent))
            .await
            .unwrap();
        let err = storage
            .create_attendance_impl(create("2025-03-12", AttendanceStatus::Present))
            .await
            .unwrap_err();
        assert!(err.is_unique_violation());

        let summary = storage.get_attendance_summary_impl(asha).await.unwrap();
        assert_eq!(summary.total, 3);
        assert_eq!(summary.present, 2);
        assert_eq!(summary.percentage, 66.67);
    }
}
