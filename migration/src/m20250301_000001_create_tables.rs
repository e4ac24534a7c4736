use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 用户表
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Users::Name).string_len(255).not_null())
                    .col(
                        ColumnDef::new(Users::Email)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Users::PasswordHash).string().not_null())
                    .col(ColumnDef::new(Users::Role).string_len(20).not_null())
                    .col(ColumnDef::new(Users::ClassName).string_len(10).null())
                    .col(ColumnDef::new(Users::Division).string_len(1).null())
                    .col(ColumnDef::new(Users::Subject).string_len(100).null())
                    .col(ColumnDef::new(Users::Phone).string_len(20).null())
                    .col(
                        ColumnDef::new(Users::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(Users::LastLogin).big_integer().null())
                    .col(ColumnDef::new(Users::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Users::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_users_role_class")
                    .table(Users::Table)
                    .col(Users::Role)
                    .col(Users::ClassName)
                    .col(Users::Division)
                    .to_owned(),
            )
            .await?;

        // 班级表
        manager
            .create_table(
                Table::create()
                    .table(Classes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Classes::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Classes::ClassNumber).integer().not_null())
                    .col(ColumnDef::new(Classes::Division).string_len(1).not_null())
                    .col(
                        ColumnDef::new(Classes::ClassTeacherId)
                            .big_integer()
                            .null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Classes::ClassTeacherName).string_len(255).null())
                    .col(ColumnDef::new(Classes::SubjectTeachers).text().not_null())
                    .col(ColumnDef::new(Classes::Subjects).text().not_null())
                    .col(ColumnDef::new(Classes::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Classes::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Classes::Table, Classes::ClassTeacherId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_classes_number_division")
                    .table(Classes::Table)
                    .col(Classes::ClassNumber)
                    .col(Classes::Division)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // 科目表
        manager
            .create_table(
                Table::create()
                    .table(Subjects::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Subjects::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Subjects::Name).string_len(100).not_null())
                    .col(ColumnDef::new(Subjects::ClassName).string_len(10).null())
                    .col(ColumnDef::new(Subjects::ClassTeacherId).big_integer().null())
                    .col(ColumnDef::new(Subjects::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Subjects::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Subjects::Table, Subjects::ClassTeacherId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // 考勤表
        manager
            .create_table(
                Table::create()
                    .table(Attendances::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Attendances::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Attendances::StudentId).big_integer().not_null())
                    .col(ColumnDef::new(Attendances::TeacherId).big_integer().not_null())
                    .col(ColumnDef::new(Attendances::Date).date().not_null())
                    .col(ColumnDef::new(Attendances::Status).string_len(10).not_null())
                    .col(ColumnDef::new(Attendances::ClassName).string_len(10).not_null())
                    .col(ColumnDef::new(Attendances::Division).string_len(1).null())
                    .col(ColumnDef::new(Attendances::MarkedBy).string_len(255).not_null())
                    .col(
                        ColumnDef::new(Attendances::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Attendances::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Attendances::Table, Attendances::StudentId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Attendances::Table, Attendances::TeacherId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_attendances_student_date")
                    .table(Attendances::Table)
                    .col(Attendances::StudentId)
                    .col(Attendances::Date)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // 请假表
        manager
            .create_table(
                Table::create()
                    .table(Leaves::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Leaves::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Leaves::StudentId).big_integer().not_null())
                    .col(ColumnDef::new(Leaves::Reason).string_len(255).not_null())
                    .col(ColumnDef::new(Leaves::StartDate).date().not_null())
                    .col(ColumnDef::new(Leaves::EndDate).date().not_null())
                    .col(ColumnDef::new(Leaves::Details).text().null())
                    .col(
                        ColumnDef::new(Leaves::Status)
                            .string_len(20)
                            .not_null()
                            .default("Pending"),
                    )
                    .col(ColumnDef::new(Leaves::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Leaves::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Leaves::Table, Leaves::StudentId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 活动表
        manager
            .create_table(
                Table::create()
                    .table(Events::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Events::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Events::Title).string_len(255).not_null())
                    .col(ColumnDef::new(Events::Description).text().null())
                    .col(ColumnDef::new(Events::Date).date().not_null())
                    .col(
                        ColumnDef::new(Events::Audience)
                            .string_len(10)
                            .not_null()
                            .default("ALL"),
                    )
                    .col(ColumnDef::new(Events::ClassName).string_len(10).null())
                    .col(ColumnDef::new(Events::Division).string_len(1).null())
                    .col(ColumnDef::new(Events::CreatedBy).string_len(255).null())
                    .col(ColumnDef::new(Events::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Events::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 成绩表
        manager
            .create_table(
                Table::create()
                    .table(Marks::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Marks::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Marks::StudentId).big_integer().not_null())
                    .col(ColumnDef::new(Marks::Subject).string_len(100).not_null())
                    .col(ColumnDef::new(Marks::ExamType).string_len(50).not_null())
                    .col(ColumnDef::new(Marks::MarksObtained).double().not_null())
                    .col(ColumnDef::new(Marks::TotalMarks).double().not_null())
                    .col(ColumnDef::new(Marks::Percentage).double().not_null())
                    .col(ColumnDef::new(Marks::Remarks).text().null())
                    .col(ColumnDef::new(Marks::ClassName).string_len(10).null())
                    .col(ColumnDef::new(Marks::Division).string_len(1).null())
                    .col(ColumnDef::new(Marks::TeacherId).big_integer().null())
                    .col(ColumnDef::new(Marks::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Marks::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Marks::Table, Marks::StudentId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Marks::Table, Marks::TeacherId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_marks_student_subject_exam")
                    .table(Marks::Table)
                    .col(Marks::StudentId)
                    .col(Marks::Subject)
                    .col(Marks::ExamType)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // 作业表
        manager
            .create_table(
                Table::create()
                    .table(Assignments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Assignments::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Assignments::Title).string_len(255).not_null())
                    .col(ColumnDef::new(Assignments::Description).text().null())
                    .col(ColumnDef::new(Assignments::DueDate).date().not_null())
                    .col(ColumnDef::new(Assignments::ClassName).string_len(10).not_null())
                    .col(ColumnDef::new(Assignments::Division).string_len(1).null())
                    .col(ColumnDef::new(Assignments::SubjectId).big_integer().null())
                    .col(ColumnDef::new(Assignments::TeacherId).big_integer().not_null())
                    .col(
                        ColumnDef::new(Assignments::Status)
                            .string_len(20)
                            .not_null()
                            .default("Active"),
                    )
                    .col(
                        ColumnDef::new(Assignments::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Assignments::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Assignments::Table, Assignments::SubjectId)
                            .to(Subjects::Table, Subjects::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Assignments::Table, Assignments::TeacherId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Assignments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Marks::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Events::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Leaves::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Attendances::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Subjects::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Classes::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Name,
    Email,
    PasswordHash,
    Role,
    ClassName,
    Division,
    Subject,
    Phone,
    IsActive,
    LastLogin,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Classes {
    Table,
    Id,
    ClassNumber,
    Division,
    ClassTeacherId,
    ClassTeacherName,
    SubjectTeachers,
    Subjects,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Subjects {
    Table,
    Id,
    Name,
    ClassName,
    ClassTeacherId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Attendances {
    Table,
    Id,
    StudentId,
    TeacherId,
    Date,
    Status,
    ClassName,
    Division,
    MarkedBy,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Leaves {
    Table,
    Id,
    StudentId,
    Reason,
    StartDate,
    EndDate,
    Details,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Events {
    Table,
    Id,
    Title,
    Description,
    Date,
    Audience,
    ClassName,
    Division,
    CreatedBy,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Marks {
    Table,
    Id,
    StudentId,
    Subject,
    ExamType,
    MarksObtained,
    TotalMarks,
    Percentage,
    Remarks,
    ClassName,
    Division,
    TeacherId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Assignments {
    Table,
    Id,
    Title,
    Description,
    DueDate,
    ClassName,
    Division,
    SubjectId,
    TeacherId,
    Status,
    CreatedAt,
    UpdatedAt,
}
