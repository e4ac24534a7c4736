use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{debug, error};

use super::ClassService;
use crate::errors::SchoolHubError;
use crate::models::{
    ApiResponse, ErrorCode,
    classes::{
        entities::TeachingClass,
        requests::{ClassListQuery, SubjectDashboardQuery},
        responses::SubjectTeacherDashboardResponse,
    },
    marks::requests::MarkListParams,
    subjects::requests::SubjectListQuery,
};
use crate::utils::parse_class_label;

pub async fn subject_teacher_dashboard(
    service: &ClassService,
    request: &HttpRequest,
    query: SubjectDashboardQuery,
) -> ActixResult<HttpResponse> {
    let Some(teacher_id) = query.teacher_id else {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "teacher_id is required",
        )));
    };

    let storage = service.get_storage(request);

    let teacher = match storage.get_user_by_id(teacher_id).await {
        Ok(Some(user)) if user.is_teacher() => user,
        Ok(_) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::UserNotFound,
                "Teacher not found",
            )));
        }
        Err(e) => return Ok(dashboard_error(e)),
    };

    let subjects = match storage
        .list_subjects(SubjectListQuery {
            class_name: None,
            teacher_id: Some(teacher_id),
        })
        .await
    {
        Ok(subjects) => subjects,
        Err(e) => return Ok(dashboard_error(e)),
    };

    if subjects.is_empty() {
        let response = SubjectTeacherDashboardResponse {
            teacher,
            classes: Vec::new(),
            current_class: None,
            students: Vec::new(),
            marks: Vec::new(),
            message: Some("No subjects assigned to this teacher".to_string()),
        };
        return Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Subject teacher dashboard retrieved successfully",
        )));
    }

    // 年级数量有限，一次取全部班级
    let all_classes = match storage
        .list_classes_with_pagination(ClassListQuery {
            page: Some(1),
            size: Some(100),
            teacher_id: None,
        })
        .await
    {
        Ok(list) => list.items,
        Err(e) => return Ok(dashboard_error(e)),
    };

    // 按科目所属班级解析出任教班级，同一班级只保留第一门科目
    let mut classes: Vec<TeachingClass> = Vec::new();
    for subject in &subjects {
        let Some((number, division)) = subject.class_name.as_deref().and_then(parse_class_label)
        else {
            continue;
        };
        let Some(class) = all_classes
            .iter()
            .find(|c| c.class_number == number && c.division == division)
        else {
            debug!("Skipping unknown class for subject {}", subject.name);
            continue;
        };
        if classes.iter().any(|c| c.id == class.id) {
            continue;
        }
        classes.push(TeachingClass {
            id: class.id,
            name: class.name.clone(),
            class_number: class.class_number,
            division: class.division.clone(),
            subject: subject.name.clone(),
        });
    }

    let current_class = query
        .class_id
        .and_then(|id| classes.iter().find(|c| c.id == id))
        .or_else(|| classes.first())
        .cloned();

    let (students, marks) = match &current_class {
        Some(current) => {
            let loaded = async {
                let students = storage
                    .list_students_in_class(current.class_number, &current.division)
                    .await?;
                let marks = storage
                    .list_marks(MarkListParams {
                        class_name: Some(current.class_number.to_string()),
                        division: Some(current.division.clone()),
                        subject: Some(current.subject.clone()),
                        ..Default::default()
                    })
                    .await?;
                Ok::<_, SchoolHubError>((students, marks))
            }
            .await;
            match loaded {
                Ok(parts) => parts,
                Err(e) => return Ok(dashboard_error(e)),
            }
        }
        None => (Vec::new(), Vec::new()),
    };

    let response = SubjectTeacherDashboardResponse {
        teacher,
        classes,
        current_class,
        students,
        marks,
        message: None,
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        response,
        "Subject teacher dashboard retrieved successfully",
    )))
}

fn dashboard_error(e: SchoolHubError) -> HttpResponse {
    error!("Failed to load subject teacher dashboard: {}", e);
    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
        ErrorCode::InternalServerError,
        format!("Failed to load subject teacher dashboard: {e}"),
    ))
}
