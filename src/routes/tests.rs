use actix_web::{
    App,
    http::StatusCode,
    middleware::{NormalizePath, TrailingSlash},
    test, web,
};
use serde_json::{Value, json};
use std::net::SocketAddr;
use std::sync::Arc;

use super::configure_api_routes;
use crate::storage::{Storage, sea_orm_storage::SeaOrmStorage};
use crate::utils::{json_error_handler, query_error_handler};

async fn memory_storage() -> Arc<dyn Storage> {
    Arc::new(SeaOrmStorage::new_in_memory().await.unwrap())
}

macro_rules! init_app {
    ($storage:expr) => {
        test::init_service(
            App::new()
                .wrap(NormalizePath::new(TrailingSlash::Trim))
                .app_data(web::QueryConfig::default().error_handler(query_error_handler))
                .app_data(web::JsonConfig::default().error_handler(json_error_handler))
                .app_data(web::Data::new($storage.clone()))
                .configure(configure_api_routes),
        )
        .await
    };
}

// 发送请求并返回状态码与 JSON 响应体
macro_rules! call {
    ($app:expr, $req:expr) => {{
        let resp = test::call_service(&$app, $req.to_request()).await;
        let status = resp.status();
        let body: Value = test::read_body_json(resp).await;
        (status, body)
    }};
}

fn peer(last_octet: u8) -> SocketAddr {
    SocketAddr::from(([192, 168, 50, last_octet], 40000))
}

macro_rules! create_user {
    ($app:expr, $body:expr) => {{
        let (status, body) = call!(
            $app,
            test::TestRequest::post().uri("/api/users").set_json($body)
        );
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["data"]["id"].as_i64().unwrap()
    }};
}

fn teacher(name: &str, email: &str, subject: &str) -> Value {
    json!({"name": name, "email": email, "role": "teacher", "subject": subject})
}

fn student(name: &str, email: &str, class_name: &str, division: &str) -> Value {
    json!({
        "name": name,
        "email": email,
        "role": "student",
        "className": class_name,
        "division": division,
    })
}

#[actix_web::test]
async fn test_login_flow() {
    let storage = memory_storage().await;
    let app = init_app!(storage);

    create_user!(
        app,
        json!({
            "name": "Asha Rao",
            "email": "asha@school.in",
            "password": "secret123",
            "role": "student",
            "className": "9",
            "division": "A",
        })
    );
    create_user!(
        app,
        json!({
            "name": "Old Account",
            "email": "old@school.in",
            "password": "secret123",
            "role": "teacher",
            "is_active": false,
        })
    );

    let login = |email: &str, password: &str, user_type: &str| {
        test::TestRequest::post()
            .uri("/api/auth/login")
            .peer_addr(peer(1))
            .set_json(json!({"email": email, "password": password, "userType": user_type}))
    };

    let (status, body) = call!(app, login("asha@school.in", "secret123", "Student"));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Login successful");
    assert_eq!(body["data"]["user"]["email"], "asha@school.in");
    assert!(body["data"]["user"]["last_login"].is_string());
    assert!(body["data"]["user"].get("password_hash").is_none());

    let (status, body) = call!(app, login("asha@school.in", "wrong-pass", "student"));
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], 2000);

    let (status, body) = call!(app, login("asha@school.in", "secret123", "teacher"));
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], 2001);

    let (status, _) = call!(app, login("nobody@school.in", "secret123", "student"));
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = call!(app, login("old@school.in", "secret123", "teacher"));
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], 2002);

    // 第六次登录超出限制
    let (status, body) = call!(app, login("asha@school.in", "secret123", "student"));
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(body["code"], 1029);
}

#[actix_web::test]
async fn test_register_validation() {
    let storage = memory_storage().await;
    let app = init_app!(storage);

    let register = |body: Value| {
        test::TestRequest::post()
            .uri("/api/auth/register")
            .peer_addr(peer(2))
            .set_json(body)
    };

    let (status, body) = call!(
        app,
        register(json!({
            "name": "Ravi Kumar",
            "email": "ravi@school.in",
            "password": "secret123",
            "role": "teacher",
            "subject": "Math",
            "className": "9",
        }))
    );
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["user"]["role"], "teacher");
    // 教师不保留班级字段
    assert!(body["data"]["user"]["className"].is_null());

    let (status, body) = call!(
        app,
        register(json!({
            "name": "Ravi Again",
            "email": "ravi@school.in",
            "password": "secret123",
            "role": "teacher",
        }))
    );
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 2102);

    let (status, _) = call!(
        app,
        register(json!({"name": "No Pass", "email": "nopass@school.in", "role": "student"}))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_trailing_slash_and_bad_input() {
    let storage = memory_storage().await;
    let app = init_app!(storage);

    let (status, body) = call!(app, test::TestRequest::get().uri("/api/users/"));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["pagination"]["total"], 0);

    let (status, body) = call!(app, test::TestRequest::get().uri("/api/users/abc"));
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 1000);

    let (status, body) = call!(
        app,
        test::TestRequest::post()
            .uri("/api/classes")
            .insert_header(("content-type", "application/json"))
            .set_payload("{not json")
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 1000);
}

#[actix_web::test]
async fn test_class_write_rules() {
    let storage = memory_storage().await;
    let app = init_app!(storage);

    let meera = create_user!(app, teacher("Meera Iyer", "meera@school.in", "Math"));
    let john = create_user!(app, teacher("John Das", "john@school.in", "Science"));
    let pupil = create_user!(app, student("Kiran", "kiran@school.in", "9", "A"));

    let create = |body: Value| test::TestRequest::post().uri("/api/classes").set_json(body);

    let (status, body) = call!(
        app,
        create(json!({
            "class_number": 9,
            "division": "A",
            "class_teacher_id": meera,
            "subject_teachers": {"math": meera},
        }))
    );
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["data"]["name"], "9A");
    assert_eq!(body["data"]["class_teacher_name"], "Meera Iyer");
    assert_eq!(body["data"]["students_count"], 1);
    let class_id = body["data"]["id"].as_i64().unwrap();

    let (status, body) = call!(app, create(json!({"class_number": 9, "division": "A"})));
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 3001);

    let (status, body) = call!(app, create(json!({"class_number": 11, "division": "A"})));
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 3002);

    let (status, body) = call!(app, create(json!({"class_number": 9, "division": "D"})));
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 3002);

    let (status, body) = call!(
        app,
        create(json!({"class_number": 9, "division": "B", "class_teacher_id": pupil}))
    );
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 3003);

    let (status, body) = call!(
        app,
        create(json!({"class_number": 9, "division": "B", "class_teacher_id": meera}))
    );
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 3004);

    let (status, body) = call!(
        app,
        create(json!({
            "class_number": 9,
            "division": "B",
            "subject_teachers": {"Math": john},
        }))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 3005);

    // 保存自身时班主任不算冲突
    let (status, body) = call!(
        app,
        test::TestRequest::patch()
            .uri(&format!("/api/classes/{class_id}"))
            .set_json(json!({"class_teacher_id": meera}))
    );
    assert_eq!(status, StatusCode::OK, "{body}");

    let (status, body) = call!(
        app,
        test::TestRequest::get().uri(&format!("/api/classes/by_class_teacher?teacher_id={meera}"))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], class_id);

    let (status, _) = call!(
        app,
        test::TestRequest::get().uri(&format!("/api/classes/by_class_teacher?teacher_id={john}"))
    );
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = call!(
        app,
        test::TestRequest::get().uri(&format!("/api/classes/{class_id}/students"))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["class"], "9A");
    assert_eq!(body["data"]["students"].as_array().unwrap().len(), 1);
}

#[actix_web::test]
async fn test_bulk_mark_attendance() {
    let storage = memory_storage().await;
    let app = init_app!(storage);

    let meera = create_user!(app, teacher("Meera Iyer", "meera@school.in", "Math"));
    let john = create_user!(app, teacher("John Das", "john@school.in", "Science"));
    let asha = create_user!(app, student("Asha", "asha@school.in", "9", "A"));
    let kiran = create_user!(app, student("Kiran", "kiran@school.in", "9", "A"));

    let (_, body) = call!(
        app,
        test::TestRequest::post().uri("/api/classes").set_json(json!({
            "class_number": 9,
            "division": "A",
            "class_teacher_id": meera,
        }))
    );
    let class_id = body["data"]["id"].as_i64().unwrap();

    let bulk = |body: Value| {
        test::TestRequest::post()
            .uri("/api/attendance/bulk_mark")
            .set_json(body)
    };

    let (status, _) = call!(
        app,
        bulk(json!({"classId": class_id, "date": "2025-03-05", "records": [{"studentId": asha, "present": true}]}))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = call!(
        app,
        bulk(json!({
            "classId": class_id,
            "date": "2025-03-05",
            "teacherId": john,
            "records": [{"studentId": asha, "present": true}],
        }))
    );
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], 4002);

    let (status, _) = call!(
        app,
        bulk(json!({
            "classId": 999,
            "date": "2025-03-05",
            "teacherId": meera,
            "records": [{"studentId": asha, "present": true}],
        }))
    );
    assert_eq!(status, StatusCode::NOT_FOUND);

    // 未知学生整批回滚
    let (status, _) = call!(
        app,
        bulk(json!({
            "classId": class_id,
            "date": "2025-03-05",
            "teacherId": meera,
            "records": [{"studentId": asha, "present": true}, {"studentId": 999, "present": true}],
        }))
    );
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (_, body) = call!(app, test::TestRequest::get().uri("/api/attendance?date=2025-03-05"));
    assert_eq!(body["data"]["pagination"]["total"], 0);

    let records = json!([
        {"studentId": asha, "present": true},
        {"studentId": kiran, "present": false},
        {"present": true},
    ]);
    let (status, body) = call!(
        app,
        bulk(json!({"classId": class_id, "date": "2025-03-05", "teacherId": meera, "records": records}))
    );
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["count"], 2);
    assert_eq!(
        body["data"]["message"],
        "Attendance marked successfully for 2 students"
    );

    // 重复提交覆盖原记录
    let (status, _) = call!(
        app,
        bulk(json!({
            "classId": class_id,
            "date": "2025-03-05",
            "teacherId": meera,
            "records": [{"studentId": kiran, "present": true}],
        }))
    );
    assert_eq!(status, StatusCode::OK);

    let (_, body) = call!(app, test::TestRequest::get().uri("/api/attendance?date=2025-03-05"));
    assert_eq!(body["data"]["pagination"]["total"], 2);
    let items = body["data"]["items"].as_array().unwrap();
    assert!(items.iter().all(|a| a["status"] == "Present"));
    assert!(items.iter().all(|a| a["marked_by"] == "Meera Iyer"));

    let (status, body) = call!(
        app,
        test::TestRequest::get().uri(&format!("/api/attendance/summary/{kiran}"))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total"], 1);
    assert_eq!(body["data"]["present"], 1);
}

#[actix_web::test]
async fn test_mark_upsert_and_class_report() {
    let storage = memory_storage().await;
    let app = init_app!(storage);

    let asha = create_user!(app, student("Asha", "asha@school.in", "9", "A"));
    let (_, body) = call!(
        app,
        test::TestRequest::post()
            .uri("/api/classes")
            .set_json(json!({"class_number": 9, "division": "A"}))
    );
    let class_id = body["data"]["id"].as_i64().unwrap();

    let mark = |obtained: f64| {
        test::TestRequest::post().uri("/api/marks").set_json(json!({
            "student": asha,
            "subject": " Math ",
            "exam_type": "Midterm",
            "marks_obtained": obtained,
            "total_marks": 50.0,
            "class_name": "9",
            "division": "A",
        }))
    };

    let (status, body) = call!(app, mark(45.0));
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["data"]["subject"], "Math");
    assert_eq!(body["data"]["percentage"], 90.0);
    let mark_id = body["data"]["id"].as_i64().unwrap();

    let (status, body) = call!(app, mark(40.0));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], mark_id);
    assert_eq!(body["data"]["percentage"], 80.0);

    let (status, body) = call!(app, mark(60.0));
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 8001);

    let (status, _) = call!(app, test::TestRequest::get().uri("/api/marks/by_class"));
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = call!(app, test::TestRequest::get().uri("/api/marks/by_class?class_id=999"));
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = call!(
        app,
        test::TestRequest::get().uri(&format!("/api/marks/by_class?class_id={class_id}"))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total_records"], 1);
    assert_eq!(body["data"]["marks"][0]["student_name"], "Asha");
}

#[actix_web::test]
async fn test_leave_lifecycle() {
    let storage = memory_storage().await;
    let app = init_app!(storage);

    let meera = create_user!(app, teacher("Meera Iyer", "meera@school.in", "Math"));
    let asha = create_user!(app, student("Asha", "asha@school.in", "9", "A"));
    create_user!(app, student("Kiran", "kiran@school.in", "10", "B"));
    let (_, body) = call!(
        app,
        test::TestRequest::post()
            .uri("/api/classes")
            .set_json(json!({"class_number": 9, "division": "A"}))
    );
    let class_id = body["data"]["id"].as_i64().unwrap();

    let create = |body: Value| test::TestRequest::post().uri("/api/leaves").set_json(body);

    let (status, body) = call!(
        app,
        create(json!({
            "student": asha,
            "reason": "Fever",
            "start_date": "2025-03-05",
            "end_date": "2025-03-04",
        }))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 5001);

    let (status, _) = call!(
        app,
        create(json!({
            "student": meera,
            "reason": "Fever",
            "start_date": "2025-03-05",
            "end_date": "2025-03-06",
        }))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = call!(
        app,
        create(json!({
            "student": asha,
            "reason": "Fever",
            "start_date": "2025-03-05",
            "end_date": "2025-03-06",
        }))
    );
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["data"]["status"], "Pending");
    assert_eq!(body["data"]["student_name"], "Asha");
    let leave_id = body["data"]["id"].as_i64().unwrap();

    let (status, body) = call!(
        app,
        test::TestRequest::post().uri(&format!("/api/leaves/{leave_id}/approve"))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Leave approved successfully");
    assert_eq!(body["data"]["status"], "Approved");

    // 部分更新保留审批状态
    let (status, body) = call!(
        app,
        test::TestRequest::patch()
            .uri(&format!("/api/leaves/{leave_id}"))
            .set_json(json!({"reason": "Family function"}))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["reason"], "Family function");
    assert_eq!(body["data"]["status"], "Approved");

    let (_, body) = call!(
        app,
        test::TestRequest::get().uri(&format!("/api/leaves?class_id={class_id}"))
    );
    assert_eq!(body["data"]["pagination"]["total"], 1);

    let (status, body) = call!(app, test::TestRequest::get().uri("/api/leaves?class_id=999"));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["pagination"]["total"], 0);

    let (status, _) = call!(
        app,
        test::TestRequest::post().uri("/api/leaves/999/reject")
    );
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_teacher_dashboards() {
    let storage = memory_storage().await;
    let app = init_app!(storage);

    let meera = create_user!(app, teacher("Meera Iyer", "meera@school.in", "Math"));
    let john = create_user!(app, teacher("John Das", "john@school.in", "Science"));
    let asha = create_user!(app, student("Asha", "asha@school.in", "9", "A"));
    create_user!(app, student("Kiran", "kiran@school.in", "9", "A"));

    let (_, body) = call!(
        app,
        test::TestRequest::post().uri("/api/classes").set_json(json!({
            "class_number": 9,
            "division": "A",
            "class_teacher_id": meera,
        }))
    );
    let class_id = body["data"]["id"].as_i64().unwrap();

    let today = chrono::Utc::now().date_naive().to_string();
    let (status, _) = call!(
        app,
        test::TestRequest::post()
            .uri("/api/attendance/bulk_mark")
            .set_json(json!({
                "classId": class_id,
                "date": today,
                "teacherId": meera,
                "records": [{"studentId": asha, "present": true}],
            }))
    );
    assert_eq!(status, StatusCode::OK);

    // 看板只展示本年级的活动，不含全校活动与其他年级
    for (title, audience, class_name) in [
        ("School-wide", "ALL", None),
        ("Lab visit", "CLASS", Some("9")),
        ("Debate", "CLASS", Some("10")),
    ] {
        let (status, body) = call!(
            app,
            test::TestRequest::post().uri("/api/events").set_json(json!({
                "title": title,
                "date": "2025-04-02",
                "audience": audience,
                "class_name": class_name,
            }))
        );
        assert_eq!(status, StatusCode::CREATED, "{body}");
    }

    let (status, _) = call!(
        app,
        test::TestRequest::get().uri("/api/classes/teacher_dashboard")
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = call!(
        app,
        test::TestRequest::get().uri(&format!("/api/classes/teacher_dashboard?teacher_id={meera}"))
    );
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["class"]["name"], "9A");
    assert_eq!(body["data"]["total_students"], 2);
    assert_eq!(body["data"]["present_today"], 1);
    assert_eq!(body["data"]["absent_today"], 0);
    let events = body["data"]["events"].as_array().unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0]["title"], "Lab visit");

    let (status, body) = call!(
        app,
        test::TestRequest::get().uri(&format!(
            "/api/teachers/subject_dashboard?teacher_id={john}"
        ))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["message"], "No subjects assigned to this teacher");

    let (status, body) = call!(
        app,
        test::TestRequest::post().uri("/api/subjects").set_json(json!({
            "name": "Science",
            "class_name": "9A",
            "class_teacher_id": john,
        }))
    );
    assert_eq!(status, StatusCode::CREATED, "{body}");

    let (status, body) = call!(
        app,
        test::TestRequest::get().uri(&format!(
            "/api/classes/subject_teacher_dashboard?teacher_id={john}"
        ))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["current_class"]["id"], class_id);
    assert_eq!(body["data"]["current_class"]["subject"], "Science");
    assert_eq!(body["data"]["students"].as_array().unwrap().len(), 2);
    assert!(body["data"].get("message").is_none());

    let (_, body) = call!(
        app,
        test::TestRequest::get().uri(&format!("/api/subjects?class_id={class_id}"))
    );
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

#[actix_web::test]
async fn test_admin_stats_and_system() {
    let storage = memory_storage().await;
    let app = init_app!(storage);

    let (status, body) = call!(app, test::TestRequest::get().uri("/api/admin/stats"));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["stats"]["students"], 0);
    assert_eq!(body["data"]["stats"]["attendanceToday"], "0%");
    assert_eq!(body["data"]["recentActivity"].as_array().unwrap().len(), 0);

    let asha = create_user!(app, student("Asha", "asha@school.in", "9", "A"));
    create_user!(app, teacher("Meera Iyer", "meera@school.in", "Math"));
    call!(
        app,
        test::TestRequest::post().uri("/api/leaves").set_json(json!({
            "student": asha,
            "reason": "Fever",
            "start_date": "2025-03-05",
            "end_date": "2025-03-05",
        }))
    );
    call!(
        app,
        test::TestRequest::post().uri("/api/events").set_json(json!({
            "title": "Sports day",
            "date": "2025-04-02",
        }))
    );

    let (_, body) = call!(app, test::TestRequest::get().uri("/api/admin/stats"));
    assert_eq!(body["data"]["stats"]["students"], 1);
    assert_eq!(body["data"]["stats"]["teachers"], 1);
    let activity = body["data"]["recentActivity"].as_array().unwrap();
    assert_eq!(activity.len(), 2);
    assert_eq!(activity[0]["text"], "Leave request from Asha");
    assert_eq!(activity[1]["text"], "New event: Sports day");

    let (status, body) = call!(app, test::TestRequest::get().uri("/api/health"));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "ok");

    let (status, body) = call!(app, test::TestRequest::get().uri("/"));
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"]["endpoints"].as_array().is_some());
}

#[actix_web::test]
async fn test_assignment_rules_and_filters() {
    let storage = memory_storage().await;
    let app = init_app!(storage);

    let meera = create_user!(app, teacher("Meera Iyer", "meera@school.in", "Math"));
    let asha = create_user!(app, student("Asha", "asha@school.in", "9", "A"));
    let (_, body) = call!(
        app,
        test::TestRequest::post().uri("/api/subjects").set_json(json!({
            "name": "Math",
            "class_name": "9A",
            "class_teacher_id": meera,
        }))
    );
    let math = body["data"]["id"].as_i64().unwrap();

    // 任课教师必须是教师
    let (status, body) = call!(
        app,
        test::TestRequest::post().uri("/api/subjects").set_json(json!({
            "name": "Art",
            "class_name": "9A",
            "class_teacher_id": asha,
        }))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 6001);
    let (status, body) = call!(
        app,
        test::TestRequest::patch()
            .uri(&format!("/api/subjects/{math}"))
            .set_json(json!({"class_teacher_id": asha}))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 6001);

    let create = |body: Value| test::TestRequest::post().uri("/api/assignments").set_json(body);

    let (status, body) = call!(
        app,
        create(json!({"title": "Essay", "due_date": "2025-05-10", "class_name": "9", "teacher": asha}))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 9001);

    let (status, body) = call!(
        app,
        create(json!({
            "title": "Essay",
            "due_date": "2025-05-10",
            "class_name": "9",
            "teacher": meera,
            "subject": 999,
        }))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 9001);

    let (status, _) = call!(
        app,
        create(json!({"title": "  ", "due_date": "2025-05-10", "class_name": "9", "teacher": meera}))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);

    for body in [
        json!({
            "title": "Essay",
            "due_date": "2025-05-10",
            "class_name": "9",
            "division": "A",
            "teacher": meera,
            "subject": math,
        }),
        json!({"title": "Worksheet", "due_date": "2025-04-01", "class_name": "9", "division": "A", "teacher": meera}),
        json!({
            "title": "Project",
            "due_date": "2025-04-15",
            "class_name": "10",
            "teacher": meera,
            "status": "Closed",
        }),
    ] {
        let (status, body) = call!(app, create(body));
        assert_eq!(status, StatusCode::CREATED, "{body}");
        assert_eq!(body["data"]["teacher_name"], "Meera Iyer");
    }

    let titles = |body: &Value| -> Vec<String> {
        body["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|a| a["title"].as_str().unwrap().to_string())
            .collect()
    };

    // 按截止日期升序
    let (_, body) = call!(app, test::TestRequest::get().uri("/api/assignments"));
    assert_eq!(titles(&body), ["Worksheet", "Project", "Essay"]);

    let (_, body) = call!(app, test::TestRequest::get().uri("/api/assignments?class_name=9"));
    assert_eq!(titles(&body), ["Worksheet", "Essay"]);

    let (_, body) = call!(
        app,
        test::TestRequest::get().uri(&format!("/api/assignments?subject={math}"))
    );
    assert_eq!(titles(&body), ["Essay"]);
    assert_eq!(body["data"][0]["subject_name"], "Math");
    let essay = body["data"][0]["id"].as_i64().unwrap();

    let (_, body) = call!(app, test::TestRequest::get().uri("/api/assignments?status=Closed"));
    assert_eq!(titles(&body), ["Project"]);

    let (status, body) = call!(
        app,
        test::TestRequest::patch()
            .uri(&format!("/api/assignments/{essay}"))
            .set_json(json!({"teacher": asha}))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 9001);

    let (status, body) = call!(
        app,
        test::TestRequest::patch()
            .uri(&format!("/api/assignments/{essay}"))
            .set_json(json!({"status": "Closed"}))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "Closed");
    assert_eq!(body["data"]["title"], "Essay");

    let (status, _) = call!(app, test::TestRequest::get().uri("/api/assignments/999"));
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_user_delete_cascades() {
    let storage = memory_storage().await;
    let app = init_app!(storage);

    let meera = create_user!(app, teacher("Meera Iyer", "meera@school.in", "Math"));
    let john = create_user!(app, teacher("John Das", "john@school.in", "Science"));
    let asha = create_user!(app, student("Asha", "asha@school.in", "9", "A"));

    let (_, body) = call!(
        app,
        test::TestRequest::post().uri("/api/classes").set_json(json!({
            "class_number": 9,
            "division": "A",
            "class_teacher_id": meera,
        }))
    );
    let class_id = body["data"]["id"].as_i64().unwrap();

    let (_, body) = call!(
        app,
        test::TestRequest::post().uri("/api/subjects").set_json(json!({
            "name": "Science",
            "class_name": "9A",
            "class_teacher_id": john,
        }))
    );
    let science = body["data"]["id"].as_i64().unwrap();

    let (status, _) = call!(
        app,
        test::TestRequest::post()
            .uri("/api/attendance/bulk_mark")
            .set_json(json!({
                "classId": class_id,
                "date": "2025-03-05",
                "teacherId": meera,
                "records": [{"studentId": asha, "present": true}],
            }))
    );
    assert_eq!(status, StatusCode::OK);
    let (status, _) = call!(
        app,
        test::TestRequest::post().uri("/api/leaves").set_json(json!({
            "student": asha,
            "reason": "Fever",
            "start_date": "2025-03-06",
            "end_date": "2025-03-07",
        }))
    );
    assert_eq!(status, StatusCode::CREATED);
    let (status, _) = call!(
        app,
        test::TestRequest::post().uri("/api/marks").set_json(json!({
            "student": asha,
            "subject": "Science",
            "exam_type": "Unit Test",
            "marks_obtained": 18.0,
            "total_marks": 20.0,
        }))
    );
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = call!(
        app,
        test::TestRequest::delete().uri(&format!("/api/users/{asha}"))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "User deleted successfully");

    let (_, body) = call!(app, test::TestRequest::get().uri("/api/attendance"));
    assert_eq!(body["data"]["pagination"]["total"], 0);
    let (_, body) = call!(app, test::TestRequest::get().uri("/api/leaves"));
    assert_eq!(body["data"]["pagination"]["total"], 0);
    let (_, body) = call!(app, test::TestRequest::get().uri("/api/marks"));
    assert_eq!(body["data"].as_array().unwrap().len(), 0);

    // 删除教师后解除班主任与任课关联
    call!(app, test::TestRequest::delete().uri(&format!("/api/users/{meera}")));
    call!(app, test::TestRequest::delete().uri(&format!("/api/users/{john}")));

    let (_, body) = call!(
        app,
        test::TestRequest::get().uri(&format!("/api/classes/{class_id}"))
    );
    assert!(body["data"]["class_teacher_id"].is_null());
    assert!(body["data"]["class_teacher_name"].is_null());

    let (_, body) = call!(
        app,
        test::TestRequest::get().uri(&format!("/api/subjects/{science}"))
    );
    assert!(body["data"]["class_teacher_id"].is_null());

    let (status, _) = call!(app, test::TestRequest::get().uri(&format!("/api/users/{asha}")));
    assert_eq!(status, StatusCode::NOT_FOUND);
}
