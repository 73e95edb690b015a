mod common;

use actix_web::{http::StatusCode, test};
use chrono::NaiveDate;
use serde_json::json;

use common::{DAVE, Fixture, JOE, SAM, TED, envelope, instructor, student};
use rust_gradebook::models::ErrorCode;
use rust_gradebook::models::grades::requests::UpdateGradeScore;
use rust_gradebook::registrar::RegistrarEvent;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[actix_web::test]
async fn instructor_sections_for_term() {
    let fx = Fixture::new().await;
    let app = test::init_service(fx.app()).await;

    let req = test::TestRequest::get()
        .uri("/sections?year=2025&semester=Fall")
        .insert_header(instructor(TED))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = envelope(resp).await;
    let sections = body["data"].as_array().unwrap();
    assert_eq!(sections.len(), 1);
    assert_eq!(sections[0]["secNo"], fx.ted_section);
    assert_eq!(sections[0]["courseId"], "cst489");
    assert_eq!(sections[0]["instructorName"], "ted");
    assert_eq!(sections[0]["instructorEmail"], TED);
    assert_eq!(sections[0]["year"], 2025);
    assert_eq!(sections[0]["semester"], "Fall");

    let req = test::TestRequest::get()
        .uri("/sections?year=2024&semester=Spring")
        .insert_header(instructor(TED))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = envelope(resp).await;
    assert!(body["data"].as_array().unwrap().is_empty());
}

#[actix_web::test]
async fn ted_assignment_lifecycle() {
    let fx = Fixture::new().await;
    let app = test::init_service(fx.app()).await;

    // 合法的截止日期
    let req = test::TestRequest::post()
        .uri("/assignments")
        .insert_header(instructor(TED))
        .set_json(json!({ "title": "New Assignment", "dueDate": "2025-10-01", "secNo": fx.ted_section }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = envelope(resp).await;
    let id = body["data"]["id"].as_i64().unwrap();
    assert!(id > 0);
    assert_eq!(body["data"]["courseId"], "cst489");
    assert_eq!(body["data"]["secNo"], fx.ted_section);
    assert_eq!(fx.registrar.events(), vec![RegistrarEvent::AddAssignment]);
    assert_eq!(fx.registrar.history()[0].payload["id"], id);

    // 截止日期在学期外
    let req = test::TestRequest::post()
        .uri("/assignments")
        .insert_header(instructor(TED))
        .set_json(json!({ "title": "New Assignment", "dueDate": "1900-01-01", "secNo": fx.ted_section }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = envelope(resp).await;
    assert_eq!(body["code"], ErrorCode::AssignmentDueDateInvalid as i32);
    assert_eq!(fx.registrar.events().len(), 1);
    let stored = fx
        .storage
        .list_assignments_by_section(fx.ted_section)
        .await
        .unwrap();
    assert_eq!(stored.len(), 1);

    // 更新
    let req = test::TestRequest::put()
        .uri("/assignments")
        .insert_header(instructor(TED))
        .set_json(json!({ "id": id, "title": "Renamed", "dueDate": "2025-09-13", "secNo": fx.ted_section }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = envelope(resp).await;
    assert_eq!(body["data"]["title"], "Renamed");
    assert_eq!(body["data"]["dueDate"], "2025-09-13");
    assert_eq!(
        fx.registrar.events(),
        vec![RegistrarEvent::AddAssignment, RegistrarEvent::UpdateAssignment]
    );
    let stored = fx.storage.get_assignment_by_id(id).await.unwrap().unwrap();
    assert_eq!(stored.due_date, date(2025, 9, 13));

    // 删除
    let req = test::TestRequest::delete()
        .uri(&format!("/assignments/{id}"))
        .insert_header(instructor(TED))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        fx.registrar.events(),
        vec![
            RegistrarEvent::AddAssignment,
            RegistrarEvent::UpdateAssignment,
            RegistrarEvent::DeleteAssignment,
        ]
    );
    assert_eq!(fx.registrar.history()[2].payload, json!(id));
    assert!(fx.storage.get_assignment_by_id(id).await.unwrap().is_none());
}

#[actix_web::test]
async fn create_rejects_foreign_missing_and_blank() {
    let fx = Fixture::new().await;
    let app = test::init_service(fx.app()).await;

    // 别人的教学班
    let req = test::TestRequest::post()
        .uri("/assignments")
        .insert_header(instructor(TED))
        .set_json(json!({ "title": "New Assignment", "dueDate": "2025-10-01", "secNo": fx.dave_section }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    // 不存在的教学班
    let req = test::TestRequest::post()
        .uri("/assignments")
        .insert_header(instructor(TED))
        .set_json(json!({ "title": "New Assignment", "dueDate": "2025-10-01", "secNo": 9999 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = envelope(resp).await;
    assert_eq!(body["code"], ErrorCode::SectionNotFound as i32);

    // 空标题
    let req = test::TestRequest::post()
        .uri("/assignments")
        .insert_header(instructor(TED))
        .set_json(json!({ "title": "  ", "dueDate": "2025-10-01", "secNo": fx.ted_section }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // 缺少截止日期
    let req = test::TestRequest::post()
        .uri("/assignments")
        .insert_header(instructor(TED))
        .set_json(json!({ "title": "No date", "secNo": fx.ted_section }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    assert!(fx.registrar.history().is_empty());
    for section_no in [fx.ted_section, fx.dave_section] {
        assert!(
            fx.storage
                .list_assignments_by_section(section_no)
                .await
                .unwrap()
                .is_empty()
        );
    }
}

#[actix_web::test]
async fn update_checks_run_in_order() {
    let fx = Fixture::new().await;
    let app = test::init_service(fx.app()).await;

    let ted_hw = fx
        .storage
        .create_assignment(fx.ted_section, "hw1".into(), date(2025, 10, 1))
        .await
        .unwrap();
    let dave_hw = fx
        .storage
        .create_assignment(fx.dave_section, "db1".into(), date(2025, 10, 2))
        .await
        .unwrap();

    let put = |body: serde_json::Value| {
        test::TestRequest::put()
            .uri("/assignments")
            .insert_header(instructor(TED))
            .set_json(body)
            .to_request()
    };

    // 教学班不存在
    let resp = test::call_service(
        &app,
        put(json!({ "id": ted_hw.id, "title": "x", "dueDate": "2025-10-01", "secNo": 9999 })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // 教学班不属于 ted
    let resp = test::call_service(
        &app,
        put(json!({ "id": dave_hw.id, "title": "x", "dueDate": "2025-10-01", "secNo": fx.dave_section })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    // 作业不存在
    let resp = test::call_service(
        &app,
        put(json!({ "id": 424242, "title": "x", "dueDate": "2025-10-01", "secNo": fx.ted_section })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // 作业属于另一个教学班
    let resp = test::call_service(
        &app,
        put(json!({ "id": dave_hw.id, "title": "x", "dueDate": "2025-10-01", "secNo": fx.ted_section })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    // 截止日期越界
    let resp = test::call_service(
        &app,
        put(json!({ "id": ted_hw.id, "title": "x", "dueDate": "2026-01-01", "secNo": fx.ted_section })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // 不带截止日期只改标题
    let resp = test::call_service(
        &app,
        put(json!({ "id": ted_hw.id, "title": "hw1 (revised)", "secNo": fx.ted_section })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let stored = fx.storage.get_assignment_by_id(ted_hw.id).await.unwrap().unwrap();
    assert_eq!(stored.title, "hw1 (revised)");
    assert_eq!(stored.due_date, date(2025, 10, 1));
    let untouched = fx.storage.get_assignment_by_id(dave_hw.id).await.unwrap().unwrap();
    assert_eq!(untouched.title, "db1");
    assert_eq!(fx.registrar.events(), vec![RegistrarEvent::UpdateAssignment]);
}

#[actix_web::test]
async fn delete_unknown_or_foreign_assignment() {
    let fx = Fixture::new().await;
    let app = test::init_service(fx.app()).await;

    let dave_hw = fx
        .storage
        .create_assignment(fx.dave_section, "db1".into(), date(2025, 10, 2))
        .await
        .unwrap();

    let req = test::TestRequest::delete()
        .uri("/assignments/424242")
        .insert_header(instructor(TED))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::delete()
        .uri(&format!("/assignments/{}", dave_hw.id))
        .insert_header(instructor(TED))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    assert!(fx.storage.get_assignment_by_id(dave_hw.id).await.unwrap().is_some());
    assert!(fx.registrar.history().is_empty());

    let req = test::TestRequest::delete()
        .uri(&format!("/assignments/{}", dave_hw.id))
        .insert_header(instructor(DAVE))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(fx.registrar.events(), vec![RegistrarEvent::DeleteAssignment]);
}

#[actix_web::test]
async fn section_assignments_are_ordered_and_guarded() {
    let fx = Fixture::new().await;
    let app = test::init_service(fx.app()).await;

    for (title, due) in [
        ("late", date(2025, 12, 1)),
        ("early", date(2025, 9, 1)),
        ("middle", date(2025, 10, 15)),
    ] {
        fx.storage
            .create_assignment(fx.ted_section, title.into(), due)
            .await
            .unwrap();
    }

    let req = test::TestRequest::get()
        .uri(&format!("/sections/{}/assignments", fx.ted_section))
        .insert_header(instructor(TED))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = envelope(resp).await;
    let titles: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["early", "middle", "late"]);

    let req = test::TestRequest::get()
        .uri("/sections/9999/assignments")
        .insert_header(instructor(TED))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::get()
        .uri(&format!("/sections/{}/assignments", fx.ted_section))
        .insert_header(instructor(DAVE))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn student_sees_only_enrolled_sections_with_scores() {
    let fx = Fixture::new().await;
    let app = test::init_service(fx.app()).await;

    let graded = fx
        .storage
        .create_assignment(fx.ted_section, "graded".into(), date(2025, 9, 10))
        .await
        .unwrap();
    fx.storage
        .create_assignment(fx.ted_section, "ungraded".into(), date(2025, 11, 10))
        .await
        .unwrap();
    fx.storage
        .create_assignment(fx.dave_section, "other section".into(), date(2025, 9, 5))
        .await
        .unwrap();

    // 创建成绩行后给 sam 打分
    let grades = fx.storage.list_assignment_grades(graded.id).await.unwrap();
    let sams = grades
        .iter()
        .find(|g| g.student_email == SAM)
        .expect("sam grade row");
    fx.storage
        .update_grade_scores(&[UpdateGradeScore {
            grade_id: sams.grade_id,
            score: Some(88),
        }])
        .await
        .unwrap();

    let req = test::TestRequest::get()
        .uri("/assignments?year=2025&semester=Fall")
        .insert_header(student(SAM))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = envelope(resp).await;
    let items = body["data"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["title"], "graded");
    assert_eq!(items[0]["score"], 88);
    assert_eq!(items[0]["courseId"], "cst489");
    assert_eq!(items[1]["title"], "ungraded");
    assert!(items[1]["score"].is_null());

    // joe 只选了 dave 的课
    let req = test::TestRequest::get()
        .uri("/assignments?year=2025&semester=Fall")
        .insert_header(student(JOE))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body = envelope(resp).await;
    let items = body["data"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["title"], "other section");
    assert!(items[0]["score"].is_null());
}
