mod common;

use actix_web::{http::StatusCode, test};
use serde_json::json;

use common::{DAVE, Fixture, SAM, SAMA, TED, envelope, instructor};
use rust_gradebook::models::ErrorCode;
use rust_gradebook::registrar::RegistrarEvent;

#[actix_web::test]
async fn roster_is_sorted_by_name_and_enriched() {
    let fx = Fixture::new().await;
    let app = test::init_service(fx.app()).await;

    let req = test::TestRequest::get()
        .uri(&format!("/sections/{}/enrollments", fx.ted_section))
        .insert_header(instructor(TED))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = envelope(resp).await;
    let roster = body["data"].as_array().unwrap();
    let names: Vec<&str> = roster.iter().map(|e| e["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["sam", "sama"]);

    let sam = &roster[0];
    assert_eq!(sam["email"], SAM);
    assert_eq!(sam["studentId"], fx.user_id(SAM).await);
    assert_eq!(sam["courseId"], "cst489");
    assert_eq!(sam["credits"], 4);
    assert_eq!(sam["year"], 2025);
    assert_eq!(sam["semester"], "Fall");
    assert_eq!(sam["sectionNo"], fx.ted_section);
    assert!(sam["grade"].is_null());
}

#[actix_web::test]
async fn roster_missing_or_foreign_section() {
    let fx = Fixture::new().await;
    let app = test::init_service(fx.app()).await;

    let req = test::TestRequest::get()
        .uri("/sections/9999/enrollments")
        .insert_header(instructor(TED))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body = envelope(resp).await;
    assert_eq!(body["code"], ErrorCode::SectionNotFound as i32);

    let req = test::TestRequest::get()
        .uri(&format!("/sections/{}/enrollments", fx.dave_section))
        .insert_header(instructor(TED))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn final_grades_are_written_and_announced() {
    let fx = Fixture::new().await;
    let app = test::init_service(fx.app()).await;

    let ids = fx.enrollment_ids(fx.ted_section).await;
    let req = test::TestRequest::put()
        .uri("/enrollments")
        .insert_header(instructor(TED))
        .set_json(json!([
            { "enrollmentId": ids[0], "grade": "A" },
            { "enrollmentId": ids[1], "grade": "B+" },
        ]))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let roster = fx
        .storage
        .list_section_enrollments(fx.ted_section)
        .await
        .unwrap();
    assert_eq!(roster[0].grade.as_deref(), Some("A"));
    assert_eq!(roster[1].grade.as_deref(), Some("B+"));

    let history = fx.registrar.history();
    assert_eq!(history.len(), 2);
    assert!(
        history
            .iter()
            .all(|m| m.event == RegistrarEvent::UpdateEnrollment)
    );
    assert_eq!(history[0].payload, json!({ "enrollmentId": ids[0], "grade": "A" }));
    assert_eq!(history[1].payload, json!({ "enrollmentId": ids[1], "grade": "B+" }));
}

#[actix_web::test]
async fn batch_with_a_bad_entry_changes_nothing() {
    let fx = Fixture::new().await;
    let app = test::init_service(fx.app()).await;

    let ted_ids = fx.enrollment_ids(fx.ted_section).await;
    let dave_ids = fx.enrollment_ids(fx.dave_section).await;

    // 未知的选课记录
    let req = test::TestRequest::put()
        .uri("/enrollments")
        .insert_header(instructor(TED))
        .set_json(json!([
            { "enrollmentId": ted_ids[0], "grade": "A" },
            { "enrollmentId": 999_999, "grade": "C" },
        ]))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = envelope(resp).await;
    assert_eq!(body["code"], ErrorCode::EnrollmentNotFound as i32);

    // 别人的教学班
    let req = test::TestRequest::put()
        .uri("/enrollments")
        .insert_header(instructor(TED))
        .set_json(json!([
            { "enrollmentId": ted_ids[0], "grade": "A" },
            { "enrollmentId": dave_ids[0], "grade": "F" },
        ]))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = envelope(resp).await;
    assert_eq!(body["code"], ErrorCode::SectionPermissionDenied as i32);

    for section_no in [fx.ted_section, fx.dave_section] {
        let roster = fx
            .storage
            .list_section_enrollments(section_no)
            .await
            .unwrap();
        assert!(roster.iter().all(|e| e.grade.is_none()));
    }
    assert!(fx.registrar.history().is_empty());

    // dave 自己可以登记
    let req = test::TestRequest::put()
        .uri("/enrollments")
        .insert_header(instructor(DAVE))
        .set_json(json!([{ "enrollmentId": dave_ids[0], "grade": "F" }]))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn foreign_enrollment_is_bad_request() {
    let fx = Fixture::new().await;
    let app = test::init_service(fx.app()).await;

    let dave_ids = fx.enrollment_ids(fx.dave_section).await;
    let req = test::TestRequest::put()
        .uri("/enrollments")
        .insert_header(instructor(TED))
        .set_json(json!([{ "enrollmentId": dave_ids[0], "grade": "F" }]))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = envelope(resp).await;
    assert_eq!(body["code"], ErrorCode::SectionPermissionDenied as i32);

    let roster = fx
        .storage
        .list_section_enrollments(fx.dave_section)
        .await
        .unwrap();
    assert!(roster.iter().all(|e| e.grade.is_none()));
    assert!(fx.registrar.history().is_empty());
}

#[actix_web::test]
async fn empty_batch_is_a_no_op() {
    let fx = Fixture::new().await;
    let app = test::init_service(fx.app()).await;

    let req = test::TestRequest::put()
        .uri("/enrollments")
        .insert_header(instructor(TED))
        .set_json(json!([]))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = envelope(resp).await;
    assert_eq!(body["code"], 0);
    assert!(fx.registrar.history().is_empty());
}

#[actix_web::test]
async fn grade_can_be_cleared() {
    let fx = Fixture::new().await;
    let app = test::init_service(fx.app()).await;

    let ids = fx.enrollment_ids(fx.ted_section).await;
    for grade in [json!("A"), json!(null)] {
        let req = test::TestRequest::put()
            .uri("/enrollments")
            .insert_header(instructor(TED))
            .set_json(json!([{ "enrollmentId": ids[0], "grade": grade }]))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    let roster = fx
        .storage
        .list_section_enrollments(fx.ted_section)
        .await
        .unwrap();
    let first = roster.iter().find(|e| e.enrollment_id == ids[0]).unwrap();
    assert!(first.grade.is_none());
    assert_eq!(first.email, SAM);
    assert!(roster.iter().any(|e| e.email == SAMA));
}
