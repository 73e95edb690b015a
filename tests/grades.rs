mod common;

use actix_web::{http::StatusCode, test};
use chrono::NaiveDate;
use serde_json::json;

use common::{DAVE, Fixture, SAM, SAMA, TED, envelope, instructor};
use rust_gradebook::models::ErrorCode;

fn due() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 10, 1).unwrap()
}

#[actix_web::test]
async fn grade_rows_are_created_once() {
    let fx = Fixture::new().await;
    let app = test::init_service(fx.app()).await;

    let hw = fx
        .storage
        .create_assignment(fx.ted_section, "hw1".into(), due())
        .await
        .unwrap();

    let mut seen = Vec::new();
    for _ in 0..2 {
        let req = test::TestRequest::get()
            .uri(&format!("/assignments/{}/grades", hw.id))
            .insert_header(instructor(TED))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = envelope(resp).await;
        let rows = body["data"].as_array().unwrap().clone();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["studentName"], "sam");
        assert_eq!(rows[0]["studentEmail"], SAM);
        assert_eq!(rows[1]["studentEmail"], SAMA);
        assert_eq!(rows[0]["assignmentTitle"], "hw1");
        assert_eq!(rows[0]["courseId"], "cst489");
        assert!(rows.iter().all(|r| r["score"].is_null()));
        let ids: Vec<i64> = rows.iter().map(|r| r["gradeId"].as_i64().unwrap()).collect();
        seen.push(ids);
    }
    assert_eq!(seen[0], seen[1]);
}

#[actix_web::test]
async fn grade_listing_is_guarded() {
    let fx = Fixture::new().await;
    let app = test::init_service(fx.app()).await;

    let req = test::TestRequest::get()
        .uri("/assignments/424242/grades")
        .insert_header(instructor(TED))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body = envelope(resp).await;
    assert_eq!(body["code"], ErrorCode::AssignmentNotFound as i32);

    let hw = fx
        .storage
        .create_assignment(fx.dave_section, "db1".into(), due())
        .await
        .unwrap();
    let req = test::TestRequest::get()
        .uri(&format!("/assignments/{}/grades", hw.id))
        .insert_header(instructor(TED))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    // 被拒绝的请求不创建成绩行
    let rows = fx.storage.get_grades_by_ids(&[1, 2, 3]).await.unwrap();
    assert!(rows.is_empty());
}

#[actix_web::test]
async fn scores_are_written_in_one_batch() {
    let fx = Fixture::new().await;
    let app = test::init_service(fx.app()).await;

    let hw = fx
        .storage
        .create_assignment(fx.ted_section, "hw1".into(), due())
        .await
        .unwrap();
    let rows = fx.storage.list_assignment_grades(hw.id).await.unwrap();

    let req = test::TestRequest::put()
        .uri("/grades")
        .insert_header(instructor(TED))
        .set_json(json!([
            { "gradeId": rows[0].grade_id, "score": 95 },
            { "gradeId": rows[1].grade_id, "score": 0 },
        ]))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let after = fx.storage.list_assignment_grades(hw.id).await.unwrap();
    assert_eq!(after[0].score, Some(95));
    assert_eq!(after[1].score, Some(0));
    // 分数变更不通知 registrar
    assert!(fx.registrar.history().is_empty());
}

#[actix_web::test]
async fn bad_score_batches_change_nothing() {
    let fx = Fixture::new().await;
    let app = test::init_service(fx.app()).await;

    let ted_hw = fx
        .storage
        .create_assignment(fx.ted_section, "hw1".into(), due())
        .await
        .unwrap();
    let dave_hw = fx
        .storage
        .create_assignment(fx.dave_section, "db1".into(), due())
        .await
        .unwrap();
    let ted_rows = fx.storage.list_assignment_grades(ted_hw.id).await.unwrap();
    let dave_rows = fx.storage.list_assignment_grades(dave_hw.id).await.unwrap();

    let cases = [
        (
            json!([
                { "gradeId": ted_rows[0].grade_id, "score": 90 },
                { "gradeId": 999_999, "score": 80 },
            ]),
            StatusCode::BAD_REQUEST,
        ),
        (
            json!([
                { "gradeId": ted_rows[0].grade_id, "score": 90 },
                { "gradeId": dave_rows[0].grade_id, "score": 80 },
            ]),
            StatusCode::FORBIDDEN,
        ),
        (
            json!([
                { "gradeId": ted_rows[0].grade_id, "score": 90 },
                { "gradeId": ted_rows[1].grade_id, "score": -5 },
            ]),
            StatusCode::BAD_REQUEST,
        ),
    ];

    for (body, status) in cases {
        let req = test::TestRequest::put()
            .uri("/grades")
            .insert_header(instructor(TED))
            .set_json(body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), status);
    }

    let ted_after = fx.storage.list_assignment_grades(ted_hw.id).await.unwrap();
    assert!(ted_after.iter().all(|g| g.score.is_none()));
    let dave_after = fx.storage.list_assignment_grades(dave_hw.id).await.unwrap();
    assert!(dave_after.iter().all(|g| g.score.is_none()));

    let req = test::TestRequest::put()
        .uri("/grades")
        .insert_header(instructor(DAVE))
        .set_json(json!([{ "gradeId": dave_rows[0].grade_id, "score": 70 }]))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn deleting_an_assignment_removes_its_grades() {
    let fx = Fixture::new().await;
    let app = test::init_service(fx.app()).await;

    let hw = fx
        .storage
        .create_assignment(fx.ted_section, "hw1".into(), due())
        .await
        .unwrap();
    let rows = fx.storage.list_assignment_grades(hw.id).await.unwrap();
    let grade_ids: Vec<i64> = rows.iter().map(|g| g.grade_id).collect();
    assert_eq!(grade_ids.len(), 2);

    let req = test::TestRequest::delete()
        .uri(&format!("/assignments/{}", hw.id))
        .insert_header(instructor(TED))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    assert!(fx.storage.get_grades_by_ids(&grade_ids).await.unwrap().is_empty());
}
