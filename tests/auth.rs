mod common;

use actix_web::{http::StatusCode, test};
use serde_json::json;

use common::{Fixture, PASSWORD, SAM, TED, envelope, instructor, student};
use rust_gradebook::models::ErrorCode;
use rust_gradebook::models::users::entities::UserRole;
use rust_gradebook::utils::jwt::JwtUtils;

#[actix_web::test]
async fn login_returns_token_with_role_claim() {
    let fx = Fixture::new().await;
    let app = test::init_service(fx.app()).await;

    let req = test::TestRequest::post()
        .uri("/login")
        .set_json(json!({ "email": TED, "password": PASSWORD }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = envelope(resp).await;
    assert_eq!(body["code"], 0);
    assert_eq!(body["data"]["email"], TED);
    assert_eq!(body["data"]["name"], "ted");
    assert_eq!(body["data"]["role"], "INSTRUCTOR");
    assert!(body["data"]["expiresIn"].as_i64().unwrap() > 0);

    let jwt = body["data"]["jwt"].as_str().unwrap();
    let claims = JwtUtils::verify_access_token(jwt).unwrap();
    assert_eq!(claims.sub, TED);
    assert_eq!(claims.role, "ROLE_INSTRUCTOR");
}

#[actix_web::test]
async fn app_does_not_borrow_the_fixture() {
    let app = {
        let fx = Fixture::new().await;
        test::init_service(fx.app()).await
    };

    let req = test::TestRequest::post()
        .uri("/login")
        .set_json(json!({ "email": TED, "password": PASSWORD }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn wrong_password_and_unknown_email_look_the_same() {
    let fx = Fixture::new().await;
    let app = test::init_service(fx.app()).await;

    let mut messages = Vec::new();
    for (email, password) in [(TED, "nope"), ("nobody@csumb.edu", PASSWORD)] {
        let req = test::TestRequest::post()
            .uri("/login")
            .set_json(json!({ "email": email, "password": password }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        let body = envelope(resp).await;
        assert_eq!(body["code"], ErrorCode::AuthFailed as i32);
        messages.push(body["message"].clone());
    }
    assert_eq!(messages[0], messages[1]);
}

#[actix_web::test]
async fn malformed_login_is_bad_request() {
    let fx = Fixture::new().await;
    let app = test::init_service(fx.app()).await;

    let req = test::TestRequest::post()
        .uri("/login")
        .set_json(json!({ "email": "not-an-email", "password": PASSWORD }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::post()
        .uri("/login")
        .insert_header(("Content-Type", "application/json"))
        .set_payload("{\"email\":")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = envelope(resp).await;
    assert_eq!(body["code"], ErrorCode::BadRequest as i32);
}

#[actix_web::test]
async fn protected_routes_require_token() {
    let fx = Fixture::new().await;
    let app = test::init_service(fx.app()).await;

    let req = test::TestRequest::get()
        .uri("/sections?year=2025&semester=Fall")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body = envelope(resp).await;
    assert_eq!(body["code"], ErrorCode::Unauthorized as i32);

    let req = test::TestRequest::get()
        .uri("/sections?year=2025&semester=Fall")
        .insert_header(("Authorization", "Bearer garbage"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn role_claim_must_match_stored_role() {
    let fx = Fixture::new().await;
    let app = test::init_service(fx.app()).await;

    // 学生伪造教师角色声明
    let req = test::TestRequest::get()
        .uri("/sections?year=2025&semester=Fall")
        .insert_header(common::bearer(SAM, UserRole::Instructor))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn wrong_role_is_forbidden() {
    let fx = Fixture::new().await;
    let app = test::init_service(fx.app()).await;

    let req = test::TestRequest::get()
        .uri("/sections?year=2025&semester=Fall")
        .insert_header(student(SAM))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::get()
        .uri("/assignments?year=2025&semester=Fall")
        .insert_header(instructor(TED))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::put()
        .uri("/grades")
        .insert_header(student(SAM))
        .set_json(json!([]))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn bad_query_is_bad_request() {
    let fx = Fixture::new().await;
    let app = test::init_service(fx.app()).await;

    let req = test::TestRequest::get()
        .uri("/sections?year=twenty&semester=Fall")
        .insert_header(instructor(TED))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = envelope(resp).await;
    assert_eq!(body["code"], ErrorCode::BadRequest as i32);
}
