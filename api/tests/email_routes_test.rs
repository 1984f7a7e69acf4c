mod common;

use std::time::Duration;

use actix_web::{http::StatusCode, test};
use serde_json::{json, Value};

use ss_api::create_app;
use ss_core::RoleType;
use ss_shared::{CorsConfig, ServerConfig};

use common::{create_test_context, latest_code};

macro_rules! init_app {
    ($ctx:expr) => {
        test::init_service(create_app(
            $ctx.state.clone(),
            &ServerConfig::default(),
            &CorsConfig::default(),
        ))
        .await
    };
}

#[actix_web::test]
async fn test_health_check() {
    let ctx = create_test_context();
    let app = init_app!(ctx);

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "ss_api");
}

#[actix_web::test]
async fn test_request_code_missing_address() {
    let ctx = create_test_context();
    let app = init_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/email/request-code")
        .set_json(json!({ "roleType": "student" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "error");
    assert_eq!(body["error"], "validation_error");
    assert_eq!(body["details"]["field"], "address");
}

#[actix_web::test]
async fn test_request_code_blank_address() {
    let ctx = create_test_context();
    let app = init_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/email/request-code")
        .set_json(json!({ "address": "   " }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "validation_error");
    assert_eq!(body["details"]["field"], "address");
}

#[actix_web::test]
async fn test_request_code_unknown_role_and_purpose() {
    let ctx = create_test_context();
    let app = init_app!(ctx);

    for body in [
        json!({ "address": "ana@itcelaya.edu.mx", "roleType": "teacher" }),
        json!({ "address": "ana@itcelaya.edu.mx", "purpose": "unsubscribe" }),
    ] {
        let req = test::TestRequest::post()
            .uri("/email/request-code")
            .set_json(body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "validation_error");
    }

    assert!(ctx.store.requests_for("ana@itcelaya.edu.mx").await.is_empty());
}

#[actix_web::test]
async fn test_request_code_success_normalizes_address() {
    let ctx = create_test_context();
    let app = init_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/email/request-code")
        .set_json(json!({ "address": "  Ana@ITCelaya.edu.mx " }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "success");
    assert_eq!(body["data"]["address"], "ana@itcelaya.edu.mx");
    assert!(body["message"].is_string());
    // The code never appears in the response
    assert!(body["data"].get("code").is_none());

    let delivered = ctx
        .notifier
        .wait_for_code("ana@itcelaya.edu.mx", 0, Duration::from_secs(2))
        .await;
    assert_eq!(
        delivered,
        Some(latest_code(&ctx.store, "ana@itcelaya.edu.mx").await)
    );
}

#[actix_web::test]
async fn test_verify_code_links_profile() {
    let ctx = create_test_context();
    ctx.store
        .seed_profile(RoleType::Student, 7, "ana@itcelaya.edu.mx")
        .await;
    let app = init_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/email/request-code")
        .set_json(json!({
            "address": "ana@itcelaya.edu.mx",
            "roleType": "student",
            "profileId": 7
        }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let code = latest_code(&ctx.store, "ana@itcelaya.edu.mx").await;
    let req = test::TestRequest::post()
        .uri("/email/verify-code")
        .set_json(json!({ "address": "ANA@itcelaya.edu.mx", "code": code }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "success");
    assert_eq!(body["data"]["address"], "ana@itcelaya.edu.mx");
    assert_eq!(body["data"]["profileId"], 7);
    assert_eq!(body["data"]["roleType"], "student");

    let req = test::TestRequest::get().uri("/students/7").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["verified"], true);
}

#[actix_web::test]
async fn test_verify_code_leaves_other_addresses_profile_alone() {
    let ctx = create_test_context();
    ctx.store
        .seed_profile(RoleType::Student, 7, "ana@itcelaya.edu.mx")
        .await;
    let app = init_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/email/request-code")
        .set_json(json!({
            "address": "eve@itcelaya.edu.mx",
            "roleType": "student",
            "profileId": 7
        }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    // The code itself is valid for eve and is consumed
    let code = latest_code(&ctx.store, "eve@itcelaya.edu.mx").await;
    let req = test::TestRequest::post()
        .uri("/email/verify-code")
        .set_json(json!({ "address": "eve@itcelaya.edu.mx", "code": code }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::get().uri("/students/7").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["verified"], false);
}

#[actix_web::test]
async fn test_verify_code_missing_fields() {
    let ctx = create_test_context();
    let app = init_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/email/verify-code")
        .set_json(json!({ "address": "ana@itcelaya.edu.mx" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "validation_error");
    assert_eq!(body["details"]["field"], "code");
}

#[actix_web::test]
async fn test_verify_code_reason_codes() {
    let ctx = create_test_context();
    let app = init_app!(ctx);
    let address = "ana@itcelaya.edu.mx";

    let req = test::TestRequest::post()
        .uri("/email/request-code")
        .set_json(json!({ "address": address }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
    let code = latest_code(&ctx.store, address).await;
    let wrong = if code == "000000" { "000001" } else { "000000" };

    let verify = |code: &str| {
        test::TestRequest::post()
            .uri("/email/verify-code")
            .set_json(json!({ "address": address, "code": code }))
            .to_request()
    };

    let resp = test::call_service(&app, verify(wrong)).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "invalid_code");

    let resp = test::call_service(&app, verify(&code)).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = test::call_service(&app, verify(&code)).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "code_already_used");
}

#[actix_web::test]
async fn test_verify_expired_code() {
    let ctx = create_test_context();
    let app = init_app!(ctx);
    let address = "luis@itcelaya.edu.mx";

    let req = test::TestRequest::post()
        .uri("/email/request-code")
        .set_json(json!({ "address": address }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let code = latest_code(&ctx.store, address).await;
    ctx.store.expire_requests_for(address).await;

    let req = test::TestRequest::post()
        .uri("/email/verify-code")
        .set_json(json!({ "address": address, "code": code }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "code_expired");
}

#[actix_web::test]
async fn test_superseded_code_reports_already_used() {
    let ctx = create_test_context();
    let app = init_app!(ctx);
    let address = "ana@itcelaya.edu.mx";

    let request_code = || {
        test::TestRequest::post()
            .uri("/email/request-code")
            .set_json(json!({ "address": address }))
            .to_request()
    };

    assert_eq!(test::call_service(&app, request_code()).await.status(), StatusCode::OK);
    let first = latest_code(&ctx.store, address).await;
    assert_eq!(test::call_service(&app, request_code()).await.status(), StatusCode::OK);

    let requests = ctx.store.requests_for(address).await;
    assert_eq!(requests.len(), 2);
    assert!(requests[0].used);
    assert!(!requests[1].used);

    // Both rows may carry the same digits; the newest one wins the lookup
    if first != requests[1].code {
        let req = test::TestRequest::post()
            .uri("/email/verify-code")
            .set_json(json!({ "address": address, "code": first }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["error"], "code_already_used");
    }
}

#[actix_web::test]
async fn test_store_failure_returns_generic_500() {
    let ctx = create_test_context();
    let app = init_app!(ctx);
    ctx.store.set_unavailable(true);

    let req = test::TestRequest::post()
        .uri("/email/request-code")
        .set_json(json!({ "address": "ana@itcelaya.edu.mx" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "error");
    assert_eq!(body["error"], "internal_error");
    assert!(body.get("details").is_none());

    let req = test::TestRequest::post()
        .uri("/email/verify-code")
        .set_json(json!({ "address": "ana@itcelaya.edu.mx", "code": "123456" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[actix_web::test]
async fn test_malformed_json_uses_error_envelope() {
    let ctx = create_test_context();
    let app = init_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/email/verify-code")
        .insert_header(("content-type", "application/json"))
        .set_payload("{\"address\": ")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "error");
    assert_eq!(body["error"], "bad_request");
}

#[actix_web::test]
async fn test_unknown_route_is_404() {
    let ctx = create_test_context();
    let app = init_app!(ctx);

    let req = test::TestRequest::get().uri("/email/outbox/1/2").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
