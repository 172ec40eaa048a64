//! Token gate and login behaviour through the assembled app.

mod support;

use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use blog_api::server::build_app;
use blog_api::test_support::{Doubles, StubAuthGateway};
use rstest::rstest;
use serde_json::{Value, json};

use support::{VALID_TOKEN, bearer, deps};

fn online() -> Doubles {
    Doubles::new(StubAuthGateway::accepting(VALID_TOKEN))
}

#[rstest]
#[case::missing(None)]
#[case::blank(Some("Bearer "))]
#[case::wrong(Some("Bearer tok-forged"))]
#[actix_web::test]
async fn listing_without_a_valid_token_is_unauthorized(#[case] header: Option<&str>) {
    let doubles = online();
    let app = actix_test::init_service(build_app(deps(&doubles, false))).await;

    let mut req = actix_test::TestRequest::get().uri("/post/");
    if let Some(value) = header {
        req = req.insert_header(("Authorization", value));
    }
    let res = actix_test::call_service(&app, req.to_request()).await;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert!(res.headers().contains_key("trace-id"));
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["status"], "Error");
    assert_eq!(doubles.posts.list_calls(), 0);
}

#[actix_web::test]
async fn listing_with_a_valid_token_hits_storage_once() {
    let doubles = online();
    let app = actix_test::init_service(build_app(deps(&doubles, false))).await;

    let req = actix_test::TestRequest::get()
        .uri("/post/")
        .insert_header(bearer(VALID_TOKEN))
        .to_request();
    let res = actix_test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(doubles.posts.list_calls(), 1);
    assert_eq!(doubles.auth.validations(), 1);
}

#[actix_web::test]
async fn bare_token_header_is_accepted() {
    let doubles = online();
    let app = actix_test::init_service(build_app(deps(&doubles, false))).await;

    let req = actix_test::TestRequest::get()
        .uri("/post/")
        .insert_header(("Authorization", VALID_TOKEN))
        .to_request();
    let res = actix_test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::OK);
}

#[actix_web::test]
async fn unreachable_auth_service_yields_service_unavailable() {
    let doubles = Doubles::new(StubAuthGateway::offline());
    let app = actix_test::init_service(build_app(deps(&doubles, false))).await;

    let req = actix_test::TestRequest::get()
        .uri("/post/")
        .insert_header(bearer(VALID_TOKEN))
        .to_request();
    let res = actix_test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["error"], "auth service unavailable");
    assert_eq!(doubles.posts.list_calls(), 0);

    let req = actix_test::TestRequest::get().uri("/post/1/").to_request();
    let res = actix_test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[rstest]
#[case::get_one("GET", "/post/1/")]
#[case::delete("DELETE", "/post/1/")]
#[case::create("POST", "/post/")]
#[actix_web::test]
async fn ungated_routes_skip_the_auth_service(#[case] method: &str, #[case] uri: &str) {
    let doubles = online();
    let app = actix_test::init_service(build_app(deps(&doubles, false))).await;

    let req = actix_test::TestRequest::default()
        .method(method.parse().expect("method"))
        .uri(uri)
        .set_json(json!({ "title": "t", "body": "b", "author": 1 }))
        .to_request();
    let res = actix_test::call_service(&app, req).await;

    assert_ne!(res.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(doubles.auth.validations(), 0);
}

#[rstest]
#[case::create("POST", "/post/")]
#[case::delete("DELETE", "/post/1/")]
#[actix_web::test]
async fn guarded_mutations_require_a_token(#[case] method: &str, #[case] uri: &str) {
    let doubles = online();
    let app = actix_test::init_service(build_app(deps(&doubles, true))).await;

    let req = actix_test::TestRequest::default()
        .method(method.parse().expect("method"))
        .uri(uri)
        .set_json(json!({ "title": "t", "body": "b", "author": 1 }))
        .to_request();
    let res = actix_test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(doubles.posts.create_calls(), 0);
}

#[actix_web::test]
async fn guarded_create_succeeds_with_a_token() {
    let doubles = online();
    let app = actix_test::init_service(build_app(deps(&doubles, true))).await;

    let req = actix_test::TestRequest::post()
        .uri("/post/")
        .insert_header(bearer(VALID_TOKEN))
        .set_json(json!({ "title": "t", "body": "b", "author": 1 }))
        .to_request();
    let res = actix_test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(doubles.posts.create_calls(), 1);
}

#[actix_web::test]
async fn login_issues_a_token_the_gate_accepts() {
    let doubles = online();
    let app = actix_test::init_service(build_app(deps(&doubles, false))).await;

    let req = actix_test::TestRequest::post()
        .uri("/login/")
        .set_json(json!({ "username": "admin", "password": "secret" }))
        .to_request();
    let login: Value = actix_test::call_and_read_body_json(&app, req).await;
    let token = login["token"].as_str().expect("token").to_owned();

    let req = actix_test::TestRequest::get()
        .uri("/post/")
        .insert_header(bearer(&token))
        .to_request();
    let res = actix_test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::OK);
}

#[rstest]
#[case::wrong_password(online(), StatusCode::BAD_REQUEST)]
#[case::auth_down(Doubles::new(StubAuthGateway::offline()), StatusCode::SERVICE_UNAVAILABLE)]
#[actix_web::test]
async fn failed_logins_map_to_client_or_gateway_errors(
    #[case] doubles: Doubles,
    #[case] expected: StatusCode,
) {
    let app = actix_test::init_service(build_app(deps(&doubles, false))).await;

    let req = actix_test::TestRequest::post()
        .uri("/login/")
        .set_json(json!({ "username": "admin", "password": "guess" }))
        .to_request();
    let res = actix_test::call_service(&app, req).await;

    assert_eq!(res.status(), expected);
}

#[actix_web::test]
async fn health_checks_bypass_the_gate() {
    let doubles = online();
    let app = actix_test::init_service(build_app(deps(&doubles, true))).await;

    let req = actix_test::TestRequest::get().uri("/health/live").to_request();
    let res = actix_test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::OK);
}
