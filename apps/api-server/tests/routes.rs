#[macro_use]
mod common;

use actix_web::http::StatusCode;
use actix_web::test;
use serde_json::Value;

use common::test_state;

#[actix_web::test]
async fn health_and_index() {
    let state = test_state();
    let app = test_app!(state);

    for uri in ["/health", "/api/health"] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["status"], "ok", "{uri}");
        assert_eq!(body["data"]["storage"], "memory", "{uri}");
    }

    let req = test::TestRequest::get().uri("/api").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["endpoints"]["dates"], "/api/dates");
}

#[actix_web::test]
async fn unknown_routes_are_json_404s() {
    let state = test_state();
    let app = test_app!(state);

    for uri in ["/nope", "/api/nope"] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["instance"], uri);
    }
}

#[actix_web::test]
async fn movie_passthrough() {
    let state = test_state();
    let app = test_app!(state);

    let req = test::TestRequest::get()
        .uri("/api/external/movies/search?query=incep")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["movies"][0]["title"], "Inception");

    let req = test::TestRequest::get()
        .uri("/api/external/movies/search")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::get()
        .uri("/api/external/movies/27205")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["director"], "Christopher Nolan");

    let req = test::TestRequest::get()
        .uri("/api/external/movies/1")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::get()
        .uri("/api/external/movies/popular")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
}

#[actix_web::test]
async fn music_without_credentials_is_unavailable() {
    let state = test_state();
    let app = test_app!(state);

    for uri in [
        "/api/external/songs/search?query=despacito",
        "/api/external/songs/popular",
        "/api/external/albums/abc",
    ] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE, "{uri}");
    }

    let req = test::TestRequest::get()
        .uri("/api/external/albums/search?query=")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
