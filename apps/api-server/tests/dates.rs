#[macro_use]
mod common;

use actix_web::http::StatusCode;
use actix_web::test;
use serde_json::{Value, json};

use common::{linked_pair, member, test_state};

#[actix_web::test]
async fn dates_need_a_linked_partner() {
    let state = test_state();
    let app = test_app!(state);
    let solo = member(&state, "Solo").await;

    let req = test::TestRequest::post()
        .uri("/api/dates")
        .insert_header(solo.bearer())
        .set_json(json!({"title": "Picnic", "scheduled_at": "2024-06-01T18:00:00Z"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn create_list_and_filter() {
    let state = test_state();
    let app = test_app!(state);
    let (ana, luis) = linked_pair(&state).await;

    for (title, at, kind) in [
        ("Tacos al pastor", "2024-05-01T20:00:00Z", "dinner"),
        ("Walk in Chapultepec", "2024-06-01T10:00:00Z", "walk"),
        ("Cancun", "2024-07-01T09:00:00Z", "trip"),
    ] {
        let req = test::TestRequest::post()
            .uri("/api/dates")
            .insert_header(ana.bearer())
            .set_json(json!({"title": title, "scheduled_at": at, "kind": kind}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
    }

    // The partner sees the same dates, newest first.
    let req = test::TestRequest::get()
        .uri("/api/dates")
        .insert_header(luis.bearer())
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["total"], 3);
    assert_eq!(body["data"]["items"][0]["title"], "Cancun");
    assert_eq!(body["data"]["items"][2]["title"], "Tacos al pastor");

    let req = test::TestRequest::get()
        .uri("/api/dates?kind=walk")
        .insert_header(luis.bearer())
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["total"], 1);
    assert_eq!(body["data"]["items"][0]["kind"], "walk");

    // Unknown kinds are ignored.
    let req = test::TestRequest::get()
        .uri("/api/dates?kind=picnic&limit=2&offset=1")
        .insert_header(luis.bearer())
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["total"], 3);
    assert_eq!(body["data"]["items"].as_array().unwrap().len(), 2);
    assert_eq!(body["data"]["items"][0]["title"], "Walk in Chapultepec");

    let req = test::TestRequest::get()
        .uri("/api/dates?from=2024-05-15T00:00:00Z&to=2024-06-30T00:00:00Z")
        .insert_header(luis.bearer())
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["total"], 1);
}

#[actix_web::test]
async fn create_validates_fields() {
    let state = test_state();
    let app = test_app!(state);
    let (ana, _) = linked_pair(&state).await;

    for payload in [
        json!({"title": "Go", "scheduled_at": "2024-06-01T18:00:00Z"}),
        json!({"title": "Picnic"}),
        json!({"title": "Picnic", "scheduled_at": "2024-06-01T18:00:00Z", "kind": "party"}),
    ] {
        let req = test::TestRequest::post()
            .uri("/api/dates")
            .insert_header(ana.bearer())
            .set_json(&payload)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "payload {payload}");
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["status"], 400);
    }
}

#[actix_web::test]
async fn update_and_clear_description() {
    let state = test_state();
    let app = test_app!(state);
    let (ana, _) = linked_pair(&state).await;

    let req = test::TestRequest::post()
        .uri("/api/dates")
        .insert_header(ana.bearer())
        .set_json(json!({
            "title": "Museum",
            "description": "Frida Kahlo house",
            "scheduled_at": "2024-06-01T18:00:00Z"
        }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let id = body["data"]["id"].as_str().unwrap().to_string();
    assert_eq!(body["data"]["kind"], "other");

    let req = test::TestRequest::put()
        .uri(&format!("/api/dates/{id}"))
        .insert_header(ana.bearer())
        .set_json(json!({"title": "Museum day"}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["title"], "Museum day");
    assert_eq!(body["data"]["description"], "Frida Kahlo house");

    let req = test::TestRequest::put()
        .uri(&format!("/api/dates/{id}"))
        .insert_header(ana.bearer())
        .set_json(json!({"description": null}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert!(body["data"]["description"].is_null());
}

#[actix_web::test]
async fn other_couples_cannot_see_a_date() {
    let state = test_state();
    let app = test_app!(state);
    let (ana, _) = linked_pair(&state).await;
    let eva = member(&state, "Eva").await;
    let leo = member(&state, "Leo").await;
    state.couples.link(leo.id, &eva.invite_code).await.unwrap();

    let req = test::TestRequest::post()
        .uri("/api/dates")
        .insert_header(ana.bearer())
        .set_json(json!({"title": "Concert", "scheduled_at": "2024-06-01T18:00:00Z"}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let id = body["data"]["id"].as_str().unwrap().to_string();

    let req = test::TestRequest::get()
        .uri(&format!("/api/dates/{id}"))
        .insert_header(eva.bearer())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::get()
        .uri("/api/dates/not-a-uuid")
        .insert_header(ana.bearer())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn notes_belong_to_their_author() {
    let state = test_state();
    let app = test_app!(state);
    let (ana, luis) = linked_pair(&state).await;

    let req = test::TestRequest::post()
        .uri("/api/dates")
        .insert_header(ana.bearer())
        .set_json(json!({"title": "Cinema", "scheduled_at": "2024-06-01T18:00:00Z"}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let date_id = body["data"]["id"].as_str().unwrap().to_string();

    let req = test::TestRequest::post()
        .uri("/api/dates/notes")
        .insert_header(ana.bearer())
        .set_json(json!({"date_id": date_id, "text": "Bring popcorn"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    let note_id = body["data"]["id"].as_str().unwrap().to_string();
    assert_eq!(body["data"]["author"]["name"], "Ana");

    let req = test::TestRequest::get()
        .uri(&format!("/api/dates/{date_id}/notes"))
        .insert_header(luis.bearer())
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["total"], 1);

    let req = test::TestRequest::put()
        .uri(&format!("/api/dates/notes/{note_id}"))
        .insert_header(luis.bearer())
        .set_json(json!({"text": "No popcorn"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/dates/notes/{note_id}"))
        .insert_header(luis.bearer())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::put()
        .uri(&format!("/api/dates/notes/{note_id}"))
        .insert_header(ana.bearer())
        .set_json(json!({"text": "Bring nachos"}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["text"], "Bring nachos");

    // The date carries its notes.
    let req = test::TestRequest::get()
        .uri(&format!("/api/dates/{date_id}"))
        .insert_header(luis.bearer())
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["notes"][0]["text"], "Bring nachos");
}

#[actix_web::test]
async fn deleting_a_date_removes_its_notes() {
    let state = test_state();
    let app = test_app!(state);
    let (ana, _) = linked_pair(&state).await;

    let req = test::TestRequest::post()
        .uri("/api/dates")
        .insert_header(ana.bearer())
        .set_json(json!({"title": "Bowling", "scheduled_at": "2024-06-01T18:00:00Z"}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let date_id = body["data"]["id"].as_str().unwrap().to_string();

    let req = test::TestRequest::post()
        .uri("/api/dates/notes")
        .insert_header(ana.bearer())
        .set_json(json!({"date_id": date_id, "text": "Strike!"}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let note_id = body["data"]["id"].as_str().unwrap().to_string();

    let req = test::TestRequest::delete()
        .uri(&format!("/api/dates/{date_id}"))
        .insert_header(ana.bearer())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/dates/notes/{note_id}"))
        .insert_header(ana.bearer())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::get()
        .uri(&format!("/api/dates/{date_id}"))
        .insert_header(ana.bearer())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
