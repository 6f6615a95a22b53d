#[macro_use]
mod common;

use actix_web::http::StatusCode;
use actix_web::test;
use serde_json::{Value, json};

use common::{linked_pair, member, test_state};

#[actix_web::test]
async fn movie_list_lifecycle() {
    let state = test_state();
    let app = test_app!(state);
    let (ana, luis) = linked_pair(&state).await;

    let req = test::TestRequest::post()
        .uri("/api/media/movies")
        .insert_header(ana.bearer())
        .set_json(json!({
            "tmdb_id": 27205,
            "title": "Inception",
            "director": "Christopher Nolan",
            "genre": "Science Fiction"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    let entry_id = body["data"]["id"].as_str().unwrap().to_string();
    assert_eq!(body["data"]["status"], "pending");
    assert_eq!(body["data"]["item"]["tmdb_id"], "27205");

    // Same movie again, from the partner: already on the shared list.
    let req = test::TestRequest::post()
        .uri("/api/media/movies")
        .insert_header(luis.bearer())
        .set_json(json!({"tmdb_id": "27205", "title": "Inception"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    let req = test::TestRequest::put()
        .uri(&format!("/api/media/movies/{entry_id}/watched"))
        .insert_header(luis.bearer())
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["status"], "watched");

    let req = test::TestRequest::get()
        .uri("/api/media/movies?status=watched")
        .insert_header(ana.bearer())
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["total"], 1);

    let req = test::TestRequest::get()
        .uri("/api/media/movies?status=seen")
        .insert_header(ana.bearer())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/media/movies/{entry_id}"))
        .insert_header(ana.bearer())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/media/movies/{entry_id}"))
        .insert_header(ana.bearer())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // The catalog row outlives the list entry.
    let req = test::TestRequest::get()
        .uri("/api/media/catalog/movies?search=nolan")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["total"], 1);
    assert_eq!(body["data"]["items"][0]["title"], "Inception");
}

#[actix_web::test]
async fn song_and_album_statuses() {
    let state = test_state();
    let app = test_app!(state);
    let (ana, _) = linked_pair(&state).await;

    let req = test::TestRequest::post()
        .uri("/api/media/songs")
        .insert_header(ana.bearer())
        .set_json(json!({
            "spotify_id": "6habFhsOp2NvshLv26DqMb",
            "title": "Despacito",
            "artist": "Luis Fonsi"
        }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let song_id = body["data"]["id"].as_str().unwrap().to_string();
    assert_eq!(body["data"]["status"], "saved");

    let req = test::TestRequest::put()
        .uri(&format!("/api/media/songs/{song_id}"))
        .insert_header(ana.bearer())
        .set_json(json!({"status": "favorite"}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["status"], "favorite");

    let req = test::TestRequest::put()
        .uri(&format!("/api/media/songs/{song_id}"))
        .insert_header(ana.bearer())
        .set_json(json!({"status": "listened"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::post()
        .uri("/api/media/albums")
        .insert_header(ana.bearer())
        .set_json(json!({
            "spotify_id": "3RQQmkQEvNCY4prGKE6oc5",
            "title": "Un Verano Sin Ti",
            "artist": "Bad Bunny",
            "status": "listened"
        }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let album_id = body["data"]["id"].as_str().unwrap().to_string();
    assert_eq!(body["data"]["status"], "listened");

    let req = test::TestRequest::put()
        .uri(&format!("/api/media/albums/{album_id}"))
        .insert_header(ana.bearer())
        .set_json(json!({"status": "pending"}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["status"], "pending");

    let req = test::TestRequest::get()
        .uri("/api/media/catalog/albums?artist=bad")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["total"], 1);
}

#[actix_web::test]
async fn add_requires_fields_and_a_partner() {
    let state = test_state();
    let app = test_app!(state);
    let solo = member(&state, "Solo").await;
    let (ana, _) = linked_pair(&state).await;

    let req = test::TestRequest::post()
        .uri("/api/media/songs")
        .insert_header(ana.bearer())
        .set_json(json!({"spotify_id": "abc", "title": "No artist"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::post()
        .uri("/api/media/movies")
        .insert_header(solo.bearer())
        .set_json(json!({"tmdb_id": 1, "title": "Alone"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn lists_are_private_to_the_couple() {
    let state = test_state();
    let app = test_app!(state);
    let (ana, _) = linked_pair(&state).await;
    let eva = member(&state, "Eva").await;
    let leo = member(&state, "Leo").await;
    state.couples.link(leo.id, &eva.invite_code).await.unwrap();

    let req = test::TestRequest::post()
        .uri("/api/media/movies")
        .insert_header(ana.bearer())
        .set_json(json!({"tmdb_id": 603, "title": "The Matrix"}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let entry_id = body["data"]["id"].as_str().unwrap().to_string();

    let req = test::TestRequest::get()
        .uri("/api/media/movies")
        .insert_header(eva.bearer())
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["total"], 0);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/media/movies/{entry_id}"))
        .insert_header(eva.bearer())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // Another couple may list the same catalog movie.
    let req = test::TestRequest::post()
        .uri("/api/media/movies")
        .insert_header(eva.bearer())
        .set_json(json!({"tmdb_id": 603, "title": "The Matrix"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
}

#[actix_web::test]
async fn songs_can_only_reference_known_albums() {
    let state = test_state();
    let app = test_app!(state);
    let (ana, _) = linked_pair(&state).await;

    let req = test::TestRequest::post()
        .uri("/api/media/songs")
        .insert_header(ana.bearer())
        .set_json(json!({
            "spotify_id": "1IHWl5LamUGEuP4ozKQSXZ",
            "title": "Tití Me Preguntó",
            "artist": "Bad Bunny",
            "album_id": "00000000-0000-0000-0000-000000000001"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["detail"], "Album not found");

    // Nothing was cached for the rejected song.
    let req = test::TestRequest::get()
        .uri("/api/media/catalog/songs")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["total"], 0);

    let req = test::TestRequest::post()
        .uri("/api/media/albums")
        .insert_header(ana.bearer())
        .set_json(json!({
            "spotify_id": "3RQQmkQEvNCY4prGKE6oc5",
            "title": "Un Verano Sin Ti",
            "artist": "Bad Bunny"
        }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let album_id = body["data"]["item"]["id"].as_str().unwrap().to_string();

    let req = test::TestRequest::post()
        .uri("/api/media/songs")
        .insert_header(ana.bearer())
        .set_json(json!({
            "spotify_id": "1IHWl5LamUGEuP4ozKQSXZ",
            "title": "Tití Me Preguntó",
            "artist": "Bad Bunny",
            "album_id": album_id
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["item"]["album_id"], album_id.as_str());
}

#[actix_web::test]
async fn oversized_offsets_are_clamped() {
    let state = test_state();
    let app = test_app!(state);

    let req = test::TestRequest::get()
        .uri("/api/media/catalog/movies?offset=18446744073709551615")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["offset"], i64::MAX);
    assert_eq!(body["data"]["items"].as_array().map(Vec::len), Some(0));
}
