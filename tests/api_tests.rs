mod common;

use axum::http::StatusCode;
use common::{get, post_json, request, spawn_app};
use serde_json::json;

#[tokio::test]
async fn test_health() {
    let app = spawn_app().await;

    let (status, body) = get(&app, "/api/system/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["database"], true);
    assert_eq!(body["data"]["provider"], "fake");
    assert_eq!(body["data"]["in_flight_resolutions"], 0);
}

#[tokio::test]
async fn test_mapping_crud() {
    let app = spawn_app().await;

    let (status, body) = post_json(
        &app,
        "/api/anime/mapping",
        &json!({
            "catalog_id": 42,
            "media_type": "tv",
            "provider_id": "example-show",
            "title": "Example Show",
            "original_title": "Ekusanpuru",
            "season_overrides": [{"season_number": 2, "provider_id": "example-show-2"}],
            "metadata": {"total_episodes": 24, "release_year": 2021}
        }),
        Some("admin-7"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["media_type"], "series");
    assert_eq!(body["data"]["status"], "unverified");
    assert_eq!(body["data"]["created_by"], "admin-7");

    let (status, body) = get(&app, "/api/anime/mapping/42?season_number=2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["provider_id"], "example-show-2");

    let (status, body) = get(&app, "/api/anime/mapping/42?season_number=1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["provider_id"], "example-show");
    assert_eq!(body["data"]["mapping"]["original_title"], "Ekusanpuru");

    let (status, _) = get(&app, "/api/anime/mapping/42?media_type=movie").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = request(&app, "PATCH", "/api/anime/mapping/42/verify").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "verified");

    let (status, _) = request(&app, "DELETE", "/api/anime/mapping/42").await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = request(&app, "DELETE", "/api/anime/mapping/42").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);

    let (status, _) = request(&app, "PATCH", "/api/anime/mapping/42/verify").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_upsert_is_idempotent_per_key() {
    let app = spawn_app().await;

    for provider_id in ["first-id", "second-id"] {
        let (status, _) = post_json(
            &app,
            "/api/anime/mapping",
            &json!({"catalog_id": 9, "provider_id": provider_id, "title": "Same Show"}),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, body) = get(&app, "/api/anime/mappings").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["pagination"]["total"], 1);
    assert_eq!(body["data"]["items"][0]["provider_id"], "second-id");

    // a movie with the same catalog id is a different key
    let (status, _) = post_json(
        &app,
        "/api/anime/mapping",
        &json!({"catalog_id": 9, "media_type": "movie", "provider_id": "film", "title": "Film"}),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = get(&app, "/api/anime/mappings").await;
    assert_eq!(body["data"]["pagination"]["total"], 2);
}

#[tokio::test]
async fn test_upsert_validation() {
    let app = spawn_app().await;

    let (status, body) = post_json(
        &app,
        "/api/anime/mapping",
        &json!({"catalog_id": 1, "provider_id": "x", "title": "   "}),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);

    let (status, _) = post_json(
        &app,
        "/api/anime/mapping",
        &json!({
            "catalog_id": 1,
            "provider_id": "x",
            "title": "X",
            "season_overrides": [
                {"season_number": 2, "provider_id": "a"},
                {"season_number": 2, "provider_id": "b"}
            ]
        }),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = post_json(
        &app,
        "/api/anime/mapping",
        &json!({"catalog_id": 1, "media_type": "ova", "provider_id": "x", "title": "X"}),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_filters_and_pagination() {
    let app = spawn_app().await;

    for (id, media_type, title) in [
        (1, "series", "Alpha Show"),
        (2, "series", "Beta Show"),
        (3, "movie", "Alpha Movie"),
    ] {
        post_json(
            &app,
            "/api/anime/mapping",
            &json!({
                "catalog_id": id,
                "media_type": media_type,
                "provider_id": format!("provider-{id}"),
                "title": title
            }),
            None,
        )
        .await;
    }
    request(&app, "PATCH", "/api/anime/mapping/2/verify").await;

    let (_, body) = get(&app, "/api/anime/mappings?search=alpha").await;
    assert_eq!(body["data"]["pagination"]["total"], 2);

    let (_, body) = get(&app, "/api/anime/mappings?search=ALPHA&media_type=movie").await;
    assert_eq!(body["data"]["pagination"]["total"], 1);
    assert_eq!(body["data"]["items"][0]["catalog_id"], 3);

    let (_, body) = get(&app, "/api/anime/mappings?status=verified").await;
    assert_eq!(body["data"]["pagination"]["total"], 1);
    assert_eq!(body["data"]["items"][0]["title"], "Beta Show");

    let (_, body) = get(&app, "/api/anime/mappings?search=provider-").await;
    assert_eq!(body["data"]["pagination"]["total"], 3);

    let (_, body) = get(&app, "/api/anime/mappings?page=2&limit=2").await;
    assert_eq!(body["data"]["items"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"]["pagination"]["total_pages"], 2);
    // newest first, so the last page holds the oldest row
    assert_eq!(body["data"]["items"][0]["catalog_id"], 1);

    let (status, _) = get(&app, "/api/anime/mappings?limit=0").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = get(&app, "/api/anime/mappings?status=pending").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_search_provider() {
    let app = spawn_app().await;

    let (status, body) = get(&app, "/api/anime/search-provider?q=Sample%20Anime").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"][0]["provider_id"], "sample-anime");

    let (status, body) = get(&app, "/api/anime/search-provider?q=nothing").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 0);

    let (status, _) = get(&app, "/api/anime/search-provider?q=%20").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
