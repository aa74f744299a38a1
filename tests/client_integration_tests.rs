//! End-to-end tests: BffClient -> BFF server -> ThronesClient -> fake Thrones API.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use thrones_bff::{
    client::{BffClient, ClientError, SearchParams},
    create_router,
    query::{SortField, SortOrder},
    upstream::ThronesClient,
    AppState,
};

// == Helper Functions ==

/// Serves `app` on an ephemeral local port and returns its base URL.
async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

fn upstream_records() -> Value {
    json!([
        { "id": 1, "firstName": "Jon", "lastName": "Snow", "fullName": null, "title": "King in the North", "family": "Stark", "imageUrl": "" },
        { "id": 2, "firstName": "Arya", "lastName": "Stark", "fullName": "Arya Stark", "title": "Assassin", "family": "Stark", "imageUrl": "" },
        { "id": 3, "firstName": "Cersei", "lastName": "Lannister", "title": "Queen", "family": "Lannister", "imageUrl": "" },
        { "id": 4, "firstName": "Tywin", "lastName": "Lannister", "title": "Hand of the King", "family": "Lannister", "imageUrl": "" }
    ])
}

/// Fake Thrones API counting requests to the list endpoint.
async fn spawn_fake_thrones_api() -> (String, Arc<AtomicUsize>) {
    let hits = Arc::new(AtomicUsize::new(0));

    let app = Router::new()
        .route(
            "/api/v2/Characters",
            get(|State(hits): State<Arc<AtomicUsize>>| async move {
                hits.fetch_add(1, Ordering::SeqCst);
                Json(upstream_records())
            }),
        )
        .route(
            "/api/v2/Characters/:id",
            get(|Path(id): Path<String>| async move {
                let found = upstream_records()
                    .as_array()
                    .unwrap()
                    .iter()
                    .find(|c| c["id"].to_string() == id)
                    .cloned();
                match found {
                    Some(record) => (StatusCode::OK, Json(record)),
                    None => (StatusCode::NOT_FOUND, Json(json!({ "message": "Not found" }))),
                }
            }),
        )
        .with_state(hits.clone());

    (serve(app).await, hits)
}

async fn spawn_bff(upstream_base: &str) -> BffClient {
    let upstream = ThronesClient::new(upstream_base, Duration::from_secs(5)).unwrap();
    let state = AppState::new(Arc::new(upstream), Duration::from_secs(60));
    let base = serve(create_router(state)).await;
    BffClient::new(&base).unwrap()
}

// == Tests ==

#[tokio::test]
async fn test_search_paginated_end_to_end() {
    let (upstream, _) = spawn_fake_thrones_api().await;
    let client = spawn_bff(&upstream).await;

    let params = SearchParams {
        family: Some("Lannister".to_string()),
        sort_by: Some(SortField::Id),
        sort_order: Some(SortOrder::Desc),
        page: Some(1),
        page_size: Some(1),
        ..SearchParams::default()
    };
    let page = client.search_characters(&params).await.unwrap();

    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].id, 4);
    assert_eq!(page.items[0].full_name.as_deref(), Some("Tywin Lannister"));
    assert_eq!(page.total, Some(2));
    assert_eq!(page.page, Some(1));
    assert_eq!(page.page_size, Some(1));
    assert_eq!(page.total_pages, Some(2));
}

#[tokio::test]
async fn test_search_unpaginated_uses_cache() {
    let (upstream, hits) = spawn_fake_thrones_api().await;
    let client = spawn_bff(&upstream).await;

    let all = client.search_characters(&SearchParams::default()).await.unwrap();
    assert_eq!(all.items.len(), 4);
    assert_eq!(all.total, None);
    assert_eq!(all.total_pages, None);

    let search = SearchParams {
        q: Some("snow".to_string()),
        title: Some(String::new()),
        ..SearchParams::default()
    };
    let found = client.search_characters(&search).await.unwrap();
    assert_eq!(found.items.len(), 1);
    assert_eq!(found.items[0].full_name.as_deref(), Some("Jon Snow"));

    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_get_character_end_to_end() {
    let (upstream, _) = spawn_fake_thrones_api().await;
    let client = spawn_bff(&upstream).await;

    let cersei = client.get_character("3").await.unwrap();
    assert_eq!(cersei.full_name.as_deref(), Some("Cersei Lannister"));
    assert_eq!(cersei.image, None);
    assert_eq!(cersei.image_url.as_deref(), Some(""));
}

#[tokio::test]
async fn test_get_character_not_found_is_api_error() {
    let (upstream, _) = spawn_fake_thrones_api().await;
    let client = spawn_bff(&upstream).await;

    let err = client.get_character("9999").await.unwrap_err();
    assert!(matches!(&err, ClientError::Api(message) if message == "Not found"));
}

#[tokio::test]
async fn test_unreachable_upstream_is_api_error() {
    // Bind then drop to get a port nothing listens on
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let dead = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let client = spawn_bff(&dead).await;

    let err = client
        .search_characters(&SearchParams::default())
        .await
        .unwrap_err();
    match err {
        ClientError::Api(message) => assert!(!message.is_empty()),
        other => panic!("expected API error, got {:?}", other),
    }

    assert_eq!(client.health().await.unwrap(), "healthy");
}
