//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::{body::Body, http::Request, http::StatusCode, response::Response, Router};
use serde_json::Value;
use thrones_bff::{
    create_router, models::Character, upstream::CharacterSource, upstream::UpstreamError, AppState,
};
use tower::ServiceExt;

/// Upstream double with canned answers and call counters.
pub struct StubSource {
    list: Result<Vec<Character>, UpstreamError>,
    item_error: Option<UpstreamError>,
    list_calls: AtomicUsize,
    item_calls: AtomicUsize,
}

impl StubSource {
    pub fn with_characters(characters: Vec<Character>) -> Self {
        Self {
            list: Ok(characters),
            item_error: None,
            list_calls: AtomicUsize::new(0),
            item_calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(error: UpstreamError) -> Self {
        Self {
            list: Err(error.clone()),
            item_error: Some(error),
            ..Self::with_characters(Vec::new())
        }
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn item_calls(&self) -> usize {
        self.item_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CharacterSource for StubSource {
    async fn fetch_characters(&self) -> Result<Vec<Character>, UpstreamError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.list.clone()
    }

    async fn fetch_character(&self, id: &str) -> Result<Character, UpstreamError> {
        self.item_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(error) = &self.item_error {
            return Err(error.clone());
        }
        self.list
            .clone()?
            .into_iter()
            .find(|c| c.id.to_string() == id)
            .ok_or_else(|| UpstreamError::status(404, Some("Not found".to_string())))
    }
}

/// Builds a raw upstream record as the Thrones API would send it.
pub fn raw_character(
    id: i64,
    first: &str,
    last: &str,
    full: Option<&str>,
    title: &str,
    family: &str,
) -> Character {
    Character {
        first_name: Some(first.to_string()),
        last_name: Some(last.to_string()),
        full_name: full.map(str::to_string),
        title: Some(title.to_string()),
        family: Some(family.to_string()),
        image_url: Some(String::new()),
        ..Character::new(id)
    }
}

/// Two Starks and two Lannisters.
pub fn westeros() -> Vec<Character> {
    vec![
        raw_character(1, "Jon", "Snow", None, "King in the North", "Stark"),
        raw_character(2, "Arya", "Stark", Some("Arya Stark"), "Assassin", "Stark"),
        raw_character(3, "Cersei", "Lannister", None, "Queen", "Lannister"),
        raw_character(4, "Tywin", "Lannister", None, "Hand of the King", "Lannister"),
    ]
}

pub fn app_with(source: Arc<StubSource>, ttl: Duration) -> Router {
    create_router(AppState::new(source, ttl))
}

pub async fn get(app: &Router, uri: &str) -> Response {
    app.clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
    let response = get(app, uri).await;
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}
