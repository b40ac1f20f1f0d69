// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::engines::reqwest_engine::ReqwestEngine;
use crate::engines::traits::{FetchEngine, FetchRequest};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::get,
    Router,
};
use std::time::Duration;
use tokio::net::TcpListener;

async fn start_test_server() -> String {
    let app = Router::new()
        .route(
            "/test",
            get(|| async {
                Response::builder()
                    .header("content-type", "text/html")
                    .body("<html><body>Test content</body></html>".to_string())
                    .unwrap()
            }),
        )
        .route(
            "/error",
            get(|| async { StatusCode::INTERNAL_SERVER_ERROR.into_response() }),
        )
        .route("/moved", get(|| async { Redirect::permanent("/test") }));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

fn request(url: String) -> FetchRequest {
    FetchRequest::new(url, Duration::from_secs(10))
}

#[tokio::test]
async fn test_reqwest_engine_basic_fetch() {
    let server_url = start_test_server().await;

    let engine = ReqwestEngine::new("kvdcrawl-test/0.1");
    let result = engine.fetch(&request(format!("{}/test", server_url))).await;
    assert!(result.is_ok());

    let response = result.unwrap();
    assert_eq!(response.status_code, 200);
    assert!(response.content.contains("Test content"));
    assert!(response.content_type.contains("text/html"));
    assert!(!response.is_redirect());
}

#[tokio::test]
async fn test_reqwest_engine_server_error_passthrough() {
    let server_url = start_test_server().await;

    let engine = ReqwestEngine::new("kvdcrawl-test/0.1");
    let result = engine.fetch(&request(format!("{}/error", server_url))).await;
    assert!(result.is_ok());

    let response = result.unwrap();
    assert_eq!(response.status_code, 500);
}

#[tokio::test]
async fn test_reqwest_engine_does_not_follow_redirects_when_disabled() {
    let server_url = start_test_server().await;

    let engine = ReqwestEngine::new("kvdcrawl-test/0.1");
    let result = engine
        .fetch(&request(format!("{}/moved", server_url)).no_redirects())
        .await;
    assert!(result.is_ok());

    let response = result.unwrap();
    assert_eq!(response.status_code, 308);
    assert!(response.is_redirect());
    assert_eq!(response.location.as_deref(), Some("/test"));
}

#[tokio::test]
async fn test_reqwest_engine_follows_redirects_by_default() {
    let server_url = start_test_server().await;

    let engine = ReqwestEngine::new("kvdcrawl-test/0.1");
    let result = engine.fetch(&request(format!("{}/moved", server_url))).await;
    assert!(result.is_ok());

    let response = result.unwrap();
    assert_eq!(response.status_code, 200);
    assert!(response.content.contains("Test content"));
}

#[tokio::test]
async fn test_reqwest_engine_name() {
    let engine = ReqwestEngine::new("kvdcrawl-test/0.1");
    assert_eq!(engine.name(), "reqwest");
}
