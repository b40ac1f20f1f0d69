// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    routing::post,
    Extension, Router,
};
use tower::util::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use kvdcrawl::engines::reqwest_engine::ReqwestEngine;
use kvdcrawl::engines::traits::FetchEngine;
use kvdcrawl::presentation::handlers::crawl_handler::trigger_crawl;
use kvdcrawl::workers::crawl_worker::CrawlWorker;

use crate::helpers::{
    detail_page, listing_page, settings_for, InMemoryAuctionRepository, InMemoryCrawlRunRepository,
};

fn app_for(server_uri: &str) -> (Router, Arc<InMemoryAuctionRepository>) {
    let settings = Arc::new(settings_for(server_uri, "./unused"));
    let engine: Arc<dyn FetchEngine> = Arc::new(ReqwestEngine::new("kvdcrawl-test/0.1"));
    let auction_repo = Arc::new(InMemoryAuctionRepository::default());
    let run_repo = Arc::new(InMemoryCrawlRunRepository::default());
    let worker = Arc::new(CrawlWorker::new(
        settings,
        engine,
        auction_repo.clone(),
        run_repo,
    ));

    let app = Router::new()
        .route(
            "/",
            post(trigger_crawl::<InMemoryAuctionRepository, InMemoryCrawlRunRepository>),
        )
        .layer(Extension(worker));

    (app, auction_repo)
}

#[tokio::test]
async fn trigger_without_body_crawls_everything() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/stangda-auktioner"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(listing_page(&["/auktioner/audi-e-tron-111"])),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/auktioner/audi-e-tron-111"))
        .respond_with(ResponseTemplate::new(200).set_body_string(detail_page(
            "https://www.kvd.se/auktioner/audi-e-tron-111",
            "Audi",
            "e-tron 55",
            310000,
        )))
        .mount(&server)
        .await;

    let (app, auction_repo) = app_for(&server.uri());

    let response = app
        .oneshot(Request::builder().method("POST").uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["status"], "success");
    assert_eq!(json["processed_urls"], 1);

    assert!(auction_repo.auctions.lock().unwrap().contains_key("111"));
}

#[tokio::test]
async fn trigger_with_limit_caps_the_window() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/stangda-auktioner"))
        .respond_with(ResponseTemplate::new(200).set_body_string(listing_page(&[
            "/auktioner/audi-e-tron-111",
            "/auktioner/bmw-i4-222",
        ])))
        .mount(&server)
        .await;
    for (url_path, full, brand) in [
        (
            "/auktioner/audi-e-tron-111",
            "https://www.kvd.se/auktioner/audi-e-tron-111",
            "Audi",
        ),
        (
            "/auktioner/bmw-i4-222",
            "https://www.kvd.se/auktioner/bmw-i4-222",
            "BMW",
        ),
    ] {
        Mock::given(method("GET"))
            .and(path(url_path))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(detail_page(full, brand, "Model", 200000)),
            )
            .mount(&server)
            .await;
    }

    let (app, auction_repo) = app_for(&server.uri());

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"limit": 1}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["processed_urls"], 1);
    assert_eq!(auction_repo.auctions.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn trigger_reports_error_when_listing_unreachable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/stangda-auktioner"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let (app, _) = app_for(&server.uri());

    let response = app
        .oneshot(Request::builder().method("POST").uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert!(json["error"].as_str().is_some());
}
