// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::sync::Arc;

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use kvdcrawl::domain::models::auction::ImageSource;
use kvdcrawl::domain::models::crawl_run::{CrawlRunStatus, CrawlWindow};
use kvdcrawl::domain::repositories::auction_repository::AuctionRepository;
use kvdcrawl::engines::reqwest_engine::ReqwestEngine;
use kvdcrawl::engines::traits::FetchEngine;
use kvdcrawl::workers::crawl_worker::CrawlWorker;

use crate::helpers::{
    detail_page, listing_page, settings_for, InMemoryAuctionRepository, InMemoryCrawlRunRepository,
};

async fn start_site() -> MockServer {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/stangda-auktioner"))
        .respond_with(ResponseTemplate::new(200).set_body_string(listing_page(&[
            "/auktioner/audi-e-tron-111",
            "/auktioner/borttagen-222",
            "/auktioner/cupra-born-333",
        ])))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/auktioner/audi-e-tron-111"))
        .respond_with(ResponseTemplate::new(200).set_body_string(detail_page(
            "https://www.kvd.se/auktioner/audi-e-tron-111",
            "Audi",
            "e-tron 55 quattro 95 kWh",
            310000,
        )))
        .mount(&server)
        .await;

    // 已下架的拍卖重定向回列表页
    Mock::given(method("GET"))
        .and(path("/auktioner/borttagen-222"))
        .respond_with(
            ResponseTemplate::new(302).insert_header("location", "/stangda-auktioner"),
        )
        .mount(&server)
        .await;

    // store数据缺失的详情页
    Mock::given(method("GET"))
        .and(path("/auktioner/cupra-born-333"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<html><body><p>Ingen data</p></body></html>"),
        )
        .mount(&server)
        .await;

    server
}

fn build_worker(
    server_uri: &str,
    csv_dir: &str,
) -> (
    CrawlWorker<InMemoryAuctionRepository, InMemoryCrawlRunRepository>,
    Arc<InMemoryAuctionRepository>,
    Arc<InMemoryCrawlRunRepository>,
) {
    let settings = Arc::new(settings_for(server_uri, csv_dir));
    let engine: Arc<dyn FetchEngine> = Arc::new(ReqwestEngine::new("kvdcrawl-test/0.1"));
    let auction_repo = Arc::new(InMemoryAuctionRepository::default());
    let run_repo = Arc::new(InMemoryCrawlRunRepository::default());
    let worker = CrawlWorker::new(settings, engine, auction_repo.clone(), run_repo.clone());
    (worker, auction_repo, run_repo)
}

#[tokio::test]
async fn full_crawl_processes_skips_and_fails() {
    let server = start_site().await;
    let (worker, auction_repo, run_repo) = build_worker(&server.uri(), "./unused");

    let report = worker.run(CrawlWindow::unbounded()).await.unwrap();

    assert_eq!(report.discovered, 3);
    assert_eq!(report.processed, 1);
    assert_eq!(report.skipped, 1);
    assert_eq!(report.failed, 1);
    assert!(report.csv_path.is_none());

    let stored = auction_repo
        .find_by_auction_id("111")
        .await
        .unwrap()
        .expect("audi should be persisted");
    assert_eq!(stored.brand.as_deref(), Some("Audi"));
    assert_eq!(stored.sold_for, Some(310000.0));
    assert_eq!(stored.battery_capacity, Some(95.0));
    assert_eq!(stored.fuel_code.as_deref(), Some("Electric"));
    assert_eq!(
        stored.model_name_presentation.as_deref(),
        Some("e-tron 55 quattro")
    );
    // store previewImage优先于og:image
    assert_eq!(stored.image_source, Some(ImageSource::StoreDataPreviewImage));
    assert_eq!(
        stored.main_image_url.as_deref(),
        Some("https://kvd.imgix.net/preview.jpg")
    );

    let finished = run_repo.finished.lock().unwrap();
    assert_eq!(finished.len(), 1);
    assert_eq!(finished[0].status, CrawlRunStatus::Completed);
    assert_eq!(finished[0].discovered, 3);
}

#[tokio::test]
async fn windowed_crawl_writes_csv() {
    let server = start_site().await;
    let dir = tempfile::tempdir().unwrap();
    let (worker, _, _) = build_worker(&server.uri(), dir.path().to_str().unwrap());

    let report = worker.run(CrawlWindow::new(Some(1), Some(1))).await.unwrap();

    assert_eq!(report.processed, 1);
    let csv_path = report.csv_path.expect("CSV should be exported");
    let content = std::fs::read_to_string(csv_path).unwrap();
    assert!(content.starts_with("auction_id,"));
    assert!(content.contains("111"));
    assert!(content.contains("Audi"));
}

#[tokio::test]
async fn empty_window_processes_nothing() {
    let server = start_site().await;
    let (worker, auction_repo, _) = build_worker(&server.uri(), "./unused");

    let report = worker
        .run(CrawlWindow::new(Some(100), Some(200)))
        .await
        .unwrap();

    assert_eq!(report.discovered, 3);
    assert_eq!(report.processed, 0);
    assert!(auction_repo.auctions.lock().unwrap().is_empty());
}

#[tokio::test]
async fn listing_server_error_fails_the_run() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/stangda-auktioner"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let (worker, _, run_repo) = build_worker(&server.uri(), "./unused");

    // 列表页一直5xx，重试耗尽后运行失败
    let result = worker.run(CrawlWindow::unbounded()).await;
    assert!(result.is_err());

    let finished = run_repo.finished.lock().unwrap();
    assert_eq!(finished[0].status, CrawlRunStatus::Failed);
}
