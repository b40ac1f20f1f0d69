// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::json;

use kvdcrawl::config::settings::{
    CrawlerSettings, DatabaseSettings, ExportSettings, ServerSettings, Settings,
};
use kvdcrawl::domain::models::auction::CarAuction;
use kvdcrawl::domain::models::crawl_run::CrawlRun;
use kvdcrawl::domain::repositories::auction_repository::{AuctionRepository, UpsertOutcome};
use kvdcrawl::domain::repositories::crawl_run_repository::CrawlRunRepository;
use kvdcrawl::utils::errors::RepositoryError;

/// 内存拍卖仓库，供集成测试断言入库结果
#[derive(Default)]
pub struct InMemoryAuctionRepository {
    pub auctions: Mutex<HashMap<String, CarAuction>>,
}

#[async_trait]
impl AuctionRepository for InMemoryAuctionRepository {
    async fn upsert(&self, auction: &CarAuction) -> Result<UpsertOutcome, RepositoryError> {
        let mut auctions = self.auctions.lock().unwrap();
        let outcome = if auctions.contains_key(&auction.auction_id) {
            UpsertOutcome::Updated
        } else {
            UpsertOutcome::Created
        };
        auctions.insert(auction.auction_id.clone(), auction.clone());
        Ok(outcome)
    }

    async fn find_by_auction_id(
        &self,
        auction_id: &str,
    ) -> Result<Option<CarAuction>, RepositoryError> {
        Ok(self.auctions.lock().unwrap().get(auction_id).cloned())
    }
}

/// 内存运行仓库
#[derive(Default)]
pub struct InMemoryCrawlRunRepository {
    pub finished: Mutex<Vec<CrawlRun>>,
}

#[async_trait]
impl CrawlRunRepository for InMemoryCrawlRunRepository {
    async fn create(&self, _run: &CrawlRun) -> Result<(), RepositoryError> {
        Ok(())
    }

    async fn finish(&self, run: &CrawlRun) -> Result<(), RepositoryError> {
        self.finished.lock().unwrap().push(run.clone());
        Ok(())
    }
}

/// 指向wiremock服务器的测试配置
pub fn settings_for(base_url: &str, csv_dir: &str) -> Settings {
    Settings {
        database: DatabaseSettings {
            url: "postgres://unused".to_string(),
            max_connections: None,
            min_connections: None,
            connect_timeout: None,
            idle_timeout: None,
        },
        crawler: CrawlerSettings {
            base_url: base_url.to_string(),
            listing_path: "/stangda-auktioner".to_string(),
            user_agent: "kvdcrawl-test/0.1".to_string(),
            request_timeout: 5,
            requests_per_minute: 100_000,
            max_retries: 1,
            initial_backoff_ms: 1,
        },
        server: ServerSettings {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        export: ExportSettings {
            csv_dir: csv_dir.to_string(),
        },
    }
}

/// 构造带链接的列表页HTML
pub fn listing_page(hrefs: &[&str]) -> String {
    let links: String = hrefs
        .iter()
        .map(|h| format!(r#"<li><a href="{}"><img src="thumb.jpg"></a></li>"#, h))
        .collect();
    format!(
        "<html><head><title>Slutade auktioner</title></head><body><ul>{}</ul></body></html>",
        links
    )
}

/// 构造内嵌store JSON的详情页HTML
pub fn detail_page(auction_url: &str, brand: &str, model_name: &str, sold_for: u32) -> String {
    let store = json!({
        "objectView": {
            "storeObjects": {
                "detail": {
                    "auctionUrl": auction_url,
                    "closedAt": "2024-05-01T12:00:00Z",
                    "publishedAt": "2024-04-20T08:30:00Z",
                    "soldFor": sold_for,
                    "sellMethod": "auction",
                    "winningBid": { "amount": sold_for },
                    "activeAuction": {
                        "reservationPriceReached": true,
                        "highestBid": { "amount": sold_for }
                    },
                    "previewImage": "https://kvd.imgix.net/preview.jpg",
                    "processObject": {
                        "baseObject": {
                            "modelName": model_name,
                            "year": 2021,
                            "baseObjectType": "car"
                        },
                        "locationInfo": {
                            "facility": { "postCode": "41705", "city": "Göteborg" }
                        },
                        "properties": {
                            "brand": brand,
                            "odometerReading": 4200,
                            "gearbox": "Automat",
                            "fuels": [{ "fuelCode": "Electric" }]
                        }
                    }
                }
            }
        }
    });
    format!(
        r#"<html><head><meta property="og:image" content="https://kvd.imgix.net/og.jpg"><script>window.__STATE__ = {};</script></head><body></body></html>"#,
        store
    )
}
