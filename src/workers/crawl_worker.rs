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

use chrono::Utc;
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use metrics::counter;
use scraper::Html;
use serde::Serialize;
use serde_json::Value;
use std::num::NonZeroU32;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use crate::config::settings::Settings;
use crate::domain::models::auction::CarAuction;
use crate::domain::models::crawl_run::{CrawlRun, CrawlRunStatus, CrawlWindow};
use crate::domain::repositories::auction_repository::{AuctionRepository, UpsertOutcome};
use crate::domain::repositories::crawl_run_repository::CrawlRunRepository;
use crate::domain::services::export_service::ExportService;
use crate::domain::services::extraction_service::ExtractionService;
use crate::domain::services::listing_service::ListingService;
use crate::engines::traits::{FetchEngine, FetchError, FetchRequest, FetchResponse};
use crate::utils::errors::CrawlError;
use crate::utils::retry_policy::RetryPolicy;

/// 一次爬取运行的结果摘要
#[derive(Debug, Clone, Serialize)]
pub struct CrawlReport {
    pub run_id: Uuid,
    /// 列表页发现的去重URL总数
    pub discovered: u32,
    /// 成功入库的URL数
    pub processed: u32,
    /// 因重定向跳过的URL数
    pub skipped: u32,
    /// 抓取或提取失败的URL数
    pub failed: u32,
    /// 限定窗口运行时导出的CSV文件路径
    pub csv_path: Option<PathBuf>,
}

/// 爬取工作器
///
/// 执行一次完整的爬取：列表页 → 窗口过滤 → 逐个详情页
/// 抓取、提取、入库。单个URL的失败只计数，不中断运行。
pub struct CrawlWorker<A, R>
where
    A: AuctionRepository + Send + Sync,
    R: CrawlRunRepository + Send + Sync,
{
    settings: Arc<Settings>,
    engine: Arc<dyn FetchEngine>,
    auction_repository: Arc<A>,
    run_repository: Arc<R>,
    limiter: DefaultDirectRateLimiter,
    retry_policy: RetryPolicy,
}

impl<A, R> CrawlWorker<A, R>
where
    A: AuctionRepository + Send + Sync,
    R: CrawlRunRepository + Send + Sync,
{
    /// 创建新的爬取工作器实例
    pub fn new(
        settings: Arc<Settings>,
        engine: Arc<dyn FetchEngine>,
        auction_repository: Arc<A>,
        run_repository: Arc<R>,
    ) -> Self {
        let rpm = NonZeroU32::new(settings.crawler.requests_per_minute)
            .unwrap_or(NonZeroU32::new(60).unwrap());
        let limiter = RateLimiter::direct(Quota::per_minute(rpm));
        let retry_policy = RetryPolicy::for_fetch(
            settings.crawler.max_retries,
            settings.crawler.initial_backoff_ms,
        );

        Self {
            settings,
            engine,
            auction_repository,
            run_repository,
            limiter,
            retry_policy,
        }
    }

    /// 执行一次爬取运行
    #[instrument(skip(self), fields(window = ?window))]
    pub async fn run(&self, window: CrawlWindow) -> Result<CrawlReport, CrawlError> {
        info!("Starting crawl at {}", Utc::now());
        counter!("kvdcrawl_runs_total").increment(1);

        let mut run = CrawlRun::begin(window.clone());
        self.run_repository.create(&run).await?;

        match self.execute(&mut run, &window).await {
            Ok(report) => {
                run.status = CrawlRunStatus::Completed;
                run.finished_at = Some(Utc::now());
                self.run_repository.finish(&run).await?;
                info!(
                    "Crawl run {} completed: {} processed, {} skipped, {} failed",
                    run.id, run.processed, run.skipped, run.failed
                );
                Ok(report)
            }
            Err(e) => {
                run.status = CrawlRunStatus::Failed;
                run.finished_at = Some(Utc::now());
                if let Err(finish_err) = self.run_repository.finish(&run).await {
                    error!("Failed to record failed crawl run: {}", finish_err);
                }
                Err(e)
            }
        }
    }

    async fn execute(
        &self,
        run: &mut CrawlRun,
        window: &CrawlWindow,
    ) -> Result<CrawlReport, CrawlError> {
        let base_url = self
            .settings
            .crawler
            .base()
            .map_err(|e| CrawlError::InvalidConfig(format!("base_url: {}", e)))?;
        let listing_url = self
            .settings
            .crawler
            .listing_url()
            .map_err(|e| CrawlError::InvalidConfig(format!("listing_path: {}", e)))?;

        let listing = self
            .fetch_with_retry(FetchRequest::new(listing_url.as_str(), self.timeout()))
            .await?;

        let detail_urls = {
            let document = Html::parse_document(&listing.content);
            ListingService::collect_detail_urls(&document, &base_url)
        };
        run.discovered = detail_urls.len() as u32;

        let detail_urls = window.apply(detail_urls);
        if !window.is_unbounded() {
            info!("Limiting crawl window, processing {} URLs", detail_urls.len());
        } else {
            info!("Processing all {} discovered URLs", detail_urls.len());
        }

        let mut records = Vec::new();
        for detail_url in detail_urls {
            self.limiter.until_ready().await;

            match self.process_detail(&detail_url).await {
                Outcome::Processed(auction) => {
                    run.processed += 1;
                    counter!("kvdcrawl_auctions_processed_total").increment(1);
                    if !window.is_unbounded() {
                        records.push(*auction);
                    }
                }
                Outcome::Skipped => {
                    run.skipped += 1;
                    counter!("kvdcrawl_urls_skipped_total").increment(1);
                }
                Outcome::Failed => {
                    run.failed += 1;
                    counter!("kvdcrawl_urls_failed_total").increment(1);
                }
            }
        }

        let mut csv_path = None;
        if !window.is_unbounded() && !records.is_empty() {
            let dir = PathBuf::from(&self.settings.export.csv_dir);
            info!("Writing {} records to CSV", records.len());
            csv_path = Some(ExportService::export_records(&records, &dir, Utc::now())?);
        }

        Ok(CrawlReport {
            run_id: run.id,
            discovered: run.discovered,
            processed: run.processed,
            skipped: run.skipped,
            failed: run.failed,
            csv_path,
        })
    }

    /// 处理单个详情页URL
    ///
    /// 任何失败都只归入对应的计数类别，不向上传播
    async fn process_detail(&self, detail_url: &str) -> Outcome {
        info!("Fetching {}", detail_url);

        let request = FetchRequest::new(detail_url, self.timeout()).no_redirects();
        let response = match self.fetch_with_retry(request).await {
            Ok(response) => response,
            Err(e) => {
                error!("Network error for {}: {}", detail_url, e);
                return Outcome::Failed;
            }
        };

        if response.is_redirect() {
            warn!(
                "Skipping {} - URL redirects to {}",
                detail_url,
                response.location.as_deref().unwrap_or("unknown")
            );
            return Outcome::Skipped;
        }

        if response.status_code >= 400 {
            warn!(
                "Unexpected status {} for {}",
                response.status_code, detail_url
            );
            return Outcome::Failed;
        }

        // Html不是Send，解析必须在await点之前完成
        let (store, image) = parse_detail_page(&response);

        let Some(store) = store else {
            warn!("Failed to extract store JSON from {}", detail_url);
            return Outcome::Failed;
        };

        let Some(mut auction) = ExtractionService::extract_fields(&store) else {
            warn!("Failed to extract auction fields from {}", detail_url);
            return Outcome::Failed;
        };

        match &image {
            Some((url, source)) => {
                info!("Found image URL from {}: {}", source.as_str(), url);
                auction.main_image_url = Some(url.clone());
                auction.image_source = Some(*source);
            }
            None => warn!("No image URL found for {}", detail_url),
        }

        match self.auction_repository.upsert(&auction).await {
            Ok(UpsertOutcome::Created) => {
                info!("Created new record for auction {}", auction.auction_id)
            }
            Ok(UpsertOutcome::Updated) => {
                info!("Updated record for auction {}", auction.auction_id)
            }
            Err(e) => {
                error!(
                    "Error writing auction {} to database: {}",
                    auction.auction_id, e
                );
                return Outcome::Failed;
            }
        }

        Outcome::Processed(Box::new(auction))
    }

    async fn fetch_with_retry(&self, request: FetchRequest) -> Result<FetchResponse, FetchError> {
        let mut attempt = 0u32;
        loop {
            // 5xx响应按可重试错误处理
            let result = self.engine.fetch(&request).await.and_then(|response| {
                if response.status_code >= 500 {
                    Err(FetchError::ServerError(response.status_code))
                } else {
                    Ok(response)
                }
            });

            match result {
                Ok(response) => return Ok(response),
                Err(e) if e.is_retryable() && self.retry_policy.should_retry(attempt) => {
                    attempt += 1;
                    let backoff = self.retry_policy.calculate_backoff(attempt);
                    warn!(
                        "Retry {}/{} for {} in {:?}: {}",
                        attempt, self.retry_policy.max_retries, request.url, backoff, e
                    );
                    sleep(backoff).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    fn timeout(&self) -> Duration {
        Duration::from_secs(self.settings.crawler.request_timeout)
    }
}

/// 单个URL的处理结果
enum Outcome {
    Processed(Box<CarAuction>),
    Skipped,
    Failed,
}

fn parse_detail_page(
    response: &FetchResponse,
) -> (
    Option<Value>,
    Option<(String, crate::domain::models::auction::ImageSource)>,
) {
    let document = Html::parse_document(&response.content);
    let store = ExtractionService::find_store_data(&document);
    let image = ExtractionService::extract_main_image(store.as_ref(), &document);
    (store, image)
}

#[cfg(test)]
#[path = "crawl_worker_test.rs"]
mod tests;
