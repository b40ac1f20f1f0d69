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

use axum::{body::Bytes, Extension, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

use crate::domain::models::crawl_run::CrawlWindow;
use crate::domain::repositories::auction_repository::AuctionRepository;
use crate::domain::repositories::crawl_run_repository::CrawlRunRepository;
use crate::presentation::errors::AppError;
use crate::workers::crawl_worker::CrawlWorker;

/// 触发爬取请求体
///
/// Cloud Run按需触发时可选携带limit，只处理前N条URL
#[derive(Debug, Default, Deserialize)]
pub struct TriggerCrawlRequest {
    pub limit: Option<u32>,
}

/// 触发爬取响应体
#[derive(Debug, Serialize)]
pub struct TriggerCrawlResponse {
    pub status: String,
    pub processed_urls: u32,
}

/// 触发一次爬取运行
///
/// # 参数
///
/// * `worker` - 爬取工作器
/// * `body` - 可选的请求体
///
/// # 返回值
///
/// * `Ok(Json)` - 运行摘要
/// * `Err(AppError)` - 运行失败
pub async fn trigger_crawl<A, R>(
    Extension(worker): Extension<Arc<CrawlWorker<A, R>>>,
    body: Bytes,
) -> Result<Json<TriggerCrawlResponse>, AppError>
where
    A: AuctionRepository + Send + Sync + 'static,
    R: CrawlRunRepository + Send + Sync + 'static,
{
    // 请求体可缺失或不是JSON，静默回退到无限制
    let request: TriggerCrawlRequest = serde_json::from_slice(&body).unwrap_or_default();
    let limit = request.limit;
    let window = match limit {
        Some(n) => {
            info!("Crawl triggered over HTTP with limit {}", n);
            CrawlWindow::first(n)
        }
        None => {
            info!("Crawl triggered over HTTP without limit");
            CrawlWindow::unbounded()
        }
    };

    let report = worker.run(window).await?;

    Ok(Json(TriggerCrawlResponse {
        status: "success".to_string(),
        processed_urls: report.processed,
    }))
}
