// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::infrastructure::repositories::auction_repo_impl::AuctionRepositoryImpl;
use crate::infrastructure::repositories::crawl_run_repo_impl::CrawlRunRepositoryImpl;
use crate::presentation::handlers::crawl_handler;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

/// 创建应用路由
///
/// POST / 为Cloud Run风格的触发入口，可在请求体中携带limit
///
/// # 返回值
///
/// 返回配置好的路由
pub fn routes() -> Router {
    Router::new()
        .route(
            "/",
            post(crawl_handler::trigger_crawl::<AuctionRepositoryImpl, CrawlRunRepositoryImpl>),
        )
        .route("/health", get(health_check))
        .route("/version", get(version))
        .layer(TraceLayer::new_for_http())
}

/// 健康检查端点
///
/// # 返回值
///
/// 返回"OK"字符串
pub async fn health_check() -> &'static str {
    "OK"
}

/// 版本信息端点
///
/// # 返回值
///
/// 返回应用版本号
pub async fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
