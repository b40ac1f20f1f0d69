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

use axum::Extension;
use clap::Parser;
use kvdcrawl::cli::CliArgs;
use kvdcrawl::config::settings::Settings;
use kvdcrawl::engines::reqwest_engine::ReqwestEngine;
use kvdcrawl::engines::traits::FetchEngine;
use kvdcrawl::infrastructure::database::connection;
use kvdcrawl::infrastructure::repositories::auction_repo_impl::AuctionRepositoryImpl;
use kvdcrawl::infrastructure::repositories::crawl_run_repo_impl::CrawlRunRepositoryImpl;
use kvdcrawl::presentation::routes;
use kvdcrawl::utils::telemetry;
use kvdcrawl::workers::crawl_worker::CrawlWorker;
use kvdcrawl::workers::scheduler;
use migration::{Migrator, MigratorTrait};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

/// 主函数
///
/// 应用程序入口点，按命令行参数选择运行模式：
/// 一次性爬取（默认）、HTTP触发服务（--serve）或每日定时（--daily-at）
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize logging
    telemetry::init_telemetry();
    let args = CliArgs::parse();
    info!("Starting kvdcrawl...");

    // Initialize Prometheus Metrics
    kvdcrawl::infrastructure::metrics::init_metrics();

    // 2. Load configuration
    let settings = Arc::new(Settings::new()?);
    info!("Configuration loaded");

    // 3. Connect to database
    let db = Arc::new(connection::create_pool(&settings.database).await?);
    info!("Database connection established");

    // Run database migrations
    info!("Running database migrations...");
    Migrator::up(db.as_ref(), None).await?;
    info!("Database migrations applied");

    // 4. Initialize components
    let auction_repository = Arc::new(AuctionRepositoryImpl::new(db.clone()));
    let run_repository = Arc::new(CrawlRunRepositoryImpl::new(db.clone()));
    let engine: Arc<dyn FetchEngine> = Arc::new(ReqwestEngine::new(&settings.crawler.user_agent));
    let worker = Arc::new(CrawlWorker::new(
        settings.clone(),
        engine,
        auction_repository,
        run_repository,
    ));

    // 5. Dispatch on run mode
    if args.serve {
        let app = routes::routes().layer(Extension(worker));

        // Cloud Run注入PORT环境变量，优先于配置文件
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(settings.server.port);
        let addr = format!("{}:{}", settings.server.host, port);
        let listener = TcpListener::bind(&addr).await?;
        info!("Server listening on {}", addr);

        axum::serve(listener, app).await?;
    } else if let Some(schedule) = args.daily_at {
        scheduler::run_daily(worker, schedule).await;
    } else {
        let report = worker.run(args.window()).await?;
        info!(
            "Done: {} processed, {} skipped, {} failed out of {} discovered",
            report.processed, report.skipped, report.failed, report.discovered
        );
        if let Some(path) = report.csv_path {
            info!("CSV export written to {}", path.display());
        }
    }

    Ok(())
}
