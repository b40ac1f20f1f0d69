// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use clap::Parser;

use crate::domain::models::crawl_run::CrawlWindow;
use crate::workers::scheduler::DailySchedule;

/// 命令行参数
///
/// 计数参数沿用部署侧的历史拼写，Cloud Run Job直接透传：
/// `kvdcrawl --startAuctionCrawlCount 1 --endAuctionCrawlCount 10`
#[derive(Parser, Debug)]
#[command(
    name = "kvdcrawl",
    version,
    about = "Crawler for closed car auctions on kvd.se"
)]
pub struct CliArgs {
    /// First auction URL (1-based) of the crawl window
    #[arg(long = "startAuctionCrawlCount", value_name = "N")]
    pub start_auction_crawl_count: Option<u32>,

    /// Last auction URL (inclusive) of the crawl window
    #[arg(long = "endAuctionCrawlCount", value_name = "M")]
    pub end_auction_crawl_count: Option<u32>,

    /// Run the HTTP trigger service instead of a one-shot crawl
    #[arg(long, conflicts_with_all = ["start_auction_crawl_count", "end_auction_crawl_count"])]
    pub serve: bool,

    /// Stay resident and run a full crawl daily at the given local time
    #[arg(long = "daily-at", value_name = "HH:MM", conflicts_with = "serve")]
    pub daily_at: Option<DailySchedule>,
}

impl CliArgs {
    /// 计数参数组合成爬取窗口
    pub fn window(&self) -> CrawlWindow {
        CrawlWindow::new(self.start_auction_crawl_count, self.end_auction_crawl_count)
    }
}
