// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Local, TimeZone};
use std::str::FromStr;
use std::sync::Arc;
use thiserror::Error;
use tokio::time::sleep;
use tracing::{error, info};

use crate::domain::models::crawl_run::CrawlWindow;
use crate::domain::repositories::auction_repository::AuctionRepository;
use crate::domain::repositories::crawl_run_repository::CrawlRunRepository;
use crate::workers::crawl_worker::CrawlWorker;

/// 调度时间解析错误
#[derive(Error, Debug)]
#[error("invalid schedule time, expected HH:MM")]
pub struct ScheduleParseError;

/// 每日定时调度
///
/// 常驻进程，每天在固定的本地时间触发一次全量爬取
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailySchedule {
    pub hour: u32,
    pub minute: u32,
}

impl FromStr for DailySchedule {
    type Err = ScheduleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (hour, minute) = s.split_once(':').ok_or(ScheduleParseError)?;
        let hour: u32 = hour.parse().map_err(|_| ScheduleParseError)?;
        let minute: u32 = minute.parse().map_err(|_| ScheduleParseError)?;

        if hour > 23 || minute > 59 {
            return Err(ScheduleParseError);
        }

        Ok(Self { hour, minute })
    }
}

impl DailySchedule {
    /// 计算下一次触发时间
    ///
    /// 当日时刻已过则顺延到次日；夏令时导致的无效时刻继续顺延
    pub fn next_occurrence<Tz: TimeZone>(&self, now: DateTime<Tz>) -> DateTime<Tz> {
        let tz = now.timezone();
        let mut date = now.date_naive();

        for _ in 0..3 {
            if let Some(naive) = date.and_hms_opt(self.hour, self.minute, 0) {
                if let Some(candidate) = tz.from_local_datetime(&naive).earliest() {
                    if candidate > now {
                        return candidate;
                    }
                }
            }
            date = date.succ_opt().unwrap_or(date);
        }

        now + chrono::Duration::days(1)
    }
}

/// 以调度模式运行爬取工作器
///
/// 爬取失败只记录日志，调度循环不会退出
pub async fn run_daily<A, R>(worker: Arc<CrawlWorker<A, R>>, schedule: DailySchedule)
where
    A: AuctionRepository + Send + Sync,
    R: CrawlRunRepository + Send + Sync,
{
    info!(
        "Running in scheduled mode - waiting for {:02}:{:02}",
        schedule.hour, schedule.minute
    );

    loop {
        let now = Local::now();
        let next = schedule.next_occurrence(now);
        let wait = (next - now).to_std().unwrap_or_default();
        info!("Next scheduled crawl at {}", next);
        sleep(wait).await;

        if let Err(e) = worker.run(CrawlWindow::unbounded()).await {
            error!("Scheduled crawl failed: {}", e);
        }
    }
}
