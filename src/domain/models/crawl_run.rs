// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 爬取窗口
///
/// 命令行传入的1-based闭区间，作用在去重排序后的详情URL列表上。
/// 两端均可省略：省略start表示从第一条开始，省略end表示直到最后一条。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrawlWindow {
    /// 窗口起点（1-based，含）
    pub start: Option<u32>,
    /// 窗口终点（1-based，含）
    pub end: Option<u32>,
}

impl CrawlWindow {
    pub fn new(start: Option<u32>, end: Option<u32>) -> Self {
        Self { start, end }
    }

    /// 无窗口限制，处理全部URL
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// 仅处理前n条URL
    pub fn first(n: u32) -> Self {
        Self {
            start: None,
            end: Some(n),
        }
    }

    pub fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    /// 将窗口应用到有序列表上
    ///
    /// 起点小于1按1处理，终点越界按列表末尾处理，空窗口返回空列表
    pub fn apply<T>(&self, items: Vec<T>) -> Vec<T> {
        let start = self.start.unwrap_or(1).max(1) as usize;
        let iter = items.into_iter().skip(start - 1);

        match self.end {
            Some(end) if (end as usize) < start => Vec::new(),
            Some(end) => iter.take(end as usize - start + 1).collect(),
            None => iter.collect(),
        }
    }
}

/// 爬取运行状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CrawlRunStatus {
    Running,
    Completed,
    Failed,
}

impl CrawlRunStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CrawlRunStatus::Running => "running",
            CrawlRunStatus::Completed => "completed",
            CrawlRunStatus::Failed => "failed",
        }
    }
}

/// 爬取运行记录
///
/// 每次任务执行写入一行crawl_runs，记录窗口与各类URL计数
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlRun {
    pub id: Uuid,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    /// 本次运行使用的爬取窗口
    pub window: CrawlWindow,
    /// 列表页发现的去重URL总数
    pub discovered: u32,
    /// 成功提取并入库的URL数
    pub processed: u32,
    /// 因重定向跳过的URL数
    pub skipped: u32,
    /// 抓取或提取失败的URL数
    pub failed: u32,
    pub status: CrawlRunStatus,
}

impl CrawlRun {
    /// 以Running状态开始一次新的运行
    pub fn begin(window: CrawlWindow) -> Self {
        Self {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
            finished_at: None,
            window,
            discovered: 0,
            processed: 0,
            skipped: 0,
            failed: 0,
            status: CrawlRunStatus::Running,
        }
    }
}
