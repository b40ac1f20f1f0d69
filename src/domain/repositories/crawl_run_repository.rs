// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::crawl_run::CrawlRun;
use crate::utils::errors::RepositoryError;
use async_trait::async_trait;

/// 爬取运行仓库特质
///
/// 定义运行统计记录的数据访问接口
#[async_trait]
pub trait CrawlRunRepository: Send + Sync {
    /// 创建运行记录（状态为running）
    async fn create(&self, run: &CrawlRun) -> Result<(), RepositoryError>;

    /// 以最终计数和状态收尾运行记录
    async fn finish(&self, run: &CrawlRun) -> Result<(), RepositoryError>;
}
