// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::auction::CarAuction;
use crate::utils::errors::RepositoryError;
use async_trait::async_trait;

/// Upsert结果
///
/// 区分新建与更新，便于日志与统计
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Created,
    Updated,
}

/// 拍卖仓库特质
///
/// 定义车辆拍卖记录的数据访问接口
#[async_trait]
pub trait AuctionRepository: Send + Sync {
    /// 按拍卖ID写入或更新记录
    async fn upsert(&self, auction: &CarAuction) -> Result<UpsertOutcome, RepositoryError>;

    /// 按拍卖ID查找记录
    async fn find_by_auction_id(
        &self,
        auction_id: &str,
    ) -> Result<Option<CarAuction>, RepositoryError>;
}
