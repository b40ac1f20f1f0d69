// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use thiserror::Error;

use crate::engines::traits::FetchError;

/// 仓库层错误类型
#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("数据库错误: {0}")]
    DatabaseError(String),

    #[error("未找到数据")]
    NotFound,

    #[error("无效参数: {0}")]
    InvalidParameter(String),
}

impl From<sea_orm::DbErr> for RepositoryError {
    fn from(err: sea_orm::DbErr) -> Self {
        RepositoryError::DatabaseError(err.to_string())
    }
}

/// 爬取任务错误类型
#[derive(Error, Debug)]
pub enum CrawlError {
    #[error("列表页抓取失败: {0}")]
    ListingFetch(#[from] FetchError),

    #[error("仓库错误: {0}")]
    Repository(#[from] RepositoryError),

    #[error("CSV导出错误: {0}")]
    Export(#[from] std::io::Error),

    #[error("无效配置: {0}")]
    InvalidConfig(String),
}
