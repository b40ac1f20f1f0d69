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

use crate::domain::models::crawl_run::CrawlRun;
use crate::domain::repositories::crawl_run_repository::CrawlRunRepository;
use crate::infrastructure::database::entities::crawl_run as run_entity;
use crate::utils::errors::RepositoryError;
use async_trait::async_trait;
use sea_orm::*;
use std::sync::Arc;

/// 爬取运行仓库实现
pub struct CrawlRunRepositoryImpl {
    /// 数据库连接
    db: Arc<DatabaseConnection>,
}

impl CrawlRunRepositoryImpl {
    /// 创建新的爬取运行仓库实例
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CrawlRunRepository for CrawlRunRepositoryImpl {
    async fn create(&self, run: &CrawlRun) -> Result<(), RepositoryError> {
        let active = run_entity::ActiveModel {
            id: Set(run.id),
            started_at: Set(run.started_at.into()),
            finished_at: Set(None),
            window_start: Set(run.window.start.map(|v| v as i32)),
            window_end: Set(run.window.end.map(|v| v as i32)),
            discovered: Set(0),
            processed: Set(0),
            skipped: Set(0),
            failed: Set(0),
            status: Set(run.status.as_str().to_string()),
        };

        run_entity::Entity::insert(active)
            .exec(self.db.as_ref())
            .await?;

        Ok(())
    }

    async fn finish(&self, run: &CrawlRun) -> Result<(), RepositoryError> {
        let model = run_entity::Entity::find_by_id(run.id)
            .one(self.db.as_ref())
            .await?
            .ok_or(RepositoryError::NotFound)?;

        let mut active: run_entity::ActiveModel = model.into();
        active.finished_at = Set(run.finished_at.map(Into::into));
        active.discovered = Set(run.discovered as i32);
        active.processed = Set(run.processed as i32);
        active.skipped = Set(run.skipped as i32);
        active.failed = Set(run.failed as i32);
        active.status = Set(run.status.as_str().to_string());
        active.update(self.db.as_ref()).await?;

        Ok(())
    }
}
