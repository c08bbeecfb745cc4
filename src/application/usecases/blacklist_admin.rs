// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::blacklist::BlacklistEntry;
use crate::domain::repositories::blacklist_repository::BlacklistRepository;
use crate::utils::errors::AdmissionError;
use std::sync::Arc;
use tracing::info;

/// 黑名单管理用例
///
/// 黑名单条目仅由管理操作创建和删除
pub struct BlacklistAdminUseCase<B: BlacklistRepository> {
    blacklist: Arc<B>,
}

impl<B: BlacklistRepository> BlacklistAdminUseCase<B> {
    pub fn new(blacklist: Arc<B>) -> Self {
        Self { blacklist }
    }

    /// 添加黑名单条目
    pub async fn add(&self, pattern: &str) -> Result<BlacklistEntry, AdmissionError> {
        let entry = self.blacklist.add(pattern).await?;
        info!(id = entry.id, pattern, "blacklist entry added");
        Ok(entry)
    }

    /// 删除黑名单条目
    pub async fn remove(&self, id: i64) -> Result<(), AdmissionError> {
        self.blacklist.remove(id).await?;
        info!(id, "blacklist entry removed");
        Ok(())
    }

    /// 列出全部黑名单条目
    pub async fn list(&self) -> Result<Vec<BlacklistEntry>, AdmissionError> {
        Ok(self.blacklist.list().await?)
    }
}
