// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::blacklist::BlacklistEntry;
use crate::domain::repositories::website_repository::RepositoryError;
use async_trait::async_trait;

/// 黑名单仓库特质
#[async_trait]
pub trait BlacklistRepository: Send + Sync {
    /// 检查URL是否命中任一黑名单前缀
    async fn is_blacklisted(&self, url: &str) -> Result<bool, RepositoryError>;
    /// 添加黑名单条目并返回完整记录
    async fn add(&self, pattern: &str) -> Result<BlacklistEntry, RepositoryError>;
    /// 根据ID删除黑名单条目
    async fn remove(&self, id: i64) -> Result<(), RepositoryError>;
    /// 列出全部黑名单条目
    async fn list(&self) -> Result<Vec<BlacklistEntry>, RepositoryError>;
}
