// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::blacklist::BlacklistEntry;
use crate::domain::repositories::blacklist_repository::BlacklistRepository;
use crate::domain::repositories::website_repository::RepositoryError;
use crate::infrastructure::database::entities::blacklist as blacklist_entity;
use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, ModelTrait, Set};
use std::sync::Arc;

/// 黑名单仓库实现
///
/// 黑名单条目数量很小且仅由管理操作变更，前缀匹配在
/// 内存中完成。
#[derive(Clone)]
pub struct BlacklistRepositoryImpl {
    /// 数据库连接
    db: Arc<DatabaseConnection>,
}

impl BlacklistRepositoryImpl {
    /// 创建新的黑名单仓库实例
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

impl From<blacklist_entity::Model> for BlacklistEntry {
    fn from(model: blacklist_entity::Model) -> Self {
        Self {
            id: model.id,
            url_pattern: model.url_pattern,
        }
    }
}

#[async_trait]
impl BlacklistRepository for BlacklistRepositoryImpl {
    async fn is_blacklisted(&self, url: &str) -> Result<bool, RepositoryError> {
        let entries = blacklist_entity::Entity::find()
            .all(self.db.as_ref())
            .await?;

        Ok(entries
            .iter()
            .any(|entry| url.starts_with(&entry.url_pattern)))
    }

    async fn add(&self, pattern: &str) -> Result<BlacklistEntry, RepositoryError> {
        let model = blacklist_entity::ActiveModel {
            url_pattern: Set(pattern.to_string()),
            ..Default::default()
        };

        let inserted = model.insert(self.db.as_ref()).await?;
        Ok(inserted.into())
    }

    async fn remove(&self, id: i64) -> Result<(), RepositoryError> {
        let model = blacklist_entity::Entity::find_by_id(id)
            .one(self.db.as_ref())
            .await?
            .ok_or(RepositoryError::NotFound)?;

        model.delete(self.db.as_ref()).await?;
        Ok(())
    }

    async fn list(&self) -> Result<Vec<BlacklistEntry>, RepositoryError> {
        let models = blacklist_entity::Entity::find()
            .all(self.db.as_ref())
            .await?;

        Ok(models.into_iter().map(BlacklistEntry::from).collect())
    }
}
