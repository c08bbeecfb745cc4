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

use crate::domain::models::website::{Website, WebsiteStatus};
use crate::domain::repositories::website_repository::{RepositoryError, WebsiteRepository};
use crate::infrastructure::database::entities::website as website_entity;
use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter, Set,
    SqlErr,
};
use std::sync::Arc;

/// 网站仓库实现
///
/// 基于SeaORM实现的网站数据访问层。`websites.url`上的唯一
/// 索引是并发准入的最后一道防线：冲突映射为`AlreadyExists`。
#[derive(Clone)]
pub struct WebsiteRepositoryImpl {
    /// 数据库连接
    db: Arc<DatabaseConnection>,
}

impl WebsiteRepositoryImpl {
    /// 创建新的网站仓库实例
    ///
    /// # 参数
    ///
    /// * `db` - 数据库连接
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

impl From<website_entity::Model> for Website {
    fn from(model: website_entity::Model) -> Self {
        Self {
            id: model.id,
            url: model.url,
            submitter_fingerprint: model.submitter_fingerprint,
            status: model.status.parse().unwrap_or_default(),
            last_modified: model.last_modified,
        }
    }
}

/// 列出候选URL的全部祖先目录根
///
/// `http://h/a/b/` 的祖先是 `http://h/` 和 `http://h/a/`。
/// 用精确的`IN`查询替代前缀`LIKE`，避免URL中的通配符转义问题。
fn ancestor_urls(url: &str) -> Vec<String> {
    let Some(scheme_end) = url.find("://") else {
        return Vec::new();
    };
    let Some(path_start) = url[scheme_end + 3..].find('/') else {
        return Vec::new();
    };
    let root = scheme_end + 3 + path_start;

    let mut ancestors = Vec::new();
    for (offset, _) in url[root..].match_indices('/') {
        let end = root + offset + 1;
        if end < url.len() {
            ancestors.push(url[..end].to_string());
        }
    }
    ancestors
}

#[async_trait]
impl WebsiteRepository for WebsiteRepositoryImpl {
    async fn insert(&self, website: &Website) -> Result<i64, RepositoryError> {
        let model = website_entity::ActiveModel {
            url: Set(website.url.clone()),
            submitter_fingerprint: Set(website.submitter_fingerprint.clone()),
            status: Set(website.status.to_string()),
            last_modified: Set(website.last_modified),
            ..Default::default()
        };

        match model.insert(self.db.as_ref()).await {
            Ok(inserted) => Ok(inserted.id),
            Err(e) => match e.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => Err(RepositoryError::AlreadyExists),
                _ => Err(RepositoryError::Database(e)),
            },
        }
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Website>, RepositoryError> {
        let model = website_entity::Entity::find_by_id(id)
            .one(self.db.as_ref())
            .await?;

        Ok(model.map(Into::into))
    }

    async fn find_by_url(&self, url: &str) -> Result<Option<Website>, RepositoryError> {
        let model = website_entity::Entity::find()
            .filter(website_entity::Column::Url.eq(url))
            .filter(website_entity::Column::Status.ne(WebsiteStatus::Deleted.to_string()))
            .one(self.db.as_ref())
            .await?;

        Ok(model.map(Into::into))
    }

    async fn find_covering(&self, url: &str) -> Result<Option<Website>, RepositoryError> {
        let ancestors = ancestor_urls(url);
        if ancestors.is_empty() {
            return Ok(None);
        }

        let model = website_entity::Entity::find()
            .filter(website_entity::Column::Url.is_in(ancestors))
            .filter(website_entity::Column::Status.ne(WebsiteStatus::Deleted.to_string()))
            .one(self.db.as_ref())
            .await?;

        Ok(model.map(Into::into))
    }

    async fn find_children(&self, url: &str) -> Result<Vec<Website>, RepositoryError> {
        let models = website_entity::Entity::find()
            .filter(website_entity::Column::Url.starts_with(url))
            .filter(website_entity::Column::Url.ne(url))
            .filter(website_entity::Column::Status.ne(WebsiteStatus::Deleted.to_string()))
            .all(self.db.as_ref())
            .await?;

        Ok(models.into_iter().map(Website::from).collect())
    }

    async fn mark_status(&self, id: i64, status: WebsiteStatus) -> Result<(), RepositoryError> {
        let model = website_entity::Entity::find_by_id(id)
            .one(self.db.as_ref())
            .await?
            .ok_or(RepositoryError::NotFound)?;

        let mut active: website_entity::ActiveModel = model.into();
        active.status = Set(status.to_string());
        active.last_modified = Set(Utc::now());
        active.update(self.db.as_ref()).await?;
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<(), RepositoryError> {
        let model = website_entity::Entity::find_by_id(id)
            .one(self.db.as_ref())
            .await?
            .ok_or(RepositoryError::NotFound)?;

        model.delete(self.db.as_ref()).await?;
        Ok(())
    }
}
