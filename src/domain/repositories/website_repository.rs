// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::website::{Website, WebsiteStatus};
use async_trait::async_trait;
use sea_orm::DbErr;
use thiserror::Error;

/// 仓库错误类型
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// 数据库错误
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
    /// 记录未找到
    #[error("Record not found")]
    NotFound,
    /// 记录已存在（URL唯一约束冲突）
    #[error("Record already exists")]
    AlreadyExists,
}

/// 网站仓库特质
///
/// 定义网站数据访问接口。除`find_by_id`外的所有查询
/// 只考虑未删除的记录。
#[async_trait]
pub trait WebsiteRepository: Send + Sync {
    /// 插入新网站并返回分配的ID
    ///
    /// URL唯一约束冲突时返回`RepositoryError::AlreadyExists`
    async fn insert(&self, website: &Website) -> Result<i64, RepositoryError>;
    /// 根据ID查找网站
    async fn find_by_id(&self, id: i64) -> Result<Option<Website>, RepositoryError>;
    /// 根据规范化URL精确查找网站
    async fn find_by_url(&self, url: &str) -> Result<Option<Website>, RepositoryError>;
    /// 查找URL是给定URL前缀的网站（候选的某个父目录是否已注册）
    async fn find_covering(&self, url: &str) -> Result<Option<Website>, RepositoryError>;
    /// 查找URL以给定URL为前缀的网站（候选是否是已注册站点的父目录）
    async fn find_children(&self, url: &str) -> Result<Vec<Website>, RepositoryError>;
    /// 更新网站状态
    async fn mark_status(&self, id: i64, status: WebsiteStatus) -> Result<(), RepositoryError>;
    /// 删除网站
    async fn delete(&self, id: i64) -> Result<(), RepositoryError>;
}
