// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::repositories::website_repository::WebsiteRepository;
use crate::utils::errors::AdmissionError;
use std::sync::Arc;
use tracing::info;

/// 删除网站用例
///
/// 将网站从注册表中移除。关联文档的清理属于被排除的
/// 搜索引擎协作方，不在此处理。
pub struct DeleteWebsiteUseCase<W: WebsiteRepository> {
    websites: Arc<W>,
}

impl<W: WebsiteRepository> DeleteWebsiteUseCase<W> {
    pub fn new(websites: Arc<W>) -> Self {
        Self { websites }
    }

    /// 删除指定网站
    pub async fn execute(&self, website_id: i64) -> Result<(), AdmissionError> {
        self.websites.delete(website_id).await?;
        info!(website_id, "website deleted");
        Ok(())
    }
}
