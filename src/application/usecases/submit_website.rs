// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::application::dto::submit_request::SubmitRequestDto;
use crate::domain::models::outcome::ValidationOutcome;
use crate::domain::repositories::blacklist_repository::BlacklistRepository;
use crate::domain::repositories::website_repository::WebsiteRepository;
use crate::domain::services::admission_service::AdmissionService;
use crate::queue::task_queue::TaskQueue;
use crate::utils::errors::AdmissionError;
use crate::utils::od_probe::DirectoryProbe;
use std::sync::Arc;

/// 单条提交用例
///
/// 提交一个候选URL并返回其准入结论
pub struct SubmitWebsiteUseCase<W, B, P, Q>
where
    W: WebsiteRepository,
    B: BlacklistRepository,
    P: DirectoryProbe,
    Q: TaskQueue,
{
    service: Arc<AdmissionService<W, B, P, Q>>,
}

impl<W, B, P, Q> SubmitWebsiteUseCase<W, B, P, Q>
where
    W: WebsiteRepository,
    B: BlacklistRepository,
    P: DirectoryProbe,
    Q: TaskQueue,
{
    pub fn new(service: Arc<AdmissionService<W, B, P, Q>>) -> Self {
        Self { service }
    }

    /// 执行单条提交
    ///
    /// # 返回值
    ///
    /// * `Ok(ValidationOutcome)` - 接受或拒绝
    /// * `Err(AdmissionError)` - 存储或队列不可用
    pub async fn execute(
        &self,
        request: SubmitRequestDto,
    ) -> Result<ValidationOutcome, AdmissionError> {
        self.service
            .admit(&request.url, &request.meta.fingerprint())
            .await
    }
}
