// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::application::dto::submit_request::RescanRequestDto;
use crate::config::settings::{RescanPolicy, RescanSettings};
use crate::domain::models::outcome::{RejectionReason, RescanOutcome};
use crate::domain::models::task::Task;
use crate::domain::repositories::website_repository::WebsiteRepository;
use crate::queue::task_queue::TaskQueue;
use crate::utils::errors::AdmissionError;
use std::sync::Arc;
use tracing::info;
use validator::Validate;

/// 重扫描用例
///
/// 为已注册的网站再次入队一个爬取任务，通常带较高优先级。
/// 重扫描不经过准入管道：网站已通过准入，无需重新校验。
pub struct RescanWebsiteUseCase<W, Q>
where
    W: WebsiteRepository,
    Q: TaskQueue,
{
    websites: Arc<W>,
    queue: Arc<Q>,
    settings: RescanSettings,
    default_priority: i32,
}

impl<W, Q> RescanWebsiteUseCase<W, Q>
where
    W: WebsiteRepository,
    Q: TaskQueue,
{
    pub fn new(
        websites: Arc<W>,
        queue: Arc<Q>,
        settings: RescanSettings,
        default_priority: i32,
    ) -> Self {
        Self {
            websites,
            queue,
            settings,
            default_priority,
        }
    }

    /// 执行重扫描
    ///
    /// # 参数
    ///
    /// * `request` - 重扫描请求
    ///
    /// # 返回值
    ///
    /// * `Ok(RescanOutcome)` - 任务已入队、按策略跳过或被拒绝
    /// * `Err(AdmissionError)` - 存储或队列不可用
    pub async fn execute(&self, request: RescanRequestDto) -> Result<RescanOutcome, AdmissionError> {
        if request.validate().is_err() {
            return Ok(RescanOutcome::rejected(RejectionReason::InvalidPriority));
        }

        let Some(website) = self.websites.find_by_id(request.website_id).await? else {
            return Ok(RescanOutcome::rejected(RejectionReason::WebsiteNotFound));
        };

        if self.settings.policy == RescanPolicy::Suppress
            && self.queue.has_task_for(website.id).await?
        {
            info!(website_id = website.id, "rescan suppressed, task already queued");
            return Ok(RescanOutcome::Suppressed {
                website_id: website.id,
            });
        }

        let priority = request.priority.unwrap_or(self.default_priority);
        let task = Task::new(website.id, website.url.clone(), priority);
        self.queue.enqueue(task.clone()).await?;

        info!(website_id = website.id, priority, "rescan task enqueued");
        Ok(RescanOutcome::Enqueued(task))
    }
}
