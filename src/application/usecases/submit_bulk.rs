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

use crate::application::dto::submit_request::BulkSubmitRequestDto;
use crate::config::settings::BulkSettings;
use crate::domain::models::outcome::{BatchReceipt, BulkOutcome, RejectionReason};
use crate::domain::repositories::blacklist_repository::BlacklistRepository;
use crate::domain::repositories::website_repository::WebsiteRepository;
use crate::domain::services::admission_service::AdmissionService;
use crate::queue::task_queue::TaskQueue;
use crate::utils::od_probe::DirectoryProbe;
use futures::StreamExt;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// 批量提交用例
///
/// 将一批原始URL分发到固定宽度的并发工作器上，每个URL独立
/// 走完整的准入管道。单条结果被刻意丢弃：批次调用只确认提交
/// 发生过，不回报哪些URL被接受。任何单条失败都不会中止
/// 兄弟任务或整个批次，且调用在所有工作器结束后才返回。
pub struct SubmitBulkUseCase<W, B, P, Q>
where
    W: WebsiteRepository + 'static,
    B: BlacklistRepository + 'static,
    P: DirectoryProbe + 'static,
    Q: TaskQueue + 'static,
{
    service: Arc<AdmissionService<W, B, P, Q>>,
    settings: BulkSettings,
}

impl<W, B, P, Q> SubmitBulkUseCase<W, B, P, Q>
where
    W: WebsiteRepository + 'static,
    B: BlacklistRepository + 'static,
    P: DirectoryProbe + 'static,
    Q: TaskQueue + 'static,
{
    pub fn new(service: Arc<AdmissionService<W, B, P, Q>>, settings: BulkSettings) -> Self {
        Self { service, settings }
    }

    /// 执行批量提交
    ///
    /// # 参数
    ///
    /// * `request` - 批量提交请求
    ///
    /// # 返回值
    ///
    /// 数量越界时整批立即拒绝且无任何副作用，否则在全部URL
    /// 处理完毕后返回统一回执
    pub async fn execute(&self, request: BulkSubmitRequestDto) -> BulkOutcome {
        let count = request.urls.len();
        if count < self.settings.min_urls || count > self.settings.max_urls {
            warn!(
                count,
                min = self.settings.min_urls,
                max = self.settings.max_urls,
                "bulk submission outside the allowed range"
            );
            return BulkOutcome::rejected(RejectionReason::TooManyUrls);
        }

        let fingerprint = request.meta.fingerprint();
        info!(count, workers = self.settings.workers, "bulk submission started");

        // Process with bounded concurrency; the stream is fully drained
        // before returning so no worker outlives the batch call.
        futures::stream::iter(request.urls)
            .for_each_concurrent(self.settings.workers, |url| {
                let service = self.service.clone();
                let fingerprint = fingerprint.clone();
                async move {
                    match service.admit(&url, &fingerprint).await {
                        Ok(outcome) => {
                            debug!(url = %url, accepted = outcome.is_accepted(), "bulk item finished");
                        }
                        Err(e) => {
                            error!(url = %url, "bulk item failed: {}", e);
                        }
                    }
                }
            })
            .await;

        BulkOutcome::Submitted(BatchReceipt { submitted: count })
    }
}
