// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::{AdmissionSettings, ProbeSettings};
use crate::domain::models::outcome::{RejectionReason, ValidationOutcome};
use crate::domain::models::task::Task;
use crate::domain::models::website::Website;
use crate::domain::repositories::blacklist_repository::BlacklistRepository;
use crate::domain::repositories::website_repository::{RepositoryError, WebsiteRepository};
use crate::queue::task_queue::TaskQueue;
use crate::utils::errors::AdmissionError;
use crate::utils::od_probe::{DirectoryProbe, ProbeError};
use crate::utils::url_utils;
use metrics::counter;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, error, info, instrument};
use url::Url;

/// 准入服务
///
/// 将候选URL依次通过语法、去重、包含、黑名单和探测五道
/// 短路闸门；全部通过后注册网站并将爬取任务入队。
///
/// 检查-插入序列在内部互斥锁中串行执行，叠加存储层的URL
/// 唯一约束，保证并发提交下不会产生重复或相互包含的网站。
pub struct AdmissionService<W, B, P, Q>
where
    W: WebsiteRepository,
    B: BlacklistRepository,
    P: DirectoryProbe,
    Q: TaskQueue,
{
    websites: Arc<W>,
    blacklist: Arc<B>,
    probe: Arc<P>,
    queue: Arc<Q>,
    admission: AdmissionSettings,
    probe_settings: ProbeSettings,
    insert_lock: Mutex<()>,
}

impl<W, B, P, Q> AdmissionService<W, B, P, Q>
where
    W: WebsiteRepository,
    B: BlacklistRepository,
    P: DirectoryProbe,
    Q: TaskQueue,
{
    /// 创建新的准入服务实例
    ///
    /// # 参数
    ///
    /// * `websites` - 网站仓库
    /// * `blacklist` - 黑名单仓库
    /// * `probe` - 开放目录探测器
    /// * `queue` - 任务队列
    /// * `admission` - 准入配置
    /// * `probe_settings` - 探测配置
    pub fn new(
        websites: Arc<W>,
        blacklist: Arc<B>,
        probe: Arc<P>,
        queue: Arc<Q>,
        admission: AdmissionSettings,
        probe_settings: ProbeSettings,
    ) -> Self {
        Self {
            websites,
            blacklist,
            probe,
            queue,
            admission,
            probe_settings,
            insert_lock: Mutex::new(()),
        }
    }

    /// 对单个候选URL执行完整的准入流程
    ///
    /// # 参数
    ///
    /// * `raw_url` - 原始提交的URL字符串
    /// * `fingerprint` - 提交者指纹
    ///
    /// # 返回值
    ///
    /// * `Ok(ValidationOutcome)` - 接受（含新网站ID）或拒绝（含原因）
    /// * `Err(AdmissionError)` - 存储或队列不可用
    #[instrument(skip_all, fields(url = %raw_url))]
    pub async fn admit(
        &self,
        raw_url: &str,
        fingerprint: &str,
    ) -> Result<ValidationOutcome, AdmissionError> {
        let url = url_utils::normalize_url(raw_url);

        if !self.is_valid_url(&url) {
            return Ok(self.reject(RejectionReason::InvalidUrl));
        }

        if let Some(reason) = self.check_registry(&url).await? {
            return Ok(self.reject(reason));
        }

        if self.blacklist.is_blacklisted(&url).await? {
            return Ok(self.reject(RejectionReason::Blacklisted));
        }

        if let Some(reason) = self.probe_gate(&url).await {
            return Ok(self.reject(reason));
        }

        // The probe released control for a while; re-run the registry
        // checks and insert under the lock so check-then-insert is atomic
        // with respect to concurrent admissions.
        let _guard = self.insert_lock.lock().await;

        if let Some(reason) = self.check_registry(&url).await? {
            return Ok(self.reject(reason));
        }

        let website = Website::new(url.clone(), fingerprint.to_string());
        let website_id = match self.websites.insert(&website).await {
            Ok(id) => id,
            // The storage layer enforces URL uniqueness as well; a conflict
            // here is a lost race, not a fault.
            Err(RepositoryError::AlreadyExists) => {
                return Ok(self.reject(RejectionReason::AlreadyRegistered));
            }
            Err(e) => return Err(e.into()),
        };

        let task = Task::new(website_id, url.clone(), self.admission.default_priority);
        if let Err(e) = self.queue.enqueue(task).await {
            // An admitted website without a crawl task must never be
            // silently dropped.
            error!(website_id, url = %url, "failed to enqueue crawl task: {}", e);
            return Err(e.into());
        }

        info!(website_id, url = %url, "website admitted");
        counter!("admissions_accepted_total").increment(1);
        Ok(ValidationOutcome::Accepted { website_id })
    }

    /// 语法闸门：URL必须可解析、含主机名且scheme在允许范围内
    fn is_valid_url(&self, url: &str) -> bool {
        match Url::parse(url) {
            Ok(parsed) => {
                let scheme_ok = self
                    .admission
                    .allowed_schemes
                    .iter()
                    .any(|scheme| scheme == parsed.scheme());
                let host_ok = parsed.host_str().is_some_and(|host| !host.is_empty());
                scheme_ok && host_ok
            }
            Err(_) => false,
        }
    }

    /// 去重与包含闸门
    async fn check_registry(&self, url: &str) -> Result<Option<RejectionReason>, AdmissionError> {
        if self.websites.find_by_url(url).await?.is_some() {
            return Ok(Some(RejectionReason::AlreadyRegistered));
        }

        if let Some(parent) = self.websites.find_covering(url).await? {
            debug!(url, parent = %parent.url, "candidate covered by registered parent");
            return Ok(Some(RejectionReason::ParentRegistered));
        }

        if self.admission.strict_containment
            && !self.websites.find_children(url).await?.is_empty()
        {
            return Ok(Some(RejectionReason::ChildRegistered));
        }

        Ok(None)
    }

    /// 探测闸门
    ///
    /// 探测超时与探测否定默认折叠为同一拒绝原因，
    /// `probe.distinguish_timeout`配置可将两者分开
    async fn probe_gate(&self, url: &str) -> Option<RejectionReason> {
        let timeout = Duration::from_secs(self.probe_settings.timeout_secs);
        let result = tokio::time::timeout(timeout, self.probe.is_open_directory(url, timeout)).await;

        match result {
            Ok(Ok(true)) => None,
            Ok(Ok(false)) => Some(RejectionReason::NotOpenDirectory),
            Ok(Err(ProbeError::TimedOut)) | Err(_) => Some(self.timeout_reason()),
            Ok(Err(e)) => {
                debug!(url, "probe failed: {}", e);
                Some(RejectionReason::NotOpenDirectory)
            }
        }
    }

    fn timeout_reason(&self) -> RejectionReason {
        if self.probe_settings.distinguish_timeout {
            RejectionReason::ProbeTimedOut
        } else {
            RejectionReason::NotOpenDirectory
        }
    }

    fn reject(&self, reason: RejectionReason) -> ValidationOutcome {
        debug!(%reason, "submission rejected");
        counter!("admissions_rejected_total").increment(1);
        ValidationOutcome::rejected(reason)
    }
}
