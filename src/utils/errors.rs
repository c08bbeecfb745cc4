// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::repositories::website_repository::RepositoryError;
use crate::queue::task_queue::QueueError;
use thiserror::Error;

/// 准入错误类型
///
/// 仅覆盖致命路径：存储或队列不可用。校验拒绝不是错误，
/// 以`ValidationOutcome::Rejected`的形式返回。
#[derive(Error, Debug)]
pub enum AdmissionError {
    /// 仓库错误
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    /// 队列错误
    #[error("Queue error: {0}")]
    Queue(#[from] QueueError),
}
