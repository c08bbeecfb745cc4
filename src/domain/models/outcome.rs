// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::task::Task;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 拒绝原因
///
/// 准入管道各道闸门产生的终态拒绝标签，展示文本面向提交者。
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectionReason {
    /// URL无法解析或scheme不在允许范围内
    #[error("Invalid url. Make sure to include the appropriate scheme")]
    InvalidUrl,

    /// 完全相同的URL已注册
    #[error("Website already exists")]
    AlreadyRegistered,

    /// 候选URL的某个父目录已注册
    #[error("A parent directory of this url has already been posted")]
    ParentRegistered,

    /// 候选URL是某个已注册站点的父目录（仅严格包含模式）
    #[error("A subdirectory of this url has already been posted")]
    ChildRegistered,

    /// 命中黑名单
    #[error("Sorry, this website has been blacklisted")]
    Blacklisted,

    /// 反垃圾探测判定不是开放目录或服务器无响应
    #[error("The anti-spam algorithm determined that the submitted url is not an open directory or the server is not responding")]
    NotOpenDirectory,

    /// 探测在限定时间内未收到响应（仅在区分超时的配置下出现）
    #[error("The server did not respond before the probe timed out")]
    ProbeTimedOut,

    /// 重扫描指向的网站不存在
    #[error("Website does not exist")]
    WebsiteNotFound,

    /// 重扫描优先级非法
    #[error("Priority must be a non-negative integer")]
    InvalidPriority,

    /// 批量提交的URL数量超出允许范围
    #[error("Too few or too many urls, please submit 1-1000 urls")]
    TooManyUrls,
}

/// 拒绝严重级别
///
/// 提示消息的分类，由上层界面决定呈现方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// 提交格式问题，提示性
    Warning,
    /// 业务拒绝
    Danger,
}

impl RejectionReason {
    /// 获取拒绝原因对应的严重级别
    pub fn severity(&self) -> Severity {
        match self {
            RejectionReason::InvalidUrl | RejectionReason::InvalidPriority => Severity::Warning,
            _ => Severity::Danger,
        }
    }
}

/// 单次提交的准入结论
///
/// 非持久化。拒绝是面向提交者的正常结果而非错误，
/// 只有存储或队列不可用才会以错误形式向调用方传播。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum ValidationOutcome {
    /// 已通过全部闸门并完成注册与排队
    Accepted {
        /// 新分配的网站ID
        website_id: i64,
    },
    /// 被某道闸门拒绝
    Rejected {
        /// 拒绝原因
        reason: RejectionReason,
        /// 严重级别
        severity: Severity,
    },
}

impl ValidationOutcome {
    /// 由拒绝原因构造拒绝结论，严重级别自动推导
    pub fn rejected(reason: RejectionReason) -> Self {
        ValidationOutcome::Rejected {
            severity: reason.severity(),
            reason,
        }
    }

    /// 是否为接受结论
    pub fn is_accepted(&self) -> bool {
        matches!(self, ValidationOutcome::Accepted { .. })
    }
}

/// 批量提交回执
///
/// 批量提交刻意不回报单条结果，仅确认批次已被处理
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchReceipt {
    /// 本批派发的URL数量
    pub submitted: usize,
}

/// 批量提交结论
///
/// 整批要么被完整派发，要么因数量越界被整体拒绝且不产生
/// 任何副作用
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum BulkOutcome {
    /// 批次已派发，单条结果不回报
    Submitted(BatchReceipt),
    /// 整批被拒绝
    Rejected {
        /// 拒绝原因
        reason: RejectionReason,
        /// 严重级别
        severity: Severity,
    },
}

impl BulkOutcome {
    /// 由拒绝原因构造整批拒绝结论
    pub fn rejected(reason: RejectionReason) -> Self {
        BulkOutcome::Rejected {
            severity: reason.severity(),
            reason,
        }
    }
}

/// 重扫描结论
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum RescanOutcome {
    /// 任务已入队
    Enqueued(Task),
    /// 按配置策略跳过：该网站已有待处理任务
    Suppressed {
        /// 目标网站ID
        website_id: i64,
    },
    /// 请求被拒绝
    Rejected {
        /// 拒绝原因
        reason: RejectionReason,
        /// 严重级别
        severity: Severity,
    },
}

impl RescanOutcome {
    /// 由拒绝原因构造拒绝结论
    pub fn rejected(reason: RejectionReason) -> Self {
        RescanOutcome::Rejected {
            severity: reason.severity(),
            reason,
        }
    }
}
