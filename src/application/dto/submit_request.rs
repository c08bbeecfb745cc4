// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// 提交者元数据
///
/// 由被排除在外的前端层从请求中提取后传入
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SubmissionMeta {
    /// 请求方地址
    pub remote_addr: String,
    /// X-Forwarded-For头的值
    pub forwarded_for: Option<String>,
    /// 用户代理
    pub user_agent: Option<String>,
}

impl SubmissionMeta {
    /// 计算提交者指纹
    ///
    /// 非空部分用下划线拼接
    pub fn fingerprint(&self) -> String {
        let mut parts = vec![self.remote_addr.as_str()];
        if let Some(forwarded) = self.forwarded_for.as_deref() {
            if !forwarded.is_empty() {
                parts.push(forwarded);
            }
        }
        if let Some(agent) = self.user_agent.as_deref() {
            if !agent.is_empty() {
                parts.push(agent);
            }
        }
        parts.join("_")
    }
}

/// 单条提交请求
#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct SubmitRequestDto {
    /// 原始URL字符串，规范化交由管道完成
    pub url: String,
    /// 提交者元数据
    #[serde(default)]
    pub meta: SubmissionMeta,
}

/// 批量提交请求
#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct BulkSubmitRequestDto {
    /// 原始URL列表
    pub urls: Vec<String>,
    /// 提交者元数据
    #[serde(default)]
    pub meta: SubmissionMeta,
}

/// 重扫描请求
#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct RescanRequestDto {
    /// 目标网站ID
    pub website_id: i64,
    /// 任务优先级，必须是非负整数
    #[validate(range(min = 0))]
    pub priority: Option<i32>,
}
