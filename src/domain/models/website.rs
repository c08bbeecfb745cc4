// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 网站实体
///
/// 表示一个已提交并通过准入检查的开放目录站点。URL始终是
/// 规范化后的目录根（以斜杠结尾）。不变量：任意两个未删除的
/// 网站之间不存在URL前缀包含关系。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Website {
    /// 网站唯一标识符，由存储层在插入时分配
    pub id: i64,
    /// 规范化的目录根URL，以斜杠结尾
    pub url: String,
    /// 提交者指纹，由请求地址、转发链和用户代理拼接而成
    pub submitter_fingerprint: String,
    /// 网站状态，跟踪站点在其生命周期中的当前阶段
    pub status: WebsiteStatus,
    /// 最后修改时间
    pub last_modified: DateTime<Utc>,
}

/// 网站状态枚举
///
/// 状态转换遵循以下流程：
/// Pending → Active → Blacklisted/Deleted
/// 首次爬取成功由外部爬取器置为Active，后续变更由管理操作驱动。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum WebsiteStatus {
    /// 已准入，等待首次爬取
    #[default]
    Pending,
    /// 已被爬取器确认存活
    Active,
    /// 已被管理员列入黑名单
    Blacklisted,
    /// 已删除
    Deleted,
}

impl fmt::Display for WebsiteStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            WebsiteStatus::Pending => write!(f, "pending"),
            WebsiteStatus::Active => write!(f, "active"),
            WebsiteStatus::Blacklisted => write!(f, "blacklisted"),
            WebsiteStatus::Deleted => write!(f, "deleted"),
        }
    }
}

impl FromStr for WebsiteStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(WebsiteStatus::Pending),
            "active" => Ok(WebsiteStatus::Active),
            "blacklisted" => Ok(WebsiteStatus::Blacklisted),
            "deleted" => Ok(WebsiteStatus::Deleted),
            _ => Err(()),
        }
    }
}

impl Website {
    /// 创建一个新的待插入网站记录
    ///
    /// # 参数
    ///
    /// * `url` - 规范化的目录根URL
    /// * `submitter_fingerprint` - 提交者指纹
    ///
    /// # 返回值
    ///
    /// 返回id为0的新网站实例，真实id由存储层在插入时分配
    pub fn new(url: String, submitter_fingerprint: String) -> Self {
        Self {
            id: 0,
            url,
            submitter_fingerprint,
            status: WebsiteStatus::Pending,
            last_modified: Utc::now(),
        }
    }
}
