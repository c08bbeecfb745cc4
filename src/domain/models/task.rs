// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 爬取任务
///
/// 表示一个等待爬取工作器拉取的工作单元。任务在出队时被销毁，
/// 同一网站允许存在多个任务（例如重扫描与尚未开始的首次爬取共存）。
/// 序列化形状即持久化存储的线格式。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// 所属网站ID
    pub website_id: i64,
    /// 目标URL，任务要爬取的目录根
    pub url: String,
    /// 任务优先级，数值越小越优先
    pub priority: i32,
    /// 入队时间，同优先级任务的先后顺序依据
    pub enqueued_at: DateTime<Utc>,
}

impl Task {
    /// 创建一个新的爬取任务
    ///
    /// # 参数
    ///
    /// * `website_id` - 所属网站ID
    /// * `url` - 目标URL
    /// * `priority` - 任务优先级
    ///
    /// # 返回值
    ///
    /// 返回入队时间为当前时刻的新任务实例
    pub fn new(website_id: i64, url: String, priority: i32) -> Self {
        Self {
            website_id,
            url,
            priority,
            enqueued_at: Utc::now(),
        }
    }
}
