// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};

/// 黑名单条目
///
/// 仅由管理操作创建和删除。`url_pattern`作为前缀与候选URL匹配。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlacklistEntry {
    /// 条目唯一标识符
    pub id: i64,
    /// 禁止的URL前缀
    pub url_pattern: String,
}
