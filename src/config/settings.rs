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

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// 应用程序配置设置
///
/// 包含准入、探测、批量提交、重扫描和数据库等所有配置项
#[derive(Debug, Deserialize)]
pub struct Settings {
    /// 准入管道配置
    pub admission: AdmissionSettings,
    /// 开放目录探测配置
    pub probe: ProbeSettings,
    /// 批量提交配置
    pub bulk: BulkSettings,
    /// 重新扫描配置
    pub rescan: RescanSettings,
    /// 数据库配置
    pub database: DatabaseSettings,
}

/// 准入管道配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct AdmissionSettings {
    /// 新任务的默认优先级（数值越小越优先）
    pub default_priority: i32,
    /// 允许提交的URL scheme
    pub allowed_schemes: Vec<String>,
    /// 是否同时拒绝已注册站点的父目录
    pub strict_containment: bool,
}

/// 开放目录探测配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct ProbeSettings {
    /// 探测请求超时时间（秒）
    pub timeout_secs: u64,
    /// 是否将探测超时与探测否定结果区分开
    pub distinguish_timeout: bool,
}

/// 批量提交配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct BulkSettings {
    /// 单批最少URL数量
    pub min_urls: usize,
    /// 单批最多URL数量
    pub max_urls: usize,
    /// 并发工作器数量
    pub workers: usize,
}

/// 重新扫描配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct RescanSettings {
    /// 同一网站已有待处理任务时的排队策略
    pub policy: RescanPolicy,
}

/// 重扫描排队策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RescanPolicy {
    /// 总是追加新任务
    AlwaysAdd,
    /// 已有待处理任务时跳过排队
    Suppress,
}

/// 数据库配置设置
///
/// 所有连接池参数都有默认值，配置加载后保证存在
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    /// 数据库连接URL
    pub url: String,
    /// 最大连接数
    pub max_connections: u32,
    /// 最小连接数
    pub min_connections: u32,
    /// 连接超时时间（秒）
    pub connect_timeout: u64,
    /// 空闲连接超时时间（秒）
    pub idle_timeout: u64,
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 从环境变量加载配置，支持默认值
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载的配置
    /// * `Err(ConfigError)` - 配置加载失败
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        let builder = Config::builder()
            // Default admission settings
            .set_default("admission.default_priority", 1)?
            .set_default("admission.allowed_schemes", vec!["http", "https", "ftp"])?
            .set_default("admission.strict_containment", false)?
            // Default probe settings
            .set_default("probe.timeout_secs", 30)?
            .set_default("probe.distinguish_timeout", false)?
            // Default bulk settings
            .set_default("bulk.min_urls", 1)?
            .set_default("bulk.max_urls", 1000)?
            .set_default("bulk.workers", 6)?
            // Default rescan settings
            .set_default("rescan.policy", "always_add")?
            // Default DB pool settings
            .set_default("database.url", "sqlite::memory:")?
            .set_default("database.max_connections", 100)?
            .set_default("database.min_connections", 10)?
            .set_default("database.connect_timeout", 10)?
            .set_default("database.idle_timeout", 300)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::with_prefix("ODGATE").separator("__"));

        builder.build()?.try_deserialize()
    }
}
