// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::{redirect, Client};
use scraper::{Html, Selector};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;
use url::Url;

/// 探测错误类型
#[derive(Error, Debug)]
pub enum ProbeError {
    /// 请求错误
    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),
    /// 探测超时
    #[error("Probe timed out")]
    TimedOut,
}

/// 开放目录探测器接口
///
/// 反垃圾闸门使用的启发式网络检查：判断URL是否大概率是
/// 一个裸目录列表页面
#[async_trait]
pub trait DirectoryProbe: Send + Sync {
    /// 检查URL是否是开放目录
    async fn is_open_directory(&self, url: &str, timeout: Duration) -> Result<bool, ProbeError>;
}

static TITLE_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("title").expect("static selector"));
static ANCHOR_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a[href]").expect("static selector"));
static APP_LAYER_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("script, form").expect("static selector"));
static INDEX_TITLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^\s*index of\s").expect("static regex"));

/// 基于HTTP的开放目录探测器
///
/// 抓取页面并检查目录列表的典型特征：`Index of`标题、
/// 父目录链接、或由相对链接构成且不含脚本/表单的页面。
/// 重定向视为非目录页面。
#[derive(Clone)]
pub struct HttpDirectoryProbe {
    /// HTTP客户端
    client: Client,
}

impl Default for HttpDirectoryProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpDirectoryProbe {
    /// 创建新的探测器实例
    pub fn new() -> Self {
        let client = Client::builder()
            .user_agent("odgate-bot/1.0")
            .redirect(redirect::Policy::none())
            .danger_accept_invalid_certs(true)
            .build()
            .expect("probe client");
        Self { client }
    }
}

#[async_trait]
impl DirectoryProbe for HttpDirectoryProbe {
    async fn is_open_directory(&self, url: &str, timeout: Duration) -> Result<bool, ProbeError> {
        let Ok(parsed) = Url::parse(url) else {
            return Ok(false);
        };

        // Only HTTP(S) listings can be probed; ftp submissions are gated
        // by configuration upstream and report negative here.
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Ok(false);
        }

        let response = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .await
            .map_err(map_timeout)?;

        if response.status() != reqwest::StatusCode::OK {
            debug!(url, status = %response.status(), "probe rejected non-200 response");
            return Ok(false);
        }

        let body = response.text().await.map_err(map_timeout)?;
        Ok(looks_like_listing(&body))
    }
}

fn map_timeout(err: reqwest::Error) -> ProbeError {
    if err.is_timeout() {
        ProbeError::TimedOut
    } else {
        ProbeError::Request(err)
    }
}

/// 判断HTML主体是否呈现目录列表特征
fn looks_like_listing(body: &str) -> bool {
    let document = Html::parse_document(body);

    if let Some(title) = document.select(&TITLE_SELECTOR).next() {
        let text: String = title.text().collect();
        if INDEX_TITLE.is_match(&text) {
            return true;
        }
    }

    let mut anchors = 0usize;
    let mut relative = 0usize;
    for anchor in document.select(&ANCHOR_SELECTOR) {
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };
        let text: String = anchor.text().collect();
        if href == "../" || href.ends_with("/../") || text.trim() == "Parent Directory" {
            return true;
        }
        anchors += 1;
        if Url::parse(href).is_err() && !href.contains('?') {
            relative += 1;
        }
    }

    // Listing generators emit plain relative links and no application layer.
    let has_app_layer = document.select(&APP_LAYER_SELECTOR).next().is_some();
    anchors > 0 && relative * 2 > anchors && !has_app_layer
}
