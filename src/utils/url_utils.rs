// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use url::Url;

/// 将原始提交规范化为目录根URL
///
/// 先补全结尾斜杠，再解析出最深目录：文件部分被剥离，
/// 目录部分保留。`ftp://`地址和用户主页路径（`/~`开头）
/// 原样返回。无法解析的字符串仅补全斜杠，由后续的语法
/// 闸门负责拒绝。幂等。
pub fn normalize_url(raw: &str) -> String {
    let slashed = ensure_trailing_slash(raw);
    top_directory(&slashed)
}

fn ensure_trailing_slash(raw: &str) -> String {
    if raw.ends_with('/') {
        raw.to_string()
    } else {
        format!("{}/", raw)
    }
}

/// 解析URL所指向的最深目录
fn top_directory(url_str: &str) -> String {
    if url_str.starts_with("ftp://") {
        return url_str.to_string();
    }

    let Ok(url) = Url::parse(url_str) else {
        return url_str.to_string();
    };

    if url.path().starts_with("/~") {
        return url_str.to_string();
    }

    match url.join(".") {
        Ok(dir) => dir.to_string(),
        Err(_) => url_str.to_string(),
    }
}
