// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use scraper::{Html, Selector};
use std::collections::BTreeSet;
use tracing::debug;
use url::Url;

use crate::utils::url_utils;

/// 列表服务
///
/// 从已结束拍卖列表页中收集详情页URL
pub struct ListingService;

impl ListingService {
    /// 收集详情页URL
    ///
    /// 只匹配指向/auktioner/的链接，相对路径按站点根解析。
    /// 结果去重并排序，保证爬取窗口在多次运行间落在相同的URL上。
    pub fn collect_detail_urls(document: &Html, base_url: &Url) -> Vec<String> {
        let selector = Selector::parse(r#"a[href^="/auktioner/"]"#).unwrap();

        let mut urls = BTreeSet::new();
        for element in document.select(&selector) {
            if let Some(href) = element.value().attr("href") {
                if let Ok(absolute) = url_utils::resolve_url(base_url, href) {
                    let url_str = absolute.to_string();
                    if url_str.starts_with("http") {
                        urls.insert(url_str);
                    }
                }
            }
        }

        debug!("Collected {} unique detail URLs", urls.len());
        urls.into_iter().collect()
    }
}
