// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use once_cell::sync::Lazy;
use regex::Regex;
use url::{ParseError, Url};

// 拍卖URL以"-<数字>"结尾，数字即拍卖ID
static AUCTION_ID_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"-(\d+)$").expect("valid regex"));

/// 将可能为相对路径的URL转换为绝对路径URL
pub fn resolve_url(base_url: &Url, path: &str) -> Result<Url, ParseError> {
    base_url.join(path)
}

/// 从拍卖URL中提取拍卖ID
pub fn auction_id_from_url(auction_url: &str) -> Option<String> {
    AUCTION_ID_RE
        .captures(auction_url.trim_end_matches('/'))
        .map(|caps| caps[1].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_absolute_url() {
        let base = Url::parse("https://www.kvd.se/stangda-auktioner").unwrap();
        let path = "https://t.co/c";
        assert_eq!(resolve_url(&base, path).unwrap().as_str(), "https://t.co/c");
    }

    #[test]
    fn test_resolve_root_relative_url() {
        let base = Url::parse("https://www.kvd.se/stangda-auktioner").unwrap();
        let path = "/auktioner/volvo-v60-123456";
        assert_eq!(
            resolve_url(&base, path).unwrap().as_str(),
            "https://www.kvd.se/auktioner/volvo-v60-123456"
        );
    }

    #[test]
    fn test_auction_id_from_url() {
        assert_eq!(
            auction_id_from_url("https://www.kvd.se/auktioner/volvo-v60-123456"),
            Some("123456".to_string())
        );
        assert_eq!(
            auction_id_from_url("https://www.kvd.se/auktioner/tesla-model-3-99"),
            Some("99".to_string())
        );
    }

    #[test]
    fn test_auction_id_from_url_trailing_slash() {
        assert_eq!(
            auction_id_from_url("https://www.kvd.se/auktioner/volvo-v60-123456/"),
            Some("123456".to_string())
        );
    }

    #[test]
    fn test_auction_id_missing() {
        assert_eq!(auction_id_from_url("https://www.kvd.se/auktioner/volvo"), None);
        assert_eq!(auction_id_from_url(""), None);
    }
}
