// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! 车辆字段规范化规则
//!
//! 型号名中混有马力、电池容量等标注，入库前需要清洗。
//! 规则与上游站点的标注习惯绑定，例如"(228hk)"、"80,0 kWh"。

use once_cell::sync::Lazy;
use regex::Regex;

static PAREN_HP_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*\(\d+hk\)").expect("valid regex"));
static BARE_HP_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+\d+hk\b").expect("valid regex"));
static KWH_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\s+\d+(?:[,.]\d+)?\s*kWh\b").expect("valid regex"));
static COMMA_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r",\s*").expect("valid regex"));
static HP_CAPTURE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:\((\d+)hk\)|(\d+)hk)").expect("valid regex"));
static KWH_CAPTURE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(\d+(?:[,.]\d+)?)\s*kWh").expect("valid regex"));

/// Tesla车型的电池容量查找表（kWh）
///
/// 站点对Tesla通常不在型号名里标注容量，按清洗后的型号名兜底
const TESLA_CAPACITIES: &[(&str, f64)] = &[
    ("Model 3 Long Range Dual Motor AWD", 82.0),
    ("Model 3 Performance AWD", 82.0),
    ("Model 3 Standard Range RWD", 55.0),
    ("Model S 100D", 100.0),
    ("Model S 60", 60.0),
    ("Model S 75D", 75.0),
    ("Model S 85D", 85.0),
    ("Model S 90D", 90.0),
    ("Model S P100D", 100.0),
    ("Model S P85", 85.0),
    ("Model X LR AWD", 100.0),
    ("Model Y Long Range Dual Motor AWD", 75.0),
    ("Model Y Performance Dual Motor AWD", 75.0),
];

/// 清洗型号名
///
/// 移除马力标注（"(228hk)"、"228hk"）与电池容量标注（"80,0 kWh"），
/// 并把逗号分隔折叠为空格
pub fn clean_model_name(model_name: &str) -> String {
    let cleaned = PAREN_HP_RE.replace_all(model_name, "");
    let cleaned = BARE_HP_RE.replace_all(&cleaned, "");
    let cleaned = KWH_RE.replace_all(&cleaned, "");
    COMMA_RE
        .replace_all(cleaned.trim(), " ")
        .trim()
        .to_string()
}

/// 清洗品牌名（折叠逗号分隔）
pub fn clean_brand_name(brand_name: &str) -> String {
    COMMA_RE
        .replace_all(brand_name.trim(), " ")
        .trim()
        .to_string()
}

/// 从型号名提取电池容量（kWh）
///
/// 兼容逗号小数点（"80,0 kWh"）与无空格写法（"39kWh"）
pub fn battery_capacity_from_model_name(model_name: &str) -> Option<f64> {
    KWH_CAPTURE_RE
        .captures(model_name)
        .and_then(|caps| caps[1].replace(',', ".").parse::<f64>().ok())
}

/// 从型号名提取马力
pub fn engine_power_from_model_name(model_name: &str) -> Option<i32> {
    HP_CAPTURE_RE.captures(model_name).and_then(|caps| {
        caps.get(1)
            .or_else(|| caps.get(2))
            .and_then(|m| m.as_str().parse::<i32>().ok())
    })
}

/// 按清洗后的型号名查Tesla电池容量
pub fn tesla_battery_capacity(model_name_short: &str) -> Option<f64> {
    let cleaned = model_name_short.replace("Tesla ", "");
    let cleaned = cleaned.trim();
    TESLA_CAPACITIES
        .iter()
        .find(|(name, _)| *name == cleaned)
        .map(|(_, capacity)| *capacity)
}
