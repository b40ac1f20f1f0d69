// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// 主图URL的来源
///
/// 主图按固定顺序从多个来源回退查找，持久化时记录命中的来源
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageSource {
    /// SPA store数据中的previewImage字段
    StoreDataPreviewImage,
    /// og:image meta标签
    MetaOgImage,
    /// 带data-react-helmet属性的og:image meta标签
    MetaReactHelmet,
    /// name属性形式的og:image meta标签
    MetaNameOgImage,
    /// 任意content包含imgix.net的meta标签
    MetaImgixNet,
}

impl ImageSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageSource::StoreDataPreviewImage => "store_data_preview_image",
            ImageSource::MetaOgImage => "meta_og_image",
            ImageSource::MetaReactHelmet => "meta_react_helmet",
            ImageSource::MetaNameOgImage => "meta_name_og_image",
            ImageSource::MetaImgixNet => "meta_imgix_net",
        }
    }
}

impl FromStr for ImageSource {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "store_data_preview_image" => Ok(ImageSource::StoreDataPreviewImage),
            "meta_og_image" => Ok(ImageSource::MetaOgImage),
            "meta_react_helmet" => Ok(ImageSource::MetaReactHelmet),
            "meta_name_og_image" => Ok(ImageSource::MetaNameOgImage),
            "meta_imgix_net" => Ok(ImageSource::MetaImgixNet),
            _ => Err(()),
        }
    }
}

/// 车辆拍卖记录
///
/// 从拍卖详情页的SPA store数据中提取并规范化的完整记录，
/// 以拍卖ID为主键写入car_auctions表。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CarAuction {
    /// 拍卖ID，取自拍卖URL结尾的数字
    pub auction_id: String,
    /// 拍卖结束时间
    pub closed_at: Option<DateTime<Utc>>,
    /// 拍卖发布时间
    pub published_at: Option<DateTime<Utc>>,
    /// 成交价
    pub sold_for: Option<f64>,
    /// 销售方式
    pub sell_method: Option<String>,
    pub slug: Option<String>,
    /// 拍卖详情页URL
    pub auction_url: Option<String>,
    /// 立即购买价格
    pub buy_now_amount: Option<f64>,
    /// 是否可立即购买
    pub buy_now_available: bool,
    /// 预估价格
    pub preliminary_price: Option<f64>,
    /// 是否以立即购买成交
    pub is_sold_by_buy_now: bool,
    /// 中标出价
    pub winning_bid: Option<f64>,
    /// 是否达到保留价
    pub reservation_price_reached: bool,
    /// 最高出价
    pub highest_bid: Option<f64>,
    /// 电动类型
    pub electric_type: Option<String>,
    /// 里程表读数
    pub odometer_reading: Option<i64>,
    /// 车身类型
    pub body: Option<String>,
    /// 品牌（已规范化）
    pub brand: Option<String>,
    pub family_name: Option<String>,
    /// 车牌号
    pub registration_plate: Option<String>,
    /// 原始型号名
    pub model_name: Option<String>,
    /// 规范化后的展示型号名
    pub model_name_presentation: Option<String>,
    /// 年款
    pub year: Option<i32>,
    pub facility_post_code: Option<String>,
    pub facility_city: Option<String>,
    /// 燃料类型（取首个燃料项）
    pub fuel_code: Option<String>,
    /// 电池容量（kWh），从型号名解析或Tesla查表
    pub battery_capacity: Option<f64>,
    pub range_city_wltp_drive: Option<f64>,
    pub range_wltp_drive: Option<f64>,
    /// 发动机功率（马力）
    pub engine_power_hp: Option<i32>,
    /// 发动机功率（kW）
    pub engine_power: Option<i32>,
    /// 变速箱类型
    pub gearbox: Option<String>,
    /// 主图URL
    pub main_image_url: Option<String>,
    /// 主图来源
    pub image_source: Option<ImageSource>,
    /// 原始objectView JSON快照
    pub object_view_json: Option<serde_json::Value>,
    pub base_object_type: Option<String>,
}
