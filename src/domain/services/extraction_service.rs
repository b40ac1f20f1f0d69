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

use chrono::{DateTime, Utc};
use scraper::{Html, Selector};
use serde_json::Value;
use tracing::{debug, warn};

use crate::domain::models::auction::{CarAuction, ImageSource};
use crate::domain::services::normalization::{
    battery_capacity_from_model_name, clean_brand_name, clean_model_name,
    engine_power_from_model_name, tesla_battery_capacity,
};
use crate::utils::url_utils;

/// 提取服务
///
/// 详情页的数据内嵌在一段script里的SPA store JSON中，
/// 该服务负责定位并解析store，再映射为规范化的拍卖记录。
pub struct ExtractionService;

impl ExtractionService {
    /// 用括号配平法从script内容中截取store JSON
    ///
    /// 从第一个`{`开始按花括号深度扫描，深度归零处截断并解析。
    /// 括号不配平或解析失败返回None。
    pub fn extract_store_objects(script_content: &str) -> Option<Value> {
        let start_idx = script_content.find('{')?;

        let mut depth = 0usize;
        for (idx, ch) in script_content[start_idx..].char_indices() {
            match ch {
                '{' => depth += 1,
                '}' => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        let json_str = &script_content[start_idx..start_idx + idx + 1];
                        return match serde_json::from_str(json_str) {
                            Ok(value) => Some(value),
                            Err(e) => {
                                warn!("JSON parse error in store data: {}", e);
                                None
                            }
                        };
                    }
                }
                _ => {}
            }
        }

        warn!("Bracket mismatch or invalid JSON structure in store data");
        None
    }

    /// 在文档的script元素中查找store数据
    pub fn find_store_data(document: &Html) -> Option<Value> {
        let selector = Selector::parse("script").unwrap();

        for script in document.select(&selector) {
            let text: String = script.text().collect();
            if text.contains("storeObjects") {
                if let Some(store) = Self::extract_store_objects(&text) {
                    return Some(store);
                }
            }
        }

        None
    }

    /// 从store数据中提取拍卖记录
    ///
    /// 遍历objectView.storeObjects取第一个非空对象。
    /// 无法得到拍卖ID时整条记录视为提取失败。
    pub fn extract_fields(store: &Value) -> Option<CarAuction> {
        let objects = store.pointer("/objectView/storeObjects")?.as_object()?;

        for item in objects.values() {
            if item.is_null() {
                continue;
            }
            let item = Some(item);

            let process_object = get(item, "processObject");
            let base_obj = get(process_object, "baseObject");
            let location_info = get(process_object, "locationInfo");
            let facility = get(location_info, "facility");
            let properties = get(process_object, "properties");
            let fuels = get(properties, "fuels").and_then(Value::as_array);
            let first_fuel = fuels.and_then(|f| f.first()).filter(|v| !v.is_null());
            let active_auction = get(item, "activeAuction");
            let winning_bid = get(item, "winningBid");

            let auction_url = string_field(item, "auctionUrl");
            let auction_id = auction_url
                .as_deref()
                .and_then(url_utils::auction_id_from_url);
            let Some(auction_id) = auction_id else {
                warn!("Failed to extract auction ID from store data");
                return None;
            };

            let model_name = string_field(base_obj, "modelName");

            // 燃料信息只在fuels非空时提取，功率优先取登记信息，
            // 取不到再从型号名兜底（仅马力）
            let mut fuel_code = None;
            let mut engine_power_hp = None;
            let mut engine_power = None;
            if let Some(fuel) = first_fuel {
                fuel_code = string_field(Some(fuel), "fuelCode");

                let authority = get(base_obj, "authorityRegisterInformation");
                let tech_spec = get(authority, "generalTechSpecification");
                let tech_fuels = get(tech_spec, "fuels").and_then(Value::as_array);
                let first_tech = tech_fuels.and_then(|f| f.first()).filter(|v| !v.is_null());

                if let Some(tech) = first_tech {
                    engine_power_hp = int_field(Some(tech), "enginePowerHp").map(|v| v as i32);
                    engine_power = int_field(Some(tech), "enginePower").map(|v| v as i32);
                } else if let Some(name) = &model_name {
                    engine_power_hp = engine_power_from_model_name(name);
                }
            }

            let mut battery_capacity = model_name
                .as_deref()
                .and_then(battery_capacity_from_model_name);
            if let (Some(capacity), Some(name)) = (battery_capacity, &model_name) {
                debug!("Extracted battery capacity {} kWh from {}", capacity, name);
            }

            let brand = string_field(properties, "brand")
                .map(|b| clean_brand_name(&b))
                .filter(|s| !s.is_empty());
            let model_name_presentation = model_name
                .as_deref()
                .map(clean_model_name)
                .filter(|s| !s.is_empty());

            // Tesla通常不标注容量，查表兜底
            if battery_capacity.is_none() && brand.as_deref() == Some("Tesla") {
                if let Some(name) = &model_name_presentation {
                    battery_capacity = tesla_battery_capacity(name);
                }
            }

            let auction = CarAuction {
                auction_id: auction_id.clone(),
                closed_at: string_field(item, "closedAt")
                    .as_deref()
                    .and_then(parse_datetime),
                published_at: string_field(item, "publishedAt")
                    .as_deref()
                    .and_then(parse_datetime),
                sold_for: numeric_field(item, "soldFor"),
                sell_method: string_field(item, "sellMethod"),
                slug: string_field(item, "slug"),
                auction_url,
                buy_now_amount: numeric_field(item, "buyNowAmount"),
                buy_now_available: bool_field(item, "buyNowAvailable"),
                preliminary_price: numeric_field(item, "preliminaryPrice"),
                is_sold_by_buy_now: bool_field(item, "isSoldByBuyNow"),
                winning_bid: numeric_field(winning_bid, "amount"),
                reservation_price_reached: bool_field(active_auction, "reservationPriceReached"),
                highest_bid: numeric_field(get(active_auction, "highestBid"), "amount"),
                electric_type: string_field(properties, "electricType"),
                odometer_reading: int_field(properties, "odometerReading"),
                body: string_field(base_obj, "body"),
                brand,
                family_name: string_field(properties, "familyName"),
                registration_plate: string_field(base_obj, "registrationPlate"),
                model_name,
                model_name_presentation,
                year: int_field(base_obj, "year").map(|v| v as i32),
                facility_post_code: string_field(facility, "postCode"),
                facility_city: string_field(facility, "city"),
                fuel_code,
                battery_capacity,
                range_city_wltp_drive: first_fuel
                    .and_then(|f| numeric_field(Some(f), "rangeCityWltpDrive")),
                range_wltp_drive: first_fuel.and_then(|f| numeric_field(Some(f), "rangeWltpDrive")),
                engine_power_hp,
                engine_power,
                gearbox: string_field(properties, "gearbox"),
                main_image_url: None,
                image_source: None,
                object_view_json: store.get("objectView").cloned(),
                base_object_type: string_field(base_obj, "baseObjectType"),
            };

            debug!("Extracted auction: {}", auction_id);
            return Some(auction);
        }

        None
    }

    /// 按固定回退顺序提取主图URL
    ///
    /// store previewImage → og:image → react-helmet变体
    /// → name属性变体 → 任意imgix.net meta
    pub fn extract_main_image(
        store: Option<&Value>,
        document: &Html,
    ) -> Option<(String, ImageSource)> {
        if let Some(objects) = store
            .and_then(|s| s.pointer("/objectView/storeObjects"))
            .and_then(Value::as_object)
        {
            for item in objects.values() {
                if item.is_null() {
                    continue;
                }
                if let Some(url) = item
                    .get("previewImage")
                    .and_then(Value::as_str)
                    .filter(|s| !s.is_empty())
                {
                    return Some((url.to_string(), ImageSource::StoreDataPreviewImage));
                }
            }
        }

        let og = Selector::parse(r#"meta[property="og:image"]"#).unwrap();
        if let Some(content) = first_content(document, &og) {
            return Some((content, ImageSource::MetaOgImage));
        }

        let helmet =
            Selector::parse(r#"meta[property="og:image"][data-react-helmet="true"]"#).unwrap();
        if let Some(content) = first_content(document, &helmet) {
            return Some((content, ImageSource::MetaReactHelmet));
        }

        let name_og = Selector::parse(r#"meta[name="og:image"]"#).unwrap();
        if let Some(content) = first_content(document, &name_og) {
            return Some((content, ImageSource::MetaNameOgImage));
        }

        let any_meta = Selector::parse("meta").unwrap();
        for element in document.select(&any_meta) {
            if let Some(content) = element.value().attr("content") {
                if content.contains("imgix.net") {
                    return Some((content.to_string(), ImageSource::MetaImgixNet));
                }
            }
        }

        None
    }
}

// 与上游行为一致：只看选择器命中的第一个元素
fn first_content(document: &Html, selector: &Selector) -> Option<String> {
    document
        .select(selector)
        .next()
        .and_then(|el| el.value().attr("content"))
        .filter(|c| !c.is_empty())
        .map(str::to_string)
}

fn get<'a>(value: Option<&'a Value>, key: &str) -> Option<&'a Value> {
    value.and_then(|v| v.get(key)).filter(|v| !v.is_null())
}

fn string_field(value: Option<&Value>, key: &str) -> Option<String> {
    get(value, key)
        .and_then(Value::as_str)
        .map(str::to_string)
        .filter(|s| !s.is_empty())
}

// 数字字段兼容数值和数字字符串，零视为缺失
fn numeric_field(value: Option<&Value>, key: &str) -> Option<f64> {
    get(value, key)
        .and_then(|v| match v {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.parse::<f64>().ok(),
            _ => None,
        })
        .filter(|v| *v != 0.0)
}

fn int_field(value: Option<&Value>, key: &str) -> Option<i64> {
    numeric_field(value, key).map(|v| v as i64)
}

fn bool_field(value: Option<&Value>, key: &str) -> bool {
    get(value, key).and_then(Value::as_bool).unwrap_or(false)
}

/// 解析store中的时间戳字符串
///
/// Z后缀统一规范为+00:00偏移
pub fn parse_datetime(raw: &str) -> Option<DateTime<Utc>> {
    let normalized = raw.replace('Z', "+00:00");
    DateTime::parse_from_rfc3339(&normalized)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

#[cfg(test)]
#[path = "extraction_service_test.rs"]
mod tests;
