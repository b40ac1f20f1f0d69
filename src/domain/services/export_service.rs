// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Utc};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::domain::models::auction::CarAuction;
use crate::utils::csv;

/// CSV表头，列顺序与car_auctions表保持一致
const CSV_HEADER: &[&str] = &[
    "auction_id",
    "closed_at",
    "published_at",
    "sold_for",
    "sell_method",
    "slug",
    "auction_url",
    "buy_now_amount",
    "buy_now_available",
    "preliminary_price",
    "is_sold_by_buy_now",
    "winning_bid",
    "reservation_price_reached",
    "highest_bid",
    "electric_type",
    "odometer_reading",
    "body",
    "brand",
    "family_name",
    "registration_plate",
    "model_name",
    "model_name_presentation",
    "year",
    "facility_post_code",
    "facility_city",
    "fuel_code",
    "battery_capacity",
    "range_city_wltp_drive",
    "range_wltp_drive",
    "engine_power_hp",
    "engine_power",
    "gearbox",
    "main_image_url",
    "image_source",
];

/// 导出服务
///
/// 限定窗口运行时把收集到的记录另存为带时间戳的CSV文件
pub struct ExportService;

impl ExportService {
    /// 写出CSV文件，返回文件路径
    pub fn export_records(
        records: &[CarAuction],
        dir: &Path,
        now: DateTime<Utc>,
    ) -> io::Result<PathBuf> {
        fs::create_dir_all(dir)?;

        let filename = format!("cars_{}.csv", now.format("%Y%m%d_%H%M%S"));
        let path = dir.join(filename);

        let header: Vec<String> = CSV_HEADER.iter().map(|h| h.to_string()).collect();
        let rows: Vec<Vec<String>> = records.iter().map(record_row).collect();
        fs::write(&path, csv::rows_to_string(&header, &rows))?;

        info!("CSV file created: {}", path.display());
        Ok(path)
    }
}

fn record_row(auction: &CarAuction) -> Vec<String> {
    vec![
        auction.auction_id.clone(),
        opt_datetime(&auction.closed_at),
        opt_datetime(&auction.published_at),
        opt_display(&auction.sold_for),
        opt_clone(&auction.sell_method),
        opt_clone(&auction.slug),
        opt_clone(&auction.auction_url),
        opt_display(&auction.buy_now_amount),
        auction.buy_now_available.to_string(),
        opt_display(&auction.preliminary_price),
        auction.is_sold_by_buy_now.to_string(),
        opt_display(&auction.winning_bid),
        auction.reservation_price_reached.to_string(),
        opt_display(&auction.highest_bid),
        opt_clone(&auction.electric_type),
        opt_display(&auction.odometer_reading),
        opt_clone(&auction.body),
        opt_clone(&auction.brand),
        opt_clone(&auction.family_name),
        opt_clone(&auction.registration_plate),
        opt_clone(&auction.model_name),
        opt_clone(&auction.model_name_presentation),
        opt_display(&auction.year),
        opt_clone(&auction.facility_post_code),
        opt_clone(&auction.facility_city),
        opt_clone(&auction.fuel_code),
        opt_display(&auction.battery_capacity),
        opt_display(&auction.range_city_wltp_drive),
        opt_display(&auction.range_wltp_drive),
        opt_display(&auction.engine_power_hp),
        opt_display(&auction.engine_power),
        opt_clone(&auction.gearbox),
        opt_clone(&auction.main_image_url),
        auction
            .image_source
            .map(|s| s.as_str().to_string())
            .unwrap_or_default(),
    ]
}

fn opt_clone(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

fn opt_display<T: ToString>(value: &Option<T>) -> String {
    value.as_ref().map(T::to_string).unwrap_or_default()
}

fn opt_datetime(value: &Option<DateTime<Utc>>) -> String {
    value.map(|dt| dt.to_rfc3339()).unwrap_or_default()
}
