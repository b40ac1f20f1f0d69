// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "car_auctions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub auction_id: String,
    pub closed_at: Option<ChronoDateTimeWithTimeZone>,
    pub published_at: Option<ChronoDateTimeWithTimeZone>,
    pub sold_for: Option<f64>,
    pub sell_method: Option<String>,
    pub slug: Option<String>,
    pub auction_url: Option<String>,
    pub buy_now_amount: Option<f64>,
    pub buy_now_available: bool,
    pub preliminary_price: Option<f64>,
    pub is_sold_by_buy_now: bool,
    pub winning_bid: Option<f64>,
    pub reservation_price_reached: bool,
    pub highest_bid: Option<f64>,
    pub electric_type: Option<String>,
    pub odometer_reading: Option<i64>,
    pub body: Option<String>,
    pub brand: Option<String>,
    pub family_name: Option<String>,
    pub registration_plate: Option<String>,
    pub model_name: Option<String>,
    pub model_name_presentation: Option<String>,
    pub year: Option<i32>,
    pub facility_post_code: Option<String>,
    pub facility_city: Option<String>,
    pub fuel_code: Option<String>,
    pub battery_capacity: Option<f64>,
    pub range_city_wltp_drive: Option<f64>,
    pub range_wltp_drive: Option<f64>,
    pub engine_power_hp: Option<i32>,
    pub engine_power: Option<i32>,
    pub gearbox: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub main_image_url: Option<String>,
    pub image_source: Option<String>,
    #[sea_orm(column_type = "JsonBinary", nullable)]
    pub object_view_json: Option<Json>,
    pub base_object_type: Option<String>,
    pub created_at: ChronoDateTimeWithTimeZone,
    pub updated_at: ChronoDateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
