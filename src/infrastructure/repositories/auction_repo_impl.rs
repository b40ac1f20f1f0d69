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

use crate::domain::models::auction::CarAuction;
use crate::domain::repositories::auction_repository::{AuctionRepository, UpsertOutcome};
use crate::infrastructure::database::entities::car_auction as auction_entity;
use crate::utils::errors::RepositoryError;
use async_trait::async_trait;
use chrono::Utc;
use sea_orm::*;
use std::sync::Arc;

/// 拍卖仓库实现
pub struct AuctionRepositoryImpl {
    /// 数据库连接
    db: Arc<DatabaseConnection>,
}

impl AuctionRepositoryImpl {
    /// 创建新的拍卖仓库实例
    ///
    /// # 参数
    ///
    /// * `db` - 数据库连接
    ///
    /// # 返回值
    ///
    /// 返回新的拍卖仓库实例
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AuctionRepository for AuctionRepositoryImpl {
    async fn upsert(&self, auction: &CarAuction) -> Result<UpsertOutcome, RepositoryError> {
        if auction.auction_id.is_empty() {
            return Err(RepositoryError::InvalidParameter(
                "auction_id不能为空".to_string(),
            ));
        }

        let existing = auction_entity::Entity::find_by_id(auction.auction_id.clone())
            .one(self.db.as_ref())
            .await?;

        match existing {
            Some(model) => {
                let mut active: auction_entity::ActiveModel = model.into();
                apply_fields(auction, &mut active);
                active.updated_at = Set(Utc::now().into());
                active.update(self.db.as_ref()).await?;
                Ok(UpsertOutcome::Updated)
            }
            None => {
                let now = Utc::now();
                let mut active = auction_entity::ActiveModel {
                    auction_id: Set(auction.auction_id.clone()),
                    created_at: Set(now.into()),
                    updated_at: Set(now.into()),
                    ..Default::default()
                };
                apply_fields(auction, &mut active);
                active.insert(self.db.as_ref()).await?;
                Ok(UpsertOutcome::Created)
            }
        }
    }

    async fn find_by_auction_id(
        &self,
        auction_id: &str,
    ) -> Result<Option<CarAuction>, RepositoryError> {
        let model = auction_entity::Entity::find_by_id(auction_id.to_string())
            .one(self.db.as_ref())
            .await?;

        Ok(model.map(to_domain))
    }
}

// auction_id与时间戳由调用方决定，这里只覆盖业务字段
fn apply_fields(auction: &CarAuction, active: &mut auction_entity::ActiveModel) {
    active.closed_at = Set(auction.closed_at.map(Into::into));
    active.published_at = Set(auction.published_at.map(Into::into));
    active.sold_for = Set(auction.sold_for);
    active.sell_method = Set(auction.sell_method.clone());
    active.slug = Set(auction.slug.clone());
    active.auction_url = Set(auction.auction_url.clone());
    active.buy_now_amount = Set(auction.buy_now_amount);
    active.buy_now_available = Set(auction.buy_now_available);
    active.preliminary_price = Set(auction.preliminary_price);
    active.is_sold_by_buy_now = Set(auction.is_sold_by_buy_now);
    active.winning_bid = Set(auction.winning_bid);
    active.reservation_price_reached = Set(auction.reservation_price_reached);
    active.highest_bid = Set(auction.highest_bid);
    active.electric_type = Set(auction.electric_type.clone());
    active.odometer_reading = Set(auction.odometer_reading);
    active.body = Set(auction.body.clone());
    active.brand = Set(auction.brand.clone());
    active.family_name = Set(auction.family_name.clone());
    active.registration_plate = Set(auction.registration_plate.clone());
    active.model_name = Set(auction.model_name.clone());
    active.model_name_presentation = Set(auction.model_name_presentation.clone());
    active.year = Set(auction.year);
    active.facility_post_code = Set(auction.facility_post_code.clone());
    active.facility_city = Set(auction.facility_city.clone());
    active.fuel_code = Set(auction.fuel_code.clone());
    active.battery_capacity = Set(auction.battery_capacity);
    active.range_city_wltp_drive = Set(auction.range_city_wltp_drive);
    active.range_wltp_drive = Set(auction.range_wltp_drive);
    active.engine_power_hp = Set(auction.engine_power_hp);
    active.engine_power = Set(auction.engine_power);
    active.gearbox = Set(auction.gearbox.clone());
    active.main_image_url = Set(auction.main_image_url.clone());
    active.image_source = Set(auction.image_source.map(|s| s.as_str().to_string()));
    active.object_view_json = Set(auction.object_view_json.clone());
    active.base_object_type = Set(auction.base_object_type.clone());
}

fn to_domain(model: auction_entity::Model) -> CarAuction {
    CarAuction {
        auction_id: model.auction_id,
        closed_at: model.closed_at.map(|dt| dt.into()),
        published_at: model.published_at.map(|dt| dt.into()),
        sold_for: model.sold_for,
        sell_method: model.sell_method,
        slug: model.slug,
        auction_url: model.auction_url,
        buy_now_amount: model.buy_now_amount,
        buy_now_available: model.buy_now_available,
        preliminary_price: model.preliminary_price,
        is_sold_by_buy_now: model.is_sold_by_buy_now,
        winning_bid: model.winning_bid,
        reservation_price_reached: model.reservation_price_reached,
        highest_bid: model.highest_bid,
        electric_type: model.electric_type,
        odometer_reading: model.odometer_reading,
        body: model.body,
        brand: model.brand,
        family_name: model.family_name,
        registration_plate: model.registration_plate,
        model_name: model.model_name,
        model_name_presentation: model.model_name_presentation,
        year: model.year,
        facility_post_code: model.facility_post_code,
        facility_city: model.facility_city,
        fuel_code: model.fuel_code,
        battery_capacity: model.battery_capacity,
        range_city_wltp_drive: model.range_city_wltp_drive,
        range_wltp_drive: model.range_wltp_drive,
        engine_power_hp: model.engine_power_hp,
        engine_power: model.engine_power,
        gearbox: model.gearbox,
        main_image_url: model.main_image_url,
        image_source: model.image_source.and_then(|s| s.parse().ok()),
        object_view_json: model.object_view_json,
        base_object_type: model.base_object_type,
    }
}
