use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CarAuctions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CarAuctions::AuctionId)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CarAuctions::ClosedAt).timestamp_with_time_zone())
                    .col(ColumnDef::new(CarAuctions::PublishedAt).timestamp_with_time_zone())
                    .col(ColumnDef::new(CarAuctions::SoldFor).double())
                    .col(ColumnDef::new(CarAuctions::SellMethod).string())
                    .col(ColumnDef::new(CarAuctions::Slug).string())
                    .col(ColumnDef::new(CarAuctions::AuctionUrl).string())
                    .col(ColumnDef::new(CarAuctions::BuyNowAmount).double())
                    .col(
                        ColumnDef::new(CarAuctions::BuyNowAvailable)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(CarAuctions::PreliminaryPrice).double())
                    .col(
                        ColumnDef::new(CarAuctions::IsSoldByBuyNow)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(CarAuctions::WinningBid).double())
                    .col(
                        ColumnDef::new(CarAuctions::ReservationPriceReached)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(CarAuctions::HighestBid).double())
                    .col(ColumnDef::new(CarAuctions::ElectricType).string())
                    .col(ColumnDef::new(CarAuctions::OdometerReading).big_integer())
                    .col(ColumnDef::new(CarAuctions::Body).string())
                    .col(ColumnDef::new(CarAuctions::Brand).string())
                    .col(ColumnDef::new(CarAuctions::FamilyName).string())
                    .col(ColumnDef::new(CarAuctions::RegistrationPlate).string())
                    .col(ColumnDef::new(CarAuctions::ModelName).string())
                    .col(ColumnDef::new(CarAuctions::ModelNamePresentation).string())
                    .col(ColumnDef::new(CarAuctions::Year).integer())
                    .col(ColumnDef::new(CarAuctions::FacilityPostCode).string())
                    .col(ColumnDef::new(CarAuctions::FacilityCity).string())
                    .col(ColumnDef::new(CarAuctions::FuelCode).string())
                    .col(ColumnDef::new(CarAuctions::BatteryCapacity).double())
                    .col(ColumnDef::new(CarAuctions::RangeCityWltpDrive).double())
                    .col(ColumnDef::new(CarAuctions::RangeWltpDrive).double())
                    .col(ColumnDef::new(CarAuctions::EnginePowerHp).integer())
                    .col(ColumnDef::new(CarAuctions::EnginePower).integer())
                    .col(ColumnDef::new(CarAuctions::Gearbox).string())
                    .col(ColumnDef::new(CarAuctions::MainImageUrl).text())
                    .col(ColumnDef::new(CarAuctions::ImageSource).string())
                    .col(ColumnDef::new(CarAuctions::ObjectViewJson).json_binary())
                    .col(ColumnDef::new(CarAuctions::BaseObjectType).string())
                    .col(
                        ColumnDef::new(CarAuctions::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(CarAuctions::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_car_auctions_closed_at")
                    .table(CarAuctions::Table)
                    .col(CarAuctions::ClosedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_car_auctions_brand")
                    .table(CarAuctions::Table)
                    .col(CarAuctions::Brand)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CarAuctions::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum CarAuctions {
    Table,
    AuctionId,
    ClosedAt,
    PublishedAt,
    SoldFor,
    SellMethod,
    Slug,
    AuctionUrl,
    BuyNowAmount,
    BuyNowAvailable,
    PreliminaryPrice,
    IsSoldByBuyNow,
    WinningBid,
    ReservationPriceReached,
    HighestBid,
    ElectricType,
    OdometerReading,
    Body,
    Brand,
    FamilyName,
    RegistrationPlate,
    ModelName,
    ModelNamePresentation,
    Year,
    FacilityPostCode,
    FacilityCity,
    FuelCode,
    BatteryCapacity,
    RangeCityWltpDrive,
    RangeWltpDrive,
    EnginePowerHp,
    EnginePower,
    Gearbox,
    MainImageUrl,
    ImageSource,
    ObjectViewJson,
    BaseObjectType,
    CreatedAt,
    UpdatedAt,
}
