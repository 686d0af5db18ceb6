//! Migration: Create barter tables (trade_offers, trade_items).

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(TradeOffers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TradeOffers::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(TradeOffers::TradeCode)
                            .string_len(20)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(TradeOffers::OffererId).uuid().not_null())
                    .col(ColumnDef::new(TradeOffers::ReceiverId).uuid().not_null())
                    .col(ColumnDef::new(TradeOffers::ProductId).integer().not_null())
                    .col(
                        ColumnDef::new(TradeOffers::Status)
                            .string_len(20)
                            .not_null()
                            .default("pending")
                            .check(Expr::col(TradeOffers::Status).is_in([
                                "pending",
                                "accepted",
                                "rejected",
                                "cancelled",
                            ])),
                    )
                    .col(ColumnDef::new(TradeOffers::OffererMessage).text().null())
                    .col(
                        ColumnDef::new(TradeOffers::OfferedCashAmount)
                            .decimal_len(10, 2)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(TradeOffers::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(TradeOffers::UpdatedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_trade_offers_offerer")
                            .from(TradeOffers::Table, TradeOffers::OffererId)
                            .to(Users::Table, Users::Id)
                            // Accounts leave only through the purge path,
                            // which removes their offers first.
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_trade_offers_receiver")
                            .from(TradeOffers::Table, TradeOffers::ReceiverId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_trade_offers_product")
                            .from(TradeOffers::Table, TradeOffers::ProductId)
                            .to(Products::Table, Products::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_trade_offers_offerer_id")
                    .table(TradeOffers::Table)
                    .col(TradeOffers::OffererId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_trade_offers_receiver_id")
                    .table(TradeOffers::Table)
                    .col(TradeOffers::ReceiverId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(TradeItems::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TradeItems::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(TradeItems::TradeId).integer().not_null())
                    .col(ColumnDef::new(TradeItems::ProductId).integer().not_null())
                    .col(
                        ColumnDef::new(TradeItems::ItemType)
                            .string_len(20)
                            .not_null()
                            .check(Expr::col(TradeItems::ItemType).is_in(["offered", "requested"])),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_trade_items_trade")
                            .from(TradeItems::Table, TradeItems::TradeId)
                            .to(TradeOffers::Table, TradeOffers::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_trade_items_product")
                            .from(TradeItems::Table, TradeItems::ProductId)
                            .to(Products::Table, Products::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_trade_items_trade_id")
                    .table(TradeItems::Table)
                    .col(TradeItems::TradeId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TradeItems::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(TradeOffers::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}

#[derive(Iden)]
enum Products {
    Table,
    Id,
}

#[derive(Iden)]
enum TradeOffers {
    Table,
    Id,
    TradeCode,
    OffererId,
    ReceiverId,
    ProductId,
    Status,
    OffererMessage,
    OfferedCashAmount,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum TradeItems {
    Table,
    Id,
    TradeId,
    ProductId,
    ItemType,
}
