//! Initial schema migration - creates all tables from scratch.
//!
//! It creates the complete schema for Homestash:
//!
//! - `items`: stashed household items, partitioned by the `section` column
//! - `scanned_codes`: append-only barcode scan log

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
enum Items {
    Table,
    Id,
    Section,
    Name,
    Category,
    Amount,
    Photo,
    LastStashedAt,
    Unavailable,
}

#[derive(Iden)]
enum ScannedCodes {
    Table,
    Id,
    Kind,
    Data,
    ScannedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Items::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Items::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Items::Section).string().not_null())
                    .col(ColumnDef::new(Items::Name).string().not_null())
                    .col(ColumnDef::new(Items::Category).string().not_null())
                    .col(ColumnDef::new(Items::Amount).string().not_null())
                    .col(ColumnDef::new(Items::Photo).string())
                    .col(
                        ColumnDef::new(Items::LastStashedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Items::Unavailable)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .to_owned(),
            )
            .await?;

        // Section reads always filter by the partition column.
        manager
            .create_index(
                Index::create()
                    .name("idx-items-section")
                    .table(Items::Table)
                    .col(Items::Section)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ScannedCodes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ScannedCodes::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ScannedCodes::Kind).string().not_null())
                    .col(ColumnDef::new(ScannedCodes::Data).string().not_null())
                    .col(
                        ColumnDef::new(ScannedCodes::ScannedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ScannedCodes::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Items::Table).to_owned())
            .await?;
        Ok(())
    }
}
