//! Migration: Create business listing, favorite and visit tables.

use sea_orm_migration::prelude::*;

use super::m20240101_000002_create_profile_tables::{Entrepreneurs, Explorers};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Businesses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Businesses::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Businesses::Name).string_len(100).not_null())
                    .col(ColumnDef::new(Businesses::Category).string_len(50).null())
                    .col(ColumnDef::new(Businesses::Zone).string_len(100).null())
                    .col(ColumnDef::new(Businesses::Location).string_len(100).null())
                    .col(ColumnDef::new(Businesses::Description).text().null())
                    .col(ColumnDef::new(Businesses::Url).string_len(200).null())
                    .col(ColumnDef::new(Businesses::EntrepreneurId).integer().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_businesses_entrepreneur")
                            .from(Businesses::Table, Businesses::EntrepreneurId)
                            .to(Entrepreneurs::Table, Entrepreneurs::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // (explorer, business) pairs are not unique
        manager
            .create_table(
                Table::create()
                    .table(Favorites::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Favorites::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Favorites::ExplorerId).integer().not_null())
                    .col(ColumnDef::new(Favorites::BusinessId).integer().not_null())
                    .col(
                        ColumnDef::new(Favorites::SavedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_favorites_explorer")
                            .from(Favorites::Table, Favorites::ExplorerId)
                            .to(Explorers::Table, Explorers::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_favorites_business")
                            .from(Favorites::Table, Favorites::BusinessId)
                            .to(Businesses::Table, Businesses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Visits::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Visits::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Visits::BusinessId).integer().null())
                    .col(ColumnDef::new(Visits::ExplorerId).integer().null())
                    .col(
                        ColumnDef::new(Visits::OccurredAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Visits::Kind)
                            .string_len(50)
                            .not_null()
                            .default("clic"),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_visits_business")
                            .from(Visits::Table, Visits::BusinessId)
                            .to(Businesses::Table, Businesses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_visits_explorer")
                            .from(Visits::Table, Visits::ExplorerId)
                            .to(Explorers::Table, Explorers::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Visits::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Favorites::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Businesses::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Businesses {
    Table,
    Id,
    Name,
    Category,
    Zone,
    Location,
    Description,
    Url,
    EntrepreneurId,
}

#[derive(Iden)]
enum Favorites {
    Table,
    Id,
    ExplorerId,
    BusinessId,
    SavedAt,
}

#[derive(Iden)]
enum Visits {
    Table,
    Id,
    BusinessId,
    ExplorerId,
    OccurredAt,
    Kind,
}
