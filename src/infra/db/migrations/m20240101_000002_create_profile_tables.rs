//! Migration: Create explorer and entrepreneur profile tables.

use sea_orm_migration::prelude::*;

use super::m20240101_000001_create_users_table::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let mut explorers = Table::create();
        explorers
            .table(Explorers::Table)
            .if_not_exists()
            .col(
                ColumnDef::new(Explorers::Id)
                    .integer()
                    .not_null()
                    .auto_increment()
                    .primary_key(),
            )
            .col(ColumnDef::new(Explorers::UserId).integer().not_null())
            .col(ColumnDef::new(Explorers::Preference).string_len(200).null())
            .foreign_key(
                ForeignKey::create()
                    .name("fk_explorers_user")
                    .from(Explorers::Table, Explorers::UserId)
                    .to(Users::Table, Users::Id)
                    .on_delete(ForeignKeyAction::Cascade),
            );
        add_personal_columns(&mut explorers);
        manager.create_table(explorers.to_owned()).await?;

        let mut entrepreneurs = Table::create();
        entrepreneurs
            .table(Entrepreneurs::Table)
            .if_not_exists()
            .col(
                ColumnDef::new(Entrepreneurs::Id)
                    .integer()
                    .not_null()
                    .auto_increment()
                    .primary_key(),
            )
            .col(ColumnDef::new(Entrepreneurs::UserId).integer().not_null())
            .col(
                ColumnDef::new(Entrepreneurs::BusinessName)
                    .string_len(100)
                    .not_null(),
            )
            .col(
                ColumnDef::new(Entrepreneurs::TaxId)
                    .string_len(30)
                    .not_null()
                    .unique_key(),
            )
            .col(ColumnDef::new(Entrepreneurs::Category).string_len(50).null())
            .col(ColumnDef::new(Entrepreneurs::Zone).string_len(100).null())
            .col(ColumnDef::new(Entrepreneurs::Location).string_len(100).null())
            .col(
                ColumnDef::new(Entrepreneurs::Plan)
                    .string_len(50)
                    .null()
                    .default("Sin Plan"),
            )
            .foreign_key(
                ForeignKey::create()
                    .name("fk_entrepreneurs_user")
                    .from(Entrepreneurs::Table, Entrepreneurs::UserId)
                    .to(Users::Table, Users::Id)
                    .on_delete(ForeignKeyAction::Cascade),
            );
        add_personal_columns(&mut entrepreneurs);
        manager.create_table(entrepreneurs.to_owned()).await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_explorers_user_id")
                    .table(Explorers::Table)
                    .col(Explorers::UserId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_entrepreneurs_user_id")
                    .table(Entrepreneurs::Table)
                    .col(Entrepreneurs::UserId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Entrepreneurs::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Explorers::Table).to_owned())
            .await
    }
}

/// Name, birth date and phone columns shared by both profile tables.
fn add_personal_columns(table: &mut TableCreateStatement) {
    table
        .col(ColumnDef::new(Personal::FirstName).string_len(50).null())
        .col(ColumnDef::new(Personal::SecondName).string_len(50).null())
        .col(ColumnDef::new(Personal::FirstSurname).string_len(50).null())
        .col(ColumnDef::new(Personal::SecondSurname).string_len(50).null())
        .col(ColumnDef::new(Personal::BirthDate).date().null())
        .col(ColumnDef::new(Personal::Phone).string_len(20).null());
}

#[derive(Iden)]
enum Personal {
    FirstName,
    SecondName,
    FirstSurname,
    SecondSurname,
    BirthDate,
    Phone,
}

#[derive(Iden)]
pub enum Explorers {
    Table,
    Id,
    UserId,
    Preference,
}

#[derive(Iden)]
pub enum Entrepreneurs {
    Table,
    Id,
    UserId,
    BusinessName,
    TaxId,
    Category,
    Zone,
    Location,
    Plan,
}
