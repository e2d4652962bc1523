//! Create `apps` table.
//!
//! Rows are provisioned out of band; ids are assigned by the operator, so no
//! auto increment.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Apps::Table)
                    .if_not_exists()
                    .col(integer(Apps::Id).primary_key())
                    .col(string_len(Apps::Name, 128).unique_key())
                    .col(ColumnDef::new(Apps::Secret).binary().not_null().unique_key())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Apps::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Apps { Table, Id, Name, Secret }
