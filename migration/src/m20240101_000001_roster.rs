use sea_orm_migration::prelude::*;

#[derive(DeriveIden)]
enum SheetHeader {
    Table,
    Sheet,
    Cells,
    Style,
}

#[derive(DeriveIden)]
enum SheetRow {
    Table,
    Id,
    Sheet,
    Cells,
}

#[derive(DeriveIden)]
enum Setting {
    Table,
    Key,
    Value,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SheetHeader::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SheetHeader::Sheet)
                            .string_len(128)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(SheetHeader::Cells).text().not_null())
                    .col(ColumnDef::new(SheetHeader::Style).text())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(SheetRow::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SheetRow::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(SheetRow::Sheet).string_len(128).not_null())
                    .col(ColumnDef::new(SheetRow::Cells).text().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_sheet_row_sheet")
                    .table(SheetRow::Table)
                    .col(SheetRow::Sheet)
                    .col(SheetRow::Id)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Setting::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Setting::Key)
                            .string_len(128)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Setting::Value).text().not_null())
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Setting::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(SheetRow::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(SheetHeader::Table).if_exists().to_owned())
            .await
    }
}
