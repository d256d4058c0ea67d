use sea_orm_migration::prelude::*;

#[derive(DeriveIden)]
enum BlobFolder {
    Table,
    Id,
    Name,
    CreatedAt,
}

#[derive(DeriveIden)]
enum BlobObject {
    Table,
    Id,
    FolderId,
    Name,
    MediaType,
    Bytes,
    Public,
    CreatedAt,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(BlobFolder::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(BlobFolder::Id)
                            .string_len(64)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(BlobFolder::Name).string_len(256).not_null())
                    .col(
                        ColumnDef::new(BlobFolder::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Folder lookup is by name; the unique index makes create-if-absent safe.
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_blob_folder_name")
                    .table(BlobFolder::Table)
                    .col(BlobFolder::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(BlobObject::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(BlobObject::Id)
                            .string_len(64)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(BlobObject::FolderId).string_len(64).not_null())
                    .col(ColumnDef::new(BlobObject::Name).string_len(512).not_null())
                    .col(ColumnDef::new(BlobObject::MediaType).string_len(128).not_null())
                    .col(ColumnDef::new(BlobObject::Bytes).binary().not_null())
                    .col(
                        ColumnDef::new(BlobObject::Public)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(BlobObject::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_blob_object_folder")
                            .from(BlobObject::Table, BlobObject::FolderId)
                            .to(BlobFolder::Table, BlobFolder::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_blob_object_folder")
                    .table(BlobObject::Table)
                    .col(BlobObject::FolderId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(BlobObject::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(BlobFolder::Table).if_exists().to_owned())
            .await
    }
}
