use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SettingsEntry::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SettingsEntry::Key)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(SettingsEntry::Value).text().not_null())
                    .col(ColumnDef::new(SettingsEntry::UpdatedAt).string().not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SettingsEntry::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum SettingsEntry {
    #[sea_orm(iden = "settings_entries")]
    Table,
    Key,
    Value,
    UpdatedAt,
}
