use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Campaigns::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Campaigns::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Campaigns::UserId).integer())
                    .col(
                        ColumnDef::new(Campaigns::SocietyName)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Campaigns::Location).string_len(255).not_null())
                    .col(ColumnDef::new(Campaigns::KwhPrice).double().not_null())
                    .col(
                        ColumnDef::new(Campaigns::NbrCompressorUseByYear)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Campaigns::ElectricityPrice).double().not_null())
                    .col(ColumnDef::new(Campaigns::Description).text())
                    .col(
                        ColumnDef::new(Campaigns::IsActive)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Campaigns::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Campaigns::UpdatedAt).timestamp_with_time_zone())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Campaigns::Table, Campaigns::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Campaigns::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Campaigns {
    Table,
    Id,
    UserId,
    SocietyName,
    Location,
    KwhPrice,
    NbrCompressorUseByYear,
    ElectricityPrice,
    Description,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}
