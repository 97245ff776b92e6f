use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Leaks::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Leaks::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Leaks::UserId).integer())
                    .col(ColumnDef::new(Leaks::CampaignId).integer())
                    .col(ColumnDef::new(Leaks::LmStatusId).integer())
                    .col(ColumnDef::new(Leaks::SeverityId).integer())
                    .col(ColumnDef::new(Leaks::LeakLocation).string_len(255).not_null())
                    .col(ColumnDef::new(Leaks::LeakDescription).text())
                    .col(ColumnDef::new(Leaks::LeakImageBig).string_len(255).not_null())
                    .col(
                        ColumnDef::new(Leaks::LeakImageSmall)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Leaks::LeakNumber).integer().not_null())
                    .col(ColumnDef::new(Leaks::MeasuredFlow).double())
                    .col(ColumnDef::new(Leaks::Comment).text())
                    .col(
                        ColumnDef::new(Leaks::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Leaks::UpdatedAt).timestamp_with_time_zone())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Leaks::Table, Leaks::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Leaks::Table, Leaks::CampaignId)
                            .to(Campaigns::Table, Campaigns::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Leaks::Table, Leaks::LmStatusId)
                            .to(LeakStatuses::Table, LeakStatuses::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Leaks::Table, Leaks::SeverityId)
                            .to(Severities::Table, Severities::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(Leaks::Table)
                    .col(Leaks::CampaignId)
                    .name("idx_leaks_campaign_id")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Leaks::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Leaks {
    Table,
    Id,
    UserId,
    CampaignId,
    LmStatusId,
    SeverityId,
    LeakLocation,
    LeakDescription,
    LeakImageBig,
    LeakImageSmall,
    LeakNumber,
    MeasuredFlow,
    Comment,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}

#[derive(Iden)]
enum Campaigns {
    Table,
    Id,
}

#[derive(Iden)]
enum LeakStatuses {
    Table,
    Id,
}

#[derive(Iden)]
enum Severities {
    Table,
    Id,
}
