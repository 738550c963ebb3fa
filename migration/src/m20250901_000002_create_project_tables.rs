use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Projects::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Projects::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Projects::Name).string().not_null())
                    .col(ColumnDef::new(Projects::Slug).string().not_null().unique_key())
                    .col(ColumnDef::new(Projects::Description).text().null())
                    .col(ColumnDef::new(Projects::Image).string().null())
                    .col(
                        ColumnDef::new(Projects::Status)
                            .string_len(16)
                            .not_null()
                            .default("PLANNED"),
                    )
                    .col(ColumnDef::new(Projects::StartAt).timestamp_with_time_zone().null())
                    .col(ColumnDef::new(Projects::EndAt).timestamp_with_time_zone().null())
                    .col(
                        ColumnDef::new(Projects::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Contributions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Contributions::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Contributions::Name).string().not_null())
                    .col(ColumnDef::new(Contributions::ProjectId).integer().null())
                    .col(
                        ColumnDef::new(Contributions::StartAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Contributions::EndAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Contributions::OrganizedBy).string().null())
                    .col(
                        ColumnDef::new(Contributions::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_contributions_project")
                            .from(Contributions::Table, Contributions::ProjectId)
                            .to(Projects::Table, Projects::Id)
                            .on_delete(ForeignKeyAction::NoAction),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ContributionPayments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ContributionPayments::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ContributionPayments::ContributionId)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ContributionPayments::UserId).integer().not_null())
                    .col(ColumnDef::new(ContributionPayments::Amount).double().not_null())
                    .col(
                        ColumnDef::new(ContributionPayments::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_contribution_payments_contribution")
                            .from(ContributionPayments::Table, ContributionPayments::ContributionId)
                            .to(Contributions::Table, Contributions::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_contribution_payments_user")
                            .from(ContributionPayments::Table, ContributionPayments::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::NoAction),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ProjectSuggests::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ProjectSuggests::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ProjectSuggests::Name).string().not_null())
                    .col(ColumnDef::new(ProjectSuggests::Description).text().null())
                    .col(ColumnDef::new(ProjectSuggests::UserId).integer().not_null())
                    .col(
                        ColumnDef::new(ProjectSuggests::Status)
                            .string_len(16)
                            .not_null()
                            .default("PENDING"),
                    )
                    .col(
                        ColumnDef::new(ProjectSuggests::Read)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(ProjectSuggests::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_project_suggests_user")
                            .from(ProjectSuggests::Table, ProjectSuggests::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ProjectSuggests::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ContributionPayments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Contributions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Projects::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Projects {
    Table,
    Id,
    Name,
    Slug,
    Description,
    Image,
    Status,
    StartAt,
    EndAt,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Contributions {
    Table,
    Id,
    Name,
    ProjectId,
    StartAt,
    EndAt,
    OrganizedBy,
    CreatedAt,
}

#[derive(DeriveIden)]
enum ContributionPayments {
    Table,
    Id,
    ContributionId,
    UserId,
    Amount,
    CreatedAt,
}

#[derive(DeriveIden)]
enum ProjectSuggests {
    Table,
    Id,
    Name,
    Description,
    UserId,
    Status,
    Read,
    CreatedAt,
}
