use sea_orm_migration::{prelude::*, schema::*};

use crate::iden::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create User Table
        let table = table_auto(User::Table)
            .col(pk_auto(User::Id))
            .col(string_uniq(User::GoogleSub))
            .col(string_null(User::Email))
            .col(string_null(User::DisplayName))
            .col(string_null(User::AvatarUrl))
            .col(string(User::AccessToken))
            .col(string_null(User::RefreshToken))
            .col(timestamp(User::TokenExpiresAt))
            .to_owned();
        manager.create_table(table).await?;

        // Create Camper Table. The primary key doubles as the foreign key to
        // the authenticated user, so one identity can hold one profile at most.
        let table = table_auto(Camper::Table)
            .col(integer(Camper::Id).primary_key())
            .col(string(Camper::FirstName))
            .col(string(Camper::LastName))
            .col(string(Camper::Nickname))
            .col(date(Camper::BirthDate))
            .col(string(Camper::Gender))
            .col(text(Camper::Strengths))
            .col(text(Camper::PastActivities))
            .col(string_null(Camper::ProfileUrl))
            .col(string(Camper::Email))
            .foreign_key(
                ForeignKey::create()
                    .name("fk_camper_user")
                    .from(Camper::Table, Camper::Id)
                    .to(User::Table, User::Id)
                    .on_delete(ForeignKeyAction::Cascade),
            )
            .to_owned();
        manager.create_table(table).await?;

        // Create CampRegistration Table
        let table = table_auto(CampRegistration::Table)
            .col(pk_uuid(CampRegistration::Id))
            .col(integer(CampRegistration::CamperId))
            .col(string(CampRegistration::CampSlug))
            .col(string(CampRegistration::FirstName))
            .col(string(CampRegistration::LastName))
            .col(string(CampRegistration::Nickname))
            .col(string(CampRegistration::Gender))
            .col(date(CampRegistration::BirthDate))
            .col(string_null(CampRegistration::Email))
            .col(json(CampRegistration::Answers))
            .col(string(CampRegistration::Status).default("pending"))
            .col(string_null(CampRegistration::Comment))
            .col(timestamp(CampRegistration::SubmittedAt))
            .foreign_key(
                ForeignKey::create()
                    .name("fk_registration_camper")
                    .from(CampRegistration::Table, CampRegistration::CamperId)
                    .to(Camper::Table, Camper::Id)
                    .on_delete(ForeignKeyAction::Cascade),
            )
            .to_owned();
        manager.create_table(table).await?;

        // One registration per camper per camp. The insert itself is the
        // duplicate check; a violation surfaces as AlreadyRegistered.
        manager
            .create_index(
                Index::create()
                    .name("idx_registration_camper_camp")
                    .table(CampRegistration::Table)
                    .col(CampRegistration::CamperId)
                    .col(CampRegistration::CampSlug)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_registration_camp_slug")
                    .table(CampRegistration::Table)
                    .col(CampRegistration::CampSlug)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop all tables in reverse order to avoid foreign key constraints
        manager
            .drop_table(Table::drop().table(CampRegistration::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Camper::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(User::Table).to_owned())
            .await?;

        Ok(())
    }
}
