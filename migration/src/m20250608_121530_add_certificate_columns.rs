use sea_orm_migration::{prelude::*, schema::*};

use crate::iden::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .alter_table(
                Table::alter()
                    .table(CampRegistration::Table)
                    .add_column(boolean(CampRegistration::Certificate).default(false))
                    .to_owned(),
            )
            .await?;

        manager
            .alter_table(
                Table::alter()
                    .table(CampRegistration::Table)
                    .add_column(string_null(CampRegistration::CertificateUrl))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .alter_table(
                Table::alter()
                    .table(CampRegistration::Table)
                    .drop_column(CampRegistration::CertificateUrl)
                    .to_owned(),
            )
            .await?;

        manager
            .alter_table(
                Table::alter()
                    .table(CampRegistration::Table)
                    .drop_column(CampRegistration::Certificate)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }
}
