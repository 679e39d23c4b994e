pub use sea_orm_migration::prelude::*;

mod iden;
mod m20250520_000001_create_registration_tables;
mod m20250608_121530_add_certificate_columns;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250520_000001_create_registration_tables::Migration),
            Box::new(m20250608_121530_add_certificate_columns::Migration),
        ]
    }
}
