use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::{Gender, RegistrationStatus};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "camp_registration")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub camper_id: i32,
    pub camp_slug: String,
    pub first_name: String,
    pub last_name: String,
    pub nickname: String,
    pub gender: Gender,
    pub birth_date: Date,
    pub email: Option<String>,
    /// Free-text answers, one per catalog question for the camp.
    pub answers: Json,
    pub status: RegistrationStatus,
    pub comment: Option<String>,
    pub certificate: bool,
    pub certificate_url: Option<String>,
    pub submitted_at: DateTime,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::camper::Entity",
        from = "Column::CamperId",
        to = "super::camper::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Camper,
}

impl Related<super::camper::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Camper.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
