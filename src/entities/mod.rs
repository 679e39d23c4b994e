pub mod prelude;

pub mod camp_registration;
pub mod camper;
pub mod sea_orm_active_enums;
pub mod user;
