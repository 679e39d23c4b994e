pub use super::camp_registration::Entity as CampRegistration;
pub use super::camper::Entity as Camper;
pub use super::user::Entity as User;
