pub mod auth;
pub mod camps;
pub mod config;
pub mod database;
pub mod entities;
pub mod error;
pub mod google;
pub mod profile;
pub mod registration;
pub mod router;
pub mod routes;
pub mod storage;
pub mod util;
pub mod validate;

pub use router::{AppState, OauthClient};
