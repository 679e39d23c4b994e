use oauth2::{ClientId, ClientSecret, RedirectUrl};
use std::env;

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub rust_log: String,
    pub client_id: ClientId,
    pub client_secret: ClientSecret,
    pub redirect_url: RedirectUrl,
    pub storage_url: String,
    pub storage_key: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv()?;
        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL is not set in .env file");
        let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| "debug".into());
        let client_id = env::var("GOOGLE_CLIENT_ID")
            .map(ClientId::new)
            .expect("GOOGLE_CLIENT_ID should be provided.");
        let client_secret = env::var("GOOGLE_CLIENT_SECRET")
            .map(ClientSecret::new)
            .expect("GOOGLE_CLIENT_SECRET should be provided");
        let redirect_url = env::var("GOOGLE_REDIRECT_URI")
            .map(RedirectUrl::new)
            .expect("GOOGLE_REDIRECT_URI should be provided")?;
        let storage_url = env::var("STORAGE_URL").expect("STORAGE_URL should be provided");
        let storage_key =
            env::var("STORAGE_SERVICE_KEY").expect("STORAGE_SERVICE_KEY should be provided");

        Ok(Self {
            database_url,
            rust_log,
            client_id,
            client_secret,
            redirect_url,
            storage_url,
            storage_key,
        })
    }
}
