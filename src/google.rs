use reqwest;
use serde::Deserialize;

const USERINFO_URL: &str = "https://openidconnect.googleapis.com/v1/userinfo";

pub const AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
pub const TOKEN_URL: &str = "https://oauth2.googleapis.com/token";

#[derive(Debug, Clone, Deserialize)]
pub struct GoogleUser {
    pub sub: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub picture: Option<String>,
}

/// Resolves the principal behind an access token. A non-success response
/// means the token does not map to a user, not an infrastructure failure.
pub async fn get_user_info(access_token: &str) -> Result<Option<GoogleUser>, reqwest::Error> {
    let response = reqwest::Client::new()
        .get(USERINFO_URL)
        .bearer_auth(access_token)
        .send()
        .await?;

    if !response.status().is_success() {
        return Ok(None);
    }

    Ok(Some(response.json::<GoogleUser>().await?))
}
