use async_session::async_trait;
use axum_login::{AuthUser, AuthnBackend, UserId};
use chrono::TimeDelta;
use oauth2::{AuthorizationCode, TokenResponse};
use oauth2::{CsrfToken, HttpClientError, Scope, basic::BasicRequestTokenError};
use reqwest::Url;
use sea_orm::{ActiveModelTrait, ActiveValue::Set, ColumnTrait, IntoActiveModel, QueryFilter};
use sea_orm::{DatabaseConnection, EntityTrait};
use serde::Deserialize;
use tracing::debug;

use crate::OauthClient;
use crate::entities::user;
use crate::google::get_user_info;

impl AuthUser for user::Model {
    type Id = i32;

    fn id(&self) -> Self::Id {
        self.id
    }

    fn session_auth_hash(&self) -> &[u8] {
        self.access_token.as_bytes()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Credentials {
    pub code: String,
    pub old_state: CsrfToken,
    pub new_state: CsrfToken,
}

#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error(transparent)]
    Seaorm(sea_orm::DbErr),

    #[error("User not found")]
    UnknownUser,

    #[error(transparent)]
    Reqwest(reqwest::Error),

    #[error(transparent)]
    OAuth2(BasicRequestTokenError<HttpClientError<reqwest::Error>>),
}

#[derive(Debug, Clone)]
pub struct Backend {
    db: DatabaseConnection,
    client: OauthClient,
}

impl Backend {
    pub fn new(db: DatabaseConnection, client: OauthClient) -> Self {
        Self { db, client }
    }

    pub fn authorize_url(&self) -> (Url, CsrfToken) {
        self.client
            .authorize_url(CsrfToken::new_random)
            .add_scope(Scope::new("openid".to_string()))
            .add_scope(Scope::new("email".to_string()))
            .add_scope(Scope::new("profile".to_string()))
            .url()
    }
}

#[async_trait]
impl AuthnBackend for Backend {
    type User = user::Model;
    type Credentials = Credentials;
    type Error = BackendError;

    async fn authenticate(
        &self,
        creds: Self::Credentials,
    ) -> Result<Option<Self::User>, Self::Error> {
        // Ensure the CSRF state has not been tampered with.
        if creds.old_state.secret() != creds.new_state.secret() {
            return Ok(None);
        };

        let http_client = reqwest::ClientBuilder::new()
            // Following redirects opens the client up to SSRF vulnerabilities.
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .expect("Client should build");

        // Process authorization code, expecting a token response back.
        let token_res = self
            .client
            .exchange_code(AuthorizationCode::new(creds.code))
            .request_async(&http_client)
            .await
            .map_err(Self::Error::OAuth2)?;

        let access_token = token_res.access_token().secret();
        let refresh_token = token_res.refresh_token().map(|t| t.secret().to_string());
        let expires_in = token_res
            .expires_in()
            .unwrap_or_else(|| std::time::Duration::from_secs(3600));
        let token_expires_at =
            chrono::Utc::now().naive_utc() + TimeDelta::seconds(expires_in.as_secs() as i64);

        let principal = get_user_info(access_token)
            .await
            .map_err(Self::Error::Reqwest)?
            .ok_or(Self::Error::UnknownUser)?;

        // Persist the user in our database so we can use `get_user`.
        let existing = user::Entity::find()
            .filter(user::Column::GoogleSub.eq(principal.sub.clone()))
            .one(&self.db)
            .await
            .map_err(Self::Error::Seaorm)?;

        debug!("Handling user for subject {}", principal.sub);
        let user = match existing {
            Some(existing) => {
                let mut user_model = existing.into_active_model();
                user_model.email = Set(principal.email);
                user_model.display_name = Set(principal.name);
                user_model.avatar_url = Set(principal.picture);
                user_model.access_token = Set(access_token.clone());
                user_model.refresh_token = Set(refresh_token.clone());
                user_model.token_expires_at = Set(token_expires_at);
                user_model.updated_at = Set(chrono::Utc::now().naive_utc());
                user_model
                    .update(&self.db)
                    .await
                    .map_err(Self::Error::Seaorm)?
            }
            None => {
                let now = chrono::Utc::now().naive_utc();
                let user_model = user::ActiveModel {
                    google_sub: Set(principal.sub),
                    email: Set(principal.email),
                    display_name: Set(principal.name),
                    avatar_url: Set(principal.picture),
                    access_token: Set(access_token.clone()),
                    refresh_token: Set(refresh_token.clone()),
                    token_expires_at: Set(token_expires_at),
                    created_at: Set(now),
                    updated_at: Set(now),
                    ..Default::default()
                };
                debug!("Creating new user: {:?}", user_model);
                user_model
                    .insert(&self.db)
                    .await
                    .map_err(Self::Error::Seaorm)?
            }
        };

        Ok(Some(user))
    }

    async fn get_user(&self, user_id: &UserId<Self>) -> Result<Option<Self::User>, Self::Error> {
        let user = user::Entity::find()
            .filter(user::Column::Id.eq(*user_id))
            .one(&self.db)
            .await
            .map_err(Self::Error::Seaorm)?;

        if let Some(user) = user {
            Ok(Some(user))
        } else {
            Err(Self::Error::UnknownUser)
        }
    }
}

// We use a type alias for convenience.
//
// Note that we've supplied our concrete backend here.
pub type AuthSession = axum_login::AuthSession<Backend>;
