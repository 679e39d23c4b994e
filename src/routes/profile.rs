use std::collections::HashMap;

use axum::{
    extract::{Multipart, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect},
};
use minijinja::context;
use serde::Deserialize;

use crate::auth::user::AuthSession;
use crate::error::AppError;
use crate::profile::{NewProfile, Photo, ProfileState};
use crate::router::AppState;

#[derive(Deserialize)]
pub struct SetupProfileQuery {
    pub notice: Option<String>,
}

pub async fn setup_profile_page(
    State(state): State<AppState>,
    auth_session: AuthSession,
    Query(query): Query<SetupProfileQuery>,
) -> impl IntoResponse {
    let Some(user) = auth_session.user else {
        return Redirect::to("/login?next=/setup-profile").into_response();
    };

    match state.profiles.ensure(user.id).await {
        Ok(ProfileState::Present) => Redirect::to("/").into_response(),
        Ok(ProfileState::Missing) => {
            let tmpl = state.templates.get_template("setup_profile.html").unwrap();
            let html = tmpl
                .render(context! {
                    email => user.email,
                    notice => query.notice,
                })
                .unwrap();
            Html(html).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn setup_profile_submit(
    State(state): State<AppState>,
    auth_session: AuthSession,
    mut multipart: Multipart,
) -> impl IntoResponse {
    let Some(user) = auth_session.user else {
        return AppError::Unauthenticated.into_response();
    };

    let mut fields: HashMap<String, String> = HashMap::new();
    let mut photo: Option<Photo> = None;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(_) => return StatusCode::BAD_REQUEST.into_response(),
        };
        let name = field.name().unwrap_or_default().to_string();

        if name == "photo" {
            let file_name = field.file_name().unwrap_or_default().to_string();
            let content_type = field
                .content_type()
                .unwrap_or("application/octet-stream")
                .to_string();
            let bytes = match field.bytes().await {
                Ok(bytes) => bytes,
                Err(_) => return StatusCode::BAD_REQUEST.into_response(),
            };
            // An empty file input still posts a zero-length part.
            if !bytes.is_empty() {
                photo = Some(Photo {
                    file_name,
                    content_type,
                    bytes: bytes.to_vec(),
                });
            }
        } else {
            let value = match field.text().await {
                Ok(value) => value,
                Err(_) => return StatusCode::BAD_REQUEST.into_response(),
            };
            fields.insert(name, value);
        }
    }

    let mut take = |name: &str| fields.remove(name).unwrap_or_default();
    let profile = NewProfile {
        first_name: take("first_name"),
        last_name: take("last_name"),
        nickname: take("nickname"),
        birth_date: take("birth_date"),
        gender: take("gender"),
        strengths: take("strengths"),
        past_activities: take("past_activities"),
        email: take("email"),
    };

    match state.profiles.create(user.id, profile, photo).await {
        Ok(()) => Redirect::to("/camps").into_response(),
        // The gate should have redirected already; fail safe and move on.
        Err(AppError::ProfileAlreadyExists) => Redirect::to("/").into_response(),
        Err(AppError::Validation(field)) => {
            Redirect::to(&format!("/setup-profile?notice=invalid-{field}")).into_response()
        }
        Err(err) => err.into_response(),
    }
}
