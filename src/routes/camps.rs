use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect},
};
use axum_extra::extract::Form;
use minijinja::context;
use serde::Deserialize;

use crate::auth::user::AuthSession;
use crate::camps;
use crate::error::AppError;
use crate::profile::ProfileState;
use crate::registration::Submission;
use crate::router::AppState;

#[derive(Deserialize)]
pub struct CampPageQuery {
    pub notice: Option<String>,
}

/// Registration-form fields. The `answer` field repeats once per catalog
/// question, in question order.
#[derive(Debug, Deserialize)]
pub struct RegistrationForm {
    pub first_name: String,
    pub last_name: String,
    pub nickname: String,
    pub gender: String,
    pub birth_date: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub answer: Vec<String>,
}

pub async fn camps_index(
    State(state): State<AppState>,
    auth_session: AuthSession,
) -> impl IntoResponse {
    let tmpl = state.templates.get_template("camps.html").unwrap();
    let html = tmpl
        .render(context! {
            camps => camps::CAMPS,
            signed_in => auth_session.user.is_some(),
        })
        .unwrap();
    Html(html)
}

pub async fn camp_page(
    State(state): State<AppState>,
    auth_session: AuthSession,
    Path(slug): Path<String>,
    Query(query): Query<CampPageQuery>,
) -> impl IntoResponse {
    let Some(camp) = camps::find(&slug) else {
        return StatusCode::NOT_FOUND.into_response();
    };

    let mut profile = None;
    let mut already_registered = false;
    if let Some(user) = auth_session.user {
        match state.profiles.ensure(user.id).await {
            Ok(ProfileState::Missing) => return Redirect::to("/setup-profile").into_response(),
            Ok(ProfileState::Present) => {}
            Err(err) => return err.into_response(),
        }
        profile = match state.profiles.get(user.id).await {
            Ok(profile) => profile,
            Err(err) => return err.into_response(),
        };
        already_registered = match state.registrations.for_camp(user.id, camp.slug).await {
            Ok(existing) => existing.is_some(),
            Err(err) => return err.into_response(),
        };
    }

    let tmpl = state.templates.get_template("camp.html").unwrap();
    let html = tmpl
        .render(context! {
            camp => camp,
            profile => profile,
            already_registered => already_registered,
            notice => query.notice,
        })
        .unwrap();
    Html(html).into_response()
}

pub async fn register(
    State(state): State<AppState>,
    auth_session: AuthSession,
    Path(slug): Path<String>,
    Form(form): Form<RegistrationForm>,
) -> impl IntoResponse {
    let Some(camp) = camps::find(&slug) else {
        return StatusCode::NOT_FOUND.into_response();
    };
    let Some(user) = auth_session.user else {
        return AppError::Unauthenticated.into_response();
    };

    let submission = Submission {
        first_name: form.first_name,
        last_name: form.last_name,
        nickname: form.nickname,
        gender: form.gender,
        birth_date: form.birth_date,
        email: form.email,
        answers: form.answer,
    };

    match state.registrations.submit(user.id, camp, submission).await {
        Ok(_) => Redirect::to("/status").into_response(),
        Err(AppError::AlreadyRegistered) => {
            Redirect::to(&format!("/camps/{slug}?notice=already-registered")).into_response()
        }
        Err(AppError::Validation(field)) => {
            Redirect::to(&format!("/camps/{slug}?notice=invalid-{field}")).into_response()
        }
        Err(err) => err.into_response(),
    }
}
