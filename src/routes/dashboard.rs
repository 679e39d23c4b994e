use axum::{
    Form,
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect},
};
use minijinja::context;
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::user::AuthSession;
use crate::camps;
use crate::entities::sea_orm_active_enums::RegistrationStatus;
use crate::registration::ApplicationFilter;
use crate::router::AppState;

const TEMPLATE_BUCKET: &str = "certificates";

#[derive(Deserialize)]
pub struct ApplicationsQuery {
    pub camp: Option<String>,
    pub status: Option<RegistrationStatus>,
    pub notice: Option<String>,
}

#[derive(Deserialize)]
pub struct StatusForm {
    pub status: RegistrationStatus,
}

#[derive(Deserialize)]
pub struct CommentForm {
    #[serde(default)]
    pub comment: String,
}

#[derive(Deserialize)]
pub struct CertificateForm {
    pub enabled: bool,
}

/// Staff overview: aggregate counts plus a card per camp linking into the
/// filtered review table.
pub async fn overview(
    State(state): State<AppState>,
    auth_session: AuthSession,
) -> impl IntoResponse {
    if auth_session.user.is_none() {
        return (StatusCode::UNAUTHORIZED, "No user session").into_response();
    }

    match state.registrations.stats().await {
        Ok(stats) => {
            let tmpl = state.templates.get_template("dashboard.html").unwrap();
            let html = tmpl
                .render(context! {
                    stats => stats,
                    camps => camps::CAMPS,
                })
                .unwrap();
            Html(html).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn applications(
    State(state): State<AppState>,
    auth_session: AuthSession,
    Query(query): Query<ApplicationsQuery>,
) -> impl IntoResponse {
    if auth_session.user.is_none() {
        return (StatusCode::UNAUTHORIZED, "No user session").into_response();
    }

    let filter = ApplicationFilter {
        camp_slug: query.camp.clone(),
        status: query.status,
    };
    match state.registrations.list(filter).await {
        Ok(applications) => {
            let tmpl = state.templates.get_template("applications.html").unwrap();
            let html = tmpl
                .render(context! {
                    applications => applications,
                    camps => camps::CAMPS,
                    camp => query.camp,
                    status => query.status,
                    notice => query.notice,
                })
                .unwrap();
            Html(html).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn set_status(
    State(state): State<AppState>,
    auth_session: AuthSession,
    Path(id): Path<Uuid>,
    Form(form): Form<StatusForm>,
) -> impl IntoResponse {
    if auth_session.user.is_none() {
        return (StatusCode::UNAUTHORIZED, "No user session").into_response();
    }

    match state.registrations.set_status(id, form.status).await {
        Ok(()) => Redirect::to("/dashboard/applications").into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn set_comment(
    State(state): State<AppState>,
    auth_session: AuthSession,
    Path(id): Path<Uuid>,
    Form(form): Form<CommentForm>,
) -> impl IntoResponse {
    if auth_session.user.is_none() {
        return (StatusCode::UNAUTHORIZED, "No user session").into_response();
    }

    match state.registrations.set_comment(id, form.comment).await {
        Ok(()) => Redirect::to("/dashboard/applications").into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn set_certificate(
    State(state): State<AppState>,
    auth_session: AuthSession,
    Path(id): Path<Uuid>,
    Form(form): Form<CertificateForm>,
) -> impl IntoResponse {
    if auth_session.user.is_none() {
        return (StatusCode::UNAUTHORIZED, "No user session").into_response();
    }

    match state.registrations.set_certificate(id, form.enabled).await {
        Ok(()) => Redirect::to("/dashboard/applications").into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn set_certificate_for_all(
    State(state): State<AppState>,
    auth_session: AuthSession,
    Form(form): Form<CertificateForm>,
) -> impl IntoResponse {
    if auth_session.user.is_none() {
        return (StatusCode::UNAUTHORIZED, "No user session").into_response();
    }

    match state
        .registrations
        .set_certificate_for_all(form.enabled)
        .await
    {
        Ok(count) => {
            Redirect::to(&format!("/dashboard/applications?notice=certificates-{count}"))
                .into_response()
        }
        Err(err) => err.into_response(),
    }
}

/// Uploads a certificate-template image and applies its URL to every
/// application, across every camp.
pub async fn upload_certificate_template(
    State(state): State<AppState>,
    auth_session: AuthSession,
    mut multipart: Multipart,
) -> impl IntoResponse {
    if auth_session.user.is_none() {
        return (StatusCode::UNAUTHORIZED, "No user session").into_response();
    }

    let mut template: Option<(String, String, Vec<u8>)> = None;
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(_) => return StatusCode::BAD_REQUEST.into_response(),
        };
        if field.name() != Some("template") {
            continue;
        }
        let file_name = field.file_name().unwrap_or_default().to_string();
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let bytes = match field.bytes().await {
            Ok(bytes) => bytes,
            Err(_) => return StatusCode::BAD_REQUEST.into_response(),
        };
        template = Some((file_name, content_type, bytes.to_vec()));
    }

    let Some((file_name, content_type, bytes)) = template else {
        return Redirect::to("/dashboard/applications?notice=template-missing").into_response();
    };
    if !content_type.starts_with("image/") {
        return Redirect::to("/dashboard/applications?notice=template-not-image").into_response();
    }

    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext)
        .unwrap_or("png");
    let key = format!("templates/certificate-template-{}.{extension}", Uuid::new_v4());

    if let Err(err) = state
        .storage
        .upload(TEMPLATE_BUCKET, &key, bytes, &content_type)
        .await
    {
        return crate::error::AppError::Storage(err).into_response();
    }
    let url = state.storage.public_url(TEMPLATE_BUCKET, &key);

    match state
        .registrations
        .broadcast_certificate_template_globally(&url)
        .await
    {
        Ok(count) => {
            Redirect::to(&format!("/dashboard/applications?notice=template-applied-{count}"))
                .into_response()
        }
        Err(err) => err.into_response(),
    }
}
