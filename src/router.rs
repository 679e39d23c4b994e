use crate::{
    auth::{
        router as auth_router,
        user::{AuthSession, Backend},
    },
    profile::{ProfileService, ProfileState},
    registration::RegistrationService,
    routes::{
        camps::{camp_page, camps_index, register},
        dashboard::{
            applications, overview, set_certificate, set_certificate_for_all, set_comment,
            set_status, upload_certificate_template,
        },
        profile::{setup_profile_page, setup_profile_submit},
        status::status,
    },
    storage::StorageClient,
    util::static_assets::StaticAssets,
};
use axum::{
    Router,
    extract::State,
    response::{Html, IntoResponse, Redirect},
    routing::{get, get_service, post},
};
use axum_login::{
    AuthManagerLayerBuilder,
    tower_sessions::{
        Expiry, SessionManagerLayer,
        cookie::{SameSite, time},
    },
};
use minijinja::Environment;
use oauth2::{EndpointNotSet, EndpointSet, basic::BasicClient};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tower_http::{services::ServeDir, trace::TraceLayer};
use tower_sessions_sqlx_store::PostgresStore;

pub type OauthClient =
    BasicClient<EndpointSet, EndpointNotSet, EndpointNotSet, EndpointNotSet, EndpointSet>;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub client: OauthClient,
    pub templates: Arc<Environment<'static>>,
    pub storage: StorageClient,
    pub registrations: RegistrationService,
    pub profiles: ProfileService,
}

pub async fn create_router(
    db: DatabaseConnection,
    client: OauthClient,
    storage: StorageClient,
    session_store: PostgresStore,
) -> anyhow::Result<Router> {
    let templates = setup_templates().await;

    let state = AppState {
        db: db.clone(),
        client: client.clone(),
        templates: Arc::new(templates),
        storage: storage.clone(),
        registrations: RegistrationService::new(db.clone()),
        profiles: ProfileService::new(db.clone(), storage),
    };

    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(false)
        .with_same_site(SameSite::Lax) // Ensure we send the cookie from the OAuth redirect.
        .with_expiry(Expiry::OnInactivity(time::Duration::days(1)));

    // Auth service.
    //
    // This combines the session layer with our backend to establish the auth
    // service which will provide the auth session as a request extension.
    let backend = Backend::new(db, client);
    let auth_layer = AuthManagerLayerBuilder::new(backend, session_layer).build();

    let app = Router::new()
        .route("/camps", get(camps_index))
        .route("/camps/{slug}", get(camp_page))
        .route("/camps/{slug}/register", post(register))
        .route("/status", get(status))
        .route(
            "/setup-profile",
            get(setup_profile_page).post(setup_profile_submit),
        )
        .route("/dashboard", get(overview))
        .route("/dashboard/applications", get(applications))
        .route("/dashboard/applications/{id}/status", post(set_status))
        .route("/dashboard/applications/{id}/comment", post(set_comment))
        .route(
            "/dashboard/applications/{id}/certificate",
            post(set_certificate),
        )
        .route("/dashboard/certificates/all", post(set_certificate_for_all))
        .route(
            "/dashboard/certificate-template",
            post(upload_certificate_template),
        )
        .route("/", get(index))
        .merge(auth_router::router())
        .with_state(state)
        .nest_service("/static", get_service(ServeDir::new("static")))
        .layer(TraceLayer::new_for_http())
        .layer(auth_layer);
    Ok(app)
}

async fn setup_templates() -> Environment<'static> {
    let mut env = Environment::new();
    env.set_loader(minijinja::path_loader("templates"));
    let assets = StaticAssets::from_dir("static");
    assets.register(&mut env);
    env
}

/// Signed-out visitors land on the public page; signed-in campers are routed
/// through the profile gate before they can reach anything camper-facing.
async fn index(State(state): State<AppState>, auth_session: AuthSession) -> impl IntoResponse {
    if let Some(user) = auth_session.user {
        match state.profiles.ensure(user.id).await {
            Ok(ProfileState::Missing) => Redirect::to("/setup-profile").into_response(),
            Ok(ProfileState::Present) => Redirect::to("/camps").into_response(),
            Err(err) => err.into_response(),
        }
    } else {
        let tmpl = state.templates.get_template("index.html").unwrap();
        let html = tmpl.render(minijinja::context! {}).unwrap();
        Html(html).into_response()
    }
}
