use axum::{
    extract::State,
    response::{Html, IntoResponse, Redirect},
};
use minijinja::context;

use crate::auth::user::AuthSession;
use crate::router::AppState;

/// The camper's view of their own application: the most recent registration
/// across all camps, or a "not registered yet" page.
pub async fn status(State(state): State<AppState>, auth_session: AuthSession) -> impl IntoResponse {
    let Some(user) = auth_session.user else {
        return Redirect::to("/login?next=/status").into_response();
    };

    match state.registrations.my_registration(user.id).await {
        Ok(registration) => {
            let tmpl = state.templates.get_template("status.html").unwrap();
            let html = tmpl
                .render(context! {
                    registration => registration,
                })
                .unwrap();
            Html(html).into_response()
        }
        Err(err) => err.into_response(),
    }
}
