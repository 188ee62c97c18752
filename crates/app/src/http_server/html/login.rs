use askama::Template;
use askama_axum::IntoResponse;
use axum::response::Redirect;

use common::prelude::Role;

use crate::http_server::auth::MaybeUser;

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginTemplate {}

/// Entry page. Authenticated callers are bounced straight to their
/// role's dashboard.
pub async fn handler(MaybeUser(user): MaybeUser) -> askama_axum::Response {
    match user {
        Some(user) => match user.role {
            Role::Admin => Redirect::to("/admin/dashboard").into_response(),
            Role::Student => Redirect::to("/student/dashboard").into_response(),
        },
        None => LoginTemplate {}.into_response(),
    }
}
