use askama::Template;
use askama_axum::IntoResponse;

use common::prelude::SessionUser;

use crate::http_server::auth::AdminPage;

#[derive(Template)]
#[template(path = "admin/dashboard.html")]
pub struct DashboardTemplate {
    pub user: SessionUser,
}

pub async fn handler(AdminPage(user): AdminPage) -> askama_axum::Response {
    DashboardTemplate { user }.into_response()
}
