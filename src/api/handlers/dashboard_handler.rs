//! Dashboards for each role.

use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
    routing::get,
    Router,
};

use crate::api::extractors::{AdminUser, CurrentUser};
use crate::api::middleware::Session;
use crate::api::AppState;
use crate::config::LOGIN_PATH;
use crate::domain::AdminDashboard;
use crate::errors::{AppError, AppResult};
use crate::types::Page;

pub fn dashboard_routes() -> Router<AppState> {
    Router::new()
        .route("/admin_dashboard", get(admin_dashboard))
        .route("/emprendedor_dashboard", get(entrepreneur_dashboard))
        .route("/explorador_dashboard", get(explorer_dashboard))
}

/// Totals, charts, listings and the audit log.
pub async fn admin_dashboard(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    session: Session,
) -> AppResult<Page<AdminDashboard>> {
    let dashboard = state.reports().admin_dashboard().await?;
    Ok(Page::new("admin_dashboard", session.take_flashes().await).with_data(dashboard))
}

pub async fn entrepreneur_dashboard(
    state: State<AppState>,
    user: CurrentUser,
    session: Session,
) -> AppResult<Response> {
    account_page("emprendedor_dashboard", state, user, session).await
}

pub async fn explorer_dashboard(
    state: State<AppState>,
    user: CurrentUser,
    session: Session,
) -> AppResult<Response> {
    account_page("explorador_dashboard", state, user, session).await
}

async fn account_page(
    view: &'static str,
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    session: Session,
) -> AppResult<Response> {
    match state.moderation().account(user.id).await {
        Ok(account) => {
            Ok(Page::new(view, session.take_flashes().await)
                .with_data(account)
                .into_response())
        }
        // Account removed while the session was alive
        Err(AppError::NotFound) => {
            session.sign_out().await?;
            Ok(Redirect::to(LOGIN_PATH).into_response())
        }
        Err(e) => Err(e),
    }
}
