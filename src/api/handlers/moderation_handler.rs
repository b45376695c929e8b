//! Administrator views and mutations of explorer and entrepreneur profiles.

use axum::{
    extract::{Path, State},
    response::Redirect,
    routing::{get, post},
    Form, Router,
};

use crate::api::extractors::AdminUser;
use crate::api::middleware::Session;
use crate::api::AppState;
use crate::config::{
    ADMIN_DASHBOARD_PATH, MSG_ENTREPRENEUR_DELETED, MSG_ENTREPRENEUR_UPDATED,
    MSG_EXPLORER_DELETED, MSG_EXPLORER_UPDATED, MSG_UPDATE_FAILED,
};
use crate::domain::{EntrepreneurPatch, EntrepreneurProfile, ExplorerPatch, ExplorerProfile};
use crate::errors::{AppError, AppResult};
use crate::infra::FlashLevel;
use crate::types::Page;

pub fn moderation_routes() -> Router<AppState> {
    Router::new()
        .route("/emprendimiento/:id", get(view_entrepreneur))
        .route("/explorador/:id", get(view_explorer))
        .route("/editar_emprendimiento/:id", post(edit_entrepreneur))
        .route("/editar_explorador/:id", post(edit_explorer))
        .route("/eliminar_emprendimiento/:id", post(delete_entrepreneur))
        .route("/eliminar_explorador/:id", post(delete_explorer))
}

pub async fn view_entrepreneur(
    State(state): State<AppState>,
    _admin: AdminUser,
    session: Session,
    Path(id): Path<i32>,
) -> AppResult<Page<EntrepreneurProfile>> {
    let profile = state.moderation().entrepreneur(id).await?;
    Ok(Page::new("ver_emprendimiento", session.take_flashes().await).with_data(profile))
}

pub async fn view_explorer(
    State(state): State<AppState>,
    _admin: AdminUser,
    session: Session,
    Path(id): Path<i32>,
) -> AppResult<Page<ExplorerProfile>> {
    let profile = state.moderation().explorer(id).await?;
    Ok(Page::new("ver_explorador", session.take_flashes().await).with_data(profile))
}

pub async fn edit_entrepreneur(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    session: Session,
    Path(id): Path<i32>,
    Form(patch): Form<EntrepreneurPatch>,
) -> AppResult<Redirect> {
    let result = state
        .moderation()
        .edit_entrepreneur(id, patch, Some(admin.id))
        .await;
    back_to_dashboard(&session, result, MSG_ENTREPRENEUR_UPDATED).await
}

pub async fn edit_explorer(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    session: Session,
    Path(id): Path<i32>,
    Form(patch): Form<ExplorerPatch>,
) -> AppResult<Redirect> {
    let result = state
        .moderation()
        .edit_explorer(id, patch, Some(admin.id))
        .await;
    back_to_dashboard(&session, result, MSG_EXPLORER_UPDATED).await
}

pub async fn delete_entrepreneur(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    session: Session,
    Path(id): Path<i32>,
) -> AppResult<Redirect> {
    let result = state
        .moderation()
        .delete_entrepreneur(id, Some(admin.id))
        .await;
    back_to_dashboard(&session, result, MSG_ENTREPRENEUR_DELETED).await
}

pub async fn delete_explorer(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    session: Session,
    Path(id): Path<i32>,
) -> AppResult<Redirect> {
    let result = state.moderation().delete_explorer(id, Some(admin.id)).await;
    back_to_dashboard(&session, result, MSG_EXPLORER_DELETED).await
}

/// Flash the outcome and return to the admin dashboard. Unknown ids stay a
/// 404; storage failures are reported generically.
async fn back_to_dashboard<T>(
    session: &Session,
    result: AppResult<T>,
    success: &str,
) -> AppResult<Redirect> {
    match result {
        Ok(_) => session.flash(FlashLevel::Success, success).await,
        Err(AppError::NotFound) => return Err(AppError::NotFound),
        Err(e) if e.is_recoverable() => session.flash(FlashLevel::Danger, e.to_string()).await,
        Err(e) => {
            tracing::error!("Profile mutation failed: {}", e);
            session.flash(FlashLevel::Danger, MSG_UPDATE_FAILED).await;
        }
    }
    Ok(Redirect::to(ADMIN_DASHBOARD_PATH))
}
