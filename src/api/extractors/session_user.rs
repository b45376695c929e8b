//! Identity extractors over the request's session.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};

use crate::api::middleware::Session;
use crate::config::{LOGIN_PATH, MSG_NOT_AUTHORIZED};
use crate::infra::{FlashLevel, SessionUser};

/// Any signed-in user. Anonymous requests are sent to the login page.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub SessionUser);

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for CurrentUser {
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let session = Session::from_request_parts(parts, state)
            .await
            .map_err(IntoResponse::into_response)?;

        match session.user().await {
            Some(user) => Ok(CurrentUser(user)),
            None => Err(Redirect::to(LOGIN_PATH).into_response()),
        }
    }
}

/// A signed-in administrator. Everyone else is sent to the login page with a
/// flash.
#[derive(Debug, Clone)]
pub struct AdminUser(pub SessionUser);

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for AdminUser {
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let session = Session::from_request_parts(parts, state)
            .await
            .map_err(IntoResponse::into_response)?;

        match session.user().await {
            Some(user) if user.role.is_admin() => Ok(AdminUser(user)),
            Some(user) => {
                tracing::warn!(user_id = user.id, role = %user.role, "Non-admin hit an admin route");
                session.flash(FlashLevel::Danger, MSG_NOT_AUTHORIZED).await;
                Err(Redirect::to(LOGIN_PATH).into_response())
            }
            None => Err(Redirect::to(LOGIN_PATH).into_response()),
        }
    }
}
