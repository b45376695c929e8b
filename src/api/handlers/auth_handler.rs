//! Authentication handlers: sign-up, login, logout and the admin bootstrap.

use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
    routing::get,
    Form, Router,
};
use serde::Deserialize;

use crate::api::middleware::Session;
use crate::api::AppState;
use crate::config::{
    LOGIN_PATH, MSG_ADMIN_CREATED, MSG_ADMIN_EXISTS, MSG_LOGGED_OUT, MSG_REGISTERED,
    MSG_REGISTRATION_FAILED, REGISTER_PATH,
};
use crate::domain::Registration;
use crate::errors::{AppError, AppResult};
use crate::infra::{Flash, FlashLevel, SessionUser};
use crate::services::BootstrapOutcome;
use crate::types::{MessageResponse, Page};

/// Login form. Accepts a username or an email as `identifier`.
#[derive(Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub identifier: String,
    #[serde(default)]
    pub password: String,
}

/// Create authentication routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", get(register_page).post(register))
        .route("/login", get(login_page).post(login))
        .route("/logout", get(logout))
        .route("/BotonLog", get(dispatch))
        .route("/crear_admin", get(create_admin))
}

pub async fn register_page(session: Session) -> Page<()> {
    Page::new("register", session.take_flashes().await)
}

/// Register a new account, then send the user to the login page.
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Form(registration): Form<Registration>,
) -> Redirect {
    match state.auth().register(registration).await {
        Ok(_) => {
            session.flash(FlashLevel::Success, MSG_REGISTERED).await;
            Redirect::to(LOGIN_PATH)
        }
        Err(e) if e.is_recoverable() => {
            session.flash(FlashLevel::Danger, e.to_string()).await;
            Redirect::to(REGISTER_PATH)
        }
        Err(e) => {
            tracing::error!("Registration failed: {}", e);
            session.flash(FlashLevel::Danger, MSG_REGISTRATION_FAILED).await;
            Redirect::to(REGISTER_PATH)
        }
    }
}

pub async fn login_page(session: Session) -> Page<()> {
    Page::new("login", session.take_flashes().await)
}

/// Sign in and land on the role's dashboard. Bad credentials redisplay the
/// login view with a generic message.
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> AppResult<Response> {
    match state.auth().login(&form.identifier, &form.password).await {
        Ok(user) => {
            session.sign_in(SessionUser::from(&user)).await?;
            session
                .flash(FlashLevel::Success, format!("Bienvenido {}!", user.username))
                .await;
            Ok(Redirect::to(user.role.dashboard_path()).into_response())
        }
        Err(e @ AppError::InvalidCredentials) => {
            let mut flashes = session.take_flashes().await;
            flashes.push(Flash::new(FlashLevel::Danger, e.to_string()));
            Ok(Page::new("login", flashes).into_response())
        }
        Err(e) => Err(e),
    }
}

pub async fn logout(session: Session) -> AppResult<Redirect> {
    session.sign_out().await?;
    session.flash(FlashLevel::Info, MSG_LOGGED_OUT).await;
    Ok(Redirect::to(LOGIN_PATH))
}

/// `/BotonLog`: send the visitor to their dashboard, or to login.
pub async fn dispatch(session: Session) -> Redirect {
    match session.user().await {
        Some(user) => Redirect::to(user.role.dashboard_path()),
        None => Redirect::to(LOGIN_PATH),
    }
}

/// Create the configured administrator once.
pub async fn create_admin(State(state): State<AppState>) -> AppResult<MessageResponse> {
    let message = match state.auth().bootstrap_admin().await? {
        BootstrapOutcome::Created(user) => format!("{}: {}", MSG_ADMIN_CREATED, user.username),
        BootstrapOutcome::AlreadyExists => MSG_ADMIN_EXISTS.to_string(),
    };
    Ok(MessageResponse::new(message))
}
