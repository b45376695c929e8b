//! Public informational pages.

use axum::{routing::get, Router};

use crate::api::middleware::Session;
use crate::api::AppState;
use crate::types::Page;

/// Path and view name of every static page.
const PAGES: [(&str, &str); 7] = [
    ("/", "home"),
    ("/Restaurantes", "restaurantes"),
    ("/Arte", "arte"),
    ("/Deportes", "deportes"),
    ("/Ocio", "ocio"),
    ("/Shopping", "shopping"),
    ("/Naturaleza", "naturaleza"),
];

pub fn page_routes() -> Router<AppState> {
    PAGES.iter().fold(Router::new(), |router, &(path, view)| {
        router.route(path, get(move |session: Session| render(view, session)))
    })
}

async fn render(view: &'static str, session: Session) -> Page<()> {
    Page::new(view, session.take_flashes().await)
}
