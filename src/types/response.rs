use axum::{response::IntoResponse, Json};
use serde::Serialize;

use crate::infra::Flash;

/// A rendered view: which page, the flashes consumed for it and its data.
#[derive(Debug, Serialize)]
pub struct Page<T: Serialize> {
    pub view: &'static str,
    pub flashes: Vec<Flash>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl Page<()> {
    pub fn new(view: &'static str, flashes: Vec<Flash>) -> Self {
        Self {
            view,
            flashes,
            data: None,
        }
    }
}

impl<T: Serialize> Page<T> {
    pub fn with_data<U: Serialize>(self, data: U) -> Page<U> {
        Page {
            view: self.view,
            flashes: self.flashes,
            data: Some(data),
        }
    }
}

impl<T: Serialize> IntoResponse for Page<T> {
    fn into_response(self) -> axum::response::Response {
        Json(self).into_response()
    }
}

/// Message-only response
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl IntoResponse for MessageResponse {
    fn into_response(self) -> axum::response::Response {
        Json(self).into_response()
    }
}
