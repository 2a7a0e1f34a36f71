// src/web/mod.rs
//! Pages and charts over the figures loaded at startup.

pub mod handlers;
pub mod templates;

use std::sync::Arc;

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use tera::{Context, Tera};
use tower_http::trace::TraceLayer;

use crate::aggregate::FinancialData;
use crate::utils::error::LookupError;

pub struct AppState {
    pub data: FinancialData,
    templates: Tera,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    pub fn new(data: FinancialData) -> Result<Self, tera::Error> {
        Ok(Self {
            data,
            templates: templates::build()?,
        })
    }

    fn render(&self, name: &str, context: &Context) -> Result<Html<String>, WebError> {
        Ok(Html(self.templates.render(name, context)?))
    }
}

pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/stock/:name/:year", get(handlers::stock_year))
        .route("/dash/:name", get(handlers::charts))
        .fallback(handlers::not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(Debug, thiserror::Error)]
pub enum WebError {
    #[error(transparent)]
    Lookup(#[from] LookupError),

    #[error("No page at {0}")]
    NotFound(String),

    #[error("Rendering failed: {0}")]
    Render(#[from] tera::Error),
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        match &self {
            WebError::Lookup(_) | WebError::NotFound(_) => {
                tracing::debug!("404: {}", self);
                let body = format!(
                    "<!DOCTYPE html><html><body><h1>404 Page Error</h1><p>{}</p><p><a href=\"/\">Home</a></p></body></html>",
                    tera::escape_html(&self.to_string())
                );
                (StatusCode::NOT_FOUND, Html(body)).into_response()
            }
            WebError::Render(e) => {
                tracing::error!("Template rendering failed: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
            }
        }
    }
}
