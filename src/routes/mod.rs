//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! Public pages, login, registration and the admin dashboard are all
//! server-rendered handlers under one Axum router. Each GET handler fetches
//! what its page needs from the backend and renders it; each POST forwards
//! the submitted form and redirects with a flash (post/redirect/get).
//!
//! ERROR HANDLING
//! ==============
//! A failed GET still renders its page, with empty data and an error toast.
//! A failed POST redirects back to the originating list with the backend's
//! message. Both are logged once here, at the edge.

pub mod admin;
pub mod auth;
pub mod public;
pub mod registration;

use axum::Router;
use axum::extract::multipart::{Multipart, MultipartError};
use axum::extract::{DefaultBodyLimit, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum_extra::extract::cookie::CookieJar;
use leptos::prelude::*;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::api::{ApiError, UploadFile, UploadForm};
use crate::session::{Flash, Session, redirect_with_flash, take_flash};
use crate::state::AppState;
use crate::views::public::NotFoundPage;
use crate::views::{PageContext, render_page};

/// The whole portal: pages, static assets and middleware.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);
    let static_files = ServeDir::new(&state.config.static_dir);
    let body_limit = DefaultBodyLimit::max(state.config.max_upload_bytes);

    Router::new()
        .merge(public::routes())
        .merge(auth::routes())
        .merge(registration::routes())
        .merge(admin::routes())
        .route("/healthz", get(healthz))
        .nest_service("/static", static_files)
        .fallback(not_found)
        .layer(body_limit)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

async fn not_found(State(state): State<AppState>, session: Session, jar: CookieJar) -> Response {
    let (jar, ctx) = page_context(&state, jar, &session, "Not found");
    let page = render_page(move || view! { <NotFoundPage ctx=ctx message="That page does not exist.".to_owned()/> });
    (StatusCode::NOT_FOUND, jar, page).into_response()
}

// =============================================================================
// HANDLER HELPERS
// =============================================================================

/// Consume the pending flash and build the layout context for a public page.
pub(crate) fn page_context(
    state: &AppState,
    jar: CookieJar,
    session: &Session,
    title: impl Into<String>,
) -> (CookieJar, PageContext) {
    let (jar, flash) = take_flash(jar, state.config.cookie_secure);
    let mut ctx = PageContext::new(title, state.config.clone());
    ctx.flash = flash;
    ctx.logged_in = session.is_logged_in();
    ctx.is_admin_user = session.shows_dashboard();
    (jar, ctx)
}

/// Same as [`page_context`] with the admin bar shown.
pub(crate) fn admin_context(state: &AppState, jar: CookieJar, title: impl Into<String>) -> (CookieJar, PageContext) {
    let (jar, flash) = take_flash(jar, state.config.cookie_secure);
    let mut ctx = PageContext::new(title, state.config.clone());
    ctx.flash = flash;
    ctx.logged_in = true;
    ctx.is_admin_user = true;
    ctx.admin = true;
    (jar, ctx)
}

/// Log a failed page fetch and surface it as a toast. Returns the fallback.
pub(crate) fn recover<T>(ctx: &mut PageContext, what: &'static str, result: Result<T, ApiError>, fallback: T) -> T {
    match result {
        Ok(value) => value,
        Err(e) => {
            tracing::error!(error = %e, what, "page fetch failed");
            ctx.report_error(e.user_message());
            fallback
        }
    }
}

pub(crate) fn flash_redirect(state: &AppState, jar: CookieJar, to: &str, flash: Flash) -> Response {
    redirect_with_flash(jar, state.config.cookie_secure, to, flash)
}

/// Redirect to `to` with a success toast, or the backend's message on error.
pub(crate) fn finish(
    state: &AppState,
    jar: CookieJar,
    to: &str,
    action: &'static str,
    result: Result<(), ApiError>,
    success: &str,
) -> Response {
    let flash = match result {
        Ok(()) => Flash::success(success),
        Err(e) => {
            tracing::error!(error = %e, action, "backend mutation failed");
            Flash::error(e.user_message())
        }
    };
    flash_redirect(state, jar, to, flash)
}

/// Read a multipart body into an [`UploadForm`]. File inputs left empty by
/// the browser (no name, no bytes) are dropped.
pub(crate) async fn read_multipart(mut multipart: Multipart) -> Result<UploadForm, MultipartError> {
    let mut form = UploadForm::new();
    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_owned();
        match field.file_name().map(str::to_owned) {
            Some(file_name) => {
                let content_type = field.content_type().map(str::to_owned);
                let bytes = field.bytes().await?;
                if file_name.is_empty() || bytes.is_empty() {
                    continue;
                }
                form.files.push(UploadFile { field: name, file_name, content_type, bytes: bytes.to_vec() });
            }
            None => {
                let value = field.text().await?;
                form.fields.push((name, value));
            }
        }
    }
    Ok(form)
}

/// Redirect to `back` after a multipart body failed to parse. A body over
/// the configured cap gets its own message naming the limit.
pub(crate) fn upload_rejected(state: &AppState, jar: CookieJar, back: &str, error: &MultipartError) -> Response {
    let limit = state.config.max_upload_bytes;
    let message = if error.status() == StatusCode::PAYLOAD_TOO_LARGE {
        tracing::warn!(error = %error, limit, back, "upload exceeds body limit");
        format!("The upload is too large. Files may total at most {}.", format_size(limit))
    } else {
        tracing::warn!(error = %error, back, "upload unreadable");
        "The upload could not be read.".to_owned()
    };
    flash_redirect(state, jar, back, Flash::error(message))
}

pub(crate) fn format_size(bytes: usize) -> String {
    const KIB: usize = 1024;
    const MIB: usize = 1024 * KIB;
    if bytes >= MIB && bytes % MIB == 0 {
        format!("{} MB", bytes / MIB)
    } else if bytes >= KIB {
        format!("{} KB", bytes / KIB)
    } else {
        format!("{bytes} bytes")
    }
}

/// Trimmed, non-empty form value.
pub(crate) fn non_blank(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|value| !value.is_empty())
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
