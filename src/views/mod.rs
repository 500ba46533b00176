//! Server-rendered pages.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every page is a Leptos component rendered to a string once per request.
//! There is no hydration and no client bundle: the views hold no signals,
//! only the data the handler fetched. Forms post back to the portal and
//! the flash toast carries the outcome to the next page.
//!
//! `layout` holds the shared chrome and small components; the remaining
//! modules hold one component per route.

pub mod admin;
pub mod auth;
pub mod layout;
pub mod public;
pub mod registration;

use std::sync::Arc;

use axum::response::Html;
use leptos::prelude::*;
use time::{OffsetDateTime, UtcOffset};
use url::form_urlencoded;

use crate::config::Config;
use crate::services::schedule;
use crate::session::Flash;

pub const SITE_NAME: &str = "Pavilion Premier League";

/// Per-request data the layout needs besides the page body.
#[derive(Debug, Clone)]
pub struct PageContext {
    pub title: String,
    pub flash: Option<Flash>,
    pub logged_in: bool,
    /// Visitor's account is an admin: draw the Dashboard link.
    pub is_admin_user: bool,
    /// Show the admin navigation bar.
    pub admin: bool,
    /// Emit a meta refresh with this period.
    pub refresh_secs: Option<u32>,
    pub config: Arc<Config>,
}

impl PageContext {
    pub fn new(title: impl Into<String>, config: Arc<Config>) -> Self {
        Self {
            title: title.into(),
            flash: None,
            logged_in: false,
            is_admin_user: false,
            admin: false,
            refresh_secs: None,
            config,
        }
    }

    /// Show `message` as an error toast unless a flash is already pending.
    pub fn report_error(&mut self, message: impl Into<String>) {
        if self.flash.is_none() {
            self.flash = Some(Flash::error(message));
        }
    }

    #[must_use]
    pub fn offset(&self) -> UtcOffset {
        self.config.utc_offset
    }

    /// Absolute URL for an uploaded image.
    #[must_use]
    pub fn media(&self, raw: Option<&str>) -> Option<String> {
        raw.filter(|r| !r.trim().is_empty()).map(|r| self.config.media_url(r))
    }

    /// Local date and time, or "TBA" when the backend has none.
    #[must_use]
    pub fn datetime(&self, at: Option<OffsetDateTime>) -> String {
        at.map_or_else(|| "TBA".to_owned(), |at| schedule::format_datetime(at, self.offset()))
    }

    #[must_use]
    pub fn day(&self, at: Option<OffsetDateTime>) -> String {
        at.map_or_else(|| "TBA".to_owned(), |at| schedule::format_day(at, self.offset()))
    }
}

/// Render a full HTML document. The view is built inside a fresh reactive
/// owner so component setup has somewhere to register.
pub fn render_page<V, F>(build: F) -> Html<String>
where
    F: FnOnce() -> V,
    V: IntoView + 'static,
{
    let owner = Owner::new();
    let body = owner.with(|| build().to_html());
    Html(format!("<!DOCTYPE html>{body}"))
}

/// Link to `page` of a listing, keeping the other query parameters.
pub fn page_href(path: &str, query: &[(String, String)], page: usize) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in query.iter().filter(|(key, value)| key != "page" && !value.is_empty()) {
        serializer.append_pair(key, value);
    }
    if page > 1 {
        serializer.append_pair("page", &page.to_string());
    }
    let encoded = serializer.finish();
    if encoded.is_empty() { path.to_owned() } else { format!("{path}?{encoded}") }
}

/// Owned copy of an optional query value, for form inputs.
pub(crate) fn value_of(raw: Option<&str>) -> String {
    raw.unwrap_or_default().to_owned()
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
