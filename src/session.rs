//! Browser session: the bearer-token cookie, admin gating and flash toasts.
//!
//! DESIGN
//! ======
//! The portal keeps no sessions of its own. The backend's bearer token is
//! stored verbatim in an HttpOnly cookie and replayed on every backend call.
//! Admin pages ask the backend who the token belongs to (`/auth/me`) on
//! each request, so a revoked token or demoted account takes effect
//! immediately.
//!
//! A second cookie remembers that the account is an admin. It only decides
//! whether the Dashboard link is drawn; admin pages never trust it.
//!
//! Confirmation and error toasts survive the post/redirect/get hop in a
//! short-lived flash cookie that the next rendered page reads and clears.

use axum::extract::FromRef;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::{Deserialize, Serialize};
use time::Duration;

use crate::api::endpoints;
use crate::api::models::CurrentUser;
use crate::state::AppState;

pub const TOKEN_COOKIE: &str = "pavilion_token";
pub const FLASH_COOKIE: &str = "pavilion_flash";
pub const ROLE_COOKIE: &str = "pavilion_role";
const ADMIN_ROLE: &str = "admin";
const FLASH_MAX_AGE_SECS: i64 = 60;

// =============================================================================
// COOKIES
// =============================================================================

fn build_cookie(name: &'static str, value: String, secure: bool) -> Cookie<'static> {
    Cookie::build((name, value))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .build()
}

fn expired_cookie(name: &'static str, secure: bool) -> Cookie<'static> {
    let mut cookie = build_cookie(name, String::new(), secure);
    cookie.set_max_age(Duration::ZERO);
    cookie
}

pub fn token_cookie(token: &str, secure: bool) -> Cookie<'static> {
    build_cookie(TOKEN_COOKIE, token.to_owned(), secure)
}

pub fn clear_token_cookie(secure: bool) -> Cookie<'static> {
    expired_cookie(TOKEN_COOKIE, secure)
}

/// Role hint written at login: set for admins, cleared for everyone else.
pub fn role_cookie(is_admin: bool, secure: bool) -> Cookie<'static> {
    if is_admin {
        build_cookie(ROLE_COOKIE, ADMIN_ROLE.to_owned(), secure)
    } else {
        expired_cookie(ROLE_COOKIE, secure)
    }
}

/// Token from the jar, ignoring an empty value left by a cleared cookie.
pub fn token_from_jar(jar: &CookieJar) -> Option<String> {
    jar.get(TOKEN_COOKIE)
        .map(Cookie::value)
        .filter(|value| !value.is_empty())
        .map(str::to_owned)
}

// =============================================================================
// FLASH
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashKind {
    Success,
    Error,
}

impl FlashKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

/// A one-shot toast carried to the next page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    pub kind: FlashKind,
    pub message: String,
}

impl Flash {
    pub fn success(message: impl Into<String>) -> Self {
        Self { kind: FlashKind::Success, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { kind: FlashKind::Error, message: message.into() }
    }

    /// Cookie-safe encoding: base64url of the JSON form.
    #[must_use]
    pub fn encode(&self) -> String {
        let json = serde_json::to_vec(self).unwrap_or_default();
        URL_SAFE_NO_PAD.encode(json)
    }

    #[must_use]
    pub fn decode(raw: &str) -> Option<Self> {
        let bytes = URL_SAFE_NO_PAD.decode(raw.trim()).ok()?;
        serde_json::from_slice(&bytes).ok()
    }
}

pub fn flash_cookie(flash: &Flash, secure: bool) -> Cookie<'static> {
    let mut cookie = build_cookie(FLASH_COOKIE, flash.encode(), secure);
    cookie.set_max_age(Duration::seconds(FLASH_MAX_AGE_SECS));
    cookie
}

/// See-other redirect to `to` that shows `flash` on arrival.
pub fn redirect_with_flash(jar: CookieJar, secure: bool, to: &str, flash: Flash) -> Response {
    (jar.add(flash_cookie(&flash, secure)), Redirect::to(to)).into_response()
}

/// Read the pending flash, if any, and expire its cookie. The returned jar
/// must be part of the response for the flash to be consumed.
pub fn take_flash(jar: CookieJar, secure: bool) -> (CookieJar, Option<Flash>) {
    let Some(raw) = jar.get(FLASH_COOKIE).map(|c| c.value().to_owned()) else {
        return (jar, None);
    };
    let flash = Flash::decode(&raw);
    (jar.add(expired_cookie(FLASH_COOKIE, secure)), flash)
}

// =============================================================================
// EXTRACTORS
// =============================================================================

/// Any visitor; carries the token when logged in. Never rejects.
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub token: Option<String>,
    /// Role hint from login. Display only.
    pub admin_hint: bool,
}

impl Session {
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        self.token.is_some()
    }

    /// Logged in with the admin role hint set.
    #[must_use]
    pub fn shows_dashboard(&self) -> bool {
        self.is_logged_in() && self.admin_hint
    }
}

impl<S> axum::extract::FromRequestParts<S> for Session
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut axum::http::request::Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let admin_hint = jar.get(ROLE_COOKIE).is_some_and(|c| c.value() == ADMIN_ROLE);
        Ok(Self { token: token_from_jar(&jar), admin_hint })
    }
}

/// A logged-in administrator. Anyone else is redirected with an error toast:
/// anonymous and expired sessions to `/login`, non-admins to `/`.
#[derive(Debug, Clone)]
pub struct AdminSession {
    pub token: String,
    pub user: CurrentUser,
}

impl AdminSession {
    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }
}

impl<S> axum::extract::FromRequestParts<S> for AdminSession
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut axum::http::request::Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        let secure = app_state.config.cookie_secure;
        let jar = CookieJar::from_headers(&parts.headers);

        let Some(token) = token_from_jar(&jar) else {
            return Err(redirect_with_flash(
                CookieJar::new(),
                secure,
                "/login",
                Flash::error("Please log in to continue."),
            ));
        };

        match endpoints::current_user(app_state.api(), &token).await {
            Ok(user) if user.is_admin() => Ok(Self { token, user }),
            Ok(user) => {
                tracing::warn!(user_id = %user.id, "non-admin requested admin page");
                Err(redirect_with_flash(
                    CookieJar::new().add(role_cookie(false, secure)),
                    secure,
                    "/",
                    Flash::error("Admin access required."),
                ))
            }
            Err(e) if e.is_unauthorized() => Err(redirect_with_flash(
                CookieJar::new().add(clear_token_cookie(secure)).add(role_cookie(false, secure)),
                secure,
                "/login",
                Flash::error("Your session has expired. Please log in again."),
            )),
            Err(e) => {
                tracing::error!(error = %e, "admin session check failed");
                Err(redirect_with_flash(CookieJar::new(), secure, "/login", Flash::error(e.user_message())))
            }
        }
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
