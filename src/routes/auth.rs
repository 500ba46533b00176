//! Auth routes: login, account sign-up, logout.
//!
//! The backend issues the bearer token; the portal only stores it in the
//! session cookie and forgets it on logout.

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Form, Router};
use axum_extra::extract::cookie::CookieJar;
use leptos::prelude::*;
use serde::Deserialize;

use super::{flash_redirect, non_blank, page_context};
use crate::api::endpoints;
use crate::session::{Flash, Session, clear_token_cookie, role_cookie, token_cookie};
use crate::state::AppState;
use crate::views::auth::{LoginPage, RegisterPage};
use crate::views::render_page;

pub const MIN_PASSWORD_LEN: usize = 6;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(login_page).post(login))
        .route("/register", get(register_page).post(register))
        .route("/logout", post(logout))
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub confirm_password: String,
}

impl RegisterForm {
    /// First problem with the submission, if any.
    pub fn validate(&self) -> Option<&'static str> {
        if non_blank(Some(&self.name)).is_none() || non_blank(Some(&self.email)).is_none() {
            return Some("Name and email are required.");
        }
        if !self.email.contains('@') {
            return Some("Please enter a valid email address.");
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Some("Password must be at least 6 characters.");
        }
        if self.password != self.confirm_password {
            return Some("Passwords do not match.");
        }
        None
    }
}

/// `GET /login`.
pub async fn login_page(State(state): State<AppState>, session: Session, jar: CookieJar) -> impl IntoResponse {
    let (jar, ctx) = page_context(&state, jar, &session, "Log in");
    (jar, render_page(move || view! { <LoginPage ctx=ctx email=String::new()/> }))
}

/// `POST /login`: store the token, then send admins to the dashboard.
pub async fn login(State(state): State<AppState>, jar: CookieJar, Form(form): Form<LoginForm>) -> Response {
    let email = form.email.trim();
    if email.is_empty() || form.password.is_empty() {
        return flash_redirect(&state, jar, "/login", Flash::error("Email and password are required."));
    }

    let token = match endpoints::login(state.api(), email, &form.password).await {
        Ok(token) => token,
        Err(e) => {
            tracing::warn!(error = %e, "login rejected");
            return flash_redirect(&state, jar, "/login", Flash::error(e.user_message()));
        }
    };

    let is_admin = match endpoints::current_user(state.api(), &token).await {
        Ok(user) => user.is_admin(),
        Err(e) => {
            tracing::warn!(error = %e, "profile lookup after login failed");
            false
        }
    };
    let destination = if is_admin { "/admin" } else { "/" };

    let secure = state.config.cookie_secure;
    let jar = jar.add(token_cookie(&token, secure)).add(role_cookie(is_admin, secure));
    flash_redirect(&state, jar, destination, Flash::success("Welcome back!"))
}

/// `GET /register`.
pub async fn register_page(State(state): State<AppState>, session: Session, jar: CookieJar) -> impl IntoResponse {
    let (jar, ctx) = page_context(&state, jar, &session, "Sign up");
    (jar, render_page(move || view! { <RegisterPage ctx=ctx name=String::new() email=String::new()/> }))
}

/// `POST /register`.
pub async fn register(State(state): State<AppState>, jar: CookieJar, Form(form): Form<RegisterForm>) -> Response {
    if let Some(problem) = form.validate() {
        return flash_redirect(&state, jar, "/register", Flash::error(problem));
    }
    match endpoints::register(state.api(), form.name.trim(), form.email.trim(), &form.password).await {
        Ok(()) => flash_redirect(&state, jar, "/login", Flash::success("Account created. Please log in.")),
        Err(e) => {
            tracing::warn!(error = %e, "registration rejected");
            flash_redirect(&state, jar, "/register", Flash::error(e.user_message()))
        }
    }
}

/// `POST /logout`: forget the token and role hint.
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> Response {
    let secure = state.config.cookie_secure;
    let jar = jar.add(clear_token_cookie(secure)).add(role_cookie(false, secure));
    flash_redirect(&state, jar, "/", Flash::success("You have been logged out."))
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
