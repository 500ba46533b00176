//! Team and player registration, and the eSewa fee payment.
//!
//! DESIGN
//! ======
//! Registration forms are multipart so logos, receipts and profile photos
//! pass straight through to the backend. After a team registers, the
//! visitor is sent to its payment page; the gateway round trip ends on
//! `/payment/success`, which asks the backend to verify the transaction.

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::{Form, Router};
use axum_extra::extract::cookie::CookieJar;
use leptos::prelude::*;
use serde::Deserialize;
use serde_json::Value;

use super::public::missing_record;
use super::{flash_redirect, page_context, read_multipart, upload_rejected};
use crate::api::endpoints;
use crate::api::normalize::{pick_str, reference_id, unwrap_object};
use crate::services::payment::{self, PaymentError};
use crate::session::{Flash, Session};
use crate::state::AppState;
use crate::views::registration::{
    AddPlayerPage, EsewaRedirectPage, MockGatewayPage, PaymentPage, PaymentResultPage, RegisterTeamPage,
};
use crate::views::{PageContext, render_page};

const MOCK_STATUS_FIELD: &str = "mock_status";

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/register-team", get(register_team_page).post(register_team))
        .route("/teams/{id}/players/new", get(add_player_page).post(add_player))
        .route("/payment/success", get(payment_success))
        .route("/payment/failure", get(payment_failure))
        .route("/payment/esewa/mock", get(mock_gateway).post(mock_gateway_submit))
        .route("/payment/{team_id}", get(payment_page))
        .route("/payment/{team_id}/esewa", post(start_payment))
}

// =============================================================================
// TEAM + PLAYER REGISTRATION
// =============================================================================

/// `GET /register-team`.
pub async fn register_team_page(State(state): State<AppState>, session: Session, jar: CookieJar) -> impl IntoResponse {
    let (jar, ctx) = page_context(&state, jar, &session, "Register a team");
    let fee = state.config.esewa.registration_fee;
    (jar, render_page(move || view! { <RegisterTeamPage ctx=ctx fee=fee/> }))
}

/// `POST /register-team`: multipart with `logo` and `paymentReceipt`.
pub async fn register_team(
    State(state): State<AppState>,
    session: Session,
    jar: CookieJar,
    multipart: Multipart,
) -> Response {
    let form = match read_multipart(multipart).await {
        Ok(form) => form,
        Err(e) => return upload_rejected(&state, jar, "/register-team", &e),
    };
    if ["name", "captain", "contactNumber"]
        .iter()
        .any(|field| form.non_empty(field).is_none())
    {
        return flash_redirect(
            &state,
            jar,
            "/register-team",
            Flash::error("Team name, captain and contact number are required."),
        );
    }

    match endpoints::create_team(state.api(), session.token(), form).await {
        Ok(Some(team_id)) => flash_redirect(
            &state,
            jar,
            &format!("/payment/{team_id}"),
            Flash::success("Team registered. Pay the registration fee to complete it."),
        ),
        Ok(None) => flash_redirect(
            &state,
            jar,
            "/teams",
            Flash::success("Team registered. It will appear once an admin verifies it."),
        ),
        Err(e) => {
            tracing::error!(error = %e, "team registration failed");
            flash_redirect(&state, jar, "/register-team", Flash::error(e.user_message()))
        }
    }
}

/// `GET /teams/{id}/players/new`.
pub async fn add_player_page(
    State(state): State<AppState>,
    session: Session,
    jar: CookieJar,
    Path(id): Path<String>,
) -> Response {
    let (jar, ctx) = page_context(&state, jar, &session, "Add player");
    match endpoints::get_team(state.api(), session.token(), &id).await {
        Ok(team) => (jar, render_page(move || view! { <AddPlayerPage ctx=ctx team=team/> })).into_response(),
        Err(e) => missing_record(jar, ctx, "team", &e),
    }
}

/// `POST /teams/{id}/players/new`: multipart with `profilePhoto`.
pub async fn add_player(
    State(state): State<AppState>,
    session: Session,
    jar: CookieJar,
    Path(id): Path<String>,
    multipart: Multipart,
) -> Response {
    let back = format!("/teams/{id}/players/new");
    let form = match read_multipart(multipart).await {
        Ok(form) => form,
        Err(e) => return upload_rejected(&state, jar, &back, &e),
    };
    if form.non_empty("name").is_none() {
        return flash_redirect(&state, jar, &back, Flash::error("Player name is required."));
    }
    let form = form.text("team", id.clone());

    match endpoints::create_player(state.api(), session.token(), form).await {
        Ok(()) => flash_redirect(
            &state,
            jar,
            &format!("/teams/{id}"),
            Flash::success("Player added. They will be listed once verified."),
        ),
        Err(e) => {
            tracing::error!(error = %e, team_id = %id, "player registration failed");
            flash_redirect(&state, jar, &back, Flash::error(e.user_message()))
        }
    }
}

// =============================================================================
// PAYMENT
// =============================================================================

/// `GET /payment/{team_id}`.
pub async fn payment_page(
    State(state): State<AppState>,
    session: Session,
    jar: CookieJar,
    Path(team_id): Path<String>,
) -> Response {
    let (jar, ctx) = page_context(&state, jar, &session, "Registration fee");
    let fee = state.config.esewa.registration_fee;
    match endpoints::get_team(state.api(), session.token(), &team_id).await {
        Ok(team) => (jar, render_page(move || view! { <PaymentPage ctx=ctx team=team fee=fee/> })).into_response(),
        Err(e) => missing_record(jar, ctx, "team", &e),
    }
}

/// `POST /payment/{team_id}/esewa`: ask the backend to sign the checkout
/// and hand the browser a form that posts to the gateway.
pub async fn start_payment(
    State(state): State<AppState>,
    session: Session,
    jar: CookieJar,
    Path(team_id): Path<String>,
) -> Response {
    let payload = payment::initiate_payload(&team_id, &state.config);
    match endpoints::initiate_payment(state.api(), session.token(), payload).await {
        Ok(init) => {
            let checkout = payment::checkout_form(&init, &state.config);
            tracing::info!(team_id = %team_id, transaction = checkout.field("transaction_uuid").unwrap_or_default(), "payment initiated");
            let (jar, ctx) = page_context(&state, jar, &session, "Continue to eSewa");
            (jar, render_page(move || view! { <EsewaRedirectPage ctx=ctx checkout=checkout/> })).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, team_id = %team_id, "payment initiation failed");
            flash_redirect(&state, jar, &format!("/payment/{team_id}"), Flash::error(e.user_message()))
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct CallbackQuery {
    pub data: Option<String>,
}

fn result_page(jar: CookieJar, ctx: PageContext, status: StatusCode, success: bool, message: String, team_id: Option<String>) -> Response {
    let page = render_page(move || {
        view! { <PaymentResultPage ctx=ctx success=success message=message team_id=team_id/> }
    });
    (status, jar, page).into_response()
}

/// Team id the backend reports for a verified payment, if any.
fn verified_team_id(body: &Value) -> Option<String> {
    let record = unwrap_object(body, &["payment", "data"]).unwrap_or(body);
    reference_id(record, &["team", "teamId"]).or_else(|| pick_str(body, &["teamId"]))
}

/// `GET /payment/success?data=`: decode the gateway payload and have the
/// backend verify it.
pub async fn payment_success(
    State(state): State<AppState>,
    session: Session,
    jar: CookieJar,
    Query(query): Query<CallbackQuery>,
) -> Response {
    let (jar, ctx) = page_context(&state, jar, &session, "Payment");
    let Some(data) = query.data.filter(|d| !d.trim().is_empty()) else {
        return result_page(jar, ctx, StatusCode::BAD_REQUEST, false, "No payment details were received.".to_owned(), None);
    };

    let callback = match payment::decode_callback(&data) {
        Ok(callback) => callback,
        Err(e) => {
            tracing::warn!(error = %e, "undecodable payment callback");
            let message = match e {
                PaymentError::MissingField(_) => "The payment response was incomplete.",
                PaymentError::InvalidEncoding | PaymentError::InvalidPayload(_) | PaymentError::ForeignReturnUrl(_) => "The payment response could not be read.",
            };
            return result_page(jar, ctx, StatusCode::BAD_REQUEST, false, message.to_owned(), None);
        }
    };
    if !callback.is_complete() {
        let message = format!("eSewa reported the payment as {}.", callback.status.to_lowercase());
        return result_page(jar, ctx, StatusCode::OK, false, message, None);
    }

    match endpoints::verify_payment(state.api(), session.token(), callback.verify_payload(&data)).await {
        Ok(body) => {
            tracing::info!(transaction = %callback.transaction_uuid, "payment verified");
            let message = format!("We received NPR {}. Your registration is now awaiting verification.", callback.total_amount);
            result_page(jar, ctx, StatusCode::OK, true, message, verified_team_id(&body))
        }
        Err(e) => {
            tracing::error!(error = %e, transaction = %callback.transaction_uuid, "payment verification failed");
            result_page(jar, ctx, StatusCode::OK, false, e.user_message(), None)
        }
    }
}

/// `GET /payment/failure`.
pub async fn payment_failure(State(state): State<AppState>, session: Session, jar: CookieJar) -> Response {
    let (jar, ctx) = page_context(&state, jar, &session, "Payment");
    result_page(jar, ctx, StatusCode::OK, false, "The payment was cancelled or failed. No money was taken.".to_owned(), None)
}

// =============================================================================
// MOCK GATEWAY
// =============================================================================

/// `GET /payment/esewa/mock`: the test gateway's checkout screen.
pub async fn mock_gateway(
    State(state): State<AppState>,
    session: Session,
    jar: CookieJar,
    Query(fields): Query<Vec<(String, String)>>,
) -> impl IntoResponse {
    let (jar, ctx) = page_context(&state, jar, &session, "eSewa (test)");
    (jar, render_page(move || view! { <MockGatewayPage ctx=ctx fields=fields/> }))
}

/// `POST /payment/esewa/mock`: a checkout form arriving from the portal is
/// shown; a Pay/Cancel choice redirects to the merchant's return URL.
pub async fn mock_gateway_submit(
    State(state): State<AppState>,
    session: Session,
    jar: CookieJar,
    Form(fields): Form<Vec<(String, String)>>,
) -> Response {
    let status = fields
        .iter()
        .find(|(key, _)| key == MOCK_STATUS_FIELD)
        .map(|(_, value)| value.clone());
    let fields: Vec<(String, String)> = fields.into_iter().filter(|(key, _)| key != MOCK_STATUS_FIELD).collect();

    let Some(status) = status else {
        let (jar, ctx) = page_context(&state, jar, &session, "eSewa (test)");
        return (jar, render_page(move || view! { <MockGatewayPage ctx=ctx fields=fields/> })).into_response();
    };

    match payment::mock_gateway_redirect(&fields, &status, &state.config) {
        Ok(url) => Redirect::to(&url).into_response(),
        Err(e) => {
            tracing::warn!(error = %e, "mock gateway rejected the submitted form");
            (StatusCode::BAD_REQUEST, e.to_string()).into_response()
        }
    }
}

#[cfg(test)]
#[path = "registration_test.rs"]
mod tests;
