//! Team and player registration, and the eSewa payment hand-off pages.

use leptos::prelude::*;

use super::PageContext;
use super::layout::{Layout, TeamBadge, VerificationBadge};
use crate::api::models::Team;
use crate::services::payment::{EsewaCheckout, STATUS_COMPLETE};

pub const PLAYER_ROLES: [&str; 4] = ["Batsman", "Bowler", "All-rounder", "Wicket-keeper"];

fn hidden_fields(fields: &[(String, String)]) -> impl IntoView + use<> {
    fields
        .iter()
        .map(|(name, value)| view! { <input type="hidden" name=name.clone() value=value.clone()/> })
        .collect_view()
}

// =============================================================================
// REGISTRATION FORMS
// =============================================================================

#[component]
pub fn RegisterTeamPage(ctx: PageContext, fee: u64) -> impl IntoView {
    let fee_note = format!("Registration fee: NPR {fee}, payable through eSewa after submitting.");
    view! {
        <Layout ctx=ctx>
            <section class="form-card">
                <h1>"Register a team"</h1>
                <p class="form-card__note">{fee_note}</p>
                <form method="post" action="/register-team" enctype="multipart/form-data" class="form">
                    <label>"Team name" <input type="text" name="name" required=true/></label>
                    <label>"Short name" <input type="text" name="shortName" maxlength="5"/></label>
                    <label>"Captain" <input type="text" name="captain" required=true/></label>
                    <label>"Coach" <input type="text" name="coach"/></label>
                    <label>"Contact number" <input type="tel" name="contactNumber" required=true/></label>
                    <label>"Email" <input type="email" name="email"/></label>
                    <label>"Team logo" <input type="file" name="logo" accept="image/*"/></label>
                    <label>
                        "Payment receipt (if paid offline)"
                        <input type="file" name="paymentReceipt" accept="image/*,application/pdf"/>
                    </label>
                    <button type="submit" class="btn btn--primary">"Submit registration"</button>
                </form>
            </section>
        </Layout>
    }
}

#[component]
pub fn AddPlayerPage(ctx: PageContext, team: Team) -> impl IntoView {
    let action = format!("/teams/{}/players/new", team.id);
    let roles = PLAYER_ROLES
        .into_iter()
        .map(|role| view! { <option value=role>{role}</option> })
        .collect_view();
    view! {
        <Layout ctx=ctx>
            <section class="form-card">
                <h1>{format!("Add a player to {}", team.name)}</h1>
                <form method="post" action=action enctype="multipart/form-data" class="form">
                    <label>"Full name" <input type="text" name="name" required=true/></label>
                    <label>"Role" <select name="role">{roles}</select></label>
                    <label>"Jersey number" <input type="number" name="jerseyNumber" min="0" max="999"/></label>
                    <label>"Batting style" <input type="text" name="battingStyle" placeholder="Right-hand bat"/></label>
                    <label>"Bowling style" <input type="text" name="bowlingStyle" placeholder="Right-arm medium"/></label>
                    <label>"Date of birth" <input type="date" name="dateOfBirth"/></label>
                    <label>"Profile photo" <input type="file" name="profilePhoto" accept="image/*"/></label>
                    <button type="submit" class="btn btn--primary">"Add player"</button>
                </form>
            </section>
        </Layout>
    }
}

// =============================================================================
// PAYMENT
// =============================================================================

#[component]
pub fn PaymentPage(ctx: PageContext, team: Team, fee: u64) -> impl IntoView {
    let action = format!("/payment/{}/esewa", team.id);
    let logo = ctx.media(team.logo_url.as_deref());
    let paid = team
        .payment_status
        .as_deref()
        .is_some_and(|s| s.eq_ignore_ascii_case("paid") || s.eq_ignore_ascii_case("completed") || s.eq_ignore_ascii_case("complete"));
    let payment_label = team.payment_status.clone().unwrap_or_else(|| "Unpaid".to_owned());

    view! {
        <Layout ctx=ctx.clone()>
            <section class="form-card">
                <header class="team-header">
                    <TeamBadge name=team.name.clone() logo_url=logo/>
                    <div>
                        <h1>{team.name}</h1>
                        <VerificationBadge status=team.status/>
                        <p>{format!("Payment: {payment_label}")}</p>
                    </div>
                </header>
                {if paid {
                    view! { <p class="notice">"Registration fee received. Thank you!"</p> }.into_any()
                } else {
                    view! {
                        <form method="post" action=action class="form">
                            <p>{format!("Registration fee: NPR {fee}")}</p>
                            <button type="submit" class="btn btn--esewa">"Pay with eSewa"</button>
                        </form>
                    }
                    .into_any()
                }}
            </section>
        </Layout>
    }
}

/// Signed form posted to the gateway. Submitted by the user.
#[component]
pub fn EsewaRedirectPage(ctx: PageContext, checkout: EsewaCheckout) -> impl IntoView {
    let amount = checkout.field("total_amount").unwrap_or_default().to_owned();
    let fields = hidden_fields(&checkout.fields);
    view! {
        <Layout ctx=ctx>
            <section class="form-card">
                <h1>"Continue to eSewa"</h1>
                <p>{format!("You will be redirected to eSewa to pay NPR {amount}.")}</p>
                <form method="post" action=checkout.action class="form">
                    {fields}
                    <button type="submit" class="btn btn--esewa">"Proceed to payment"</button>
                </form>
            </section>
        </Layout>
    }
}

#[component]
pub fn PaymentResultPage(ctx: PageContext, success: bool, message: String, team_id: Option<String>) -> impl IntoView {
    let heading = if success { "Payment successful" } else { "Payment not completed" };
    let class = if success { "form-card form-card--success" } else { "form-card form-card--failure" };
    let next = match (success, team_id) {
        (true, Some(id)) => view! { <a class="btn" href=format!("/teams/{id}")>"View your team"</a> }.into_any(),
        (false, Some(id)) => view! { <a class="btn" href=format!("/payment/{id}")>"Try again"</a> }.into_any(),
        (_, None) => view! { <a class="btn" href="/">"Back to home"</a> }.into_any(),
    };
    view! {
        <Layout ctx=ctx>
            <section class=class>
                <h1>{heading}</h1>
                <p>{message}</p>
                {next}
            </section>
        </Layout>
    }
}

/// Stand-in for the eSewa checkout screen when no merchant account is
/// configured. Both buttons post the received fields back with a status.
#[component]
pub fn MockGatewayPage(ctx: PageContext, fields: Vec<(String, String)>) -> impl IntoView {
    let amount = fields
        .iter()
        .find(|(k, _)| k == "total_amount")
        .map(|(_, v)| v.clone())
        .unwrap_or_default();
    let pay_fields = hidden_fields(&fields);
    let cancel_fields = hidden_fields(&fields);
    view! {
        <Layout ctx=ctx>
            <section class="form-card mock-gateway">
                <h1>"eSewa (test gateway)"</h1>
                <p>{format!("Amount: NPR {amount}")}</p>
                <form method="post" action="/payment/esewa/mock" class="inline-form">
                    {pay_fields}
                    <input type="hidden" name="mock_status" value=STATUS_COMPLETE/>
                    <button type="submit" class="btn btn--esewa">"Pay"</button>
                </form>
                <form method="post" action="/payment/esewa/mock" class="inline-form">
                    {cancel_fields}
                    <input type="hidden" name="mock_status" value="CANCELED"/>
                    <button type="submit" class="btn btn--ghost">"Cancel"</button>
                </form>
            </section>
        </Layout>
    }
}
