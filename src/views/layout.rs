//! Page chrome and the small components shared by public and admin pages.

use leptos::prelude::*;

use super::{PageContext, SITE_NAME, page_href};
use crate::api::models::{Match, MatchSide, MatchStatus, VerificationStatus, initials};
use crate::session::Flash;

const PUBLIC_NAV: [(&str, &str); 7] = [
    ("/", "Home"),
    ("/schedules", "Schedules"),
    ("/points-table", "Points Table"),
    ("/teams", "Teams"),
    ("/news", "News"),
    ("/gallery", "Gallery"),
    ("/sponsors", "Sponsors"),
];

const ADMIN_NAV: [(&str, &str); 8] = [
    ("/admin", "Dashboard"),
    ("/admin/teams", "Teams"),
    ("/admin/players", "Players"),
    ("/admin/matches", "Matches"),
    ("/admin/seasons", "Seasons"),
    ("/admin/news", "News"),
    ("/admin/gallery", "Gallery"),
    ("/admin/sponsors", "Sponsors"),
];

/// Full document: head, site header, optional admin bar, toast, body, footer.
#[component]
pub fn Layout(ctx: PageContext, children: Children) -> impl IntoView {
    let PageContext { title, flash, logged_in, is_admin_user, admin, refresh_secs, .. } = ctx;
    let full_title = if title.is_empty() { SITE_NAME.to_owned() } else { format!("{title} | {SITE_NAME}") };
    let body_class = if admin { "admin" } else { "public" };

    let account = if logged_in {
        view! {
            {is_admin_user.then(|| view! { <a href="/admin" class="site-auth__link">"Dashboard"</a> })}
            <form method="post" action="/logout" class="inline-form">
                <button type="submit" class="btn btn--ghost">"Log out"</button>
            </form>
        }
        .into_any()
    } else {
        view! {
            <a href="/login" class="site-auth__link">"Log in"</a>
            <a href="/register" class="site-auth__link">"Sign up"</a>
        }
        .into_any()
    };

    view! {
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                {refresh_secs.map(|secs| view! { <meta http-equiv="refresh" content=secs.to_string()/> })}
                <title>{full_title}</title>
                <link rel="stylesheet" href="/static/pavilion.css"/>
            </head>
            <body class=body_class>
                <header class="site-header">
                    <a class="site-header__brand" href="/">{SITE_NAME}</a>
                    <nav class="site-nav">
                        {PUBLIC_NAV
                            .into_iter()
                            .map(|(href, label)| view! { <a href=href>{label}</a> })
                            .collect_view()}
                        <a href="/register-team" class="site-nav__cta">"Register a team"</a>
                    </nav>
                    <div class="site-auth">{account}</div>
                </header>
                {admin.then(|| view! { <AdminNav/> })}
                {flash.map(|flash| view! { <Toast flash=flash/> })}
                <main class="page">{children()}</main>
                <footer class="site-footer">
                    <p>{SITE_NAME}</p>
                </footer>
            </body>
        </html>
    }
}

#[component]
pub fn AdminNav() -> impl IntoView {
    view! {
        <nav class="admin-nav">
            {ADMIN_NAV
                .into_iter()
                .map(|(href, label)| view! { <a href=href>{label}</a> })
                .collect_view()}
        </nav>
    }
}

#[component]
pub fn Toast(flash: Flash) -> impl IntoView {
    let class = format!("toast toast--{}", flash.kind.as_str());
    view! { <div class=class role="status">{flash.message}</div> }
}

/// Previous / next links with a page counter. Hidden for a single page.
#[component]
pub fn Pager(path: String, query: Vec<(String, String)>, page: usize, total_pages: usize) -> impl IntoView {
    (total_pages > 1).then(|| {
        let prev = (page > 1).then(|| page_href(&path, &query, page - 1));
        let next = (page < total_pages).then(|| page_href(&path, &query, page + 1));
        view! {
            <nav class="pager" aria-label="Pagination">
                {prev.map(|href| view! { <a class="pager__prev" href=href>"← Previous"</a> })}
                <span class="pager__count">{format!("Page {page} of {total_pages}")}</span>
                {next.map(|href| view! { <a class="pager__next" href=href>"Next →"</a> })}
            </nav>
        }
    })
}

#[component]
pub fn EmptyState(message: &'static str) -> impl IntoView {
    view! { <p class="empty-state">{message}</p> }
}

/// Logo image, or the team's initials when there is none.
#[component]
pub fn TeamBadge(name: String, logo_url: Option<String>) -> impl IntoView {
    match logo_url {
        Some(src) => view! { <img class="team-badge" src=src alt=name loading="lazy"/> }.into_any(),
        None => view! { <span class="team-badge team-badge--initials">{initials(&name)}</span> }.into_any(),
    }
}

#[component]
pub fn MatchStatusBadge(status: MatchStatus) -> impl IntoView {
    let class = format!("badge badge--{}", status.as_str());
    view! { <span class=class>{status.label()}</span> }
}

#[component]
pub fn VerificationBadge(status: VerificationStatus) -> impl IntoView {
    let class = format!("badge badge--{}", status.as_str());
    view! { <span class=class>{status.label()}</span> }
}

fn side_view(ctx: &PageContext, side: MatchSide, winner: bool) -> impl IntoView + use<> {
    let logo = ctx.media(side.logo_url.as_deref());
    let class = if winner { "match-card__side match-card__side--winner" } else { "match-card__side" };
    view! {
        <div class=class>
            <TeamBadge name=side.name.clone() logo_url=logo/>
            <span class="match-card__team">{side.name}</span>
            {side.score.map(|score| view! { <span class="match-card__score">{score}</span> })}
        </div>
    }
}

/// Fixture summary card linking to the match page.
#[component]
pub fn MatchCard(ctx: PageContext, fixture: Match) -> impl IntoView {
    let href = format!("/matches/{}", fixture.id);
    let when = ctx.datetime(fixture.scheduled_at);
    let winner = fixture.winner_id.clone();
    let is_winner = |side: &MatchSide| {
        winner
            .as_deref()
            .is_some_and(|w| side.id.as_deref() == Some(w) || side.name == w)
    };
    let team1_won = is_winner(&fixture.team1);
    let team2_won = is_winner(&fixture.team2);
    let meta = [fixture.stage.clone(), fixture.venue.clone()]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" · ");

    view! {
        <a class="match-card" href=href>
            <div class="match-card__header">
                <MatchStatusBadge status=fixture.status/>
                <span class="match-card__when">{when}</span>
            </div>
            {side_view(&ctx, fixture.team1, team1_won)}
            {side_view(&ctx, fixture.team2, team2_won)}
            {(!meta.is_empty()).then(|| view! { <p class="match-card__meta">{meta}</p> })}
            {fixture.result_summary.map(|summary| view! { <p class="match-card__result">{summary}</p> })}
        </a>
    }
}
