//! Public page handlers.

use axum::Router;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum_extra::extract::cookie::CookieJar;
use leptos::prelude::*;
use serde::Deserialize;
use time::OffsetDateTime;

use super::{page_context, recover};
use crate::api::models::{MatchStatus, NewsArticle, Team, VerificationStatus};
use crate::api::{ApiError, endpoints};
use crate::services::listing::{matches_query, paginate};
use crate::services::schedule::{self, Countdown, LIVE_REFRESH_SECS, MatchFilter};
use crate::services::standings;
use crate::session::Session;
use crate::state::AppState;
use crate::views::public::{
    AlbumPage, GalleryPage, HomeData, HomePage, MatchPage, NewsListPage, NewsPage, NotFoundPage, PointsTablePage,
    SchedulesPage, SponsorsPage, TeamPage, TeamsPage,
};
use crate::views::{PageContext, render_page};

const HOME_FIXTURES: usize = 6;
const HOME_RESULTS: usize = 3;
const HOME_NEWS: usize = 3;
const SCHEDULE_PER_PAGE: usize = 20;
const NEWS_PER_PAGE: usize = 9;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home))
        .route("/schedules", get(schedules))
        .route("/matches/{id}", get(match_detail))
        .route("/teams", get(teams))
        .route("/teams/{id}", get(team_detail))
        .route("/news", get(news_list))
        .route("/news/{id}", get(news_detail))
        .route("/points-table", get(points_table))
        .route("/gallery", get(gallery))
        .route("/gallery/{id}", get(album))
        .route("/sponsors", get(sponsors))
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SeasonQuery {
    pub season: Option<String>,
}

/// Render the not-found page for a record the backend could not return.
/// Anything other than a 404 is reported as a bad gateway.
pub(crate) fn missing_record(jar: CookieJar, mut ctx: PageContext, what: &'static str, e: &ApiError) -> Response {
    let status = if e.is_not_found() {
        StatusCode::NOT_FOUND
    } else {
        tracing::error!(error = %e, what, "record fetch failed");
        StatusCode::BAD_GATEWAY
    };
    let message = if e.is_not_found() { format!("That {what} could not be found.") } else { e.user_message() };
    ctx.title = "Not found".to_owned();
    (status, jar, render_page(move || view! { <NotFoundPage ctx=ctx message=message/> })).into_response()
}

fn newest_first(articles: &mut [NewsArticle]) {
    articles.sort_by(|a, b| b.published_at.cmp(&a.published_at));
}

// =============================================================================
// HOME + FIXTURES
// =============================================================================

/// `GET /`: season banner, countdown, live and upcoming fixtures, news, sponsors.
pub async fn home(State(state): State<AppState>, session: Session, jar: CookieJar) -> impl IntoResponse {
    let (jar, mut ctx) = page_context(&state, jar, &session, "");
    let api = state.api();
    let token = session.token();

    let (season, matches, news, sponsors) = tokio::join!(
        endpoints::current_season(api, token),
        endpoints::list_matches(api, token),
        endpoints::list_news(api, token),
        endpoints::list_sponsors(api, token),
    );
    let season = recover(&mut ctx, "current season", season, None);
    let matches = recover(&mut ctx, "matches", matches, Vec::new());
    let mut news = recover(&mut ctx, "news", news, Vec::new());
    let sponsors = recover(&mut ctx, "sponsors", sponsors, Vec::new());

    let now = OffsetDateTime::now_utc();
    let next_match = schedule::next_match(&matches, now).cloned();
    let countdown = next_match
        .as_ref()
        .and_then(|m| m.scheduled_at)
        .map(|at| Countdown::until(at, now));
    let buckets = schedule::split_by_status(matches);
    newest_first(&mut news);

    let data = HomeData {
        season,
        next_match,
        countdown,
        live: buckets.live,
        upcoming: buckets.upcoming.into_iter().take(HOME_FIXTURES).collect(),
        recent: buckets.completed.into_iter().take(HOME_RESULTS).collect(),
        news: news.into_iter().take(HOME_NEWS).collect(),
        sponsors,
    };
    (jar, render_page(move || view! { <HomePage ctx=ctx data=data/> }))
}

/// `GET /schedules?status=&team=&q=&page=`.
pub async fn schedules(
    State(state): State<AppState>,
    session: Session,
    jar: CookieJar,
    Query(filter): Query<MatchFilter>,
) -> impl IntoResponse {
    let (jar, mut ctx) = page_context(&state, jar, &session, "Schedules");
    let api = state.api();
    let token = session.token();

    let (matches, teams) = tokio::join!(endpoints::list_matches(api, token), endpoints::list_teams(api, token));
    let matches = recover(&mut ctx, "matches", matches, Vec::new());
    let mut teams = recover(&mut ctx, "teams", teams, Vec::new());
    teams.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));

    let mut selected = filter.apply(matches);
    schedule::sort_chronologically(&mut selected);
    let page = paginate(selected, filter.page.unwrap_or(1), SCHEDULE_PER_PAGE);
    let days = schedule::group_by_day(page.items, ctx.offset());
    let (current, total_pages) = (page.page, page.total_pages);

    (
        jar,
        render_page(move || {
            view! {
                <SchedulesPage ctx=ctx filter=filter teams=teams days=days page=current total_pages=total_pages/>
            }
        }),
    )
}

/// `GET /matches/{id}`. Live matches refresh themselves.
pub async fn match_detail(
    State(state): State<AppState>,
    session: Session,
    jar: CookieJar,
    Path(id): Path<String>,
) -> Response {
    let (jar, mut ctx) = page_context(&state, jar, &session, "Match");
    match endpoints::get_match(state.api(), session.token(), &id).await {
        Ok(fixture) => {
            ctx.title = fixture.title();
            if fixture.status == MatchStatus::Live {
                ctx.refresh_secs = Some(LIVE_REFRESH_SECS);
            }
            (jar, render_page(move || view! { <MatchPage ctx=ctx fixture=fixture/> })).into_response()
        }
        Err(e) => missing_record(jar, ctx, "match", &e),
    }
}

// =============================================================================
// TEAMS
// =============================================================================

fn team_matches_query(team: &Team, query: &str) -> bool {
    matches_query(
        [
            team.name.as_str(),
            team.short_name.as_deref().unwrap_or_default(),
            team.captain.as_deref().unwrap_or_default(),
        ],
        query,
    )
}

/// `GET /teams?q=`: approved teams only.
pub async fn teams(
    State(state): State<AppState>,
    session: Session,
    jar: CookieJar,
    Query(search): Query<SearchQuery>,
) -> impl IntoResponse {
    let (jar, mut ctx) = page_context(&state, jar, &session, "Teams");
    let result = endpoints::list_teams(state.api(), session.token()).await;
    let query = search.q.unwrap_or_default();

    let mut teams: Vec<Team> = recover(&mut ctx, "teams", result, Vec::new())
        .into_iter()
        .filter(|team| team.status == VerificationStatus::Approved)
        .filter(|team| team_matches_query(team, &query))
        .collect();
    teams.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));

    (jar, render_page(move || view! { <TeamsPage ctx=ctx teams=teams query=query/> }))
}

/// `GET /teams/{id}`: team header and approved squad.
pub async fn team_detail(
    State(state): State<AppState>,
    session: Session,
    jar: CookieJar,
    Path(id): Path<String>,
) -> Response {
    let (jar, mut ctx) = page_context(&state, jar, &session, "Team");
    let api = state.api();
    let token = session.token();

    let mut team = match endpoints::get_team(api, token, &id).await {
        Ok(team) => team,
        Err(e) => return missing_record(jar, ctx, "team", &e),
    };
    let squad = if team.players.is_empty() {
        let result = endpoints::list_players(api, token, Some(&team.id)).await;
        recover(&mut ctx, "players", result, Vec::new())
    } else {
        std::mem::take(&mut team.players)
    };
    let players: Vec<_> = squad
        .into_iter()
        .filter(|p| p.status == VerificationStatus::Approved)
        .collect();

    ctx.title.clone_from(&team.name);
    (jar, render_page(move || view! { <TeamPage ctx=ctx team=team players=players/> })).into_response()
}

// =============================================================================
// NEWS
// =============================================================================

/// `GET /news?page=`: newest first.
pub async fn news_list(
    State(state): State<AppState>,
    session: Session,
    jar: CookieJar,
    Query(query): Query<PageQuery>,
) -> impl IntoResponse {
    let (jar, mut ctx) = page_context(&state, jar, &session, "News");
    let result = endpoints::list_news(state.api(), session.token()).await;
    let mut articles = recover(&mut ctx, "news", result, Vec::new());
    newest_first(&mut articles);
    let articles = paginate(articles, query.page.unwrap_or(1), NEWS_PER_PAGE);
    (jar, render_page(move || view! { <NewsListPage ctx=ctx articles=articles/> }))
}

pub async fn news_detail(
    State(state): State<AppState>,
    session: Session,
    jar: CookieJar,
    Path(id): Path<String>,
) -> Response {
    let (jar, mut ctx) = page_context(&state, jar, &session, "News");
    match endpoints::get_news(state.api(), session.token(), &id).await {
        Ok(article) => {
            ctx.title.clone_from(&article.title);
            (jar, render_page(move || view! { <NewsPage ctx=ctx article=article/> })).into_response()
        }
        Err(e) => missing_record(jar, ctx, "article", &e),
    }
}

// =============================================================================
// STANDINGS
// =============================================================================

/// `GET /points-table?season=`. Without a season the current one is shown,
/// falling back to the first season the backend lists.
pub async fn points_table(
    State(state): State<AppState>,
    session: Session,
    jar: CookieJar,
    Query(query): Query<SeasonQuery>,
) -> impl IntoResponse {
    let (jar, mut ctx) = page_context(&state, jar, &session, "Points Table");
    let api = state.api();
    let token = session.token();

    let (seasons, current) = tokio::join!(endpoints::list_seasons(api, token), endpoints::current_season(api, token));
    let seasons = recover(&mut ctx, "seasons", seasons, Vec::new());
    let current = recover(&mut ctx, "current season", current, None);

    let selected = query
        .season
        .filter(|s| !s.trim().is_empty())
        .or_else(|| current.map(|s| s.id))
        .or_else(|| seasons.iter().find(|s| s.is_current).map(|s| s.id.clone()))
        .or_else(|| seasons.first().map(|s| s.id.clone()));

    let tables = match selected.as_deref() {
        Some(season_id) => {
            let result = endpoints::points_table(api, token, season_id).await;
            standings::group_rows(recover(&mut ctx, "points table", result, Vec::new()))
        }
        None => Vec::new(),
    };

    (
        jar,
        render_page(move || view! { <PointsTablePage ctx=ctx seasons=seasons selected=selected tables=tables/> }),
    )
}

// =============================================================================
// GALLERY + SPONSORS
// =============================================================================

pub async fn gallery(State(state): State<AppState>, session: Session, jar: CookieJar) -> impl IntoResponse {
    let (jar, mut ctx) = page_context(&state, jar, &session, "Gallery");
    let result = endpoints::list_albums(state.api(), session.token()).await;
    let albums = recover(&mut ctx, "albums", result, Vec::new());
    (jar, render_page(move || view! { <GalleryPage ctx=ctx albums=albums/> }))
}

pub async fn album(
    State(state): State<AppState>,
    session: Session,
    jar: CookieJar,
    Path(id): Path<String>,
) -> Response {
    let (jar, mut ctx) = page_context(&state, jar, &session, "Gallery");
    match endpoints::get_album(state.api(), session.token(), &id).await {
        Ok(album) => {
            ctx.title.clone_from(&album.title);
            (jar, render_page(move || view! { <AlbumPage ctx=ctx album=album/> })).into_response()
        }
        Err(e) => missing_record(jar, ctx, "album", &e),
    }
}

pub async fn sponsors(State(state): State<AppState>, session: Session, jar: CookieJar) -> impl IntoResponse {
    let (jar, mut ctx) = page_context(&state, jar, &session, "Sponsors");
    let result = endpoints::list_sponsors(state.api(), session.token()).await;
    let sponsors = recover(&mut ctx, "sponsors", result, Vec::new());
    (jar, render_page(move || view! { <SponsorsPage ctx=ctx sponsors=sponsors/> }))
}

#[cfg(test)]
#[path = "public_test.rs"]
mod tests;
