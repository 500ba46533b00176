//! Admin dashboard handlers.
//!
//! Every route takes [`AdminSession`], so an anonymous or non-admin visitor
//! is redirected before any backend call is made. Mutations forward the
//! form, flash the outcome and redirect back to the list, which refetches;
//! a rejected mutation leaves the backend untouched and the list as it was.

use axum::extract::{Multipart, Path, Query, State};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Form, Router};
use axum_extra::extract::cookie::CookieJar;
use leptos::prelude::*;
use serde::Deserialize;
use serde_json::{Value, json};
use time::UtcOffset;

use super::public::missing_record;
use super::{admin_context, finish, flash_redirect, non_blank, read_multipart, recover, upload_rejected};
use crate::api::endpoints::{self, VerifyTarget};
use crate::api::models::{MatchStatus, Player, Team, VerificationStatus};
use crate::api::UploadForm;
use crate::services::listing::matches_query;
use crate::services::schedule::{parse_local_datetime, sort_chronologically};
use crate::session::{AdminSession, Flash};
use crate::state::AppState;
use crate::views::admin::{
    AdminAlbumPage, AdminGalleryPage, AdminMatchesPage, AdminNewsPage, AdminPlayersPage, AdminSponsorsPage,
    AdminTeamsPage, DashboardPage, MatchEditPage, NewsEditPage, SeasonsPage,
};
use crate::views::render_page;

pub const MAX_GROUPS: u32 = 8;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/admin", get(dashboard))
        .route("/admin/teams", get(teams))
        .route("/admin/teams/{id}/verify", post(verify_team))
        .route("/admin/teams/{id}/reject", post(reject_team))
        .route("/admin/teams/{id}/edit", post(edit_team))
        .route("/admin/teams/{id}/delete", post(delete_team))
        .route("/admin/players", get(players))
        .route("/admin/players/{id}/verify", post(verify_player))
        .route("/admin/players/{id}/reject", post(reject_player))
        .route("/admin/matches", get(matches).post(create_match))
        .route("/admin/matches/generate", post(generate_schedule))
        .route("/admin/matches/{id}/edit", get(edit_match_page).post(edit_match))
        .route("/admin/matches/{id}/result", post(update_result))
        .route("/admin/matches/{id}/delete", post(delete_match))
        .route("/admin/seasons", get(seasons).post(create_season))
        .route("/admin/seasons/{id}/current", post(make_current_season))
        .route("/admin/groups/generate", post(generate_groups))
        .route("/admin/news", get(news).post(create_news))
        .route("/admin/news/{id}/edit", get(edit_news_page).post(edit_news))
        .route("/admin/news/{id}/delete", post(delete_news))
        .route("/admin/gallery", get(gallery).post(create_album))
        .route("/admin/gallery/{id}", get(album))
        .route("/admin/gallery/{id}/images", post(upload_images))
        .route("/admin/gallery/{id}/images/{image_id}/delete", post(delete_image))
        .route("/admin/gallery/{id}/delete", post(delete_album))
        .route("/admin/sponsors", get(sponsors).post(create_sponsor))
        .route("/admin/sponsors/{id}/edit", post(edit_sponsor))
        .route("/admin/sponsors/{id}/delete", post(delete_sponsor))
}

// =============================================================================
// FORMS
// =============================================================================

/// `?status=&q=` on the verification lists.
#[derive(Debug, Default, Deserialize)]
pub struct VerificationQuery {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub q: String,
}

impl VerificationQuery {
    fn wanted(&self) -> Option<VerificationStatus> {
        non_blank(Some(&self.status)).map(VerificationStatus::parse)
    }

    pub fn keeps_team(&self, team: &Team) -> bool {
        let fields = [Some(team.name.as_str()), team.captain.as_deref(), team.contact.as_deref()];
        self.wanted().is_none_or(|wanted| team.status == wanted) && matches_query(fields.into_iter().flatten(), &self.q)
    }

    pub fn keeps_player(&self, player: &Player) -> bool {
        let fields = [Some(player.name.as_str()), player.team_name.as_deref(), player.role.as_deref()];
        self.wanted().is_none_or(|wanted| player.status == wanted)
            && matches_query(fields.into_iter().flatten(), &self.q)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ReasonForm {
    #[serde(default)]
    pub reason: String,
}

/// Create/edit fixture form. `dateTime` is a `datetime-local` value.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MatchForm {
    pub season: String,
    pub team1: String,
    pub team2: String,
    pub date_time: String,
    pub venue: String,
    pub stage: String,
}

impl MatchForm {
    /// Backend body for `POST /matches` or `PUT /matches/:id`, or the first
    /// problem with the submission.
    pub fn payload(&self, offset: UtcOffset) -> Result<Value, &'static str> {
        let (Some(team1), Some(team2)) = (non_blank(Some(&self.team1)), non_blank(Some(&self.team2))) else {
            return Err("Pick both teams.");
        };
        if team1 == team2 {
            return Err("A team cannot play itself.");
        }
        let date_time = parse_local_datetime(&self.date_time, offset).ok_or("Enter a valid date and time.")?;
        let venue = non_blank(Some(&self.venue)).ok_or("Venue is required.")?;

        let mut payload = json!({
            "team1": team1,
            "team2": team2,
            "dateTime": date_time,
            "venue": venue,
        });
        if let Some(stage) = non_blank(Some(&self.stage)) {
            payload["stage"] = json!(stage);
        }
        if let Some(season) = non_blank(Some(&self.season)) {
            payload["season"] = json!(season);
        }
        Ok(payload)
    }
}

/// Result form on the match edit page.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResultForm {
    pub status: String,
    pub team1_score: String,
    pub team2_score: String,
    pub winner: String,
    pub result_summary: String,
}

impl ResultForm {
    /// Body for `PATCH /matches/:id/result`. Blank fields are sent as null
    /// so a cleared score clears on the backend too.
    pub fn payload(&self) -> Value {
        let or_null = |raw: &str| non_blank(Some(raw)).map_or(Value::Null, |v| json!(v));
        json!({
            "status": MatchStatus::parse(&self.status).as_str(),
            "team1Score": or_null(&self.team1_score),
            "team2Score": or_null(&self.team2_score),
            "winner": or_null(&self.winner),
            "resultSummary": or_null(&self.result_summary),
        })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct GenerateScheduleForm {
    pub season_id: String,
    pub start_date: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SeasonForm {
    pub name: String,
    pub year: String,
    pub start_date: String,
    pub end_date: String,
}

impl SeasonForm {
    pub fn payload(&self) -> Result<Value, &'static str> {
        let name = non_blank(Some(&self.name)).ok_or("Season name is required.")?;
        let mut payload = json!({ "name": name });
        if let Some(year) = non_blank(Some(&self.year)) {
            let year: i64 = year.parse().map_err(|_| "Year must be a number.")?;
            payload["year"] = json!(year);
        }
        if let Some(start) = non_blank(Some(&self.start_date)) {
            payload["startDate"] = json!(start);
        }
        if let Some(end) = non_blank(Some(&self.end_date)) {
            payload["endDate"] = json!(end);
        }
        if let (Some(start), Some(end)) = (non_blank(Some(&self.start_date)), non_blank(Some(&self.end_date))) {
            if end < start {
                return Err("The season cannot end before it starts.");
            }
        }
        Ok(payload)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct GenerateGroupsForm {
    pub season_id: String,
    pub group_count: String,
}

impl GenerateGroupsForm {
    pub fn group_count(&self) -> Result<u32, &'static str> {
        match self.group_count.trim().parse::<u32>() {
            Ok(count) if (1..=MAX_GROUPS).contains(&count) => Ok(count),
            _ => Err("Number of groups must be between 1 and 8."),
        }
    }
}

/// Read an admin upload, or redirect to `back` when the body is unreadable.
async fn read_upload(state: &AppState, jar: CookieJar, multipart: Multipart, back: &str) -> Result<(CookieJar, UploadForm), Response> {
    match read_multipart(multipart).await {
        Ok(form) => Ok((jar, form)),
        Err(e) => Err(upload_rejected(state, jar, back, &e)),
    }
}

// =============================================================================
// DASHBOARD
// =============================================================================

/// `GET /admin`.
pub async fn dashboard(State(state): State<AppState>, admin: AdminSession, jar: CookieJar) -> impl IntoResponse {
    let (jar, mut ctx) = admin_context(&state, jar, "Dashboard");
    let summary = endpoints::admin_dashboard(state.api(), admin.token()).await;
    let summary = recover(&mut ctx, "dashboard", summary, Default::default());
    let user_name = admin.user.name;
    (jar, render_page(move || view! { <DashboardPage ctx=ctx summary=summary user_name=user_name/> }))
}

// =============================================================================
// VERIFICATION
// =============================================================================

/// `GET /admin/teams?status=&q=`.
pub async fn teams(
    State(state): State<AppState>,
    admin: AdminSession,
    jar: CookieJar,
    Query(query): Query<VerificationQuery>,
) -> impl IntoResponse {
    let (jar, mut ctx) = admin_context(&state, jar, "Teams");
    let all = endpoints::list_teams(state.api(), Some(admin.token())).await;
    let mut teams: Vec<Team> = recover(&mut ctx, "teams", all, Vec::new())
        .into_iter()
        .filter(|team| query.keeps_team(team))
        .collect();
    teams.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
    let VerificationQuery { status, q } = query;
    (jar, render_page(move || view! { <AdminTeamsPage ctx=ctx teams=teams status=status query=q/> }))
}

/// `POST /admin/teams/{id}/verify`.
pub async fn verify_team(State(state): State<AppState>, admin: AdminSession, jar: CookieJar, Path(id): Path<String>) -> Response {
    let result = endpoints::verify(state.api(), admin.token(), VerifyTarget::Team, &id).await;
    finish(&state, jar, "/admin/teams", "verify team", result, "Team approved.")
}

/// `POST /admin/teams/{id}/reject`.
pub async fn reject_team(
    State(state): State<AppState>,
    admin: AdminSession,
    jar: CookieJar,
    Path(id): Path<String>,
    Form(form): Form<ReasonForm>,
) -> Response {
    let result = endpoints::reject(state.api(), admin.token(), VerifyTarget::Team, &id, non_blank(Some(&form.reason))).await;
    finish(&state, jar, "/admin/teams", "reject team", result, "Team rejected.")
}

/// `POST /admin/teams/{id}/edit`: details and an optional new `logo`.
pub async fn edit_team(
    State(state): State<AppState>,
    admin: AdminSession,
    jar: CookieJar,
    Path(id): Path<String>,
    multipart: Multipart,
) -> Response {
    let (jar, form) = match read_upload(&state, jar, multipart, "/admin/teams").await {
        Ok(read) => read,
        Err(response) => return response,
    };
    if form.non_empty("name").is_none() {
        return flash_redirect(&state, jar, "/admin/teams", Flash::error("Team name is required."));
    }
    let result = endpoints::update_team(state.api(), admin.token(), &id, form).await;
    finish(&state, jar, "/admin/teams", "update team", result, "Team updated.")
}

/// `POST /admin/teams/{id}/delete`.
pub async fn delete_team(State(state): State<AppState>, admin: AdminSession, jar: CookieJar, Path(id): Path<String>) -> Response {
    let result = endpoints::delete_team(state.api(), admin.token(), &id).await;
    finish(&state, jar, "/admin/teams", "delete team", result, "Team deleted.")
}

/// `GET /admin/players?status=&q=`.
pub async fn players(
    State(state): State<AppState>,
    admin: AdminSession,
    jar: CookieJar,
    Query(query): Query<VerificationQuery>,
) -> impl IntoResponse {
    let (jar, mut ctx) = admin_context(&state, jar, "Players");
    let all = endpoints::admin_players(state.api(), admin.token()).await;
    let players: Vec<Player> = recover(&mut ctx, "players", all, Vec::new())
        .into_iter()
        .filter(|player| query.keeps_player(player))
        .collect();
    let VerificationQuery { status, q } = query;
    (jar, render_page(move || view! { <AdminPlayersPage ctx=ctx players=players status=status query=q/> }))
}

/// `POST /admin/players/{id}/verify`.
pub async fn verify_player(State(state): State<AppState>, admin: AdminSession, jar: CookieJar, Path(id): Path<String>) -> Response {
    let result = endpoints::verify(state.api(), admin.token(), VerifyTarget::Player, &id).await;
    finish(&state, jar, "/admin/players", "verify player", result, "Player approved.")
}

/// `POST /admin/players/{id}/reject`.
pub async fn reject_player(
    State(state): State<AppState>,
    admin: AdminSession,
    jar: CookieJar,
    Path(id): Path<String>,
    Form(form): Form<ReasonForm>,
) -> Response {
    let result = endpoints::reject(state.api(), admin.token(), VerifyTarget::Player, &id, non_blank(Some(&form.reason))).await;
    finish(&state, jar, "/admin/players", "reject player", result, "Player rejected.")
}

// =============================================================================
// MATCHES
// =============================================================================

/// `GET /admin/matches`.
pub async fn matches(State(state): State<AppState>, admin: AdminSession, jar: CookieJar) -> impl IntoResponse {
    let (jar, mut ctx) = admin_context(&state, jar, "Matches");
    let api = state.api();
    let token = Some(admin.token());
    let (fixtures, teams, seasons) = tokio::join!(
        endpoints::list_matches(api, token),
        endpoints::list_teams(api, token),
        endpoints::list_seasons(api, token),
    );
    let mut fixtures = recover(&mut ctx, "matches", fixtures, Vec::new());
    let teams = approved_by_name(recover(&mut ctx, "teams", teams, Vec::new()));
    let seasons = recover(&mut ctx, "seasons", seasons, Vec::new());
    sort_chronologically(&mut fixtures);
    (jar, render_page(move || view! { <AdminMatchesPage ctx=ctx matches=fixtures teams=teams seasons=seasons/> }))
}

fn approved_by_name(teams: Vec<Team>) -> Vec<Team> {
    let mut teams: Vec<Team> = teams
        .into_iter()
        .filter(|team| team.status == VerificationStatus::Approved)
        .collect();
    teams.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
    teams
}

/// `POST /admin/matches`.
pub async fn create_match(State(state): State<AppState>, admin: AdminSession, jar: CookieJar, Form(form): Form<MatchForm>) -> Response {
    let payload = match form.payload(state.config.utc_offset) {
        Ok(payload) => payload,
        Err(problem) => return flash_redirect(&state, jar, "/admin/matches", Flash::error(problem)),
    };
    let result = endpoints::create_match(state.api(), admin.token(), payload).await;
    finish(&state, jar, "/admin/matches", "create match", result, "Match scheduled.")
}

/// `POST /admin/matches/generate`: backend round robin for a season.
pub async fn generate_schedule(
    State(state): State<AppState>,
    admin: AdminSession,
    jar: CookieJar,
    Form(form): Form<GenerateScheduleForm>,
) -> Response {
    let Some(season_id) = non_blank(Some(&form.season_id)) else {
        return flash_redirect(&state, jar, "/admin/matches", Flash::error("Pick a season to schedule."));
    };
    let result =
        endpoints::generate_schedule(state.api(), admin.token(), season_id, non_blank(Some(&form.start_date))).await;
    finish(&state, jar, "/admin/matches", "generate schedule", result, "Fixtures generated.")
}

/// `GET /admin/matches/{id}/edit`: fixture details and the result form.
pub async fn edit_match_page(
    State(state): State<AppState>,
    admin: AdminSession,
    jar: CookieJar,
    Path(id): Path<String>,
) -> Response {
    let (jar, mut ctx) = admin_context(&state, jar, "Edit match");
    let api = state.api();
    let token = Some(admin.token());
    let (fixture, teams) = tokio::join!(endpoints::get_match(api, token, &id), endpoints::list_teams(api, token));
    let fixture = match fixture {
        Ok(fixture) => fixture,
        Err(e) => return missing_record(jar, ctx, "match", &e),
    };
    let teams = approved_by_name(recover(&mut ctx, "teams", teams, Vec::new()));
    (jar, render_page(move || view! { <MatchEditPage ctx=ctx fixture=fixture teams=teams/> })).into_response()
}

/// `POST /admin/matches/{id}/edit`.
pub async fn edit_match(
    State(state): State<AppState>,
    admin: AdminSession,
    jar: CookieJar,
    Path(id): Path<String>,
    Form(form): Form<MatchForm>,
) -> Response {
    let payload = match form.payload(state.config.utc_offset) {
        Ok(payload) => payload,
        Err(problem) => {
            return flash_redirect(&state, jar, &format!("/admin/matches/{id}/edit"), Flash::error(problem));
        }
    };
    let result = endpoints::update_match(state.api(), admin.token(), &id, payload).await;
    finish(&state, jar, "/admin/matches", "update match", result, "Match updated.")
}

/// `POST /admin/matches/{id}/result`.
pub async fn update_result(
    State(state): State<AppState>,
    admin: AdminSession,
    jar: CookieJar,
    Path(id): Path<String>,
    Form(form): Form<ResultForm>,
) -> Response {
    let result = endpoints::update_match_result(state.api(), admin.token(), &id, form.payload()).await;
    finish(&state, jar, "/admin/matches", "update result", result, "Result saved.")
}

/// `POST /admin/matches/{id}/delete`.
pub async fn delete_match(State(state): State<AppState>, admin: AdminSession, jar: CookieJar, Path(id): Path<String>) -> Response {
    let result = endpoints::delete_match(state.api(), admin.token(), &id).await;
    finish(&state, jar, "/admin/matches", "delete match", result, "Match deleted.")
}

// =============================================================================
// SEASONS + GROUPS
// =============================================================================

/// `GET /admin/seasons`: seasons plus the current season's groups.
pub async fn seasons(State(state): State<AppState>, admin: AdminSession, jar: CookieJar) -> impl IntoResponse {
    let (jar, mut ctx) = admin_context(&state, jar, "Seasons");
    let api = state.api();
    let token = Some(admin.token());
    let seasons = endpoints::list_seasons(api, token).await;
    let seasons = recover(&mut ctx, "seasons", seasons, Vec::new());
    let groups = match seasons.iter().find(|season| season.is_current) {
        Some(current) => {
            let groups = endpoints::list_groups(api, token, &current.id).await;
            recover(&mut ctx, "groups", groups, Vec::new())
        }
        None => Vec::new(),
    };
    (jar, render_page(move || view! { <SeasonsPage ctx=ctx seasons=seasons groups=groups/> }))
}

/// `POST /admin/seasons`.
pub async fn create_season(State(state): State<AppState>, admin: AdminSession, jar: CookieJar, Form(form): Form<SeasonForm>) -> Response {
    let payload = match form.payload() {
        Ok(payload) => payload,
        Err(problem) => return flash_redirect(&state, jar, "/admin/seasons", Flash::error(problem)),
    };
    let result = endpoints::create_season(state.api(), admin.token(), payload).await;
    finish(&state, jar, "/admin/seasons", "create season", result, "Season created.")
}

/// `POST /admin/seasons/{id}/current`.
pub async fn make_current_season(
    State(state): State<AppState>,
    admin: AdminSession,
    jar: CookieJar,
    Path(id): Path<String>,
) -> Response {
    let result = endpoints::set_current_season(state.api(), admin.token(), &id).await;
    finish(&state, jar, "/admin/seasons", "set current season", result, "Current season updated.")
}

/// `POST /admin/groups/generate`.
pub async fn generate_groups(
    State(state): State<AppState>,
    admin: AdminSession,
    jar: CookieJar,
    Form(form): Form<GenerateGroupsForm>,
) -> Response {
    let Some(season_id) = non_blank(Some(&form.season_id)) else {
        return flash_redirect(&state, jar, "/admin/seasons", Flash::error("Pick a season to draw groups for."));
    };
    let count = match form.group_count() {
        Ok(count) => count,
        Err(problem) => return flash_redirect(&state, jar, "/admin/seasons", Flash::error(problem)),
    };
    let result = endpoints::generate_groups(state.api(), admin.token(), season_id, count).await;
    finish(&state, jar, "/admin/seasons", "generate groups", result, "Groups drawn.")
}

// =============================================================================
// NEWS
// =============================================================================

/// `GET /admin/news`.
pub async fn news(State(state): State<AppState>, admin: AdminSession, jar: CookieJar) -> impl IntoResponse {
    let (jar, mut ctx) = admin_context(&state, jar, "News");
    let articles = endpoints::list_news(state.api(), Some(admin.token())).await;
    let mut articles = recover(&mut ctx, "news", articles, Vec::new());
    articles.sort_by(|a, b| b.published_at.cmp(&a.published_at));
    (jar, render_page(move || view! { <AdminNewsPage ctx=ctx articles=articles/> }))
}

fn news_problem(form: &UploadForm) -> Option<&'static str> {
    if form.non_empty("title").is_none() || form.non_empty("content").is_none() {
        return Some("Title and content are required.");
    }
    None
}

/// `POST /admin/news`: multipart with an optional `image`.
pub async fn create_news(State(state): State<AppState>, admin: AdminSession, jar: CookieJar, multipart: Multipart) -> Response {
    let (jar, form) = match read_upload(&state, jar, multipart, "/admin/news").await {
        Ok(read) => read,
        Err(response) => return response,
    };
    if let Some(problem) = news_problem(&form) {
        return flash_redirect(&state, jar, "/admin/news", Flash::error(problem));
    }
    let result = endpoints::create_news(state.api(), admin.token(), form).await;
    finish(&state, jar, "/admin/news", "create news", result, "Article published.")
}

/// `GET /admin/news/{id}/edit`.
pub async fn edit_news_page(State(state): State<AppState>, admin: AdminSession, jar: CookieJar, Path(id): Path<String>) -> Response {
    let (jar, ctx) = admin_context(&state, jar, "Edit article");
    match endpoints::get_news(state.api(), Some(admin.token()), &id).await {
        Ok(article) => (jar, render_page(move || view! { <NewsEditPage ctx=ctx article=article/> })).into_response(),
        Err(e) => missing_record(jar, ctx, "article", &e),
    }
}

/// `POST /admin/news/{id}/edit`.
pub async fn edit_news(
    State(state): State<AppState>,
    admin: AdminSession,
    jar: CookieJar,
    Path(id): Path<String>,
    multipart: Multipart,
) -> Response {
    let back = format!("/admin/news/{id}/edit");
    let (jar, form) = match read_upload(&state, jar, multipart, &back).await {
        Ok(read) => read,
        Err(response) => return response,
    };
    if let Some(problem) = news_problem(&form) {
        return flash_redirect(&state, jar, &back, Flash::error(problem));
    }
    let result = endpoints::update_news(state.api(), admin.token(), &id, form).await;
    finish(&state, jar, "/admin/news", "update news", result, "Article updated.")
}

/// `POST /admin/news/{id}/delete`.
pub async fn delete_news(State(state): State<AppState>, admin: AdminSession, jar: CookieJar, Path(id): Path<String>) -> Response {
    let result = endpoints::delete_news(state.api(), admin.token(), &id).await;
    finish(&state, jar, "/admin/news", "delete news", result, "Article deleted.")
}

// =============================================================================
// GALLERY
// =============================================================================

/// `GET /admin/gallery`.
pub async fn gallery(State(state): State<AppState>, admin: AdminSession, jar: CookieJar) -> impl IntoResponse {
    let (jar, mut ctx) = admin_context(&state, jar, "Gallery");
    let albums = endpoints::list_albums(state.api(), Some(admin.token())).await;
    let albums = recover(&mut ctx, "albums", albums, Vec::new());
    (jar, render_page(move || view! { <AdminGalleryPage ctx=ctx albums=albums/> }))
}

/// `POST /admin/gallery`: title, description and any number of `images`.
pub async fn create_album(State(state): State<AppState>, admin: AdminSession, jar: CookieJar, multipart: Multipart) -> Response {
    let (jar, form) = match read_upload(&state, jar, multipart, "/admin/gallery").await {
        Ok(read) => read,
        Err(response) => return response,
    };
    if form.non_empty("title").is_none() {
        return flash_redirect(&state, jar, "/admin/gallery", Flash::error("Album title is required."));
    }
    let result = endpoints::create_album(state.api(), admin.token(), form).await;
    finish(&state, jar, "/admin/gallery", "create album", result, "Album created.")
}

/// `GET /admin/gallery/{id}`.
pub async fn album(State(state): State<AppState>, admin: AdminSession, jar: CookieJar, Path(id): Path<String>) -> Response {
    let (jar, ctx) = admin_context(&state, jar, "Album");
    match endpoints::get_album(state.api(), Some(admin.token()), &id).await {
        Ok(album) => (jar, render_page(move || view! { <AdminAlbumPage ctx=ctx album=album/> })).into_response(),
        Err(e) => missing_record(jar, ctx, "album", &e),
    }
}

/// `POST /admin/gallery/{id}/images`.
pub async fn upload_images(
    State(state): State<AppState>,
    admin: AdminSession,
    jar: CookieJar,
    Path(id): Path<String>,
    multipart: Multipart,
) -> Response {
    let back = format!("/admin/gallery/{id}");
    let (jar, form) = match read_upload(&state, jar, multipart, &back).await {
        Ok(read) => read,
        Err(response) => return response,
    };
    if form.files.is_empty() {
        return flash_redirect(&state, jar, &back, Flash::error("Choose at least one photo."));
    }
    let result = endpoints::upload_album_images(state.api(), admin.token(), &id, form).await;
    finish(&state, jar, &back, "upload images", result, "Photos added.")
}

/// `POST /admin/gallery/{id}/images/{image_id}/delete`.
pub async fn delete_image(
    State(state): State<AppState>,
    admin: AdminSession,
    jar: CookieJar,
    Path((id, image_id)): Path<(String, String)>,
) -> Response {
    let result = endpoints::delete_album_image(state.api(), admin.token(), &id, &image_id).await;
    finish(&state, jar, &format!("/admin/gallery/{id}"), "delete image", result, "Photo removed.")
}

/// `POST /admin/gallery/{id}/delete`.
pub async fn delete_album(State(state): State<AppState>, admin: AdminSession, jar: CookieJar, Path(id): Path<String>) -> Response {
    let result = endpoints::delete_album(state.api(), admin.token(), &id).await;
    finish(&state, jar, "/admin/gallery", "delete album", result, "Album deleted.")
}

// =============================================================================
// SPONSORS
// =============================================================================

/// `GET /admin/sponsors`.
pub async fn sponsors(State(state): State<AppState>, admin: AdminSession, jar: CookieJar) -> impl IntoResponse {
    let (jar, mut ctx) = admin_context(&state, jar, "Sponsors");
    let sponsors = endpoints::list_sponsors(state.api(), Some(admin.token())).await;
    let sponsors = recover(&mut ctx, "sponsors", sponsors, Vec::new());
    (jar, render_page(move || view! { <AdminSponsorsPage ctx=ctx sponsors=sponsors/> }))
}

/// `POST /admin/sponsors`: name, website, tier and a `logo` file.
pub async fn create_sponsor(State(state): State<AppState>, admin: AdminSession, jar: CookieJar, multipart: Multipart) -> Response {
    let (jar, form) = match read_upload(&state, jar, multipart, "/admin/sponsors").await {
        Ok(read) => read,
        Err(response) => return response,
    };
    if form.non_empty("name").is_none() {
        return flash_redirect(&state, jar, "/admin/sponsors", Flash::error("Sponsor name is required."));
    }
    let result = endpoints::create_sponsor(state.api(), admin.token(), form).await;
    finish(&state, jar, "/admin/sponsors", "create sponsor", result, "Sponsor added.")
}

/// `POST /admin/sponsors/{id}/edit`.
pub async fn edit_sponsor(
    State(state): State<AppState>,
    admin: AdminSession,
    jar: CookieJar,
    Path(id): Path<String>,
    multipart: Multipart,
) -> Response {
    let (jar, form) = match read_upload(&state, jar, multipart, "/admin/sponsors").await {
        Ok(read) => read,
        Err(response) => return response,
    };
    if form.non_empty("name").is_none() {
        return flash_redirect(&state, jar, "/admin/sponsors", Flash::error("Sponsor name is required."));
    }
    let result = endpoints::update_sponsor(state.api(), admin.token(), &id, form).await;
    finish(&state, jar, "/admin/sponsors", "update sponsor", result, "Sponsor updated.")
}

/// `POST /admin/sponsors/{id}/delete`.
pub async fn delete_sponsor(State(state): State<AppState>, admin: AdminSession, jar: CookieJar, Path(id): Path<String>) -> Response {
    let result = endpoints::delete_sponsor(state.api(), admin.token(), &id).await;
    finish(&state, jar, "/admin/sponsors", "delete sponsor", result, "Sponsor deleted.")
}

#[cfg(test)]
#[path = "admin_test.rs"]
mod tests;
