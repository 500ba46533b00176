//! One function per backend endpoint the portal consumes.
//!
//! Paths are relative to `BACKEND_API_URL`. Every call takes the caller's
//! bearer token (public pages pass whatever the visitor has, which may be
//! nothing). List calls decode leniently; single-record calls map an
//! undecodable body to `ApiError::Parse`.

use serde_json::{Value, json};

use super::client::{ApiError, ApiRequest, Backend, UploadForm};
use super::models::{
    CurrentUser, DashboardSummary, GalleryAlbum, Group, Match, NewsArticle, Player, PointsRow, Season, Sponsor,
    Team,
};
use super::normalize::{pick_str, unwrap_object};

fn undecodable(what: &str) -> ApiError {
    ApiError::Parse(format!("unrecognised {what} payload"))
}

// =============================================================================
// AUTH
// =============================================================================

/// `POST /auth/login`: returns the bearer token.
pub async fn login(api: &dyn Backend, email: &str, password: &str) -> Result<String, ApiError> {
    let body = api
        .send(ApiRequest::post("/auth/login").json(json!({ "email": email, "password": password })))
        .await?;
    token_from_login(&body).ok_or_else(|| undecodable("login"))
}

pub(crate) fn token_from_login(body: &Value) -> Option<String> {
    pick_str(body, &["token", "accessToken", "access_token", "jwt"]).or_else(|| {
        unwrap_object(body, &["data", "user"]).and_then(|inner| pick_str(inner, &["token", "accessToken"]))
    })
}

/// `POST /auth/register`.
pub async fn register(api: &dyn Backend, name: &str, email: &str, password: &str) -> Result<(), ApiError> {
    api.send(ApiRequest::post("/auth/register").json(json!({ "name": name, "email": email, "password": password })))
        .await?;
    Ok(())
}

/// `GET /auth/me`.
pub async fn current_user(api: &dyn Backend, token: &str) -> Result<CurrentUser, ApiError> {
    let body = api.send(ApiRequest::get("/auth/me").with_token(Some(token))).await?;
    CurrentUser::from_value(&body).ok_or_else(|| undecodable("user"))
}

// =============================================================================
// TEAMS + PLAYERS
// =============================================================================

/// `GET /teams`.
pub async fn list_teams(api: &dyn Backend, token: Option<&str>) -> Result<Vec<Team>, ApiError> {
    let body = api.send(ApiRequest::get("/teams").with_token(token)).await?;
    Ok(Team::list(&body))
}

/// `GET /teams/:id`.
pub async fn get_team(api: &dyn Backend, token: Option<&str>, id: &str) -> Result<Team, ApiError> {
    let body = api
        .send(ApiRequest::get("/teams").segment(id).with_token(token))
        .await?;
    Team::single(&body).ok_or_else(|| undecodable("team"))
}

/// `POST /teams`: multipart registration with logo and payment receipt.
/// Returns the created team id when the backend echoes one.
pub async fn create_team(api: &dyn Backend, token: Option<&str>, form: UploadForm) -> Result<Option<String>, ApiError> {
    let body = api.send(ApiRequest::post("/teams").with_token(token).multipart(form)).await?;
    Ok(Team::single(&body).map(|team| team.id))
}

/// `PUT /teams/:id`.
pub async fn update_team(api: &dyn Backend, token: &str, id: &str, form: UploadForm) -> Result<(), ApiError> {
    api.send(
        ApiRequest::put("/teams")
            .segment(id)
            .with_token(Some(token))
            .multipart(form),
    )
    .await?;
    Ok(())
}

/// `DELETE /teams/:id`.
pub async fn delete_team(api: &dyn Backend, token: &str, id: &str) -> Result<(), ApiError> {
    api.send(ApiRequest::delete("/teams").segment(id).with_token(Some(token)))
        .await?;
    Ok(())
}

/// `GET /players` optionally filtered by team.
pub async fn list_players(api: &dyn Backend, token: Option<&str>, team_id: Option<&str>) -> Result<Vec<Player>, ApiError> {
    let mut request = ApiRequest::get("/players");
    if let Some(team_id) = team_id {
        request = request.query("teamId", team_id);
    }
    let body = api.send(request.with_token(token)).await?;
    Ok(Player::list(&body))
}

/// `POST /players`: multipart with profile photo.
pub async fn create_player(api: &dyn Backend, token: Option<&str>, form: UploadForm) -> Result<(), ApiError> {
    api.send(ApiRequest::post("/players").with_token(token).multipart(form)).await?;
    Ok(())
}

// =============================================================================
// MATCHES
// =============================================================================

/// `GET /matches`.
pub async fn list_matches(api: &dyn Backend, token: Option<&str>) -> Result<Vec<Match>, ApiError> {
    let body = api.send(ApiRequest::get("/matches").with_token(token)).await?;
    Ok(Match::list(&body))
}

/// `GET /matches/:id`.
pub async fn get_match(api: &dyn Backend, token: Option<&str>, id: &str) -> Result<Match, ApiError> {
    let body = api
        .send(ApiRequest::get("/matches").segment(id).with_token(token))
        .await?;
    Match::single(&body).ok_or_else(|| undecodable("match"))
}

/// `POST /matches`.
pub async fn create_match(api: &dyn Backend, token: &str, payload: Value) -> Result<(), ApiError> {
    api.send(ApiRequest::post("/matches").with_token(Some(token)).json(payload)).await?;
    Ok(())
}

/// `PUT /matches/:id`.
pub async fn update_match(api: &dyn Backend, token: &str, id: &str, payload: Value) -> Result<(), ApiError> {
    api.send(
        ApiRequest::put("/matches")
            .segment(id)
            .with_token(Some(token))
            .json(payload),
    )
    .await?;
    Ok(())
}

/// `PATCH /matches/:id/result`.
pub async fn update_match_result(api: &dyn Backend, token: &str, id: &str, payload: Value) -> Result<(), ApiError> {
    api.send(
        ApiRequest::patch("/matches").segment(id).segment("result")
            .with_token(Some(token))
            .json(payload),
    )
    .await?;
    Ok(())
}

/// `DELETE /matches/:id`.
pub async fn delete_match(api: &dyn Backend, token: &str, id: &str) -> Result<(), ApiError> {
    api.send(ApiRequest::delete("/matches").segment(id).with_token(Some(token)))
        .await?;
    Ok(())
}

/// `POST /matches/generate`: backend builds the round-robin fixture list.
pub async fn generate_schedule(api: &dyn Backend, token: &str, season_id: &str, start_date: Option<&str>) -> Result<(), ApiError> {
    let mut payload = json!({ "seasonId": season_id });
    if let Some(start_date) = start_date {
        payload["startDate"] = json!(start_date);
    }
    api.send(ApiRequest::post("/matches/generate").with_token(Some(token)).json(payload))
        .await?;
    Ok(())
}

// =============================================================================
// SEASONS + GROUPS + POINTS TABLE
// =============================================================================

/// `GET /seasons`.
pub async fn list_seasons(api: &dyn Backend, token: Option<&str>) -> Result<Vec<Season>, ApiError> {
    let body = api.send(ApiRequest::get("/seasons").with_token(token)).await?;
    Ok(Season::list(&body))
}

/// `GET /seasons/current`. A 404 means no season is running.
pub async fn current_season(api: &dyn Backend, token: Option<&str>) -> Result<Option<Season>, ApiError> {
    match api.send(ApiRequest::get("/seasons/current").with_token(token)).await {
        Ok(body) => Ok(Season::single(&body)),
        Err(e) if e.is_not_found() => Ok(None),
        Err(e) => Err(e),
    }
}

/// `POST /seasons`.
pub async fn create_season(api: &dyn Backend, token: &str, payload: Value) -> Result<(), ApiError> {
    api.send(ApiRequest::post("/seasons").with_token(Some(token)).json(payload)).await?;
    Ok(())
}

/// `PATCH /seasons/:id/current`.
pub async fn set_current_season(api: &dyn Backend, token: &str, id: &str) -> Result<(), ApiError> {
    api.send(ApiRequest::patch("/seasons").segment(id).segment("current").with_token(Some(token)))
        .await?;
    Ok(())
}

/// `GET /groups/:seasonId`.
pub async fn list_groups(api: &dyn Backend, token: Option<&str>, season_id: &str) -> Result<Vec<Group>, ApiError> {
    let body = api
        .send(ApiRequest::get("/groups").segment(season_id).with_token(token))
        .await?;
    Ok(Group::list(&body))
}

/// `POST /groups/generate`: backend draws teams into groups.
pub async fn generate_groups(api: &dyn Backend, token: &str, season_id: &str, group_count: u32) -> Result<(), ApiError> {
    api.send(
        ApiRequest::post("/groups/generate")
            .with_token(Some(token))
            .json(json!({ "seasonId": season_id, "numberOfGroups": group_count })),
    )
    .await?;
    Ok(())
}

/// `GET /points-table/:seasonId`.
pub async fn points_table(api: &dyn Backend, token: Option<&str>, season_id: &str) -> Result<Vec<PointsRow>, ApiError> {
    let body = api
        .send(ApiRequest::get("/points-table").segment(season_id).with_token(token))
        .await?;
    Ok(PointsRow::list(&body))
}

// =============================================================================
// NEWS
// =============================================================================

/// `GET /news`.
pub async fn list_news(api: &dyn Backend, token: Option<&str>) -> Result<Vec<NewsArticle>, ApiError> {
    let body = api.send(ApiRequest::get("/news").with_token(token)).await?;
    Ok(NewsArticle::list(&body))
}

/// `GET /news/:id`.
pub async fn get_news(api: &dyn Backend, token: Option<&str>, id: &str) -> Result<NewsArticle, ApiError> {
    let body = api
        .send(ApiRequest::get("/news").segment(id).with_token(token))
        .await?;
    NewsArticle::single(&body).ok_or_else(|| undecodable("news"))
}

/// `POST /news`: multipart with optional image.
pub async fn create_news(api: &dyn Backend, token: &str, form: UploadForm) -> Result<(), ApiError> {
    api.send(ApiRequest::post("/news").with_token(Some(token)).multipart(form)).await?;
    Ok(())
}

/// `PUT /news/:id`.
pub async fn update_news(api: &dyn Backend, token: &str, id: &str, form: UploadForm) -> Result<(), ApiError> {
    api.send(
        ApiRequest::put("/news")
            .segment(id)
            .with_token(Some(token))
            .multipart(form),
    )
    .await?;
    Ok(())
}

/// `DELETE /news/:id`.
pub async fn delete_news(api: &dyn Backend, token: &str, id: &str) -> Result<(), ApiError> {
    api.send(ApiRequest::delete("/news").segment(id).with_token(Some(token)))
        .await?;
    Ok(())
}

// =============================================================================
// SPONSORS
// =============================================================================

/// `GET /sponsors`.
pub async fn list_sponsors(api: &dyn Backend, token: Option<&str>) -> Result<Vec<Sponsor>, ApiError> {
    let body = api.send(ApiRequest::get("/sponsors").with_token(token)).await?;
    Ok(Sponsor::list(&body))
}

/// `POST /sponsors`: multipart with logo.
pub async fn create_sponsor(api: &dyn Backend, token: &str, form: UploadForm) -> Result<(), ApiError> {
    api.send(ApiRequest::post("/sponsors").with_token(Some(token)).multipart(form)).await?;
    Ok(())
}

/// `PUT /sponsors/:id`.
pub async fn update_sponsor(api: &dyn Backend, token: &str, id: &str, form: UploadForm) -> Result<(), ApiError> {
    api.send(
        ApiRequest::put("/sponsors")
            .segment(id)
            .with_token(Some(token))
            .multipart(form),
    )
    .await?;
    Ok(())
}

/// `DELETE /sponsors/:id`.
pub async fn delete_sponsor(api: &dyn Backend, token: &str, id: &str) -> Result<(), ApiError> {
    api.send(ApiRequest::delete("/sponsors").segment(id).with_token(Some(token)))
        .await?;
    Ok(())
}

// =============================================================================
// GALLERY
// =============================================================================

/// `GET /gallery`.
pub async fn list_albums(api: &dyn Backend, token: Option<&str>) -> Result<Vec<GalleryAlbum>, ApiError> {
    let body = api.send(ApiRequest::get("/gallery").with_token(token)).await?;
    Ok(GalleryAlbum::list(&body))
}

/// `GET /gallery/:id`.
pub async fn get_album(api: &dyn Backend, token: Option<&str>, id: &str) -> Result<GalleryAlbum, ApiError> {
    let body = api
        .send(ApiRequest::get("/gallery").segment(id).with_token(token))
        .await?;
    GalleryAlbum::single(&body).ok_or_else(|| undecodable("album"))
}

/// `POST /gallery`: multipart with optional cover image.
pub async fn create_album(api: &dyn Backend, token: &str, form: UploadForm) -> Result<(), ApiError> {
    api.send(ApiRequest::post("/gallery").with_token(Some(token)).multipart(form)).await?;
    Ok(())
}

/// `DELETE /gallery/:id`.
pub async fn delete_album(api: &dyn Backend, token: &str, id: &str) -> Result<(), ApiError> {
    api.send(ApiRequest::delete("/gallery").segment(id).with_token(Some(token)))
        .await?;
    Ok(())
}

/// `POST /gallery/:id/images`: multipart, one or more `images` parts.
pub async fn upload_album_images(api: &dyn Backend, token: &str, id: &str, form: UploadForm) -> Result<(), ApiError> {
    api.send(
        ApiRequest::post("/gallery")
            .segment(id)
            .segment("images")
            .with_token(Some(token))
            .multipart(form),
    )
    .await?;
    Ok(())
}

/// `DELETE /gallery/:id/images/:imageId`.
pub async fn delete_album_image(api: &dyn Backend, token: &str, id: &str, image_id: &str) -> Result<(), ApiError> {
    api.send(
        ApiRequest::delete("/gallery")
            .segment(id)
            .segment("images")
            .segment(image_id)
            .with_token(Some(token)),
    )
    .await?;
    Ok(())
}

// =============================================================================
// ADMIN
// =============================================================================

/// `GET /admin/admin-dashboard`.
pub async fn admin_dashboard(api: &dyn Backend, token: &str) -> Result<DashboardSummary, ApiError> {
    let body = api
        .send(ApiRequest::get("/admin/admin-dashboard").with_token(Some(token)))
        .await?;
    Ok(DashboardSummary::from_value(&body))
}

/// `GET /admin/players`: every registered player, any status.
pub async fn admin_players(api: &dyn Backend, token: &str) -> Result<Vec<Player>, ApiError> {
    let body = api.send(ApiRequest::get("/admin/players").with_token(Some(token))).await?;
    Ok(Player::list(&body))
}

/// Approve/reject target for the admin verification screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifyTarget {
    Player,
    Team,
}

impl VerifyTarget {
    fn noun(self) -> &'static str {
        match self {
            Self::Player => "player",
            Self::Team => "team",
        }
    }
}

/// `PATCH /admin/verify-{player|team}/:id`.
pub async fn verify(api: &dyn Backend, token: &str, target: VerifyTarget, id: &str) -> Result<(), ApiError> {
    api.send(
        ApiRequest::patch(&format!("/admin/verify-{}", target.noun()))
            .segment(id)
            .with_token(Some(token)),
    )
    .await?;
    Ok(())
}

/// `PATCH /admin/reject-{player|team}/:id` with an optional reason.
pub async fn reject(api: &dyn Backend, token: &str, target: VerifyTarget, id: &str, reason: Option<&str>) -> Result<(), ApiError> {
    api.send(
        ApiRequest::patch(&format!("/admin/reject-{}", target.noun()))
            .segment(id)
            .with_token(Some(token))
            .json(json!({ "reason": reason.unwrap_or_default() })),
    )
    .await?;
    Ok(())
}

// =============================================================================
// PAYMENT
// =============================================================================

/// `POST /payment/initiate`: the backend signs the eSewa form fields.
pub async fn initiate_payment(api: &dyn Backend, token: Option<&str>, payload: Value) -> Result<Value, ApiError> {
    api.send(ApiRequest::post("/payment/initiate").with_token(token).json(payload))
        .await
}

/// `POST /payment/verify-payment`.
pub async fn verify_payment(api: &dyn Backend, token: Option<&str>, payload: Value) -> Result<Value, ApiError> {
    api.send(ApiRequest::post("/payment/verify-payment").with_token(token).json(payload))
        .await
}

#[cfg(test)]
#[path = "endpoints_test.rs"]
mod tests;
