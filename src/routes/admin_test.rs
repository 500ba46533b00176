use super::*;
use reqwest::Method;
use reqwest::multipart::{Form as MultipartForm, Part};
use serde_json::json;
use time::macros::offset;

use crate::api::client::RequestBody;
use crate::api::models::Team;
use crate::state::test_helpers::{
    MockBackend, flash_of, location, portal_client, spawn_portal, test_app_state, token_cookie_header, with_admin,
};

const NPT: UtcOffset = offset!(+5:45);

struct AdminClient {
    base: String,
    client: reqwest::Client,
}

impl AdminClient {
    async fn start(mock: MockBackend) -> (Self, std::sync::Arc<MockBackend>) {
        let (state, mock) = test_app_state(with_admin(mock));
        let base = spawn_portal(state).await;
        (Self { base, client: portal_client() }, mock)
    }

    fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.client
            .get(format!("{}{path}", self.base))
            .header(reqwest::header::COOKIE, token_cookie_header("tok-admin"))
    }

    fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.client
            .post(format!("{}{path}", self.base))
            .header(reqwest::header::COOKIE, token_cookie_header("tok-admin"))
    }
}

fn json_body(mock: &MockBackend, method: &Method, path: &str) -> Value {
    match mock.last(method, path).expect("request sent").body {
        RequestBody::Json(value) => value,
        other => panic!("expected json, got {other:?}"),
    }
}

fn team(id: &str, name: &str, status: &str) -> Team {
    Team::from_value(&json!({ "_id": id, "name": name, "captain": "Paras", "status": status })).unwrap()
}

// =============================================================================
// forms
// =============================================================================

#[test]
fn match_form_builds_backend_payload() {
    let form = MatchForm {
        season: "s1".into(),
        team1: "t1".into(),
        team2: "t2".into(),
        date_time: "2026-04-01T14:30".into(),
        venue: " Kirtipur ".into(),
        stage: String::new(),
    };
    let payload = form.payload(NPT).unwrap();
    assert_eq!(payload["team1"], "t1");
    assert_eq!(payload["dateTime"], "2026-04-01T14:30:00+05:45");
    assert_eq!(payload["venue"], "Kirtipur");
    assert_eq!(payload["season"], "s1");
    assert!(payload.get("stage").is_none());
}

#[test]
fn match_form_rejects_bad_input() {
    let base = MatchForm {
        team1: "t1".into(),
        team2: "t2".into(),
        date_time: "2026-04-01T14:30".into(),
        venue: "Kirtipur".into(),
        ..MatchForm::default()
    };
    let same = MatchForm { team2: "t1".into(), ..base.clone() };
    assert_eq!(same.payload(NPT), Err("A team cannot play itself."));
    let missing = MatchForm { team1: String::new(), ..base.clone() };
    assert_eq!(missing.payload(NPT), Err("Pick both teams."));
    let undated = MatchForm { date_time: "soon".into(), ..base.clone() };
    assert_eq!(undated.payload(NPT), Err("Enter a valid date and time."));
    let nowhere = MatchForm { venue: " ".into(), ..base };
    assert_eq!(nowhere.payload(NPT), Err("Venue is required."));
}

#[test]
fn result_form_nulls_blank_fields() {
    let form = ResultForm {
        status: "Completed".into(),
        team1_score: "156/7".into(),
        team2_score: " ".into(),
        winner: "t1".into(),
        result_summary: String::new(),
    };
    assert_eq!(
        form.payload(),
        json!({
            "status": "completed",
            "team1Score": "156/7",
            "team2Score": null,
            "winner": "t1",
            "resultSummary": null,
        })
    );
}

#[test]
fn season_form_validates() {
    let ok = SeasonForm { name: "Season 2026".into(), year: "2026".into(), start_date: "2026-03-01".into(), end_date: "2026-04-30".into() };
    assert_eq!(
        ok.payload().unwrap(),
        json!({ "name": "Season 2026", "year": 2026, "startDate": "2026-03-01", "endDate": "2026-04-30" })
    );
    let backwards = SeasonForm { start_date: "2026-05-01".into(), ..ok.clone() };
    assert_eq!(backwards.payload(), Err("The season cannot end before it starts."));
    let unnamed = SeasonForm { name: " ".into(), ..ok.clone() };
    assert_eq!(unnamed.payload(), Err("Season name is required."));
    let bad_year = SeasonForm { year: "twenty".into(), ..ok };
    assert_eq!(bad_year.payload(), Err("Year must be a number."));
}

#[test]
fn group_count_is_bounded() {
    let count = |raw: &str| GenerateGroupsForm { season_id: "s1".into(), group_count: raw.into() }.group_count();
    assert_eq!(count("2"), Ok(2));
    assert_eq!(count(" 8 "), Ok(8));
    assert!(count("0").is_err());
    assert!(count("9").is_err());
    assert!(count("two").is_err());
}

#[test]
fn verification_query_filters_status_and_text() {
    let approved = team("t1", "Everest XI", "approved");
    let pending = team("t2", "Karnali Yaks", "pending");

    let all = VerificationQuery::default();
    assert!(all.keeps_team(&approved) && all.keeps_team(&pending));

    let only_pending = VerificationQuery { status: "pending".into(), q: String::new() };
    assert!(!only_pending.keeps_team(&approved));
    assert!(only_pending.keeps_team(&pending));

    let search = VerificationQuery { status: String::new(), q: "everest".into() };
    assert!(search.keeps_team(&approved));
    assert!(!search.keeps_team(&pending));
}

// =============================================================================
// access
// =============================================================================

#[tokio::test]
async fn non_admin_is_sent_home() {
    let mock = MockBackend::new().on(Method::GET, "/auth/me", json!({ "user": { "_id": "u2", "name": "Fan", "role": "user" } }));
    let (state, mock) = test_app_state(mock);
    let base = spawn_portal(state).await;

    let response = portal_client()
        .get(format!("{base}/admin/teams"))
        .header(reqwest::header::COOKIE, token_cookie_header("tok-fan"))
        .send()
        .await
        .unwrap();
    assert_eq!(location(&response), "/");
    assert_eq!(flash_of(&response), Some(Flash::error("Admin access required.")));
    assert!(mock.last(&Method::GET, "/teams").is_none());
}

#[tokio::test]
async fn dashboard_renders_counts() {
    let (admin, _) = AdminClient::start(MockBackend::new().on(
        Method::GET,
        "/admin/admin-dashboard",
        json!({ "stats": { "totalTeams": 12, "pendingTeams": 3, "totalPlayers": 140 } }),
    ))
    .await;
    let response = admin.get("/admin").send().await.unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::OK);
    let body = response.text().await.unwrap();
    assert!(body.contains("Org Admin"));
    assert!(body.contains("140"));
    assert!(body.contains("class=\"admin-nav\""));
}

// =============================================================================
// verification
// =============================================================================

#[tokio::test]
async fn teams_page_filters_pending() {
    let (admin, _) = AdminClient::start(MockBackend::new().on(
        Method::GET,
        "/teams",
        json!([
            { "_id": "t1", "name": "Everest XI", "status": "approved" },
            { "_id": "t2", "name": "Karnali Yaks", "status": "pending" },
        ]),
    ))
    .await;
    let body = admin.get("/admin/teams?status=pending").send().await.unwrap().text().await.unwrap();
    assert!(body.contains("Karnali Yaks"));
    assert!(!body.contains("Everest XI"));
    assert!(body.contains("action=\"/admin/teams/t2/verify\""));
}

#[tokio::test]
async fn approve_team_forwards_and_flashes() {
    let (admin, mock) = AdminClient::start(MockBackend::new().on(Method::PATCH, "/admin/verify-team/t2", json!({ "success": true }))).await;
    let response = admin.post("/admin/teams/t2/verify").send().await.unwrap();

    assert_eq!(response.status(), reqwest::StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/admin/teams");
    assert_eq!(flash_of(&response), Some(Flash::success("Team approved.")));
    assert_eq!(mock.last(&Method::PATCH, "/admin/verify-team/t2").unwrap().token.as_deref(), Some("tok-admin"));
}

#[tokio::test]
async fn reject_player_sends_reason() {
    let (admin, mock) = AdminClient::start(MockBackend::new().on(Method::PATCH, "/admin/reject-player/p1", json!({}))).await;
    let response = admin
        .post("/admin/players/p1/reject")
        .form(&[("reason", "Duplicate registration")])
        .send()
        .await
        .unwrap();
    assert_eq!(location(&response), "/admin/players");
    assert_eq!(json_body(&mock, &Method::PATCH, "/admin/reject-player/p1"), json!({ "reason": "Duplicate registration" }));
}

#[tokio::test]
async fn failed_mutation_flashes_backend_message() {
    let (admin, _) = AdminClient::start(MockBackend::new().fail(Method::DELETE, "/teams/t1", 409, "Team has scheduled matches")).await;
    let response = admin.post("/admin/teams/t1/delete").send().await.unwrap();
    assert_eq!(location(&response), "/admin/teams");
    assert_eq!(flash_of(&response), Some(Flash::error("Team has scheduled matches")));
}

// =============================================================================
// matches + seasons
// =============================================================================

#[tokio::test]
async fn create_match_converts_local_time() {
    let (admin, mock) = AdminClient::start(MockBackend::new().on(Method::POST, "/matches", json!({ "success": true }))).await;
    let response = admin
        .post("/admin/matches")
        .form(&[
            ("season", "s1"),
            ("team1", "t1"),
            ("team2", "t2"),
            ("dateTime", "2026-04-01T14:30"),
            ("venue", "Kirtipur"),
            ("stage", "League"),
        ])
        .send()
        .await
        .unwrap();

    assert_eq!(location(&response), "/admin/matches");
    assert_eq!(flash_of(&response), Some(Flash::success("Match scheduled.")));
    let payload = json_body(&mock, &Method::POST, "/matches");
    assert_eq!(payload["dateTime"], "2026-04-01T14:30:00+05:45");
    assert_eq!(payload["stage"], "League");
}

#[tokio::test]
async fn invalid_match_never_reaches_backend() {
    let (admin, mock) = AdminClient::start(MockBackend::new()).await;
    let response = admin
        .post("/admin/matches")
        .form(&[("team1", "t1"), ("team2", "t1"), ("dateTime", "2026-04-01T14:30"), ("venue", "Kirtipur")])
        .send()
        .await
        .unwrap();
    assert_eq!(flash_of(&response), Some(Flash::error("A team cannot play itself.")));
    assert!(mock.last(&Method::POST, "/matches").is_none());
}

#[tokio::test]
async fn matches_page_offers_only_approved_teams() {
    let mock = MockBackend::new()
        .on(Method::GET, "/matches", json!([]))
        .on(
            Method::GET,
            "/teams",
            json!([
                { "_id": "t1", "name": "Everest XI", "status": "approved" },
                { "_id": "t2", "name": "Karnali Yaks", "status": "pending" },
            ]),
        )
        .on(Method::GET, "/seasons", json!([{ "_id": "s1", "name": "Season 2026", "isCurrent": true }]));
    let (admin, _) = AdminClient::start(mock).await;
    let body = admin.get("/admin/matches").send().await.unwrap().text().await.unwrap();
    assert!(body.contains("value=\"t1\""));
    assert!(!body.contains("value=\"t2\""));
    assert!(body.contains("Season 2026"));
}

#[tokio::test]
async fn update_result_patches_backend() {
    let (admin, mock) = AdminClient::start(MockBackend::new().on(Method::PATCH, "/matches/m1/result", json!({}))).await;
    let response = admin
        .post("/admin/matches/m1/result")
        .form(&[
            ("status", "completed"),
            ("team1Score", "156/7"),
            ("team2Score", "150/9"),
            ("winner", "t1"),
            ("resultSummary", "Everest XI won by 6 runs"),
        ])
        .send()
        .await
        .unwrap();
    assert_eq!(location(&response), "/admin/matches");
    let payload = json_body(&mock, &Method::PATCH, "/matches/m1/result");
    assert_eq!(payload["winner"], "t1");
    assert_eq!(payload["status"], "completed");
}

#[tokio::test]
async fn generate_schedule_needs_a_season() {
    let (admin, mock) = AdminClient::start(MockBackend::new()).await;
    let response = admin.post("/admin/matches/generate").form(&[("season_id", "")]).send().await.unwrap();
    assert_eq!(flash_of(&response), Some(Flash::error("Pick a season to schedule.")));
    assert!(mock.last(&Method::POST, "/matches/generate").is_none());
}

#[tokio::test]
async fn seasons_page_lists_current_groups() {
    let mock = MockBackend::new()
        .on(
            Method::GET,
            "/seasons",
            json!([{ "_id": "s1", "name": "Season 2026", "isCurrent": true }, { "_id": "s0", "name": "Season 2025" }]),
        )
        .on(Method::GET, "/groups/s1", json!([{ "_id": "g1", "name": "Group A", "teams": [{ "_id": "t1", "name": "Everest XI" }] }]));
    let (admin, mock) = AdminClient::start(mock).await;
    let body = admin.get("/admin/seasons").send().await.unwrap().text().await.unwrap();
    assert!(body.contains("Group A"));
    assert!(body.contains("action=\"/admin/seasons/s0/current\""));
    assert!(mock.last(&Method::GET, "/groups/s0").is_none());
}

#[tokio::test]
async fn generate_groups_forwards_count() {
    let (admin, mock) = AdminClient::start(MockBackend::new().on(Method::POST, "/groups/generate", json!({}))).await;
    let response = admin
        .post("/admin/groups/generate")
        .form(&[("season_id", "s1"), ("group_count", "4")])
        .send()
        .await
        .unwrap();
    assert_eq!(location(&response), "/admin/seasons");
    assert_eq!(json_body(&mock, &Method::POST, "/groups/generate"), json!({ "seasonId": "s1", "numberOfGroups": 4 }));
}

// =============================================================================
// content
// =============================================================================

#[tokio::test]
async fn create_news_forwards_multipart() {
    let (admin, mock) = AdminClient::start(MockBackend::new().on(Method::POST, "/news", json!({}))).await;
    let form = MultipartForm::new()
        .text("title", "Opening ceremony")
        .text("content", "Fireworks at Kirtipur.")
        .part("image", Part::bytes(vec![1, 2, 3]).file_name("cover.jpg"));
    let response = admin.post("/admin/news").multipart(form).send().await.unwrap();

    assert_eq!(location(&response), "/admin/news");
    let RequestBody::Multipart(upload) = mock.last(&Method::POST, "/news").unwrap().body else {
        panic!("expected multipart")
    };
    assert_eq!(upload.field("title"), Some("Opening ceremony"));
    assert_eq!(upload.file("image").map(|f| f.bytes.clone()), Some(vec![1, 2, 3]));
}

#[tokio::test]
async fn news_without_content_is_refused() {
    let (admin, mock) = AdminClient::start(MockBackend::new()).await;
    let form = MultipartForm::new().text("title", "Draft");
    let response = admin.post("/admin/news").multipart(form).send().await.unwrap();
    assert_eq!(flash_of(&response), Some(Flash::error("Title and content are required.")));
    assert!(mock.last(&Method::POST, "/news").is_none());
}

#[tokio::test]
async fn album_upload_requires_files() {
    let (admin, mock) = AdminClient::start(MockBackend::new()).await;
    let form = MultipartForm::new().part("images", Part::bytes(Vec::new()).file_name(""));
    let response = admin.post("/admin/gallery/a1/images").multipart(form).send().await.unwrap();
    assert_eq!(location(&response), "/admin/gallery/a1");
    assert_eq!(flash_of(&response), Some(Flash::error("Choose at least one photo.")));
    assert!(mock.last(&Method::POST, "/gallery/a1/images").is_none());
}

#[tokio::test]
async fn delete_album_image_returns_to_album() {
    let (admin, mock) = AdminClient::start(MockBackend::new().on(Method::DELETE, "/gallery/a1/images/i9", json!({}))).await;
    let response = admin.post("/admin/gallery/a1/images/i9/delete").send().await.unwrap();
    assert_eq!(location(&response), "/admin/gallery/a1");
    assert!(mock.last(&Method::DELETE, "/gallery/a1/images/i9").is_some());
}

#[tokio::test]
async fn sponsor_lifecycle() {
    let mock = MockBackend::new()
        .on(Method::POST, "/sponsors", json!({}))
        .on(Method::DELETE, "/sponsors/sp1", json!({}));
    let (admin, mock) = AdminClient::start(mock).await;

    let created = admin
        .post("/admin/sponsors")
        .multipart(MultipartForm::new().text("name", "Himalayan Bank").text("tier", "Title"))
        .send()
        .await
        .unwrap();
    assert_eq!(flash_of(&created), Some(Flash::success("Sponsor added.")));

    let deleted = admin.post("/admin/sponsors/sp1/delete").send().await.unwrap();
    assert_eq!(flash_of(&deleted), Some(Flash::success("Sponsor deleted.")));
    assert!(mock.last(&Method::DELETE, "/sponsors/sp1").is_some());
}

#[tokio::test]
async fn edit_sponsor_forwards_details() {
    let (admin, mock) = AdminClient::start(MockBackend::new().on(Method::PUT, "/sponsors/sp1", json!({}))).await;
    let response = admin
        .post("/admin/sponsors/sp1/edit")
        .multipart(MultipartForm::new().text("name", "Himalayan Bank").text("tier", "Gold"))
        .send()
        .await
        .unwrap();
    assert_eq!(location(&response), "/admin/sponsors");
    assert_eq!(flash_of(&response), Some(Flash::success("Sponsor updated.")));
    match mock.last(&Method::PUT, "/sponsors/sp1").expect("update sent").body {
        RequestBody::Multipart(form) => assert_eq!(form.field("tier"), Some("Gold")),
        other => panic!("expected multipart, got {other:?}"),
    }
}

#[tokio::test]
async fn edit_team_requires_name() {
    let (admin, mock) = AdminClient::start(MockBackend::new()).await;
    let response = admin
        .post("/admin/teams/t1/edit")
        .multipart(MultipartForm::new().text("name", " ").text("captain", "Paras"))
        .send()
        .await
        .unwrap();
    assert_eq!(location(&response), "/admin/teams");
    assert_eq!(flash_of(&response), Some(Flash::error("Team name is required.")));
    assert!(mock.last(&Method::PUT, "/teams/t1").is_none());
}
