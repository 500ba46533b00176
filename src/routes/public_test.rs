use super::*;
use reqwest::Method;
use serde_json::json;

use crate::session::FlashKind;
use crate::state::test_helpers::{MockBackend, portal_client, spawn_portal, test_app_state, token_cookie_header};

async fn get_page(mock: MockBackend, path: &str) -> (reqwest::StatusCode, String, std::sync::Arc<MockBackend>) {
    let (state, mock) = test_app_state(mock);
    let base = spawn_portal(state).await;
    let response = portal_client().get(format!("{base}{path}")).send().await.unwrap();
    let status = response.status();
    (status, response.text().await.unwrap(), mock)
}

fn teams_payload() -> serde_json::Value {
    json!({ "teams": [
        { "_id": "t1", "name": "Everest XI", "captain": "Paras", "status": "approved" },
        { "_id": "t2", "name": "Annapurna Strikers", "captain": "Sandeep", "status": "approved" },
        { "_id": "t3", "name": "Pending Panthers", "status": "pending" },
    ]})
}

// =============================================================================
// missing_record
// =============================================================================

#[test]
fn missing_record_maps_not_found_and_gateway_errors() {
    let (state, _) = test_app_state(MockBackend::new());
    let ctx = PageContext::new("Team", state.config.clone());
    let gone = ApiError::Status { status: 404, message: "Team not found".into() };
    assert_eq!(missing_record(CookieJar::new(), ctx.clone(), "team", &gone).status(), StatusCode::NOT_FOUND);

    let down = ApiError::Request("connection refused".into());
    assert_eq!(missing_record(CookieJar::new(), ctx, "team", &down).status(), StatusCode::BAD_GATEWAY);
}

// =============================================================================
// pages
// =============================================================================

#[tokio::test]
async fn home_renders_even_when_backend_is_down() {
    let mock = MockBackend::new()
        .fail(Method::GET, "/matches", 500, "database unavailable")
        .fail(Method::GET, "/news", 500, "database unavailable")
        .fail(Method::GET, "/sponsors", 500, "database unavailable");
    let (status, body, mock) = get_page(mock, "/").await;

    assert_eq!(status, reqwest::StatusCode::OK);
    assert!(body.contains("Season to be announced"));
    assert!(body.contains("toast toast--error"));
    assert!(body.contains("database unavailable"));
    let paths: Vec<String> = mock.requests().into_iter().map(|r| r.path()).collect();
    for path in ["/seasons/current", "/matches", "/news", "/sponsors"] {
        assert!(paths.iter().any(|p| p == path), "{path} fetched");
    }
}

#[tokio::test]
async fn home_shows_live_and_upcoming_matches() {
    let mock = MockBackend::new()
        .on(Method::GET, "/seasons/current", json!({ "season": { "_id": "s1", "name": "Season 2026" } }))
        .on(
            Method::GET,
            "/matches",
            json!([
                { "_id": "m1", "team1": { "_id": "t1", "name": "Everest XI" }, "team2": { "_id": "t2", "name": "Annapurna Strikers" },
                  "dateTime": "2099-05-01T09:00:00Z", "status": "upcoming", "venue": "Kirtipur" },
                { "_id": "m2", "team1": { "_id": "t3", "name": "Lumbini Lions" }, "team2": { "_id": "t4", "name": "Karnali Yaks" },
                  "dateTime": "2020-05-01T09:00:00Z", "status": "live" },
            ]),
        )
        .on(Method::GET, "/news", json!([]))
        .on(Method::GET, "/sponsors", json!([]));
    let (_, body, _) = get_page(mock, "/").await;

    assert!(body.contains("Season 2026"));
    assert!(body.contains("Live now"));
    assert!(body.contains("Lumbini Lions"));
    assert!(body.contains("Everest XI vs Annapurna Strikers"));
    assert!(body.contains("class=\"countdown\""));
}

#[tokio::test]
async fn teams_lists_only_approved_and_filters_by_search() {
    let mock = MockBackend::new().on(Method::GET, "/teams", teams_payload());

    let (_, body, _) = get_page(mock, "/teams").await;
    assert!(body.contains("Everest XI"));
    assert!(body.contains("Annapurna Strikers"));
    assert!(!body.contains("Pending Panthers"));

    let mock = MockBackend::new().on(Method::GET, "/teams", teams_payload());
    let (_, body, _) = get_page(mock, "/teams?q=paras").await;
    assert!(body.contains("Everest XI"));
    assert!(!body.contains("Annapurna Strikers"));
}

#[tokio::test]
async fn team_detail_fetches_squad_when_not_embedded() {
    let mock = MockBackend::new()
        .on(Method::GET, "/teams/t1", json!({ "team": { "_id": "t1", "name": "Everest XI", "status": "approved" } }))
        .on(
            Method::GET,
            "/players?teamId=t1",
            json!([
                { "_id": "p1", "name": "Kushal Bhurtel", "status": "approved" },
                { "_id": "p2", "name": "Unverified Player", "status": "pending" },
            ]),
        );
    let (status, body, mock) = get_page(mock, "/teams/t1").await;

    assert_eq!(status, reqwest::StatusCode::OK);
    assert!(body.contains("Kushal Bhurtel"));
    assert!(!body.contains("Unverified Player"));
    assert!(mock.last(&Method::GET, "/players?teamId=t1").is_some());
}

#[tokio::test]
async fn unknown_team_is_not_found() {
    let mock = MockBackend::new().fail(Method::GET, "/teams/nope", 404, "Team not found");
    let (status, body, _) = get_page(mock, "/teams/nope").await;
    assert_eq!(status, reqwest::StatusCode::NOT_FOUND);
    assert!(body.contains("That team could not be found."));
}

#[tokio::test]
async fn live_match_page_refreshes() {
    let mock = MockBackend::new().on(
        Method::GET,
        "/matches/m2",
        json!({ "match": { "_id": "m2", "team1": { "name": "Lumbini Lions" }, "team2": { "name": "Karnali Yaks" },
                           "status": "live", "team1Score": "88/2" } }),
    );
    let (status, body, _) = get_page(mock, "/matches/m2").await;
    assert_eq!(status, reqwest::StatusCode::OK);
    assert!(body.contains("http-equiv=\"refresh\""));
    assert!(body.contains("content=\"5\""));
    assert!(body.contains("88/2"));
}

#[tokio::test]
async fn completed_match_page_does_not_refresh() {
    let mock = MockBackend::new().on(
        Method::GET,
        "/matches/m1",
        json!({ "_id": "m1", "team1": { "_id": "t1", "name": "Everest XI" }, "team2": { "_id": "t2", "name": "Annapurna Strikers" },
                "status": "completed", "winner": "t1", "resultSummary": "Everest XI won by 12 runs" }),
    );
    let (_, body, _) = get_page(mock, "/matches/m1").await;
    assert!(!body.contains("http-equiv=\"refresh\""));
    assert!(body.contains("Winner: Everest XI"));
}

#[tokio::test]
async fn schedules_filters_by_status() {
    let mock = MockBackend::new()
        .on(
            Method::GET,
            "/matches",
            json!([
                { "_id": "m1", "team1": { "name": "Everest XI" }, "team2": { "name": "Annapurna Strikers" }, "status": "completed",
                  "dateTime": "2026-04-01T09:00:00Z" },
                { "_id": "m2", "team1": { "name": "Lumbini Lions" }, "team2": { "name": "Karnali Yaks" }, "status": "upcoming",
                  "dateTime": "2026-04-02T09:00:00Z" },
            ]),
        )
        .on(Method::GET, "/teams", teams_payload());
    let (_, body, _) = get_page(mock, "/schedules?status=upcoming").await;
    assert!(body.contains("href=\"/matches/m2\""));
    assert!(!body.contains("href=\"/matches/m1\""));
}

#[tokio::test]
async fn points_table_defaults_to_current_season() {
    let mock = MockBackend::new()
        .on(
            Method::GET,
            "/seasons",
            json!([{ "_id": "s0", "name": "Season 2025" }, { "_id": "s1", "name": "Season 2026" }]),
        )
        .on(Method::GET, "/seasons/current", json!({ "_id": "s1", "name": "Season 2026" }))
        .on(
            Method::GET,
            "/points-table/s1",
            json!([
                { "team": { "_id": "t2", "name": "Annapurna Strikers" }, "group": "A", "points": 2, "nrr": 0.1 },
                { "team": { "_id": "t1", "name": "Everest XI" }, "group": "A", "points": 4, "nrr": 1.25 },
            ]),
        );
    let (_, body, mock) = get_page(mock, "/points-table").await;

    assert!(mock.last(&Method::GET, "/points-table/s1").is_some());
    assert!(mock.last(&Method::GET, "/points-table/s0").is_none());
    let everest = body.find("Everest XI").expect("leader rendered");
    let annapurna = body.find("Annapurna Strikers").expect("second rendered");
    assert!(everest < annapurna);
    assert!(body.contains("+1.250"));
}

#[tokio::test]
async fn points_table_falls_back_to_flagged_season() {
    let mock = MockBackend::new()
        .on(
            Method::GET,
            "/seasons",
            json!([
                { "_id": "s0", "name": "Season 2025" },
                { "_id": "s1", "name": "Season 2026", "isCurrent": true },
            ]),
        )
        .fail(Method::GET, "/seasons/current", 404, "No current season")
        .on(
            Method::GET,
            "/points-table/s1",
            json!([{ "team": { "_id": "t1", "name": "Everest XI" }, "group": "A", "points": 4 }]),
        );
    let (_, body, mock) = get_page(mock, "/points-table").await;

    assert!(mock.last(&Method::GET, "/points-table/s1").is_some());
    assert!(mock.last(&Method::GET, "/points-table/s0").is_none());
    assert!(body.contains("Everest XI"));
    assert!(!body.contains("toast--error"));
}

#[tokio::test]
async fn points_table_falls_back_to_first_season() {
    let mock = MockBackend::new()
        .on(
            Method::GET,
            "/seasons",
            json!([{ "_id": "s0", "name": "Season 2025" }, { "_id": "s1", "name": "Season 2026" }]),
        )
        .fail(Method::GET, "/seasons/current", 404, "No current season")
        .on(Method::GET, "/points-table/s0", json!([]));
    let (_, _, mock) = get_page(mock, "/points-table").await;

    assert!(mock.last(&Method::GET, "/points-table/s0").is_some());
    assert!(mock.last(&Method::GET, "/points-table/s1").is_none());
}

#[tokio::test]
async fn points_table_honours_season_query() {
    let mock = MockBackend::new()
        .on(Method::GET, "/seasons", json!([{ "_id": "s0", "name": "Season 2025" }]))
        .on(Method::GET, "/seasons/current", json!({ "_id": "s1", "name": "Season 2026" }))
        .on(Method::GET, "/points-table/s0", json!([]));
    let (_, body, mock) = get_page(mock, "/points-table?season=s0").await;
    assert!(mock.last(&Method::GET, "/points-table/s0").is_some());
    assert!(body.contains("Standings will appear once matches are played."));
}

#[tokio::test]
async fn news_list_is_paginated_newest_first() {
    let articles: Vec<serde_json::Value> = (1..=12)
        .map(|day| {
            json!({ "_id": format!("n{day}"), "title": format!("Story {day:02}"), "content": "Body",
                    "createdAt": format!("2026-03-{day:02}T08:00:00Z") })
        })
        .collect();
    let mock = MockBackend::new().on(Method::GET, "/news", json!(articles));
    let (_, body, _) = get_page(mock, "/news").await;
    assert!(body.contains("Story 12"));
    assert!(!body.contains("Story 03"));
    assert!(body.contains("Page 1 of 2"));

    let mock = MockBackend::new().on(Method::GET, "/news", json!(articles));
    let (_, body, _) = get_page(mock, "/news?page=2").await;
    assert!(body.contains("Story 03"));
    assert!(!body.contains("Story 12"));
}

#[tokio::test]
async fn token_is_forwarded_to_backend() {
    let (state, mock) = test_app_state(MockBackend::new().on(Method::GET, "/sponsors", json!([])));
    let base = spawn_portal(state).await;
    let response = portal_client()
        .get(format!("{base}/sponsors"))
        .header(reqwest::header::COOKIE, token_cookie_header("tok-9"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::OK);
    let body = response.text().await.unwrap();
    assert!(body.contains("Log out"));
    assert_eq!(mock.last(&Method::GET, "/sponsors").unwrap().token.as_deref(), Some("tok-9"));
}

#[tokio::test]
async fn pending_flash_is_shown_once() {
    let (state, _) = test_app_state(MockBackend::new().on(Method::GET, "/sponsors", json!([])));
    let base = spawn_portal(state).await;
    let flash = crate::session::Flash { kind: FlashKind::Success, message: "Sponsor added.".into() };
    let response = portal_client()
        .get(format!("{base}/sponsors"))
        .header(reqwest::header::COOKIE, format!("pavilion_flash={}", flash.encode()))
        .send()
        .await
        .unwrap();
    let cleared = response
        .headers()
        .get_all(reqwest::header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .any(|c| c.starts_with("pavilion_flash=;") || c.starts_with("pavilion_flash=\"\""));
    assert!(cleared);
    assert!(response.text().await.unwrap().contains("Sponsor added."));
}
