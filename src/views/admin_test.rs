use std::sync::Arc;

use super::*;
use axum::response::Html;
use serde_json::json;

use crate::state::test_helpers::test_config;
use crate::views::render_page;

fn ctx() -> PageContext {
    PageContext::new("", Arc::new(test_config()))
}

fn render<V, F>(build: F) -> String
where
    F: FnOnce() -> V,
    V: IntoView + 'static,
{
    let Html(html) = render_page(build);
    html
}

#[test]
fn action_button_styles_danger() {
    let html = render(|| view! { <ActionButton action="/admin/teams/t1/delete".to_owned() label="Delete" danger=true/> });
    assert!(html.contains("action=\"/admin/teams/t1/delete\""));
    assert!(html.contains("btn--danger"));

    let html = render(|| view! { <ActionButton action="/admin/teams/t1/verify".to_owned() label="Approve"/> });
    assert!(!html.contains("btn--danger"));
}

#[test]
fn team_table_offers_every_action() {
    let teams = Team::list(&json!([
        { "_id": "t1", "name": "Everest XI", "captain": "Paras", "status": "pending", "paymentStatus": "paid" },
    ]));
    let html = render(move || view! { <TeamTable ctx=ctx() teams=teams/> });

    assert!(html.contains("action=\"/admin/teams/t1/verify\""));
    assert!(html.contains("action=\"/admin/teams/t1/reject\""));
    assert!(html.contains("action=\"/admin/teams/t1/delete\""));
    assert!(html.contains("name=\"reason\""));
    assert!(html.contains("badge--pending"));
    assert!(html.contains("paid"));
}

#[test]
fn seasons_page_marks_current_season() {
    let seasons = Season::list(&json!([
        { "_id": "s1", "name": "Season 2026", "year": 2026, "isCurrent": true },
        { "_id": "s0", "name": "Season 2025", "year": 2025 },
    ]));
    let groups = vec![Group { id: "g1".into(), name: "Group A".into(), teams: vec!["Everest XI".into()] }];
    let html = render(move || view! { <SeasonsPage ctx=ctx() seasons=seasons groups=groups/> });

    assert!(html.contains(">Current<"));
    assert!(html.contains("action=\"/admin/seasons/s0/current\""));
    assert!(!html.contains("action=\"/admin/seasons/s1/current\""));
    assert!(html.contains("Group A"));
    assert!(html.contains("<li>Everest XI</li>"));
}

#[test]
fn match_edit_prefills_local_time_and_scores() {
    let fixture = Match::from_value(&json!({
        "_id": "m1",
        "team1": { "_id": "t1", "name": "Everest XI" },
        "team2": { "_id": "t2", "name": "Annapurna Strikers" },
        "dateTime": "2026-04-01T08:45:00Z",
        "venue": "Kirtipur",
        "team1Score": "156/7",
        "status": "live",
    }))
    .unwrap();
    let html = render(move || view! { <MatchEditPage ctx=ctx() fixture=fixture teams=Vec::new()/> });

    assert!(html.contains("value=\"2026-04-01T14:30\""));
    assert!(html.contains("value=\"Kirtipur\""));
    assert!(html.contains("value=\"156/7\""));
    assert!(html.contains("action=\"/admin/matches/m1/result\""));
    assert!(html.contains("Everest XI score"));
}

#[test]
fn empty_dashboard_says_nothing_pending() {
    let summary = DashboardSummary::from_value(&json!({}));
    let html = render(move || view! { <DashboardPage ctx=ctx() summary=summary user_name="Org Admin".to_owned()/> });
    assert!(html.contains("Welcome, Org Admin"));
    assert!(html.contains("No teams awaiting verification."));
    assert!(html.contains("No players awaiting verification."));
}
