use std::sync::Arc;

use super::*;
use axum::response::Html;
use serde_json::json;

use crate::api::models::PointsRow;
use crate::services::standings::group_rows;
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

fn fixture(value: serde_json::Value) -> Match {
    Match::from_value(&value).unwrap()
}

#[test]
fn match_card_marks_winner() {
    let fixture = fixture(json!({
        "_id": "m1",
        "team1": { "_id": "t1", "name": "Everest XI" },
        "team2": { "_id": "t2", "name": "Annapurna Strikers" },
        "status": "completed",
        "winner": "t2",
        "stage": "Final",
        "venue": "Kirtipur",
    }));
    let html = render(move || view! { <MatchCard ctx=ctx() fixture=fixture/> });

    assert!(html.contains("href=\"/matches/m1\""));
    assert!(html.contains("Final · Kirtipur"));
    let winner = html.find("match-card__side--winner").expect("winner marked");
    let annapurna = html.find("Annapurna Strikers").unwrap();
    assert!(winner > html.find("Everest XI").unwrap());
    assert!(winner < annapurna);
    assert!(html.contains("TBA"));
}

#[test]
fn team_badge_falls_back_to_initials() {
    let html = render(|| view! { <TeamBadge name="Everest XI".to_owned() logo_url=None/> });
    assert!(html.contains("team-badge--initials"));
    assert!(html.contains(">EX<"));

    let html = render(|| {
        view! { <TeamBadge name="Everest XI".to_owned() logo_url=Some("http://backend.test/logo.png".to_owned())/> }
    });
    assert!(html.contains("src=\"http://backend.test/logo.png\""));
}

#[test]
fn pager_hidden_for_single_page() {
    let html = render(|| view! { <Pager path="/news".to_owned() query=Vec::new() page=1 total_pages=1/> });
    assert!(!html.contains("pager"));

    let html = render(|| view! { <Pager path="/news".to_owned() query=Vec::new() page=2 total_pages=3/> });
    assert!(html.contains("href=\"/news\""));
    assert!(html.contains("href=\"/news?page=3\""));
    assert!(html.contains("Page 2 of 3"));
}

#[test]
fn standings_table_renders_ranked_rows() {
    let rows = PointsRow::list(&json!([
        { "team": { "_id": "t2", "name": "Annapurna Strikers" }, "group": "A", "points": 2, "nrr": -0.5 },
        { "team": { "_id": "t1", "name": "Everest XI" }, "group": "A", "points": 4, "nrr": 1.25 },
    ]));
    let table = group_rows(rows).remove(0);
    let html = render(move || view! { <StandingsTable ctx=ctx() table=table/> });

    assert!(html.contains("Group A"));
    assert!(html.contains("href=\"/teams/t1\""));
    assert!(html.contains("+1.250"));
    assert!(html.contains("-0.500"));
    assert!(html.find("Everest XI").unwrap() < html.find("Annapurna Strikers").unwrap());
}

#[test]
fn home_hides_elapsed_countdown() {
    let next = fixture(json!({
        "_id": "m1",
        "team1": { "name": "Everest XI" },
        "team2": { "name": "Annapurna Strikers" },
        "dateTime": "2026-03-14T09:30:00Z",
    }));
    let data = HomeData {
        next_match: Some(next),
        countdown: Some(Countdown { days: 0, hours: 0, minutes: 0, seconds: 0 }),
        ..HomeData::default()
    };
    let html = render(move || view! { <HomePage ctx=ctx() data=data/> });

    assert!(html.contains("Season to be announced"));
    assert!(html.contains("Everest XI vs Annapurna Strikers"));
    assert!(html.contains("14 Mar 2026, 15:15"));
    assert!(!html.contains("class=\"countdown\""));
    assert!(!html.contains("Live now"));
}

#[test]
fn sponsor_tile_links_only_with_website() {
    let linked = Sponsor::from_value(&json!({ "_id": "sp1", "name": "Himalayan Bank", "website": "https://bank.test", "tier": "Title" }))
        .unwrap();
    let html = render(move || view! { <SponsorTile ctx=ctx() sponsor=linked/> });
    assert!(html.contains("href=\"https://bank.test\""));
    assert!(html.contains("Title"));

    let plain = Sponsor::from_value(&json!({ "_id": "sp2", "name": "Gorkha Brewery" })).unwrap();
    let html = render(move || view! { <SponsorTile ctx=ctx() sponsor=plain/> });
    assert!(html.contains("<div class=\"sponsor\""));
    assert!(!html.contains("href="));
}

#[test]
fn empty_lists_show_placeholders() {
    let html = render(|| view! { <SponsorsPage ctx=ctx() sponsors=Vec::new()/> });
    assert!(html.contains("Sponsors will be announced soon."));

    let html = render(|| view! { <TeamsPage ctx=ctx() teams=Vec::new() query="zzz".to_owned()/> });
    assert!(html.contains("No teams found."));
    assert!(html.contains("value=\"zzz\""));
}

#[test]
fn album_photos_link_to_full_image() {
    let album = GalleryAlbum::from_value(&json!({
        "_id": "g1",
        "title": "Final day",
        "images": [{ "_id": "i1", "url": "/uploads/final.jpg", "caption": "Trophy lift" }, "/uploads/crowd.jpg"],
    }))
    .unwrap();
    let html = render(move || view! { <AlbumPage ctx=ctx() album=album/> });

    assert!(html.contains("<a href=\"http://backend.test/uploads/final.jpg\">"));
    assert!(html.contains("src=\"http://backend.test/uploads/final.jpg\""));
    assert!(html.contains("alt=\"Trophy lift\""));
    assert!(html.contains("<figcaption>Trophy lift</figcaption>"));
    assert!(html.contains("src=\"http://backend.test/uploads/crowd.jpg\""));
}
