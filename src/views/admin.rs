//! Admin dashboard pages.
//!
//! Every action is a small POST form; the handler forwards it to the
//! backend and redirects back here with a flash.

use leptos::prelude::*;

use super::layout::{EmptyState, Layout, MatchStatusBadge, TeamBadge, VerificationBadge};
use super::{PageContext, value_of};
use crate::api::models::{
    DashboardSummary, GalleryAlbum, Group, Match, MatchStatus, NewsArticle, Player, Season, Sponsor, Team,
};
use crate::services::schedule::to_local_input;

const VERIFICATION_FILTERS: [(&str, &str); 4] =
    [("", "All"), ("pending", "Pending"), ("approved", "Approved"), ("rejected", "Rejected")];
const MATCH_STATUSES: [MatchStatus; 4] =
    [MatchStatus::Upcoming, MatchStatus::Live, MatchStatus::Completed, MatchStatus::Abandoned];

/// One-button POST form.
#[component]
pub fn ActionButton(action: String, label: &'static str, #[prop(optional)] danger: bool) -> impl IntoView {
    let class = if danger { "btn btn--small btn--danger" } else { "btn btn--small" };
    view! {
        <form method="post" action=action class="inline-form">
            <button type="submit" class=class>{label}</button>
        </form>
    }
}

#[component]
fn FilterBar(path: &'static str, status: String, query: String) -> impl IntoView {
    let options = VERIFICATION_FILTERS
        .into_iter()
        .map(|(value, label)| view! { <option value=value selected={status == value}>{label}</option> })
        .collect_view();
    view! {
        <form method="get" action=path class="filters">
            <select name="status">{options}</select>
            <input type="search" name="q" placeholder="Search" value=query/>
            <button type="submit" class="btn">"Filter"</button>
        </form>
    }
}

fn team_options(teams: &[Team], selected: Option<&str>) -> impl IntoView + use<> {
    teams
        .iter()
        .map(|team| {
            let is_selected = selected == Some(team.id.as_str());
            view! { <option value=team.id.clone() selected=is_selected>{team.name.clone()}</option> }
        })
        .collect_view()
}

fn season_options(seasons: &[Season]) -> impl IntoView + use<> {
    seasons
        .iter()
        .map(|season| {
            view! { <option value=season.id.clone() selected=season.is_current>{season.name.clone()}</option> }
        })
        .collect_view()
}

// =============================================================================
// DASHBOARD
// =============================================================================

#[component]
pub fn DashboardPage(ctx: PageContext, summary: DashboardSummary, user_name: String) -> impl IntoView {
    let stats = [
        ("Teams", summary.total_teams, "/admin/teams"),
        ("Pending teams", summary.pending_teams, "/admin/teams?status=pending"),
        ("Players", summary.total_players, "/admin/players"),
        ("Pending players", summary.pending_players, "/admin/players?status=pending"),
        ("Matches", summary.total_matches, "/admin/matches"),
        ("Upcoming matches", summary.upcoming_matches, "/admin/matches"),
    ]
    .into_iter()
    .map(|(label, value, href)| {
        view! {
            <a class="stat" href=href>
                <span class="stat__value">{value}</span>
                <span class="stat__label">{label}</span>
            </a>
        }
    })
    .collect_view();

    let pending_teams = if summary.pending_team_list.is_empty() {
        view! { <EmptyState message="No teams awaiting verification."/> }.into_any()
    } else {
        view! { <TeamTable ctx=ctx.clone() teams=summary.pending_team_list/> }.into_any()
    };
    let pending_players = if summary.pending_player_list.is_empty() {
        view! { <EmptyState message="No players awaiting verification."/> }.into_any()
    } else {
        view! { <PlayerTable ctx=ctx.clone() players=summary.pending_player_list/> }.into_any()
    };

    view! {
        <Layout ctx=ctx.clone()>
            <h1>{format!("Welcome, {user_name}")}</h1>
            <div class="stats">{stats}</div>
            <section class="section">
                <h2>"Teams awaiting verification"</h2>
                {pending_teams}
            </section>
            <section class="section">
                <h2>"Players awaiting verification"</h2>
                {pending_players}
            </section>
        </Layout>
    }
}

// =============================================================================
// VERIFICATION
// =============================================================================

#[component]
fn RejectForm(action: String) -> impl IntoView {
    view! {
        <form method="post" action=action class="inline-form">
            <input type="text" name="reason" placeholder="Reason (optional)"/>
            <button type="submit" class="btn btn--small btn--danger">"Reject"</button>
        </form>
    }
}

#[component]
pub fn TeamTable(ctx: PageContext, teams: Vec<Team>) -> impl IntoView {
    let rows = teams
        .into_iter()
        .map(|team| {
            let logo = ctx.media(team.logo_url.as_deref());
            let base = format!("/admin/teams/{}", team.id);
            let captain = value_of(team.captain.as_deref());
            let contact = value_of(team.contact.as_deref());
            view! {
                <tr>
                    <td class="team-cell">
                        <TeamBadge name=team.name.clone() logo_url=logo/>
                        <a href=format!("/teams/{}", team.id)>{team.name.clone()}</a>
                    </td>
                    <td>{captain.clone()}</td>
                    <td>{contact.clone()}</td>
                    <td>{team.payment_status.unwrap_or_else(|| "Unpaid".to_owned())}</td>
                    <td><VerificationBadge status=team.status/></td>
                    <td class="actions">
                        <ActionButton action=format!("{base}/verify") label="Approve"/>
                        <RejectForm action=format!("{base}/reject")/>
                        <ActionButton action=format!("{base}/delete") label="Delete" danger=true/>
                        <details class="edit">
                            <summary>"Edit"</summary>
                            <form method="post" action=format!("{base}/edit") enctype="multipart/form-data" class="form">
                                <input type="text" name="name" value=team.name.clone() required=true/>
                                <input type="text" name="captain" placeholder="Captain" value=captain.clone()/>
                                <input type="text" name="coach" placeholder="Coach" value=value_of(team.coach.as_deref())/>
                                <input type="tel" name="contactNumber" placeholder="Contact" value=contact.clone()/>
                                <input type="file" name="logo" accept="image/*"/>
                                <button type="submit" class="btn btn--small">"Save"</button>
                            </form>
                        </details>
                    </td>
                </tr>
            }
        })
        .collect_view();
    view! {
        <table class="table">
            <thead>
                <tr>
                    <th>"Team"</th>
                    <th>"Captain"</th>
                    <th>"Contact"</th>
                    <th>"Payment"</th>
                    <th>"Status"</th>
                    <th>"Actions"</th>
                </tr>
            </thead>
            <tbody>{rows}</tbody>
        </table>
    }
}

#[component]
pub fn PlayerTable(ctx: PageContext, players: Vec<Player>) -> impl IntoView {
    let rows = players
        .into_iter()
        .map(|player| {
            let photo = ctx.media(player.photo_url.as_deref());
            let base = format!("/admin/players/{}", player.id);
            view! {
                <tr>
                    <td class="player-cell">
                        <TeamBadge name=player.name.clone() logo_url=photo/>
                        {player.name}
                    </td>
                    <td>{player.team_name.unwrap_or_default()}</td>
                    <td>{player.role.unwrap_or_default()}</td>
                    <td><VerificationBadge status=player.status/></td>
                    <td class="actions">
                        <ActionButton action=format!("{base}/verify") label="Approve"/>
                        <RejectForm action=format!("{base}/reject")/>
                    </td>
                </tr>
            }
        })
        .collect_view();
    view! {
        <table class="table">
            <thead>
                <tr>
                    <th>"Player"</th>
                    <th>"Team"</th>
                    <th>"Role"</th>
                    <th>"Status"</th>
                    <th>"Actions"</th>
                </tr>
            </thead>
            <tbody>{rows}</tbody>
        </table>
    }
}

#[component]
pub fn AdminTeamsPage(ctx: PageContext, teams: Vec<Team>, status: String, query: String) -> impl IntoView {
    let body = if teams.is_empty() {
        view! { <EmptyState message="No teams match."/> }.into_any()
    } else {
        view! { <TeamTable ctx=ctx.clone() teams=teams/> }.into_any()
    };
    view! {
        <Layout ctx=ctx.clone()>
            <h1>"Teams"</h1>
            <FilterBar path="/admin/teams" status=status query=query/>
            {body}
        </Layout>
    }
}

#[component]
pub fn AdminPlayersPage(ctx: PageContext, players: Vec<Player>, status: String, query: String) -> impl IntoView {
    let body = if players.is_empty() {
        view! { <EmptyState message="No players match."/> }.into_any()
    } else {
        view! { <PlayerTable ctx=ctx.clone() players=players/> }.into_any()
    };
    view! {
        <Layout ctx=ctx.clone()>
            <h1>"Players"</h1>
            <FilterBar path="/admin/players" status=status query=query/>
            {body}
        </Layout>
    }
}

// =============================================================================
// MATCHES
// =============================================================================

#[component]
pub fn AdminMatchesPage(ctx: PageContext, matches: Vec<Match>, teams: Vec<Team>, seasons: Vec<Season>) -> impl IntoView {
    let team1_options = team_options(&teams, None);
    let team2_options = team_options(&teams, None);
    let create_seasons = season_options(&seasons);
    let generate_seasons = season_options(&seasons);

    let rows = matches
        .into_iter()
        .map(|fixture| {
            let when = ctx.datetime(fixture.scheduled_at);
            let base = format!("/admin/matches/{}", fixture.id);
            let title = fixture.title();
            view! {
                <tr>
                    <td>{fixture.match_number.map(|n| n.to_string()).unwrap_or_default()}</td>
                    <td><a href=format!("/matches/{}", fixture.id)>{title}</a></td>
                    <td>{when}</td>
                    <td>{fixture.venue.unwrap_or_default()}</td>
                    <td><MatchStatusBadge status=fixture.status/></td>
                    <td class="actions">
                        <a class="btn btn--small" href=format!("{base}/edit")>"Edit / result"</a>
                        <ActionButton action=format!("{base}/delete") label="Delete" danger=true/>
                    </td>
                </tr>
            }
        })
        .collect_view();

    view! {
        <Layout ctx=ctx.clone()>
            <h1>"Matches"</h1>
            <div class="admin-forms">
                <form method="post" action="/admin/matches" class="form form-card">
                    <h2>"Schedule a match"</h2>
                    <label>"Season" <select name="season">{create_seasons}</select></label>
                    <label>"Team 1" <select name="team1" required=true>{team1_options}</select></label>
                    <label>"Team 2" <select name="team2" required=true>{team2_options}</select></label>
                    <label>"Date and time" <input type="datetime-local" name="dateTime" required=true/></label>
                    <label>"Venue" <input type="text" name="venue" required=true/></label>
                    <label>"Stage" <input type="text" name="stage" placeholder="League"/></label>
                    <button type="submit" class="btn btn--primary">"Create match"</button>
                </form>
                <form method="post" action="/admin/matches/generate" class="form form-card">
                    <h2>"Generate league schedule"</h2>
                    <label>"Season" <select name="season_id">{generate_seasons}</select></label>
                    <label>"First match day" <input type="date" name="start_date"/></label>
                    <button type="submit" class="btn">"Generate round robin"</button>
                </form>
            </div>
            <table class="table">
                <thead>
                    <tr>
                        <th>"#"</th>
                        <th>"Fixture"</th>
                        <th>"When"</th>
                        <th>"Venue"</th>
                        <th>"Status"</th>
                        <th>"Actions"</th>
                    </tr>
                </thead>
                <tbody>{rows}</tbody>
            </table>
        </Layout>
    }
}

#[component]
pub fn MatchEditPage(ctx: PageContext, fixture: Match, teams: Vec<Team>) -> impl IntoView {
    let edit_action = format!("/admin/matches/{}/edit", fixture.id);
    let result_action = format!("/admin/matches/{}/result", fixture.id);
    let when = fixture
        .scheduled_at
        .map(|at| to_local_input(at, ctx.offset()))
        .unwrap_or_default();
    let team1_options = team_options(&teams, fixture.team1.id.as_deref());
    let team2_options = team_options(&teams, fixture.team2.id.as_deref());
    let status_options = MATCH_STATUSES
        .into_iter()
        .map(|status| view! { <option value=status.as_str() selected={status == fixture.status}>{status.label()}</option> })
        .collect_view();
    let winner_options = [&fixture.team1, &fixture.team2]
        .into_iter()
        .filter_map(|side| {
            let id = side.id.clone()?;
            let selected = fixture.winner_id.as_deref() == Some(id.as_str());
            Some(view! { <option value=id selected=selected>{side.name.clone()}</option> })
        })
        .collect_view();
    let title = fixture.title();

    view! {
        <Layout ctx=ctx.clone()>
            <h1>{title}</h1>
            <div class="admin-forms">
                <form method="post" action=edit_action class="form form-card">
                    <h2>"Fixture details"</h2>
                    <label>"Team 1" <select name="team1">{team1_options}</select></label>
                    <label>"Team 2" <select name="team2">{team2_options}</select></label>
                    <label>"Date and time" <input type="datetime-local" name="dateTime" value=when/></label>
                    <label>"Venue" <input type="text" name="venue" value=value_of(fixture.venue.as_deref())/></label>
                    <label>"Stage" <input type="text" name="stage" value=value_of(fixture.stage.as_deref())/></label>
                    <button type="submit" class="btn btn--primary">"Save"</button>
                </form>
                <form method="post" action=result_action class="form form-card">
                    <h2>"Score and result"</h2>
                    <label>"Status" <select name="status">{status_options}</select></label>
                    <label>
                        {format!("{} score", fixture.team1.name)}
                        <input type="text" name="team1Score" placeholder="156/7 (20)" value=value_of(fixture.team1.score.as_deref())/>
                    </label>
                    <label>
                        {format!("{} score", fixture.team2.name)}
                        <input type="text" name="team2Score" placeholder="150/9 (20)" value=value_of(fixture.team2.score.as_deref())/>
                    </label>
                    <label>
                        "Winner"
                        <select name="winner">
                            <option value="">"No result yet"</option>
                            {winner_options}
                        </select>
                    </label>
                    <label>
                        "Result summary"
                        <input type="text" name="resultSummary" value=value_of(fixture.result_summary.as_deref())/>
                    </label>
                    <button type="submit" class="btn btn--primary">"Update result"</button>
                </form>
            </div>
            <a href="/admin/matches">"← All matches"</a>
        </Layout>
    }
}

// =============================================================================
// SEASONS + GROUPS
// =============================================================================

#[component]
pub fn SeasonsPage(ctx: PageContext, seasons: Vec<Season>, groups: Vec<Group>) -> impl IntoView {
    let group_seasons = season_options(&seasons);
    let rows = seasons
        .into_iter()
        .map(|season| {
            let dates = format!("{} to {}", ctx.day(season.start_date), ctx.day(season.end_date));
            let current = if season.is_current {
                view! { <span class="badge badge--live">"Current"</span> }.into_any()
            } else {
                view! { <ActionButton action=format!("/admin/seasons/{}/current", season.id) label="Make current"/> }
                    .into_any()
            };
            view! {
                <tr>
                    <td>{season.name}</td>
                    <td>{season.year.map(|y| y.to_string()).unwrap_or_default()}</td>
                    <td>{dates}</td>
                    <td>{current}</td>
                </tr>
            }
        })
        .collect_view();
    let group_cards = groups
        .into_iter()
        .map(|group| {
            let teams = group.teams.into_iter().map(|t| view! { <li>{t}</li> }).collect_view();
            view! {
                <div class="group-card">
                    <h3>{group.name}</h3>
                    <ul>{teams}</ul>
                </div>
            }
        })
        .collect_view();

    view! {
        <Layout ctx=ctx.clone()>
            <h1>"Seasons"</h1>
            <div class="admin-forms">
                <form method="post" action="/admin/seasons" class="form form-card">
                    <h2>"New season"</h2>
                    <label>"Name" <input type="text" name="name" required=true/></label>
                    <label>"Year" <input type="number" name="year" min="2000" max="2100"/></label>
                    <label>"Starts" <input type="date" name="startDate"/></label>
                    <label>"Ends" <input type="date" name="endDate"/></label>
                    <button type="submit" class="btn btn--primary">"Create season"</button>
                </form>
                <form method="post" action="/admin/groups/generate" class="form form-card">
                    <h2>"Draw groups"</h2>
                    <label>"Season" <select name="season_id">{group_seasons}</select></label>
                    <label>"Number of groups" <input type="number" name="group_count" min="1" max="8" value="2"/></label>
                    <button type="submit" class="btn">"Generate groups"</button>
                </form>
            </div>
            <table class="table">
                <thead>
                    <tr>
                        <th>"Season"</th>
                        <th>"Year"</th>
                        <th>"Dates"</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>{rows}</tbody>
            </table>
            <h2>"Current groups"</h2>
            <div class="card-grid">{group_cards}</div>
        </Layout>
    }
}

// =============================================================================
// NEWS
// =============================================================================

#[component]
fn NewsForm(action: String, article: Option<NewsArticle>, submit: &'static str) -> impl IntoView {
    let (title, summary, body) = article
        .map(|a| (a.title, a.summary, a.body))
        .unwrap_or_default();
    view! {
        <form method="post" action=action enctype="multipart/form-data" class="form form-card">
            <label>"Title" <input type="text" name="title" value=title required=true/></label>
            <label>"Summary" <input type="text" name="summary" value=summary/></label>
            <label>"Content" <textarea name="content" rows="10" required=true>{body}</textarea></label>
            <label>"Image" <input type="file" name="image" accept="image/*"/></label>
            <button type="submit" class="btn btn--primary">{submit}</button>
        </form>
    }
}

#[component]
pub fn AdminNewsPage(ctx: PageContext, articles: Vec<NewsArticle>) -> impl IntoView {
    let rows = articles
        .into_iter()
        .map(|article| {
            let base = format!("/admin/news/{}", article.id);
            let date = ctx.day(article.published_at);
            view! {
                <tr>
                    <td><a href=format!("/news/{}", article.id)>{article.title}</a></td>
                    <td>{date}</td>
                    <td class="actions">
                        <a class="btn btn--small" href=format!("{base}/edit")>"Edit"</a>
                        <ActionButton action=format!("{base}/delete") label="Delete" danger=true/>
                    </td>
                </tr>
            }
        })
        .collect_view();
    view! {
        <Layout ctx=ctx.clone()>
            <h1>"News"</h1>
            <h2>"Publish an article"</h2>
            <NewsForm action="/admin/news".to_owned() article=None submit="Publish"/>
            <table class="table">
                <thead>
                    <tr>
                        <th>"Title"</th>
                        <th>"Published"</th>
                        <th>"Actions"</th>
                    </tr>
                </thead>
                <tbody>{rows}</tbody>
            </table>
        </Layout>
    }
}

#[component]
pub fn NewsEditPage(ctx: PageContext, article: NewsArticle) -> impl IntoView {
    let action = format!("/admin/news/{}/edit", article.id);
    view! {
        <Layout ctx=ctx>
            <h1>"Edit article"</h1>
            <NewsForm action=action article=Some(article) submit="Save changes"/>
            <a href="/admin/news">"← All articles"</a>
        </Layout>
    }
}

// =============================================================================
// GALLERY
// =============================================================================

#[component]
pub fn AdminGalleryPage(ctx: PageContext, albums: Vec<GalleryAlbum>) -> impl IntoView {
    let rows = albums
        .into_iter()
        .map(|album| {
            let base = format!("/admin/gallery/{}", album.id);
            let count = album.images.len();
            view! {
                <tr>
                    <td><a href=base.clone()>{album.title}</a></td>
                    <td>{count}</td>
                    <td class="actions">
                        <ActionButton action=format!("{base}/delete") label="Delete album" danger=true/>
                    </td>
                </tr>
            }
        })
        .collect_view();
    view! {
        <Layout ctx=ctx.clone()>
            <h1>"Gallery"</h1>
            <form method="post" action="/admin/gallery" enctype="multipart/form-data" class="form form-card">
                <h2>"New album"</h2>
                <label>"Title" <input type="text" name="title" required=true/></label>
                <label>"Description" <textarea name="description" rows="3"></textarea></label>
                <label>"Photos" <input type="file" name="images" accept="image/*" multiple=true/></label>
                <button type="submit" class="btn btn--primary">"Create album"</button>
            </form>
            <table class="table">
                <thead>
                    <tr>
                        <th>"Album"</th>
                        <th>"Photos"</th>
                        <th>"Actions"</th>
                    </tr>
                </thead>
                <tbody>{rows}</tbody>
            </table>
        </Layout>
    }
}

#[component]
pub fn AdminAlbumPage(ctx: PageContext, album: GalleryAlbum) -> impl IntoView {
    let upload_action = format!("/admin/gallery/{}/images", album.id);
    let photos = album
        .images
        .into_iter()
        .map(|image| {
            let src = ctx.config.media_url(&image.url);
            let delete = format!("/admin/gallery/{}/images/{}/delete", album.id, image.id);
            view! {
                <figure class="photo">
                    <img src=src alt=image.caption.unwrap_or_default() loading="lazy"/>
                    <ActionButton action=delete label="Remove" danger=true/>
                </figure>
            }
        })
        .collect_view();
    view! {
        <Layout ctx=ctx.clone()>
            <h1>{album.title}</h1>
            <form method="post" action=upload_action enctype="multipart/form-data" class="form form-card">
                <label>"Add photos" <input type="file" name="images" accept="image/*" multiple=true required=true/></label>
                <button type="submit" class="btn btn--primary">"Upload"</button>
            </form>
            <div class="photo-grid">{photos}</div>
            <a href="/admin/gallery">"← All albums"</a>
        </Layout>
    }
}

// =============================================================================
// SPONSORS
// =============================================================================

#[component]
pub fn AdminSponsorsPage(ctx: PageContext, sponsors: Vec<Sponsor>) -> impl IntoView {
    let rows = sponsors
        .into_iter()
        .map(|sponsor| {
            let logo = ctx.media(sponsor.logo_url.as_deref());
            let delete = format!("/admin/sponsors/{}/delete", sponsor.id);
            let edit = format!("/admin/sponsors/{}/edit", sponsor.id);
            let tier = value_of(sponsor.tier.as_deref());
            let website = value_of(sponsor.website.as_deref());
            view! {
                <tr>
                    <td class="team-cell">
                        <TeamBadge name=sponsor.name.clone() logo_url=logo/>
                        {sponsor.name.clone()}
                    </td>
                    <td>{tier.clone()}</td>
                    <td>{website.clone()}</td>
                    <td class="actions">
                        <ActionButton action=delete label="Delete" danger=true/>
                        <details class="edit">
                            <summary>"Edit"</summary>
                            <form method="post" action=edit enctype="multipart/form-data" class="form">
                                <input type="text" name="name" value=sponsor.name.clone() required=true/>
                                <input type="url" name="website" placeholder="Website" value=website.clone()/>
                                <input type="text" name="tier" placeholder="Tier" value=tier.clone()/>
                                <input type="file" name="logo" accept="image/*"/>
                                <button type="submit" class="btn btn--small">"Save"</button>
                            </form>
                        </details>
                    </td>
                </tr>
            }
        })
        .collect_view();
    view! {
        <Layout ctx=ctx.clone()>
            <h1>"Sponsors"</h1>
            <form method="post" action="/admin/sponsors" enctype="multipart/form-data" class="form form-card">
                <h2>"Add sponsor"</h2>
                <label>"Name" <input type="text" name="name" required=true/></label>
                <label>"Website" <input type="url" name="website"/></label>
                <label>"Tier" <input type="text" name="tier" placeholder="Title, Gold, Silver"/></label>
                <label>"Logo" <input type="file" name="logo" accept="image/*"/></label>
                <button type="submit" class="btn btn--primary">"Add sponsor"</button>
            </form>
            <table class="table">
                <thead>
                    <tr>
                        <th>"Sponsor"</th>
                        <th>"Tier"</th>
                        <th>"Website"</th>
                        <th>"Actions"</th>
                    </tr>
                </thead>
                <tbody>{rows}</tbody>
            </table>
        </Layout>
    }
}

#[cfg(test)]
#[path = "admin_test.rs"]
mod tests;
