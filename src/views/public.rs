//! Public pages: home, fixtures, teams, news, standings, gallery, sponsors.

use leptos::prelude::*;

use super::PageContext;
use super::layout::{EmptyState, Layout, MatchCard, MatchStatusBadge, Pager, TeamBadge};
use crate::api::models::{GalleryAlbum, Match, MatchStatus, NewsArticle, Player, Season, Sponsor, Team};
use crate::services::listing::Page;
use crate::services::schedule::{Countdown, MatchFilter};
use crate::services::standings::{GroupTable, format_nrr};

const STATUS_FILTERS: [(&str, &str); 4] =
    [("", "All"), ("upcoming", "Upcoming"), ("live", "Live"), ("completed", "Completed")];

// =============================================================================
// HOME
// =============================================================================

/// Everything the home page shows, fetched concurrently by the handler.
#[derive(Debug, Clone, Default)]
pub struct HomeData {
    pub season: Option<Season>,
    pub next_match: Option<Match>,
    pub countdown: Option<Countdown>,
    pub live: Vec<Match>,
    pub upcoming: Vec<Match>,
    pub recent: Vec<Match>,
    pub news: Vec<NewsArticle>,
    pub sponsors: Vec<Sponsor>,
}

#[component]
pub fn HomePage(ctx: PageContext, data: HomeData) -> impl IntoView {
    let HomeData { season, next_match, countdown, live, upcoming, recent, news, sponsors } = data;
    let season_name = season.map_or_else(|| "Season to be announced".to_owned(), |s| s.name);

    let hero_next = next_match.map(|fixture| {
        let when = ctx.datetime(fixture.scheduled_at);
        let href = format!("/matches/{}", fixture.id);
        let countdown_label = countdown.filter(|c| !c.is_zero()).map(|c| c.label());
        view! {
            <div class="hero__next">
                <p class="hero__eyebrow">"Next match"</p>
                <a class="hero__fixture" href=href>{fixture.title()}</a>
                <p class="hero__when">{when}</p>
                {countdown_label.map(|label| view! { <p class="countdown">{label}</p> })}
            </div>
        }
    });

    let live_section = (!live.is_empty()).then(|| {
        let cards = live
            .into_iter()
            .map(|fixture| view! { <MatchCard ctx=ctx.clone() fixture=fixture/> })
            .collect_view();
        view! {
            <section class="section section--live">
                <h2>"Live now"</h2>
                <div class="card-grid">{cards}</div>
            </section>
        }
    });

    let upcoming_cards = upcoming
        .into_iter()
        .map(|fixture| view! { <MatchCard ctx=ctx.clone() fixture=fixture/> })
        .collect_view();
    let recent_cards = recent
        .into_iter()
        .map(|fixture| view! { <MatchCard ctx=ctx.clone() fixture=fixture/> })
        .collect_view();
    let news_cards = news
        .into_iter()
        .map(|article| view! { <NewsCard ctx=ctx.clone() article=article/> })
        .collect_view();
    let sponsor_strip = sponsors
        .into_iter()
        .map(|sponsor| view! { <SponsorTile ctx=ctx.clone() sponsor=sponsor/> })
        .collect_view();

    view! {
        <Layout ctx=ctx.clone()>
            <section class="hero">
                <h1>{season_name}</h1>
                {hero_next}
            </section>
            {live_section}
            <section class="section">
                <h2>"Upcoming fixtures"</h2>
                <div class="card-grid">{upcoming_cards}</div>
                <a class="section__more" href="/schedules">"Full schedule →"</a>
            </section>
            <section class="section">
                <h2>"Recent results"</h2>
                <div class="card-grid">{recent_cards}</div>
            </section>
            <section class="section">
                <h2>"Latest news"</h2>
                <div class="card-grid">{news_cards}</div>
            </section>
            <section class="section section--sponsors">
                <h2>"Our sponsors"</h2>
                <div class="sponsor-strip">{sponsor_strip}</div>
            </section>
        </Layout>
    }
}

// =============================================================================
// SCHEDULES + MATCH
// =============================================================================

#[component]
pub fn SchedulesPage(
    ctx: PageContext,
    filter: MatchFilter,
    teams: Vec<Team>,
    days: Vec<(String, Vec<Match>)>,
    page: usize,
    total_pages: usize,
) -> impl IntoView {
    let current_status = filter.status.clone().unwrap_or_default().to_ascii_lowercase();
    let current_team = filter.team.clone().unwrap_or_default();
    let query_text = filter.query.clone().unwrap_or_default();
    let query = vec![
        ("status".to_owned(), current_status.clone()),
        ("team".to_owned(), current_team.clone()),
        ("q".to_owned(), query_text.clone()),
    ];

    let status_options = STATUS_FILTERS
        .into_iter()
        .map(|(value, label)| {
            let selected = current_status == value;
            view! { <option value=value selected=selected>{label}</option> }
        })
        .collect_view();
    let team_options = teams
        .into_iter()
        .map(|team| {
            let selected = current_team == team.id;
            view! { <option value=team.id selected=selected>{team.name}</option> }
        })
        .collect_view();

    let body = if days.is_empty() {
        view! { <EmptyState message="No matches found."/> }.into_any()
    } else {
        days.into_iter()
            .map(|(label, fixtures)| {
                let cards = fixtures
                    .into_iter()
                    .map(|fixture| view! { <MatchCard ctx=ctx.clone() fixture=fixture/> })
                    .collect_view();
                view! {
                    <section class="day">
                        <h2 class="day__label">{label}</h2>
                        <div class="card-grid">{cards}</div>
                    </section>
                }
            })
            .collect_view()
            .into_any()
    };

    view! {
        <Layout ctx=ctx.clone()>
            <h1>"Schedules"</h1>
            <form method="get" action="/schedules" class="filters">
                <select name="status">{status_options}</select>
                <select name="team">
                    <option value="">"All teams"</option>
                    {team_options}
                </select>
                <input type="search" name="q" placeholder="Search team or venue" value=query_text/>
                <button type="submit" class="btn">"Filter"</button>
            </form>
            {body}
            <Pager path="/schedules".to_owned() query=query page=page total_pages=total_pages/>
        </Layout>
    }
}

#[component]
pub fn MatchPage(ctx: PageContext, fixture: Match) -> impl IntoView {
    let when = ctx.datetime(fixture.scheduled_at);
    let winner = fixture.winner_name().map(str::to_owned);
    let is_live = fixture.status == MatchStatus::Live;
    let team1_logo = ctx.media(fixture.team1.logo_url.as_deref());
    let team2_logo = ctx.media(fixture.team2.logo_url.as_deref());
    let title = fixture.title();

    view! {
        <Layout ctx=ctx.clone()>
            <article class="match-detail">
                <header class="match-detail__header">
                    <MatchStatusBadge status=fixture.status/>
                    <h1>{title}</h1>
                    <p class="match-detail__when">{when}</p>
                    {fixture.venue.map(|venue| view! { <p class="match-detail__venue">{venue}</p> })}
                    {fixture.stage.map(|stage| view! { <p class="match-detail__stage">{stage}</p> })}
                </header>
                <div class="scoreboard">
                    <div class="scoreboard__side">
                        <TeamBadge name=fixture.team1.name.clone() logo_url=team1_logo/>
                        <h2>{fixture.team1.name}</h2>
                        <p class="scoreboard__score">{fixture.team1.score.unwrap_or_else(|| "-".to_owned())}</p>
                    </div>
                    <span class="scoreboard__vs">"vs"</span>
                    <div class="scoreboard__side">
                        <TeamBadge name=fixture.team2.name.clone() logo_url=team2_logo/>
                        <h2>{fixture.team2.name}</h2>
                        <p class="scoreboard__score">{fixture.team2.score.unwrap_or_else(|| "-".to_owned())}</p>
                    </div>
                </div>
                {is_live.then(|| view! { <p class="live-note">"Live: this page refreshes automatically."</p> })}
                {fixture.result_summary.map(|summary| view! { <p class="match-detail__result">{summary}</p> })}
                {winner.map(|name| view! { <p class="match-detail__winner">{format!("Winner: {name}")}</p> })}
            </article>
        </Layout>
    }
}

// =============================================================================
// TEAMS
// =============================================================================

#[component]
pub fn TeamsPage(ctx: PageContext, teams: Vec<Team>, query: String) -> impl IntoView {
    let body = if teams.is_empty() {
        view! { <EmptyState message="No teams found."/> }.into_any()
    } else {
        teams
            .into_iter()
            .map(|team| {
                let href = format!("/teams/{}", team.id);
                let logo = ctx.media(team.logo_url.as_deref());
                let players = format!("{} players", team.player_count);
                view! {
                    <a class="team-card" href=href>
                        <TeamBadge name=team.name.clone() logo_url=logo/>
                        <h2>{team.name}</h2>
                        {team.captain.map(|c| view! { <p class="team-card__captain">{format!("Captain: {c}")}</p> })}
                        <p class="team-card__players">{players}</p>
                    </a>
                }
            })
            .collect_view()
            .into_any()
    };

    view! {
        <Layout ctx=ctx.clone()>
            <h1>"Teams"</h1>
            <form method="get" action="/teams" class="filters">
                <input type="search" name="q" placeholder="Search teams" value=query/>
                <button type="submit" class="btn">"Search"</button>
            </form>
            <div class="card-grid">{body}</div>
        </Layout>
    }
}

#[component]
pub fn TeamPage(ctx: PageContext, team: Team, players: Vec<Player>) -> impl IntoView {
    let logo = ctx.media(team.logo_url.as_deref());
    let add_player_href = format!("/teams/{}/players/new", team.id);
    let squad = if players.is_empty() {
        view! { <EmptyState message="No players registered yet."/> }.into_any()
    } else {
        let rows = players
            .into_iter()
            .map(|player| {
                let photo = ctx.media(player.photo_url.as_deref());
                let jersey = player.jersey_number.map(|n| n.to_string()).unwrap_or_default();
                view! {
                    <tr>
                        <td>{jersey}</td>
                        <td class="player-cell">
                            <TeamBadge name=player.name.clone() logo_url=photo/>
                            {player.name}
                        </td>
                        <td>{player.role.unwrap_or_default()}</td>
                        <td>{player.batting_style.unwrap_or_default()}</td>
                        <td>{player.bowling_style.unwrap_or_default()}</td>
                    </tr>
                }
            })
            .collect_view();
        view! {
            <table class="table">
                <thead>
                    <tr>
                        <th>"#"</th>
                        <th>"Player"</th>
                        <th>"Role"</th>
                        <th>"Batting"</th>
                        <th>"Bowling"</th>
                    </tr>
                </thead>
                <tbody>{rows}</tbody>
            </table>
        }
        .into_any()
    };

    view! {
        <Layout ctx=ctx.clone()>
            <header class="team-header">
                <TeamBadge name=team.name.clone() logo_url=logo/>
                <div>
                    <h1>{team.name}</h1>
                    {team.group.map(|g| view! { <p class="team-header__group">{g}</p> })}
                    {team.captain.map(|c| view! { <p>{format!("Captain: {c}")}</p> })}
                    {team.coach.map(|c| view! { <p>{format!("Coach: {c}")}</p> })}
                </div>
                <a class="btn" href=add_player_href>"Add player"</a>
            </header>
            <h2>"Squad"</h2>
            {squad}
        </Layout>
    }
}

// =============================================================================
// NEWS
// =============================================================================

#[component]
pub fn NewsCard(ctx: PageContext, article: NewsArticle) -> impl IntoView {
    let href = format!("/news/{}", article.id);
    let image = ctx.media(article.image_url.as_deref());
    let date = article.published_at.map(|at| ctx.day(Some(at)));
    view! {
        <a class="news-card" href=href>
            {image.map(|src| view! { <img class="news-card__image" src=src alt="" loading="lazy"/> })}
            <h3>{article.title}</h3>
            {date.map(|d| view! { <p class="news-card__date">{d}</p> })}
            <p class="news-card__summary">{article.summary}</p>
        </a>
    }
}

#[component]
pub fn NewsListPage(ctx: PageContext, articles: Page<NewsArticle>) -> impl IntoView {
    let Page { items, page, total_pages, .. } = articles;
    let body = if items.is_empty() {
        view! { <EmptyState message="No news yet."/> }.into_any()
    } else {
        items
            .into_iter()
            .map(|article| view! { <NewsCard ctx=ctx.clone() article=article/> })
            .collect_view()
            .into_any()
    };
    view! {
        <Layout ctx=ctx.clone()>
            <h1>"News"</h1>
            <div class="card-grid">{body}</div>
            <Pager path="/news".to_owned() query=Vec::new() page=page total_pages=total_pages/>
        </Layout>
    }
}

#[component]
pub fn NewsPage(ctx: PageContext, article: NewsArticle) -> impl IntoView {
    let image = ctx.media(article.image_url.as_deref());
    let date = article.published_at.map(|at| ctx.day(Some(at)));
    let byline = match (article.author.clone(), date) {
        (Some(author), Some(date)) => Some(format!("{author} · {date}")),
        (Some(author), None) => Some(author),
        (None, date) => date,
    };
    let paragraphs = article
        .paragraphs()
        .into_iter()
        .map(|p| view! { <p>{p}</p> })
        .collect_view();
    view! {
        <Layout ctx=ctx.clone()>
            <article class="article">
                <h1>{article.title}</h1>
                {byline.map(|b| view! { <p class="article__byline">{b}</p> })}
                {image.map(|src| view! { <img class="article__image" src=src alt=""/> })}
                <div class="article__body">{paragraphs}</div>
                <a href="/news">"← All news"</a>
            </article>
        </Layout>
    }
}

// =============================================================================
// POINTS TABLE
// =============================================================================

#[component]
pub fn PointsTablePage(
    ctx: PageContext,
    seasons: Vec<Season>,
    selected: Option<String>,
    tables: Vec<GroupTable>,
) -> impl IntoView {
    let season_options = seasons
        .into_iter()
        .map(|season| {
            let is_selected = selected.as_deref() == Some(season.id.as_str());
            view! { <option value=season.id selected=is_selected>{season.name}</option> }
        })
        .collect_view();

    let body = if tables.is_empty() {
        view! { <EmptyState message="Standings will appear once matches are played."/> }.into_any()
    } else {
        tables
            .into_iter()
            .map(|table| view! { <StandingsTable ctx=ctx.clone() table=table/> })
            .collect_view()
            .into_any()
    };

    view! {
        <Layout ctx=ctx.clone()>
            <h1>"Points Table"</h1>
            <form method="get" action="/points-table" class="filters">
                <select name="season">{season_options}</select>
                <button type="submit" class="btn">"Show"</button>
            </form>
            {body}
        </Layout>
    }
}

#[component]
pub fn StandingsTable(ctx: PageContext, table: GroupTable) -> impl IntoView {
    let rows = table
        .rows
        .into_iter()
        .map(|row| {
            let logo = ctx.media(row.logo_url.as_deref());
            let team = match row.team_id {
                Some(id) => view! { <a href=format!("/teams/{id}")>{row.team_name.clone()}</a> }.into_any(),
                None => view! { <span>{row.team_name.clone()}</span> }.into_any(),
            };
            view! {
                <tr>
                    <td>{row.position}</td>
                    <td class="team-cell">
                        <TeamBadge name=row.team_name logo_url=logo/>
                        {team}
                    </td>
                    <td>{row.played}</td>
                    <td>{row.won}</td>
                    <td>{row.lost}</td>
                    <td>{row.tied}</td>
                    <td>{row.no_result}</td>
                    <td class="points">{row.points}</td>
                    <td>{format_nrr(row.net_run_rate)}</td>
                </tr>
            }
        })
        .collect_view();

    view! {
        <section class="standings">
            <h2>{table.name}</h2>
            <table class="table">
                <thead>
                    <tr>
                        <th>"Pos"</th>
                        <th>"Team"</th>
                        <th>"P"</th>
                        <th>"W"</th>
                        <th>"L"</th>
                        <th>"T"</th>
                        <th>"NR"</th>
                        <th>"Pts"</th>
                        <th>"NRR"</th>
                    </tr>
                </thead>
                <tbody>{rows}</tbody>
            </table>
        </section>
    }
}

// =============================================================================
// GALLERY + SPONSORS
// =============================================================================

#[component]
pub fn GalleryPage(ctx: PageContext, albums: Vec<GalleryAlbum>) -> impl IntoView {
    let body = if albums.is_empty() {
        view! { <EmptyState message="No albums yet."/> }.into_any()
    } else {
        albums
            .into_iter()
            .map(|album| {
                let href = format!("/gallery/{}", album.id);
                let cover = ctx.media(album.cover_url.as_deref());
                let count = format!("{} photos", album.images.len());
                view! {
                    <a class="album-card" href=href>
                        {cover.map(|src| view! { <img class="album-card__cover" src=src alt="" loading="lazy"/> })}
                        <h2>{album.title}</h2>
                        <p>{count}</p>
                    </a>
                }
            })
            .collect_view()
            .into_any()
    };
    view! {
        <Layout ctx=ctx.clone()>
            <h1>"Gallery"</h1>
            <div class="card-grid">{body}</div>
        </Layout>
    }
}

#[component]
pub fn AlbumPage(ctx: PageContext, album: GalleryAlbum) -> impl IntoView {
    let images = album
        .images
        .into_iter()
        .map(|image| {
            let src = ctx.config.media_url(&image.url);
            let link = src.clone();
            let caption = image.caption.unwrap_or_default();
            let alt = caption.clone();
            view! {
                <figure class="photo">
                    <a href=link>
                        <img src=src alt=alt loading="lazy"/>
                    </a>
                    {(!caption.is_empty()).then(|| view! { <figcaption>{caption}</figcaption> })}
                </figure>
            }
        })
        .collect_view();
    view! {
        <Layout ctx=ctx.clone()>
            <h1>{album.title}</h1>
            {album.description.map(|d| view! { <p class="album__description">{d}</p> })}
            <div class="photo-grid">{images}</div>
            <a href="/gallery">"← All albums"</a>
        </Layout>
    }
}

#[component]
pub fn SponsorTile(ctx: PageContext, sponsor: Sponsor) -> impl IntoView {
    let logo = ctx.media(sponsor.logo_url.as_deref());
    let inner = view! {
        <TeamBadge name=sponsor.name.clone() logo_url=logo/>
        <span class="sponsor__name">{sponsor.name}</span>
        {sponsor.tier.map(|tier| view! { <span class="sponsor__tier">{tier}</span> })}
    };
    match sponsor.website {
        Some(href) => view! { <a class="sponsor" href=href rel="noopener" target="_blank">{inner}</a> }.into_any(),
        None => view! { <div class="sponsor">{inner}</div> }.into_any(),
    }
}

#[component]
pub fn SponsorsPage(ctx: PageContext, sponsors: Vec<Sponsor>) -> impl IntoView {
    let body = if sponsors.is_empty() {
        view! { <EmptyState message="Sponsors will be announced soon."/> }.into_any()
    } else {
        sponsors
            .into_iter()
            .map(|sponsor| view! { <SponsorTile ctx=ctx.clone() sponsor=sponsor/> })
            .collect_view()
            .into_any()
    };
    view! {
        <Layout ctx=ctx.clone()>
            <h1>"Sponsors"</h1>
            <div class="sponsor-grid">{body}</div>
        </Layout>
    }
}

#[component]
pub fn NotFoundPage(ctx: PageContext, message: String) -> impl IntoView {
    view! {
        <Layout ctx=ctx>
            <section class="not-found">
                <h1>"Not found"</h1>
                <p>{message}</p>
                <a href="/">"Back to home"</a>
            </section>
        </Layout>
    }
}

#[cfg(test)]
#[path = "public_test.rs"]
mod tests;
