//! View records decoded from backend payloads.
//!
//! DESIGN
//! ======
//! The backend owns every schema; these types are only what the pages need
//! to render. Each `from_value` tries the field names the backend is known
//! to use and returns `None` when a record lacks its identity (id or name),
//! so one malformed row never hides the rest of a list.

use serde_json::Value;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime, PrimitiveDateTime};

use super::normalize::{
    pick, pick_bool, pick_f64, pick_i64, pick_nested_str, pick_str, record_id, reference_id, unwrap_list,
    unwrap_object,
};

// =============================================================================
// DATES
// =============================================================================

/// Parse the date shapes the backend emits: RFC 3339, naive ISO date-times
/// (taken as UTC), bare dates and epoch milliseconds.
pub fn parse_datetime(value: &Value) -> Option<OffsetDateTime> {
    match value {
        Value::String(raw) => parse_datetime_str(raw.trim()),
        Value::Number(n) => {
            let millis = n.as_i64()?;
            OffsetDateTime::from_unix_timestamp_nanos(i128::from(millis) * 1_000_000).ok()
        }
        _ => None,
    }
}

fn parse_datetime_str(raw: &str) -> Option<OffsetDateTime> {
    if raw.is_empty() {
        return None;
    }
    if let Ok(parsed) = OffsetDateTime::parse(raw, &Rfc3339) {
        return Some(parsed);
    }
    let naive = raw.split('.').next().unwrap_or(raw);
    if let Ok(parsed) = PrimitiveDateTime::parse(naive, format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]")) {
        return Some(parsed.assume_utc());
    }
    if let Ok(parsed) = PrimitiveDateTime::parse(naive, format_description!("[year]-[month]-[day]T[hour]:[minute]")) {
        return Some(parsed.assume_utc());
    }
    Date::parse(raw.get(..10)?, format_description!("[year]-[month]-[day]"))
        .ok()
        .map(|date| date.midnight().assume_utc())
}

pub fn pick_datetime(value: &Value, keys: &[&str]) -> Option<OffsetDateTime> {
    let map = value.as_object()?;
    keys.iter()
        .filter_map(|key| map.get(*key))
        .find_map(parse_datetime)
}

fn decode_list<T>(value: &Value, keys: &[&str], decode: impl Fn(&Value) -> Option<T>) -> Vec<T> {
    unwrap_list(value, keys).iter().filter_map(decode).collect()
}

// =============================================================================
// VERIFICATION STATUS
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VerificationStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl VerificationStatus {
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "approved" | "verified" | "accepted" | "active" | "true" => Self::Approved,
            "rejected" | "declined" | "false" => Self::Rejected,
            _ => Self::Pending,
        }
    }

    /// Status of a team or player row: `status ?? verificationStatus ?? isVerified`.
    #[must_use]
    pub fn from_record(value: &Value) -> Self {
        if let Some(raw) = pick_str(value, &["status", "verificationStatus", "approvalStatus"]) {
            return Self::parse(&raw);
        }
        match pick_bool(value, &["isVerified", "verified", "isApproved"]) {
            Some(true) => Self::Approved,
            _ => Self::Pending,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
        }
    }
}

// =============================================================================
// TEAM + PLAYER
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub id: String,
    pub name: String,
    pub role: Option<String>,
    pub team_id: Option<String>,
    pub team_name: Option<String>,
    pub photo_url: Option<String>,
    pub status: VerificationStatus,
    pub jersey_number: Option<i64>,
    pub batting_style: Option<String>,
    pub bowling_style: Option<String>,
}

impl Player {
    pub fn from_value(value: &Value) -> Option<Self> {
        Some(Self {
            id: record_id(value)?,
            name: pick_str(value, &["name", "fullName", "playerName"])?,
            role: pick_str(value, &["role", "playingRole", "position"]),
            team_id: reference_id(value, &["team", "teamId"]),
            team_name: pick_nested_str(value, &["team"], &["name", "teamName"])
                .or_else(|| pick_str(value, &["teamName"])),
            photo_url: pick_str(value, &["photo", "profilePhoto", "profileImage", "image", "photoUrl"]),
            status: VerificationStatus::from_record(value),
            jersey_number: pick_i64(value, &["jerseyNumber", "jersey", "shirtNumber"]),
            batting_style: pick_str(value, &["battingStyle"]),
            bowling_style: pick_str(value, &["bowlingStyle"]),
        })
    }

    pub fn list(value: &Value) -> Vec<Self> {
        decode_list(value, &["players"], Self::from_value)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Team {
    pub id: String,
    pub name: String,
    pub short_name: Option<String>,
    pub logo_url: Option<String>,
    pub captain: Option<String>,
    pub coach: Option<String>,
    pub contact: Option<String>,
    pub group: Option<String>,
    pub status: VerificationStatus,
    pub payment_status: Option<String>,
    pub players: Vec<Player>,
    pub player_count: usize,
}

impl Team {
    pub fn from_value(value: &Value) -> Option<Self> {
        let players: Vec<Player> = value
            .get("players")
            .and_then(Value::as_array)
            .map(|rows| rows.iter().filter_map(Player::from_value).collect())
            .unwrap_or_default();
        let player_count = pick_i64(value, &["playerCount", "playersCount", "totalPlayers"])
            .and_then(|n| usize::try_from(n).ok())
            .unwrap_or_else(|| {
                value
                    .get("players")
                    .and_then(Value::as_array)
                    .map_or(0, Vec::len)
            });

        Some(Self {
            id: record_id(value)?,
            name: pick_str(value, &["name", "teamName"])?,
            short_name: pick_str(value, &["shortName", "abbreviation", "code"]),
            logo_url: pick_str(value, &["logo", "logoUrl", "teamLogo", "image"]),
            captain: pick_nested_str(value, &["captain"], &["name", "fullName"])
                .or_else(|| pick_str(value, &["captain", "captainName"])),
            coach: pick_str(value, &["coach", "coachName"]),
            contact: pick_str(value, &["contactNumber", "phone", "contact", "email"]),
            group: pick_nested_str(value, &["group"], &["name"]).or_else(|| pick_str(value, &["group", "groupName"])),
            status: VerificationStatus::from_record(value),
            payment_status: pick_nested_str(value, &["payment"], &["status"])
                .or_else(|| pick_str(value, &["paymentStatus"])),
            players,
            player_count,
        })
    }

    pub fn list(value: &Value) -> Vec<Self> {
        decode_list(value, &["teams"], Self::from_value)
    }

    pub fn single(value: &Value) -> Option<Self> {
        unwrap_object(value, &["team"]).and_then(Self::from_value)
    }

    /// Two-letter badge used when a team has no logo.
    #[must_use]
    pub fn initials(&self) -> String {
        initials(self.short_name.as_deref().unwrap_or(&self.name))
    }
}

pub(crate) fn initials(name: &str) -> String {
    let letters: String = name
        .split_whitespace()
        .filter_map(|word| word.chars().next())
        .take(2)
        .collect();
    letters.to_uppercase()
}

// =============================================================================
// MATCH
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchStatus {
    #[default]
    Upcoming,
    Live,
    Completed,
    Abandoned,
}

impl MatchStatus {
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().replace(['-', ' '], "_").as_str() {
            "live" | "in_progress" | "inprogress" | "ongoing" | "started" => Self::Live,
            "completed" | "complete" | "finished" | "done" | "result" => Self::Completed,
            "abandoned" | "cancelled" | "canceled" | "no_result" | "washed_out" => Self::Abandoned,
            _ => Self::Upcoming,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Upcoming => "upcoming",
            Self::Live => "live",
            Self::Completed => "completed",
            Self::Abandoned => "abandoned",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Upcoming => "Upcoming",
            Self::Live => "Live",
            Self::Completed => "Completed",
            Self::Abandoned => "Abandoned",
        }
    }

    #[must_use]
    pub fn is_finished(self) -> bool {
        matches!(self, Self::Completed | Self::Abandoned)
    }
}

/// One side of a fixture.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MatchSide {
    pub id: Option<String>,
    pub name: String,
    pub logo_url: Option<String>,
    pub score: Option<String>,
}

impl MatchSide {
    fn from_match(value: &Value, side_keys: &[&str], name_keys: &[&str], score_keys: &[&str]) -> Self {
        let embedded = side_keys
            .iter()
            .filter_map(|key| value.get(*key))
            .find(|candidate| candidate.is_object());
        let name = embedded
            .and_then(|team| pick_str(team, &["name", "teamName", "shortName"]))
            .or_else(|| pick_str(value, name_keys))
            .unwrap_or_else(|| "TBD".to_owned());
        let score = score_keys
            .iter()
            .filter_map(|key| value.get(*key))
            .find_map(score_text)
            .or_else(|| embedded.and_then(|team| team.get("score")).and_then(score_text));

        Self {
            id: reference_id(value, side_keys),
            name,
            logo_url: embedded.and_then(|team| pick_str(team, &["logo", "logoUrl"])),
            score,
        }
    }
}

/// Render a score that may be a string, a run count or `{runs, wickets, overs}`.
pub(crate) fn score_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_owned()),
        Value::Number(n) => Some(n.to_string()),
        Value::Object(_) => {
            let runs = pick_i64(value, &["runs", "score", "total"])?;
            let mut text = match pick_i64(value, &["wickets", "wkts"]) {
                Some(wickets) if wickets < 10 => format!("{runs}/{wickets}"),
                _ => runs.to_string(),
            };
            if let Some(overs) = pick_str(value, &["overs"]) {
                text.push_str(&format!(" ({overs} ov)"));
            }
            Some(text)
        }
        _ => None,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Match {
    pub id: String,
    pub team1: MatchSide,
    pub team2: MatchSide,
    pub venue: Option<String>,
    pub scheduled_at: Option<OffsetDateTime>,
    pub status: MatchStatus,
    pub result_summary: Option<String>,
    pub winner_id: Option<String>,
    pub stage: Option<String>,
    pub group: Option<String>,
    pub match_number: Option<i64>,
}

impl Match {
    pub fn from_value(value: &Value) -> Option<Self> {
        let result = value.get("result").filter(|r| r.is_object());
        let result_summary = result
            .and_then(|r| pick_str(r, &["summary", "description", "text"]))
            .or_else(|| pick_str(value, &["resultSummary", "result", "summary"]));
        let winner_id = result
            .and_then(|r| reference_id(r, &["winner", "winnerId", "winningTeam"]))
            .or_else(|| reference_id(value, &["winner", "winnerId", "winningTeam"]));
        let status = match pick_str(value, &["status", "matchStatus", "state"]) {
            Some(raw) => MatchStatus::parse(&raw),
            None if winner_id.is_some() || result_summary.is_some() => MatchStatus::Completed,
            None => MatchStatus::Upcoming,
        };

        Some(Self {
            id: record_id(value)?,
            team1: MatchSide::from_match(
                value,
                &["team1", "teamA", "homeTeam"],
                &["team1Name", "teamAName", "homeTeamName"],
                &["team1Score", "teamAScore", "scoreA"],
            ),
            team2: MatchSide::from_match(
                value,
                &["team2", "teamB", "awayTeam"],
                &["team2Name", "teamBName", "awayTeamName"],
                &["team2Score", "teamBScore", "scoreB"],
            ),
            venue: pick_nested_str(value, &["venue"], &["name"]).or_else(|| pick_str(value, &["venue", "ground", "location"])),
            scheduled_at: pick_datetime(value, &["dateTime", "matchDate", "scheduledAt", "startTime", "date"]),
            status,
            result_summary,
            winner_id,
            stage: pick_str(value, &["stage", "round", "matchType"]),
            group: pick_nested_str(value, &["group"], &["name"]).or_else(|| pick_str(value, &["group", "groupName"])),
            match_number: pick_i64(value, &["matchNumber", "matchNo", "number"]),
        })
    }

    pub fn list(value: &Value) -> Vec<Self> {
        decode_list(value, &["matches", "fixtures"], Self::from_value)
    }

    pub fn single(value: &Value) -> Option<Self> {
        unwrap_object(value, &["match"]).and_then(Self::from_value)
    }

    #[must_use]
    pub fn title(&self) -> String {
        format!("{} vs {}", self.team1.name, self.team2.name)
    }

    /// True when either side matches `team` by id or case-insensitive name.
    #[must_use]
    pub fn involves(&self, team: &str) -> bool {
        let team = team.trim();
        [&self.team1, &self.team2].iter().any(|side| {
            side.id.as_deref() == Some(team) || side.name.eq_ignore_ascii_case(team)
        })
    }

    #[must_use]
    pub fn winner_name(&self) -> Option<&str> {
        let winner = self.winner_id.as_deref()?;
        [&self.team1, &self.team2]
            .into_iter()
            .find(|side| side.id.as_deref() == Some(winner) || side.name == winner)
            .map(|side| side.name.as_str())
    }
}

// =============================================================================
// SEASON + GROUP
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Season {
    pub id: String,
    pub name: String,
    pub year: Option<i64>,
    pub is_current: bool,
    pub start_date: Option<OffsetDateTime>,
    pub end_date: Option<OffsetDateTime>,
}

impl Season {
    pub fn from_value(value: &Value) -> Option<Self> {
        let year = pick_i64(value, &["year", "seasonYear"]);
        let name = pick_str(value, &["name", "title", "seasonName"]).or_else(|| year.map(|y| format!("Season {y}")))?;
        Some(Self {
            id: record_id(value)?,
            name,
            year,
            is_current: pick_bool(value, &["isCurrent", "current", "isActive", "active"]).unwrap_or(false),
            start_date: pick_datetime(value, &["startDate", "start"]),
            end_date: pick_datetime(value, &["endDate", "end"]),
        })
    }

    pub fn list(value: &Value) -> Vec<Self> {
        decode_list(value, &["seasons"], Self::from_value)
    }

    pub fn single(value: &Value) -> Option<Self> {
        unwrap_object(value, &["season", "currentSeason"]).and_then(Self::from_value)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    pub id: String,
    pub name: String,
    pub teams: Vec<String>,
}

impl Group {
    pub fn from_value(value: &Value) -> Option<Self> {
        let teams = value
            .get("teams")
            .and_then(Value::as_array)
            .map(|rows| {
                rows.iter()
                    .filter_map(|team| match team {
                        Value::Object(_) => pick_str(team, &["name", "teamName"]),
                        Value::String(s) => Some(s.clone()),
                        _ => None,
                    })
                    .collect()
            })
            .unwrap_or_default();
        Some(Self {
            id: record_id(value).or_else(|| pick_str(value, &["name", "groupName"]))?,
            name: pick_str(value, &["name", "groupName"])?,
            teams,
        })
    }

    pub fn list(value: &Value) -> Vec<Self> {
        decode_list(value, &["groups"], Self::from_value)
    }
}

// =============================================================================
// NEWS
// =============================================================================

const SUMMARY_CHARS: usize = 160;

#[derive(Debug, Clone, PartialEq)]
pub struct NewsArticle {
    pub id: String,
    pub title: String,
    pub summary: String,
    pub body: String,
    pub image_url: Option<String>,
    pub author: Option<String>,
    pub published_at: Option<OffsetDateTime>,
}

impl NewsArticle {
    pub fn from_value(value: &Value) -> Option<Self> {
        let body = pick_str(value, &["content", "body", "description"]).unwrap_or_default();
        let summary = pick_str(value, &["summary", "excerpt", "subtitle"]).unwrap_or_else(|| excerpt(&body, SUMMARY_CHARS));
        Some(Self {
            id: record_id(value)?,
            title: pick_str(value, &["title", "headline"])?,
            summary,
            body,
            image_url: pick_str(value, &["image", "imageUrl", "coverImage", "thumbnail"]),
            author: pick_nested_str(value, &["author"], &["name", "fullName"]).or_else(|| pick_str(value, &["author"])),
            published_at: pick_datetime(value, &["publishedAt", "createdAt", "date"]),
        })
    }

    pub fn list(value: &Value) -> Vec<Self> {
        decode_list(value, &["news", "articles"], Self::from_value)
    }

    pub fn single(value: &Value) -> Option<Self> {
        unwrap_object(value, &["news", "article"]).and_then(Self::from_value)
    }

    /// Body split into paragraphs on blank lines.
    #[must_use]
    pub fn paragraphs(&self) -> Vec<String> {
        self.body
            .split("\n\n")
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_owned)
            .collect()
    }
}

/// First `max_chars` characters of `text`, cut on a char boundary, with `…`
/// appended when truncated.
pub(crate) fn excerpt(text: &str, max_chars: usize) -> String {
    let text = text.trim();
    match text.char_indices().nth(max_chars) {
        None => text.to_owned(),
        Some((cut, _)) => format!("{}…", text[..cut].trim_end()),
    }
}

// =============================================================================
// SPONSORS + GALLERY
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Sponsor {
    pub id: String,
    pub name: String,
    pub logo_url: Option<String>,
    pub website: Option<String>,
    pub tier: Option<String>,
}

impl Sponsor {
    pub fn from_value(value: &Value) -> Option<Self> {
        Some(Self {
            id: record_id(value)?,
            name: pick_str(value, &["name", "sponsorName", "title"])?,
            logo_url: pick_str(value, &["logo", "logoUrl", "image"]),
            website: pick_str(value, &["website", "url", "link"]),
            tier: pick_str(value, &["tier", "category", "level", "type"]),
        })
    }

    pub fn list(value: &Value) -> Vec<Self> {
        decode_list(value, &["sponsors"], Self::from_value)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GalleryImage {
    pub id: String,
    pub url: String,
    pub caption: Option<String>,
}

impl GalleryImage {
    pub fn from_value(value: &Value) -> Option<Self> {
        if let Value::String(url) = value {
            let url = url.trim();
            return (!url.is_empty()).then(|| Self { id: url.to_owned(), url: url.to_owned(), caption: None });
        }
        let url = pick_str(value, &["url", "imageUrl", "image", "src"])?;
        Some(Self {
            id: record_id(value).unwrap_or_else(|| url.clone()),
            url,
            caption: pick_str(value, &["caption", "title", "description"]),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GalleryAlbum {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub cover_url: Option<String>,
    pub images: Vec<GalleryImage>,
}

impl GalleryAlbum {
    pub fn from_value(value: &Value) -> Option<Self> {
        let images: Vec<GalleryImage> = value
            .get("images")
            .or_else(|| value.get("photos"))
            .and_then(Value::as_array)
            .map(|rows| rows.iter().filter_map(GalleryImage::from_value).collect())
            .unwrap_or_default();
        let cover_url = pick_str(value, &["coverImage", "cover", "thumbnail"]).or_else(|| images.first().map(|i| i.url.clone()));
        Some(Self {
            id: record_id(value)?,
            title: pick_str(value, &["title", "name", "albumName"])?,
            description: pick_str(value, &["description"]),
            cover_url,
            images,
        })
    }

    pub fn list(value: &Value) -> Vec<Self> {
        decode_list(value, &["albums", "gallery"], Self::from_value)
    }

    pub fn single(value: &Value) -> Option<Self> {
        unwrap_object(value, &["album", "gallery"]).and_then(Self::from_value)
    }
}

// =============================================================================
// POINTS TABLE
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct PointsRow {
    pub position: usize,
    pub team_id: Option<String>,
    pub team_name: String,
    pub logo_url: Option<String>,
    pub group: Option<String>,
    pub played: i64,
    pub won: i64,
    pub lost: i64,
    pub tied: i64,
    pub no_result: i64,
    pub points: i64,
    pub net_run_rate: f64,
}

impl PointsRow {
    pub fn from_value(value: &Value) -> Option<Self> {
        let team_name = pick_nested_str(value, &["team"], &["name", "teamName"])
            .or_else(|| pick_str(value, &["teamName", "name", "team"]))?;
        Some(Self {
            position: 0,
            team_id: reference_id(value, &["team", "teamId"]).or_else(|| record_id(value)),
            team_name,
            logo_url: pick_nested_str(value, &["team"], &["logo", "logoUrl"]).or_else(|| pick_str(value, &["logo"])),
            group: pick_nested_str(value, &["group"], &["name"]).or_else(|| pick_str(value, &["group", "groupName"])),
            played: pick_i64(value, &["played", "matchesPlayed", "matches", "p"]).unwrap_or(0),
            won: pick_i64(value, &["won", "wins", "w"]).unwrap_or(0),
            lost: pick_i64(value, &["lost", "losses", "l"]).unwrap_or(0),
            tied: pick_i64(value, &["tied", "ties", "t"]).unwrap_or(0),
            no_result: pick_i64(value, &["noResult", "nr", "noResults"]).unwrap_or(0),
            points: pick_i64(value, &["points", "pts", "totalPoints"]).unwrap_or(0),
            net_run_rate: pick_f64(value, &["nrr", "netRunRate", "net_run_rate"]).unwrap_or(0.0),
        })
    }

    pub fn list(value: &Value) -> Vec<Self> {
        decode_list(value, &["pointsTable", "table", "standings"], Self::from_value)
    }
}

// =============================================================================
// ADMIN DASHBOARD + USER
// =============================================================================

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DashboardSummary {
    pub total_teams: i64,
    pub pending_teams: i64,
    pub total_players: i64,
    pub pending_players: i64,
    pub total_matches: i64,
    pub upcoming_matches: i64,
    pub pending_team_list: Vec<Team>,
    pub pending_player_list: Vec<Player>,
}

impl DashboardSummary {
    pub fn from_value(value: &Value) -> Self {
        let root = unwrap_object(value, &["dashboard"]).unwrap_or(value);
        let stats = root.get("stats").filter(|s| s.is_object()).unwrap_or(root);
        let rows = |keys: &[&str]| -> Vec<Value> {
            pick(root, keys)
                .and_then(Value::as_array)
                .cloned()
                .unwrap_or_default()
        };
        let pending_team_list: Vec<Team> = rows(&["pendingTeams", "pendingTeamList"]).iter().filter_map(Team::from_value).collect();
        let pending_player_list: Vec<Player> = rows(&["pendingPlayers", "pendingPlayerList"])
            .iter()
            .filter_map(Player::from_value)
            .collect();

        let count_or_len = |keys: &[&str], fallback: usize| {
            pick_i64(stats, keys).unwrap_or_else(|| i64::try_from(fallback).unwrap_or(i64::MAX))
        };

        Self {
            total_teams: count_or_len(&["totalTeams", "teams", "teamCount"], 0),
            pending_teams: count_or_len(&["pendingTeams", "pendingTeamCount"], pending_team_list.len()),
            total_players: count_or_len(&["totalPlayers", "players", "playerCount"], 0),
            pending_players: count_or_len(&["pendingPlayers", "pendingPlayerCount"], pending_player_list.len()),
            total_matches: count_or_len(&["totalMatches", "matches", "matchCount"], 0),
            upcoming_matches: count_or_len(&["upcomingMatches", "scheduledMatches"], 0),
            pending_team_list,
            pending_player_list,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub id: String,
    pub name: String,
    pub email: Option<String>,
    pub role: String,
}

impl CurrentUser {
    pub fn from_value(value: &Value) -> Option<Self> {
        let user = unwrap_object(value, &["user", "admin"])?;
        let role = pick_str(user, &["role", "userType"])
            .map(|r| r.to_ascii_lowercase())
            .or_else(|| pick_bool(user, &["isAdmin"]).map(|admin| if admin { "admin" } else { "user" }.to_owned()))
            .unwrap_or_else(|| "user".to_owned());
        Some(Self {
            id: record_id(user)?,
            name: pick_str(user, &["name", "fullName", "username", "email"])?,
            email: pick_str(user, &["email"]),
            role,
        })
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        matches!(self.role.as_str(), "admin" | "superadmin" | "super_admin")
    }
}

#[cfg(test)]
#[path = "models_test.rs"]
mod tests;
