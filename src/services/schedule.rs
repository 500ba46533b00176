//! Fixture filtering, grouping and the countdown shown on the home page.
//!
//! TRADE-OFFS
//! ==========
//! The countdown is computed once per render instead of ticking in the
//! browser; the home page is cheap to reload and stays correct without
//! client-side code. Live match pages refresh every `LIVE_REFRESH_SECS`.

use serde::Deserialize;
use time::macros::format_description;
use time::{Date, OffsetDateTime, PrimitiveDateTime, UtcOffset};

use crate::api::models::{Match, MatchStatus};
use crate::services::listing::matches_query;

pub const LIVE_REFRESH_SECS: u32 = 5;

// =============================================================================
// FILTERING
// =============================================================================

/// Query-string filter for the schedules page.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct MatchFilter {
    pub status: Option<String>,
    pub team: Option<String>,
    #[serde(rename = "q")]
    pub query: Option<String>,
    pub page: Option<usize>,
}

impl MatchFilter {
    fn status(&self) -> Option<MatchStatus> {
        self.status
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty() && !s.eq_ignore_ascii_case("all"))
            .map(MatchStatus::parse)
    }

    #[must_use]
    pub fn accepts(&self, m: &Match) -> bool {
        if let Some(status) = self.status() {
            let same = match status {
                MatchStatus::Completed | MatchStatus::Abandoned => m.status.is_finished(),
                other => m.status == other,
            };
            if !same {
                return false;
            }
        }
        if let Some(team) = self.team.as_deref().filter(|t| !t.trim().is_empty()) {
            if !m.involves(team) {
                return false;
            }
        }
        let haystacks = [
            m.team1.name.as_str(),
            m.team2.name.as_str(),
            m.venue.as_deref().unwrap_or_default(),
            m.stage.as_deref().unwrap_or_default(),
        ];
        matches_query(haystacks, self.query.as_deref().unwrap_or_default())
    }

    #[must_use]
    pub fn apply(&self, matches: Vec<Match>) -> Vec<Match> {
        matches.into_iter().filter(|m| self.accepts(m)).collect()
    }
}

// =============================================================================
// ORDERING + GROUPING
// =============================================================================

/// Fixtures split the way the home and schedule pages show them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScheduleBuckets {
    /// Soonest first.
    pub upcoming: Vec<Match>,
    pub live: Vec<Match>,
    /// Most recent first. Abandoned games are listed here too.
    pub completed: Vec<Match>,
}

/// Sort ascending by start time; undated fixtures go last.
pub fn sort_chronologically(matches: &mut [Match]) {
    matches.sort_by(|a, b| match (a.scheduled_at, b.scheduled_at) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => a.match_number.cmp(&b.match_number),
    });
}

pub fn split_by_status(mut matches: Vec<Match>) -> ScheduleBuckets {
    sort_chronologically(&mut matches);
    let mut buckets = ScheduleBuckets::default();
    for m in matches {
        match m.status {
            MatchStatus::Upcoming => buckets.upcoming.push(m),
            MatchStatus::Live => buckets.live.push(m),
            MatchStatus::Completed | MatchStatus::Abandoned => buckets.completed.push(m),
        }
    }
    buckets.completed.reverse();
    buckets
}

/// Matches grouped under a local-date heading, in the order given.
/// Undated fixtures are collected under "Date to be announced".
pub fn group_by_day(matches: Vec<Match>, offset: UtcOffset) -> Vec<(String, Vec<Match>)> {
    let mut days: Vec<(String, Vec<Match>)> = Vec::new();
    for m in matches {
        let label = m
            .scheduled_at
            .map_or_else(|| "Date to be announced".to_owned(), |at| format_day(at, offset));
        match days.last_mut() {
            Some((last, bucket)) if *last == label => bucket.push(m),
            _ => days.push((label, vec![m])),
        }
    }
    days
}

/// Earliest upcoming fixture that has not started yet.
pub fn next_match(matches: &[Match], now: OffsetDateTime) -> Option<&Match> {
    matches
        .iter()
        .filter(|m| m.status == MatchStatus::Upcoming)
        .filter(|m| m.scheduled_at.is_some_and(|at| at > now))
        .min_by_key(|m| m.scheduled_at)
}

// =============================================================================
// COUNTDOWN
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl Countdown {
    /// Time remaining until `target`; all zero once it has passed.
    #[must_use]
    pub fn until(target: OffsetDateTime, now: OffsetDateTime) -> Self {
        let total = (target - now).whole_seconds().max(0);
        Self {
            days: total / 86_400,
            hours: (total % 86_400) / 3_600,
            minutes: (total % 3_600) / 60,
            seconds: total % 60,
        }
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.days == 0 && self.hours == 0 && self.minutes == 0 && self.seconds == 0
    }

    #[must_use]
    pub fn label(&self) -> String {
        format!("{}d {:02}h {:02}m {:02}s", self.days, self.hours, self.minutes, self.seconds)
    }
}

// =============================================================================
// FORMATTING + FORM INPUT
// =============================================================================

/// `Fri, 14 Mar 2025` in the tournament's offset.
pub fn format_day(at: OffsetDateTime, offset: UtcOffset) -> String {
    at.to_offset(offset)
        .format(format_description!("[weekday repr:short], [day padding:none] [month repr:short] [year]"))
        .unwrap_or_default()
}

/// `14 Mar 2025, 15:15` in the tournament's offset.
pub fn format_datetime(at: OffsetDateTime, offset: UtcOffset) -> String {
    at.to_offset(offset)
        .format(format_description!("[day padding:none] [month repr:short] [year], [hour]:[minute]"))
        .unwrap_or_default()
}

/// Value for an `<input type="datetime-local">` pre-filled from a stored time.
pub fn to_local_input(at: OffsetDateTime, offset: UtcOffset) -> String {
    at.to_offset(offset)
        .format(format_description!("[year]-[month]-[day]T[hour]:[minute]"))
        .unwrap_or_default()
}

/// Interpret a `datetime-local` value (`YYYY-MM-DDTHH:MM[:SS]`) or a bare
/// date in the tournament offset and return it as RFC 3339.
pub fn parse_local_datetime(input: &str, offset: UtcOffset) -> Option<String> {
    let input = input.trim();
    let naive = PrimitiveDateTime::parse(input, format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]"))
        .or_else(|_| PrimitiveDateTime::parse(input, format_description!("[year]-[month]-[day]T[hour]:[minute]")))
        .ok()
        .or_else(|| {
            Date::parse(input, format_description!("[year]-[month]-[day]"))
                .ok()
                .map(Date::midnight)
        })?;
    naive
        .assume_offset(offset)
        .format(&time::format_description::well_known::Rfc3339)
        .ok()
}

#[cfg(test)]
#[path = "schedule_test.rs"]
mod tests;
