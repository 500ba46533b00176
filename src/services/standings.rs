//! Points-table ordering for display.
//!
//! The backend computes every number; the portal only orders the rows it
//! receives (which may arrive unsorted) and splits them by group.

use std::cmp::Ordering;

use crate::api::models::PointsRow;

pub const UNGROUPED_LABEL: &str = "Overall";

/// A named table within the standings.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupTable {
    pub name: String,
    pub rows: Vec<PointsRow>,
}

fn compare_rows(a: &PointsRow, b: &PointsRow) -> Ordering {
    b.points
        .cmp(&a.points)
        .then_with(|| b.net_run_rate.total_cmp(&a.net_run_rate))
        .then_with(|| b.won.cmp(&a.won))
        .then_with(|| a.team_name.to_lowercase().cmp(&b.team_name.to_lowercase()))
}

/// Order by points, net run rate, wins, then name; number positions from 1.
pub fn rank(mut rows: Vec<PointsRow>) -> Vec<PointsRow> {
    rows.sort_by(compare_rows);
    for (index, row) in rows.iter_mut().enumerate() {
        row.position = index + 1;
    }
    rows
}

/// Split into per-group tables, ordered by group name, each ranked on its own.
/// Rows without a group land in [`UNGROUPED_LABEL`].
pub fn group_rows(rows: Vec<PointsRow>) -> Vec<GroupTable> {
    let mut groups: Vec<GroupTable> = Vec::new();
    for row in rows {
        let name = row
            .group
            .clone()
            .map(|g| display_group_name(&g))
            .unwrap_or_else(|| UNGROUPED_LABEL.to_owned());
        match groups.iter_mut().find(|group| group.name == name) {
            Some(group) => group.rows.push(row),
            None => groups.push(GroupTable { name, rows: vec![row] }),
        }
    }
    groups.sort_by(|a, b| a.name.cmp(&b.name));
    groups
        .into_iter()
        .map(|group| GroupTable { name: group.name, rows: rank(group.rows) })
        .collect()
}

/// `"A"` becomes `"Group A"`; names that already say "group" are kept.
pub fn display_group_name(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.to_lowercase().starts_with("group") {
        trimmed.to_owned()
    } else {
        format!("Group {trimmed}")
    }
}

/// Net run rate with an explicit sign, three decimals.
pub fn format_nrr(nrr: f64) -> String {
    if nrr > 0.0 { format!("+{nrr:.3}") } else { format!("{nrr:.3}") }
}

#[cfg(test)]
#[path = "standings_test.rs"]
mod tests;
