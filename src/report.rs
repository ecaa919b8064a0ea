//! Batch aggregation over a waitlist snapshot. Everything here is pure:
//! the admin endpoints fetch once, compute, and respond.

use std::collections::BTreeMap;

use chrono::{Local, NaiveDate};

use serde::{Deserialize, Serialize};

use crate::model::{Role, WaitlistEntry};

/// Headline counts with percentages of total, rounded to nearest integer.
/// An empty snapshot reports 0% across the board.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignupSummary {
    pub total_signups: usize,
    pub reader_count: usize,
    pub reader_pct: u32,
    pub creator_count: usize,
    pub creator_pct: u32,
    pub mobile_provided_count: usize,
    pub mobile_provided_pct: u32,
    pub notify_count: usize,
    pub notify_pct: u32,
}

impl SignupSummary {
    pub fn from_entries(entries: &[WaitlistEntry]) -> Self {
        let total_signups = entries.len();
        let reader_count = entries.iter().filter(|e| e.role() == Role::Reader).count();
        let creator_count = entries.iter().filter(|e| e.role() == Role::Creator).count();
        let mobile_provided_count = entries.iter().filter(|e| e.mobile.is_some()).count();
        let notify_count = entries.iter().filter(|e| e.notify_creator_tools()).count();

        Self {
            total_signups,
            reader_count,
            reader_pct: percentage(reader_count, total_signups),
            creator_count,
            creator_pct: percentage(creator_count, total_signups),
            mobile_provided_count,
            mobile_provided_pct: percentage(mobile_provided_count, total_signups),
            notify_count,
            notify_pct: percentage(notify_count, total_signups),
        }
    }
}

fn percentage(count: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (count as f64 / total as f64 * 100.0).round() as u32
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoleCount {
    pub role: Role,
    pub count: usize,
}

/// Role breakdown in first-seen order
pub fn role_distribution(entries: &[WaitlistEntry]) -> Vec<RoleCount> {
    let mut counts: Vec<RoleCount> = Vec::new();
    for entry in entries {
        match counts.iter_mut().find(|c| c.role == entry.role()) {
            Some(count) => count.count += 1,
            None => counts.push(RoleCount {
                role: entry.role(),
                count: 1,
            }),
        }
    }
    counts
}

/// Signups bucketed by calendar date in display-local time
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailySignups {
    pub date: NaiveDate,
    pub total: usize,
    pub readers: usize,
    pub creators: usize,
}

/// Group entries by local calendar date, ascending
pub fn daily_signups(entries: &[WaitlistEntry]) -> Vec<DailySignups> {
    let mut buckets: BTreeMap<NaiveDate, DailySignups> = BTreeMap::new();

    for entry in entries {
        let date = entry.created_at.with_timezone(&Local).date_naive();
        let bucket = buckets.entry(date).or_insert(DailySignups {
            date,
            total: 0,
            readers: 0,
            creators: 0,
        });

        bucket.total += 1;
        match entry.role() {
            Role::Reader => bucket.readers += 1,
            Role::Creator => bucket.creators += 1,
        }
    }

    buckets.into_values().collect()
}

/// Running totals over the ascending daily buckets
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CumulativeSignups {
    pub date: NaiveDate,
    pub readers: usize,
    pub creators: usize,
    pub total: usize,
}

pub fn cumulative_signups(daily: &[DailySignups]) -> Vec<CumulativeSignups> {
    let mut readers = 0;
    let mut creators = 0;

    daily
        .iter()
        .map(|day| {
            readers += day.readers;
            creators += day.creators;
            CumulativeSignups {
                date: day.date,
                readers,
                creators,
                total: readers + creators,
            }
        })
        .collect()
}

/// The full aggregation snapshot served to the dashboard
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignupReport {
    pub summary: SignupSummary,
    pub role_distribution: Vec<RoleCount>,
    pub daily_signups: Vec<DailySignups>,
    pub cumulative_signups: Vec<CumulativeSignups>,
}

impl SignupReport {
    pub fn from_entries(entries: &[WaitlistEntry]) -> Self {
        let daily = daily_signups(entries);
        let cumulative = cumulative_signups(&daily);

        Self {
            summary: SignupSummary::from_entries(entries),
            role_distribution: role_distribution(entries),
            daily_signups: daily,
            cumulative_signups: cumulative,
        }
    }
}

/// Admin-view filter over a fetched snapshot. Matches the dashboard table:
/// free-text search over email and the free-text fields, an optional role,
/// and the mobile/notify toggles.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EntryFilter {
    pub search: Option<String>,
    pub role: Option<Role>,
    #[serde(default)]
    pub mobile_only: bool,
    #[serde(default)]
    pub notify_only: bool,
}

impl EntryFilter {
    pub fn matches(&self, entry: &WaitlistEntry) -> bool {
        let matches_search = match self.search.as_deref() {
            None | Some("") => true,
            Some(query) => {
                let query = query.to_lowercase();
                entry.email.to_lowercase().contains(&query)
                    || entry
                        .suggestions()
                        .is_some_and(|s| s.to_lowercase().contains(&query))
                    || entry
                        .story_idea()
                        .is_some_and(|s| s.to_lowercase().contains(&query))
            }
        };

        let matches_role = self.role.map_or(true, |role| entry.role() == role);
        let matches_mobile = !self.mobile_only || entry.mobile.as_deref().is_some_and(|m| !m.trim().is_empty());
        let matches_notify = !self.notify_only || entry.notify_creator_tools();

        matches_search && matches_role && matches_mobile && matches_notify
    }

    /// Keep only matching entries, preserving order
    pub fn apply(&self, entries: Vec<WaitlistEntry>) -> Vec<WaitlistEntry> {
        entries
            .into_iter()
            .filter(|entry| self.matches(entry))
            .collect()
    }
}
