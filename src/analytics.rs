//! Page-view tracking support: client classification from the User-Agent
//! header, plus batch aggregation over the recorded views. Aggregation is
//! pure, same shape as the waitlist reports.

use std::collections::{BTreeMap, HashSet};

use chrono::{Duration, Local, NaiveDate};

use regex::Regex;

use serde::Serialize;

use crate::model::PageView;

/// Device, browser, and OS classification derived from a User-Agent header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientInfo {
    pub device_type: &'static str,
    pub browser: &'static str,
    pub os: &'static str,
}

impl ClientInfo {
    pub fn from_user_agent(user_agent: Option<&str>) -> Self {
        match user_agent {
            None => Self {
                device_type: "desktop",
                browser: "Unknown",
                os: "Unknown",
            },
            Some(ua) => Self {
                device_type: device_type(ua),
                browser: browser(ua),
                os: os(ua),
            },
        }
    }
}

fn device_type(user_agent: &str) -> &'static str {
    lazy_static::lazy_static! {
        static ref TABLET_REGEX: Regex =
            Regex::new(r"(?i)tablet|ipad|playbook|silk").unwrap();
        static ref MOBILE_REGEX: Regex = Regex::new(
            r"(?i)mobile|iphone|ipod|android|blackberry|opera|mini|windows\sce|palm|smartphone|iemobile"
        )
        .unwrap();
    }

    if TABLET_REGEX.is_match(user_agent) {
        "tablet"
    } else if MOBILE_REGEX.is_match(user_agent) {
        "mobile"
    } else {
        "desktop"
    }
}

fn browser(user_agent: &str) -> &'static str {
    if user_agent.contains("Chrome") {
        "Chrome"
    } else if user_agent.contains("Firefox") {
        "Firefox"
    } else if user_agent.contains("Safari") {
        "Safari"
    } else if user_agent.contains("Edge") {
        "Edge"
    } else if user_agent.contains("Opera") {
        "Opera"
    } else {
        "Unknown"
    }
}

fn os(user_agent: &str) -> &'static str {
    if user_agent.contains("Windows") {
        "Windows"
    } else if user_agent.contains("Mac") {
        "macOS"
    } else if user_agent.contains("Linux") {
        "Linux"
    } else if user_agent.contains("Android") {
        "Android"
    } else if user_agent.contains("iOS") {
        "iOS"
    } else {
        "Unknown"
    }
}

/// Headline traffic counts. Visitors are distinct tracked IPs, sessions are
/// distinct client session ids; "today" follows the local calendar.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverallAnalytics {
    pub total_views: usize,
    pub unique_visitors: usize,
    pub total_sessions: usize,
    pub today_views: usize,
    pub today_unique_visitors: usize,
}

impl OverallAnalytics {
    pub fn from_views(views: &[PageView]) -> Self {
        Self::relative_to(views, Local::now().date_naive())
    }

    fn relative_to(views: &[PageView], today: NaiveDate) -> Self {
        let visitors: HashSet<&str> = views.iter().filter_map(|v| v.visitor_ip.as_deref()).collect();
        let sessions: HashSet<_> = views.iter().map(|v| v.session_id).collect();

        let today_views: Vec<&PageView> = views
            .iter()
            .filter(|v| v.created_at.with_timezone(&Local).date_naive() == today)
            .collect();
        let today_visitors: HashSet<&str> = today_views
            .iter()
            .filter_map(|v| v.visitor_ip.as_deref())
            .collect();

        Self {
            total_views: views.len(),
            unique_visitors: visitors.len(),
            total_sessions: sessions.len(),
            today_views: today_views.len(),
            today_unique_visitors: today_visitors.len(),
        }
    }
}

/// Per-day, per-page rollup
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageViewSummary {
    pub date: NaiveDate,
    pub page_path: String,
    pub total_views: usize,
    pub unique_visitors: usize,
}

/// Roll up the last `days` local calendar days (today included), most
/// recent day first
pub fn page_view_summary(views: &[PageView], days: i64) -> Vec<PageViewSummary> {
    summary_since(views, Local::now().date_naive() - Duration::days(days))
}

fn summary_since(views: &[PageView], cutoff: NaiveDate) -> Vec<PageViewSummary> {
    let mut buckets: BTreeMap<(NaiveDate, &str), (usize, HashSet<&str>)> = BTreeMap::new();

    for view in views {
        let date = view.created_at.with_timezone(&Local).date_naive();
        if date <= cutoff {
            continue;
        }

        let (total, visitors) = buckets.entry((date, &view.page_path)).or_default();
        *total += 1;
        if let Some(ip) = view.visitor_ip.as_deref() {
            visitors.insert(ip);
        }
    }

    let mut summary: Vec<PageViewSummary> = buckets
        .into_iter()
        .map(|((date, page_path), (total_views, visitors))| PageViewSummary {
            date,
            page_path: page_path.to_string(),
            total_views,
            unique_visitors: visitors.len(),
        })
        .collect();
    summary.sort_by(|a, b| b.date.cmp(&a.date).then(a.page_path.cmp(&b.page_path)));
    summary
}
