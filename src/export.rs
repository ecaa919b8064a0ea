//! CSV serialization of a (possibly filtered) waitlist snapshot. The column
//! contract is fixed: only the free-text fields are quoted, the notify flag
//! renders as Yes/No, and absent optionals render as empty strings.

use chrono::NaiveDate;

use crate::model::WaitlistEntry;

const CSV_HEADER: &str =
    "ID,Email,Role,Mobile,Notify Creator Tools,Suggestions,Story Idea,File URL,Created At";

/// Serialize entries to CSV. An empty set produces nothing to download.
pub fn to_csv(entries: &[WaitlistEntry]) -> Option<String> {
    if entries.is_empty() {
        return None;
    }

    let mut lines = Vec::with_capacity(entries.len() + 1);
    lines.push(CSV_HEADER.to_string());

    for entry in entries {
        let row = [
            entry.id.to_string(),
            entry.email.clone(),
            entry.role().to_string(),
            entry.mobile.clone().unwrap_or_default(),
            if entry.notify_creator_tools() {
                "Yes".to_string()
            } else {
                "No".to_string()
            },
            quoted(entry.suggestions()),
            quoted(entry.story_idea()),
            entry.file_url().unwrap_or_default().to_string(),
            entry.created_at.to_rfc3339(),
        ];
        lines.push(row.join(","));
    }

    Some(lines.join("\n"))
}

/// Download filename stamped with the export date
pub fn export_filename(date: NaiveDate) -> String {
    format!("waitlist_data_{}.csv", date.format("%Y-%m-%d"))
}

/// Wrap a free-text field in double quotes, doubling internal quotes.
/// Absent or empty values render as the empty string, unquoted.
fn quoted(field: Option<&str>) -> String {
    match field {
        None | Some("") => String::new(),
        Some(value) => format!("\"{}\"", value.replace('"', "\"\"")),
    }
}
