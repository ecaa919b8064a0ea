use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};

use serde::{Deserialize, Serialize};

use uuid::Uuid;

use crate::domain::{EmailAddress, MobileNumber};

/// The signup category, gating which optional fields apply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Reader,
    Creator,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Reader => "reader",
            Role::Creator => "creator",
        }
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "reader" => Ok(Role::Reader),
            "creator" => Ok(Role::Creator),
            other => Err(format!("'{}' is not a valid role", other)),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Role-specific signup payload. A reader entry cannot carry creator-only
/// fields (and vice versa) by construction.
#[derive(Debug, Clone, PartialEq)]
pub enum SignupDetails {
    Reader {
        suggestions: Option<String>,
    },
    Creator {
        notify_creator_tools: bool,
        story_idea: Option<String>,
        file_url: Option<String>,
    },
}

impl SignupDetails {
    pub fn role(&self) -> Role {
        match self {
            SignupDetails::Reader { .. } => Role::Reader,
            SignupDetails::Creator { .. } => Role::Creator,
        }
    }
}

/// A new signup, validated and ready to persist
#[derive(Debug, Clone)]
pub struct NewEntry {
    pub email: EmailAddress,
    pub mobile: Option<MobileNumber>,
    pub details: SignupDetails,
}

/// One persisted signup record awaiting product launch
#[derive(Debug, Clone, PartialEq)]
pub struct WaitlistEntry {
    pub id: Uuid,
    /// Stored as plain text; historical rows may predate current validation
    pub email: String,
    pub mobile: Option<String>,
    pub created_at: DateTime<Utc>,
    pub details: SignupDetails,
}

impl WaitlistEntry {
    /// Rebuild an entry from the flat stored row, normalizing defensively:
    /// an unexpected role coerces to reader, a null notify flag reads as
    /// false. Fields that do not apply to the normalized role are dropped.
    pub fn from_stored(row: StoredEntry) -> Self {
        let details = match row.role.parse() {
            Ok(Role::Creator) => SignupDetails::Creator {
                notify_creator_tools: row.notify_creator_tools.unwrap_or(false),
                story_idea: row.story_idea,
                file_url: row.file_url,
            },
            _ => SignupDetails::Reader {
                suggestions: row.suggestions,
            },
        };

        Self {
            id: row.id,
            email: row.email,
            mobile: row.mobile.filter(|m| !m.is_empty()),
            created_at: row.created_at,
            details,
        }
    }

    pub fn role(&self) -> Role {
        self.details.role()
    }

    pub fn notify_creator_tools(&self) -> bool {
        match &self.details {
            SignupDetails::Creator {
                notify_creator_tools,
                ..
            } => *notify_creator_tools,
            SignupDetails::Reader { .. } => false,
        }
    }

    pub fn suggestions(&self) -> Option<&str> {
        match &self.details {
            SignupDetails::Reader { suggestions } => suggestions.as_deref(),
            SignupDetails::Creator { .. } => None,
        }
    }

    pub fn story_idea(&self) -> Option<&str> {
        match &self.details {
            SignupDetails::Creator { story_idea, .. } => story_idea.as_deref(),
            SignupDetails::Reader { .. } => None,
        }
    }

    pub fn file_url(&self) -> Option<&str> {
        match &self.details {
            SignupDetails::Creator { file_url, .. } => file_url.as_deref(),
            SignupDetails::Reader { .. } => None,
        }
    }
}

/// One tracked page view. The device/browser/os classification is derived
/// from the User-Agent at record time and stored alongside the raw header.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct PageView {
    pub id: Uuid,
    pub page_path: String,
    pub session_id: Uuid,
    pub visitor_ip: Option<String>,
    pub user_agent: Option<String>,
    pub referrer: Option<String>,
    pub device_type: String,
    pub browser: String,
    pub os: String,
    pub created_at: DateTime<Utc>,
}

/// A page view ready to record
#[derive(Debug, Clone)]
pub struct NewPageView {
    pub page_path: String,
    pub session_id: Uuid,
    pub visitor_ip: Option<String>,
    pub user_agent: Option<String>,
    pub referrer: Option<String>,
    pub device_type: String,
    pub browser: String,
    pub os: String,
}

/// The flat `waitlist` row shape as it exists in the store
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct StoredEntry {
    pub id: Uuid,
    pub email: String,
    pub role: String,
    pub mobile: Option<String>,
    pub notify_creator_tools: Option<bool>,
    pub suggestions: Option<String>,
    pub story_idea: Option<String>,
    pub file_url: Option<String>,
    pub created_at: DateTime<Utc>,
}
