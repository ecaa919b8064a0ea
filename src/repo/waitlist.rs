use sqlx::PgPool;

use uuid::Uuid;

use crate::model::{NewEntry, SignupDetails, StoredEntry, WaitlistEntry};

/// Postgres unique-violation SQLSTATE
const UNIQUE_VIOLATION: &str = "23505";

/// Discriminated outcome of a waitlist insert. The store translates its own
/// error encoding into this enum so callers never inspect database codes.
#[derive(Debug, thiserror::Error)]
pub enum InsertError {
    #[error("This email is already registered")]
    DuplicateEmail,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Waitlist persistence boundary.
/// NOTE: Intended to facilitate easier testing/mocking
#[async_trait::async_trait]
pub trait WaitlistStore: Send + Sync {
    /// Insert a new entry, returning its generated id
    async fn insert(&self, entry: &NewEntry) -> Result<Uuid, InsertError>;

    /// Fetch every entry, most recent first, normalized on read
    async fn fetch_all(&self) -> anyhow::Result<Vec<WaitlistEntry>>;
}

/// Postgres-backed waitlist store
#[derive(Debug, Clone)]
pub struct PgWaitlistStore {
    pool: PgPool,
}

impl PgWaitlistStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl WaitlistStore for PgWaitlistStore {
    #[tracing::instrument(name = "Insert waitlist entry", skip(self, entry))]
    async fn insert(&self, entry: &NewEntry) -> Result<Uuid, InsertError> {
        let (notify_creator_tools, suggestions, story_idea, file_url) = match &entry.details {
            SignupDetails::Reader { suggestions } => (false, suggestions.as_deref(), None, None),
            SignupDetails::Creator {
                notify_creator_tools,
                story_idea,
                file_url,
            } => (
                *notify_creator_tools,
                None,
                story_idea.as_deref(),
                file_url.as_deref(),
            ),
        };

        let (id,): (Uuid,) = sqlx::query_as(
            "insert into waitlist \
             (email, role, mobile, notify_creator_tools, suggestions, story_idea, file_url) \
             values ($1, $2, $3, $4, $5, $6, $7) returning id",
        )
        .bind(entry.email.as_ref())
        .bind(entry.details.role().as_str())
        .bind(entry.mobile.as_ref().map(|m| m.as_ref()))
        .bind(notify_creator_tools)
        .bind(suggestions)
        .bind(story_idea)
        .bind(file_url)
        .fetch_one(&self.pool)
        .await
        .map_err(into_insert_error)?;

        Ok(id)
    }

    #[tracing::instrument(name = "Fetch all waitlist entries", skip(self))]
    async fn fetch_all(&self) -> anyhow::Result<Vec<WaitlistEntry>> {
        let rows: Vec<StoredEntry> = sqlx::query_as(
            "select id, email, role, mobile, notify_creator_tools, \
             suggestions, story_idea, file_url, created_at \
             from waitlist order by created_at desc",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(WaitlistEntry::from_stored).collect())
    }
}

fn into_insert_error(error: sqlx::Error) -> InsertError {
    if let sqlx::Error::Database(db_error) = &error {
        if db_error.code().as_deref() == Some(UNIQUE_VIOLATION) {
            return InsertError::DuplicateEmail;
        }
    }
    InsertError::Other(anyhow::Error::new(error).context("Failed to insert waitlist entry"))
}
