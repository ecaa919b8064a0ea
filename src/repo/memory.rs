use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use chrono::Utc;

use uuid::Uuid;

use crate::model::{NewEntry, NewPageView, PageView, WaitlistEntry};

use super::{InsertError, PageViewStore, WaitlistStore};

/// In-memory waitlist store. Enforces the same email uniqueness the real
/// store does, so the duplicate path is exercisable without a database,
/// and can be toggled to fail like an unreachable one.
#[derive(Debug, Default)]
pub struct InMemoryWaitlistStore {
    rows: Mutex<Vec<WaitlistEntry>>,
    fail_inserts: AtomicBool,
    fail_fetches: AtomicBool,
}

impl InMemoryWaitlistStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries
    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of the stored entries, insertion order
    pub fn entries(&self) -> Vec<WaitlistEntry> {
        self.rows.lock().unwrap().clone()
    }

    /// Make subsequent inserts fail with a non-duplicate error
    pub fn fail_inserts(&self, fail: bool) {
        self.fail_inserts.store(fail, Ordering::SeqCst);
    }

    /// Make subsequent fetches fail
    pub fn fail_fetches(&self, fail: bool) {
        self.fail_fetches.store(fail, Ordering::SeqCst);
    }
}

#[async_trait::async_trait]
impl WaitlistStore for InMemoryWaitlistStore {
    async fn insert(&self, entry: &NewEntry) -> Result<Uuid, InsertError> {
        if self.fail_inserts.load(Ordering::SeqCst) {
            return Err(InsertError::Other(anyhow::anyhow!("Waitlist store offline")));
        }

        let mut rows = self.rows.lock().unwrap();

        if rows.iter().any(|row| row.email == entry.email.as_ref()) {
            return Err(InsertError::DuplicateEmail);
        }

        let stored = WaitlistEntry {
            id: Uuid::new_v4(),
            email: entry.email.to_string(),
            mobile: entry.mobile.as_ref().map(|m| m.to_string()),
            created_at: Utc::now(),
            details: entry.details.clone(),
        };
        let id = stored.id;
        rows.push(stored);

        Ok(id)
    }

    async fn fetch_all(&self) -> anyhow::Result<Vec<WaitlistEntry>> {
        if self.fail_fetches.load(Ordering::SeqCst) {
            anyhow::bail!("Waitlist store offline");
        }

        let mut rows = self.rows.lock().unwrap().clone();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }
}

/// In-memory page view store
#[derive(Debug, Default)]
pub struct InMemoryPageViewStore {
    rows: Mutex<Vec<PageView>>,
}

impl InMemoryPageViewStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    /// Snapshot of the recorded views, insertion order
    pub fn views(&self) -> Vec<PageView> {
        self.rows.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl PageViewStore for InMemoryPageViewStore {
    async fn insert(&self, view: &NewPageView) -> anyhow::Result<Uuid> {
        let stored = PageView {
            id: Uuid::new_v4(),
            page_path: view.page_path.clone(),
            session_id: view.session_id,
            visitor_ip: view.visitor_ip.clone(),
            user_agent: view.user_agent.clone(),
            referrer: view.referrer.clone(),
            device_type: view.device_type.clone(),
            browser: view.browser.clone(),
            os: view.os.clone(),
            created_at: Utc::now(),
        };
        let id = stored.id;
        self.rows.lock().unwrap().push(stored);

        Ok(id)
    }

    async fn fetch_all(&self) -> anyhow::Result<Vec<PageView>> {
        let mut rows = self.rows.lock().unwrap().clone();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }
}
