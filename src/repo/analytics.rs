use anyhow::Context;

use sqlx::PgPool;

use uuid::Uuid;

use crate::model::{NewPageView, PageView};

/// Page view persistence boundary.
/// NOTE: Intended to facilitate easier testing/mocking
#[async_trait::async_trait]
pub trait PageViewStore: Send + Sync {
    /// Record a view, returning its generated id
    async fn insert(&self, view: &NewPageView) -> anyhow::Result<Uuid>;

    /// Fetch every recorded view, most recent first
    async fn fetch_all(&self) -> anyhow::Result<Vec<PageView>>;
}

/// Postgres-backed page view store
#[derive(Debug, Clone)]
pub struct PgPageViewStore {
    pool: PgPool,
}

impl PgPageViewStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl PageViewStore for PgPageViewStore {
    #[tracing::instrument(name = "Insert page view", skip(self, view))]
    async fn insert(&self, view: &NewPageView) -> anyhow::Result<Uuid> {
        let (id,): (Uuid,) = sqlx::query_as(
            "insert into page_views \
             (page_path, session_id, visitor_ip, user_agent, referrer, device_type, browser, os) \
             values ($1, $2, $3, $4, $5, $6, $7, $8) returning id",
        )
        .bind(&view.page_path)
        .bind(view.session_id)
        .bind(view.visitor_ip.as_deref())
        .bind(view.user_agent.as_deref())
        .bind(view.referrer.as_deref())
        .bind(&view.device_type)
        .bind(&view.browser)
        .bind(&view.os)
        .fetch_one(&self.pool)
        .await
        .context("Failed to insert page view")?;

        Ok(id)
    }

    #[tracing::instrument(name = "Fetch all page views", skip(self))]
    async fn fetch_all(&self) -> anyhow::Result<Vec<PageView>> {
        let views = sqlx::query_as(
            "select id, page_path, session_id, visitor_ip, user_agent, referrer, \
             device_type, browser, os, created_at \
             from page_views order by created_at desc",
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to fetch page views")?;

        Ok(views)
    }
}
