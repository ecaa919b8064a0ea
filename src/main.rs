use std::net::TcpListener;
use std::sync::Arc;

use anyhow::Context;

use sqlx::PgPool;

use voomics_waitlist::app;
use voomics_waitlist::client::StorageClient;
use voomics_waitlist::crypto::SigningKey;
use voomics_waitlist::repo::{PageViewStore, PgPageViewStore, PgWaitlistStore, WaitlistStore};
use voomics_waitlist::settings::Settings;
use voomics_waitlist::telemetry;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().expect("Failed to load settings");

    let subscriber = telemetry::create_subscriber("info".into(), std::io::stdout);
    telemetry::set_subscriber(subscriber)?;

    let pool = PgPool::connect_with(settings.database.with_db()).await?;
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run database migrations")?;

    let store: Arc<dyn WaitlistStore> = Arc::new(PgWaitlistStore::new(pool.clone()));
    let views: Arc<dyn PageViewStore> = Arc::new(PgPageViewStore::new(pool));

    let signing_key = SigningKey::new(settings.app.secret_key())?;

    let file_store = StorageClient::new(
        settings.storage.api_base_url(),
        settings.storage.bucket().to_string(),
        settings.storage.api_auth_token(),
        settings.storage.api_timeout(),
    )?;

    let listener = TcpListener::bind(settings.app.addr())?;

    app::run(
        listener,
        store,
        views,
        file_store,
        signing_key,
        settings.admin.credentials(),
    )?
    .await
    .context("Failed to run app")
}
