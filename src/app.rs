use std::net::TcpListener;
use std::sync::Arc;

use actix_multipart::form::MultipartFormConfig;
use actix_web::dev::Server;
use actix_web::{get, HttpResponse, Responder};
use actix_web::{web, App, HttpServer};

use tracing_actix_web::TracingLogger;

use crate::auth::AdminCredentials;
use crate::client::StorageClient;
use crate::controller::{admin, analytics, waitlist};
use crate::crypto::SigningKey;
use crate::repo::{PageViewStore, WaitlistStore};

/// Simple health-check endpoint
#[tracing::instrument(name = "Health check")]
#[get("/health_check")]
async fn health_check() -> impl Responder {
    HttpResponse::Ok().body("I am alive")
}

/// Run the application on a specified TCP listener
pub fn run(
    listener: TcpListener,
    store: Arc<dyn WaitlistStore>,
    views: Arc<dyn PageViewStore>,
    file_store: StorageClient,
    signing_key: SigningKey,
    admin_credentials: AdminCredentials,
) -> anyhow::Result<Server> {
    // Wrap application data
    let store = web::Data::from(store);
    let views = web::Data::from(views);
    let file_store = web::Data::new(file_store);
    let signing_key = web::Data::new(signing_key);
    let admin_credentials = web::Data::new(admin_credentials);

    // Attachments are validated at 5MiB; leave headroom above that so the
    // size rule produces the validation message instead of a payload error
    let multipart_config = MultipartFormConfig::default()
        .memory_limit(8 * 1024 * 1024)
        .total_limit(10 * 1024 * 1024);

    // Start the server
    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(store.clone())
            .app_data(views.clone())
            .app_data(file_store.clone())
            .app_data(signing_key.clone())
            .app_data(admin_credentials.clone())
            .app_data(multipart_config.clone())
            .service(health_check)
            .service(waitlist::scope())
            .service(analytics::scope())
            .service(admin::scope())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
