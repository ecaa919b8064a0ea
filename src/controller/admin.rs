use actix_web::dev::HttpServiceFactory;
use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::{get, post, web, HttpRequest, HttpResponse, Responder};

use chrono::{DateTime, Local, Utc};

use serde::{Deserialize, Serialize};

use uuid::Uuid;

use crate::analytics::{page_view_summary, OverallAnalytics, PageViewSummary};
use crate::auth::{AdminCredentials, AdminIdentity, Administrator, Credentials};
use crate::crypto::SigningKey;
use crate::error::{RestError, RestResult};
use crate::export;
use crate::model::{Role, WaitlistEntry};
use crate::report::{EntryFilter, SignupReport};
use crate::repo::{PageViewStore, WaitlistStore};

#[derive(Debug, Serialize)]
struct LoginResponse {
    token: String,
    admin: AdminIdentity,
}

#[tracing::instrument(name = "Admin login", skip_all)]
#[post("/login")]
async fn login(
    req: HttpRequest,
    admin_credentials: web::Data<AdminCredentials>,
    signing_key: web::Data<SigningKey>,
) -> RestResult<impl Responder> {
    let creds = Credentials::from_headers(req.headers())
        .map_err(|_| RestError::Unauthorized("Missing credentials".into()))?;

    let identity = admin_credentials
        .check(&creds.username, creds.password)
        .await?
        .ok_or_else(|| RestError::Unauthorized("Invalid email or password".into()))?;

    let token = identity.sign_token(signing_key.get_ref())?;

    Ok(web::Json(LoginResponse {
        token,
        admin: identity,
    }))
}

/// The session lives in the bearer token held by the client, so logout only
/// acknowledges. Calling it repeatedly is harmless.
#[tracing::instrument(name = "Admin logout")]
#[post("/logout")]
async fn logout() -> impl Responder {
    HttpResponse::NoContent()
}

/// Flat response shape for the dashboard table
#[derive(Debug, Serialize)]
struct EntryDto {
    id: Uuid,
    email: String,
    role: Role,
    mobile: Option<String>,
    notify_creator_tools: bool,
    suggestions: Option<String>,
    story_idea: Option<String>,
    file_url: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<WaitlistEntry> for EntryDto {
    fn from(entry: WaitlistEntry) -> Self {
        Self {
            id: entry.id,
            role: entry.role(),
            notify_creator_tools: entry.notify_creator_tools(),
            suggestions: entry.suggestions().map(str::to_string),
            story_idea: entry.story_idea().map(str::to_string),
            file_url: entry.file_url().map(str::to_string),
            email: entry.email,
            mobile: entry.mobile,
            created_at: entry.created_at,
        }
    }
}

#[tracing::instrument(name = "List waitlist entries", skip_all)]
#[get("/waitlist")]
async fn list(
    _admin: Administrator,
    filter: web::Query<EntryFilter>,
    store: web::Data<dyn WaitlistStore>,
) -> RestResult<impl Responder> {
    let entries = store.fetch_all().await.map_err(fetch_failure)?;
    let entries = filter.into_inner().apply(entries);

    let entries: Vec<EntryDto> = entries.into_iter().map(Into::into).collect();
    Ok(web::Json(entries))
}

#[tracing::instrument(name = "Waitlist report", skip_all)]
#[get("/waitlist/stats")]
async fn stats(
    _admin: Administrator,
    store: web::Data<dyn WaitlistStore>,
) -> RestResult<impl Responder> {
    let entries = store.fetch_all().await.map_err(fetch_failure)?;

    Ok(web::Json(SignupReport::from_entries(&entries)))
}

#[tracing::instrument(name = "Export waitlist CSV", skip_all)]
#[get("/waitlist/export")]
async fn export_csv(
    _admin: Administrator,
    filter: web::Query<EntryFilter>,
    store: web::Data<dyn WaitlistStore>,
) -> RestResult<HttpResponse> {
    let entries = store.fetch_all().await.map_err(fetch_failure)?;
    let entries = filter.into_inner().apply(entries);

    match export::to_csv(&entries) {
        None => Ok(HttpResponse::NoContent().finish()),
        Some(csv) => {
            // Stamped with the admin's calendar day, matching the report buckets
            let filename = export::export_filename(Local::now().date_naive());
            Ok(HttpResponse::Ok()
                .content_type("text/csv; charset=utf-8")
                .insert_header(ContentDisposition {
                    disposition: DispositionType::Attachment,
                    parameters: vec![DispositionParam::Filename(filename)],
                })
                .body(csv))
        }
    }
}

/// Default reporting window for the traffic summary, in days
const DEFAULT_SUMMARY_DAYS: i64 = 30;

#[derive(Debug, Deserialize)]
struct AnalyticsQuery {
    days: Option<i64>,
}

#[derive(Debug, Serialize)]
struct AnalyticsReport {
    overall: OverallAnalytics,
    summary: Vec<PageViewSummary>,
}

#[tracing::instrument(name = "Site analytics report", skip_all)]
#[get("/analytics")]
async fn analytics(
    _admin: Administrator,
    query: web::Query<AnalyticsQuery>,
    views: web::Data<dyn PageViewStore>,
) -> RestResult<impl Responder> {
    let views = views.fetch_all().await.map_err(|error| {
        tracing::error!("Page view fetch failed: {:?}", error);
        RestError::InternalError("Could not retrieve analytics data".into())
    })?;

    let days = query.days.unwrap_or(DEFAULT_SUMMARY_DAYS).clamp(1, 365);

    Ok(web::Json(AnalyticsReport {
        overall: OverallAnalytics::from_views(&views),
        summary: page_view_summary(&views, days),
    }))
}

fn fetch_failure(error: anyhow::Error) -> RestError {
    tracing::error!("Waitlist fetch failed: {:?}", error);
    RestError::InternalError("Could not retrieve waitlist data".into())
}

/// Admin API endpoints. Everything except login/logout requires a valid
/// session token.
pub fn scope() -> impl HttpServiceFactory {
    web::scope("/admin")
        .service(login)
        .service(logout)
        .service(stats)
        .service(export_csv)
        .service(list)
        .service(analytics)
}
