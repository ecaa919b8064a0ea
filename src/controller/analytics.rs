use actix_web::dev::HttpServiceFactory;
use actix_web::http::header;
use actix_web::{post, web, HttpRequest, HttpResponse, Responder};

use serde::{Deserialize, Serialize};

use uuid::Uuid;

use crate::analytics::ClientInfo;
use crate::error::{RestError, RestResult};
use crate::model::NewPageView;
use crate::repo::PageViewStore;

const MAX_PAGE_PATH_LEN: usize = 2048;

#[derive(Debug, Deserialize)]
pub struct TrackRequest {
    page_path: String,
    referrer: Option<String>,
    /// Absent on the client's first view; the response carries the id to
    /// reuse for the rest of the session
    session_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
struct TrackResponse {
    session_id: Uuid,
}

/// Record a page view. Device, browser, and OS are classified from the
/// User-Agent header; the visitor IP comes from the connection.
#[tracing::instrument(name = "Track page view", skip_all)]
#[post("/views")]
async fn track(
    req: HttpRequest,
    body: web::Json<TrackRequest>,
    store: web::Data<dyn PageViewStore>,
) -> RestResult<impl Responder> {
    let body = body.into_inner();

    if body.page_path.is_empty() || !body.page_path.starts_with('/') {
        return Err(RestError::ValidationError(
            "Page path must start with '/'".into(),
        ));
    }
    if body.page_path.len() > MAX_PAGE_PATH_LEN {
        return Err(RestError::ValidationError("Page path too long".into()));
    }

    let user_agent = req
        .headers()
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let client = ClientInfo::from_user_agent(user_agent.as_deref());

    let connection = req.connection_info();
    let visitor_ip = connection.realip_remote_addr().map(str::to_string);

    let session_id = body.session_id.unwrap_or_else(Uuid::new_v4);

    let view = NewPageView {
        page_path: body.page_path,
        session_id,
        visitor_ip,
        user_agent,
        referrer: body.referrer.filter(|r| !r.is_empty()),
        device_type: client.device_type.into(),
        browser: client.browser.into(),
        os: client.os.into(),
    };

    store.insert(&view).await.map_err(|error| {
        tracing::error!("Page view insert failed: {:?}", error);
        RestError::InternalError("Could not record page view".into())
    })?;

    Ok(HttpResponse::Created().json(TrackResponse { session_id }))
}

/// Public analytics API endpoints
pub fn scope() -> impl HttpServiceFactory {
    web::scope("/analytics").service(track)
}
