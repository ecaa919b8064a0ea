use serde_json::json;

use uuid::Uuid;

use crate::helpers::TestApp;

const CHROME_DESKTOP: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) \
     Chrome/120.0.0.0 Safari/537.36";

#[tokio::test]
async fn tracking_records_a_classified_page_view() {
    let app = TestApp::spawn().await;

    let body = json!({"page_path": "/", "referrer": "https://google.com"});
    let res = app.track_view(&body, Some(CHROME_DESKTOP)).await;

    assert_eq!(201, res.status().as_u16());
    let response: serde_json::Value = res.json().await.expect("Failed to parse track response");
    let session_id = response["session_id"]
        .as_str()
        .expect("Response carried no session id");
    assert!(session_id.parse::<Uuid>().is_ok());

    let views = app.views.views();
    assert_eq!(1, views.len());
    assert_eq!("/", views[0].page_path);
    assert_eq!(Some("https://google.com"), views[0].referrer.as_deref());
    assert_eq!("desktop", views[0].device_type);
    assert_eq!("Chrome", views[0].browser);
    assert_eq!("Windows", views[0].os);
    assert_eq!(Some(CHROME_DESKTOP), views[0].user_agent.as_deref());
}

#[tokio::test]
async fn tracking_reuses_a_supplied_session_id() {
    let app = TestApp::spawn().await;
    let session_id = Uuid::new_v4();

    let body = json!({"page_path": "/waitlist", "session_id": session_id});
    let res = app.track_view(&body, None).await;

    assert_eq!(201, res.status().as_u16());
    let response: serde_json::Value = res.json().await.expect("Failed to parse track response");
    assert_eq!(session_id.to_string(), response["session_id"]);

    assert_eq!(session_id, app.views.views()[0].session_id);
}

#[tokio::test]
async fn invalid_page_paths_are_rejected_with_400() {
    let app = TestApp::spawn().await;

    let cases = vec![
        (json!({"page_path": ""}), "empty path"),
        (json!({"page_path": "no-leading-slash"}), "relative path"),
        (
            json!({"page_path": format!("/{}", "x".repeat(3000))}),
            "overlong path",
        ),
    ];

    for (body, description) in cases {
        let res = app.track_view(&body, None).await;
        assert_eq!(
            400,
            res.status().as_u16(),
            "expected 400 for {}",
            description
        );
    }
    assert_eq!(0, app.views.len());
}

#[tokio::test]
async fn analytics_report_requires_a_session_token() {
    let app = TestApp::spawn().await;

    let res = app
        .client
        .get(format!("{}/admin/analytics", app.addr))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(401, res.status().as_u16());
}

#[tokio::test]
async fn analytics_report_counts_views_visitors_and_sessions() {
    let app = TestApp::spawn().await;
    app.seed_view("/", Some("203.0.113.1")).await;
    app.seed_view("/", Some("203.0.113.1")).await;
    app.seed_view("/waitlist", Some("203.0.113.2")).await;

    let token = app.admin_token().await;
    let report: serde_json::Value = app
        .admin_get("analytics", &token)
        .await
        .json()
        .await
        .expect("Failed to parse analytics response");

    assert_eq!(3, report["overall"]["total_views"]);
    assert_eq!(2, report["overall"]["unique_visitors"]);
    assert_eq!(3, report["overall"]["total_sessions"]);
    assert_eq!(3, report["overall"]["today_views"]);

    // Everything was seeded just now, so the summary has one bucket per page
    let summary = report["summary"].as_array().unwrap();
    assert_eq!(2, summary.len());
    assert_eq!("/", summary[0]["page_path"]);
    assert_eq!(2, summary[0]["total_views"]);
    assert_eq!(1, summary[0]["unique_visitors"]);
    assert_eq!("/waitlist", summary[1]["page_path"]);
}
