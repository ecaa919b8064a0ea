use voomics_waitlist::model::SignupDetails;

use crate::helpers::{TestApp, ADMIN_EMAIL, ADMIN_PASSWORD};

#[tokio::test]
async fn login_with_valid_credentials_returns_a_session_token() {
    let app = TestApp::spawn().await;

    let res = app.login(ADMIN_EMAIL, ADMIN_PASSWORD).await;
    assert_eq!(200, res.status().as_u16());

    let body: serde_json::Value = res.json().await.expect("Failed to parse login response");
    assert!(!body["token"].as_str().unwrap_or_default().is_empty());
    assert_eq!(ADMIN_EMAIL, body["admin"]["email"].as_str().unwrap());
}

#[tokio::test]
async fn login_with_wrong_password_is_rejected() {
    let app = TestApp::spawn().await;

    let res = app.login(ADMIN_EMAIL, "not the password").await;

    assert_eq!(401, res.status().as_u16());
}

#[tokio::test]
async fn login_with_unknown_email_is_rejected() {
    let app = TestApp::spawn().await;

    let res = app.login("intruder@test.com", ADMIN_PASSWORD).await;

    assert_eq!(401, res.status().as_u16());
}

#[tokio::test]
async fn admin_endpoints_require_a_session_token() {
    let app = TestApp::spawn().await;

    for path in ["waitlist", "waitlist/stats", "waitlist/export"] {
        let res = app
            .client
            .get(format!("{}/admin/{}", app.addr, path))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(401, res.status().as_u16(), "no token, path {}", path);

        let res = app.admin_get(path, "not-a-real-token").await;
        assert_eq!(401, res.status().as_u16(), "corrupt token, path {}", path);
    }
}

#[tokio::test]
async fn list_returns_entries_and_honors_filters() {
    let app = TestApp::spawn().await;
    app.seed(
        "reader@test.com",
        SignupDetails::Reader {
            suggestions: Some("More horror comics".into()),
        },
    )
    .await;
    app.seed(
        "creator1@test.com",
        SignupDetails::Creator {
            notify_creator_tools: true,
            story_idea: Some("Chai stall chronicles".into()),
            file_url: None,
        },
    )
    .await;
    app.seed(
        "creator2@test.com",
        SignupDetails::Creator {
            notify_creator_tools: false,
            story_idea: None,
            file_url: None,
        },
    )
    .await;

    let token = app.admin_token().await;

    let all: serde_json::Value = app
        .admin_get("waitlist", &token)
        .await
        .json()
        .await
        .expect("Failed to parse list response");
    assert_eq!(3, all.as_array().unwrap().len());

    let creators: serde_json::Value = app
        .admin_get("waitlist?role=creator", &token)
        .await
        .json()
        .await
        .expect("Failed to parse list response");
    assert_eq!(2, creators.as_array().unwrap().len());

    let notify: serde_json::Value = app
        .admin_get("waitlist?notify_only=true", &token)
        .await
        .json()
        .await
        .expect("Failed to parse list response");
    assert_eq!(1, notify.as_array().unwrap().len());
    assert_eq!(
        "creator1@test.com",
        notify[0]["email"].as_str().unwrap()
    );

    let searched: serde_json::Value = app
        .admin_get("waitlist?search=chai", &token)
        .await
        .json()
        .await
        .expect("Failed to parse list response");
    assert_eq!(1, searched.as_array().unwrap().len());
}

#[tokio::test]
async fn fetch_failure_yields_500_on_every_waitlist_view() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;
    app.store.fail_fetches(true);

    for path in ["waitlist", "waitlist/stats", "waitlist/export"] {
        let res = app.admin_get(path, &token).await;
        assert_eq!(500, res.status().as_u16(), "path {}", path);

        let body = res.text().await.expect("Failed to read response body");
        assert!(
            body.contains("Could not retrieve waitlist data"),
            "path {}: {}",
            path,
            body
        );
    }
}

#[tokio::test]
async fn stats_reports_totals_and_percentages() {
    let app = TestApp::spawn().await;
    for email in ["reader1@test.com", "reader2@test.com"] {
        app.seed(email, SignupDetails::Reader { suggestions: None })
            .await;
    }
    app.seed(
        "creator@test.com",
        SignupDetails::Creator {
            notify_creator_tools: true,
            story_idea: None,
            file_url: None,
        },
    )
    .await;

    let token = app.admin_token().await;
    let report: serde_json::Value = app
        .admin_get("waitlist/stats", &token)
        .await
        .json()
        .await
        .expect("Failed to parse stats response");

    assert_eq!(3, report["summary"]["total_signups"]);
    assert_eq!(2, report["summary"]["reader_count"]);
    assert_eq!(67, report["summary"]["reader_pct"]);
    assert_eq!(33, report["summary"]["creator_pct"]);
    assert_eq!(1, report["summary"]["notify_count"]);

    // Seeded in one go, so a single daily bucket carrying everything
    assert_eq!(1, report["daily_signups"].as_array().unwrap().len());
    assert_eq!(3, report["cumulative_signups"][0]["total"]);
}

#[tokio::test]
async fn export_returns_a_csv_attachment() {
    let app = TestApp::spawn().await;
    app.seed(
        "reader@test.com",
        SignupDetails::Reader {
            suggestions: Some(r#"He said "hi""#.into()),
        },
    )
    .await;

    let token = app.admin_token().await;
    let res = app.admin_get("waitlist/export", &token).await;

    assert_eq!(200, res.status().as_u16());
    let content_type = res
        .headers()
        .get("Content-Type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.starts_with("text/csv"));

    let disposition = res
        .headers()
        .get("Content-Disposition")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    let expected_name = format!(
        "waitlist_data_{}.csv",
        chrono::Local::now().date_naive().format("%Y-%m-%d")
    );
    assert!(disposition.contains(&expected_name), "{}", disposition);

    let body = res.text().await.expect("Failed to read export body");
    let header = body.lines().next().unwrap_or_default();
    assert_eq!(
        "ID,Email,Role,Mobile,Notify Creator Tools,Suggestions,Story Idea,File URL,Created At",
        header
    );
    assert!(body.contains(r#""He said ""hi""""#), "{}", body);
}

#[tokio::test]
async fn export_of_an_empty_waitlist_is_204() {
    let app = TestApp::spawn().await;

    let token = app.admin_token().await;
    let res = app.admin_get("waitlist/export", &token).await;

    assert_eq!(204, res.status().as_u16());
}

#[tokio::test]
async fn logout_is_idempotent() {
    let app = TestApp::spawn().await;

    for _ in 0..2 {
        let res = app
            .client
            .post(format!("{}/admin/logout", app.addr))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(204, res.status().as_u16());
    }
}
