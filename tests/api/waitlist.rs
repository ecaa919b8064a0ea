use wiremock::matchers::{method, path_regex};
use wiremock::{Mock, ResponseTemplate};

use voomics_waitlist::model::Role;

use crate::helpers::{creator_form, reader_form, with_png_attachment, TestApp};

#[tokio::test]
async fn valid_reader_signup_is_persisted() {
    let app = TestApp::spawn().await;

    let form = reader_form("reader@test.com").text("suggestions", "More horror comics");
    let res = app.submit_signup(form).await;

    assert_eq!(201, res.status().as_u16());

    let entries = app.store.entries();
    assert_eq!(1, entries.len());
    assert_eq!("reader@test.com", entries[0].email);
    assert_eq!(Role::Reader, entries[0].role());
    assert_eq!(Some("More horror comics"), entries[0].suggestions());
}

#[tokio::test]
async fn valid_creator_signup_is_persisted() {
    let app = TestApp::spawn().await;

    let res = app.submit_signup(creator_form("creator@test.com")).await;

    assert_eq!(201, res.status().as_u16());

    let entries = app.store.entries();
    assert_eq!(1, entries.len());
    assert_eq!(Role::Creator, entries[0].role());
    assert_eq!(Some("9876543210".to_string()), entries[0].mobile);
    assert!(entries[0].notify_creator_tools());
    assert_eq!(
        Some("A slice-of-life webcomic about chai stalls"),
        entries[0].story_idea()
    );
}

#[tokio::test]
async fn invalid_fields_are_rejected_with_400() {
    let app = TestApp::spawn().await;

    let cases = vec![
        (reader_form("not-an-email"), "malformed email"),
        (reader_form("missing@tld"), "email without a dot in the domain"),
        (
            reader_form("reader@test.com").text("mobile", "1234567890"),
            "mobile not starting with 6-9",
        ),
        (
            reader_form("reader@test.com").text("mobile", "98765"),
            "mobile shorter than 10 digits",
        ),
        (
            reqwest::multipart::Form::new()
                .text("role", "moderator")
                .text("email", "reader@test.com"),
            "unrecognized role",
        ),
    ];

    for (form, description) in cases {
        let res = app.submit_signup(form).await;
        assert_eq!(
            400,
            res.status().as_u16(),
            "expected 400 for {}",
            description
        );
    }
    assert!(app.store.is_empty());
}

#[tokio::test]
async fn duplicate_email_is_rejected_with_409() {
    let app = TestApp::spawn().await;

    let first = app.submit_signup(reader_form("dupe@test.com")).await;
    assert_eq!(201, first.status().as_u16());

    let second = app.submit_signup(creator_form("dupe@test.com")).await;
    assert_eq!(409, second.status().as_u16());

    assert_eq!(1, app.store.len());
}

#[tokio::test]
async fn creator_attachment_is_uploaded_and_linked() {
    let app = TestApp::spawn().await;

    Mock::given(method("POST"))
        .and(path_regex(r"^/object/waitlist-files/creator_.*\.png$"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&app.storage_server)
        .await;

    let form = with_png_attachment(creator_form("creator@test.com"));
    let res = app.submit_signup(form).await;

    assert_eq!(201, res.status().as_u16());

    let entries = app.store.entries();
    let file_url = entries[0].file_url().expect("entry carried no file URL");
    assert!(
        file_url.contains("/object/public/waitlist-files/creator_"),
        "unexpected file URL: {}",
        file_url
    );
    assert!(file_url.ends_with(".png"), "unexpected file URL: {}", file_url);
}

#[tokio::test]
async fn storage_failure_yields_502_and_no_row() {
    let app = TestApp::spawn().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&app.storage_server)
        .await;

    let form = with_png_attachment(creator_form("creator@test.com"));
    let res = app.submit_signup(form).await;

    assert_eq!(502, res.status().as_u16());
    assert!(app.store.is_empty());
}

#[tokio::test]
async fn failed_insert_cleans_up_the_uploaded_attachment() {
    let app = TestApp::spawn().await;

    let first = app.submit_signup(reader_form("dupe@test.com")).await;
    assert_eq!(201, first.status().as_u16());

    Mock::given(method("POST"))
        .and(path_regex(r"^/object/waitlist-files/creator_.*\.png$"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&app.storage_server)
        .await;
    Mock::given(method("DELETE"))
        .and(path_regex(r"^/object/waitlist-files/creator_.*\.png$"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&app.storage_server)
        .await;

    let form = with_png_attachment(creator_form("dupe@test.com"));
    let res = app.submit_signup(form).await;

    assert_eq!(409, res.status().as_u16());
    assert_eq!(1, app.store.len());
}

#[tokio::test]
async fn insert_failure_yields_500() {
    let app = TestApp::spawn().await;
    app.store.fail_inserts(true);

    let res = app.submit_signup(reader_form("reader@test.com")).await;

    assert_eq!(500, res.status().as_u16());
    let body = res.text().await.expect("Failed to read response body");
    assert!(body.contains("Database error"), "{}", body);
    assert!(app.store.is_empty());
}

#[tokio::test]
async fn reader_attachment_is_ignored() {
    let app = TestApp::spawn().await;

    let form = with_png_attachment(reader_form("reader@test.com"));
    let res = app.submit_signup(form).await;

    assert_eq!(201, res.status().as_u16());

    let requests = app
        .storage_server
        .received_requests()
        .await
        .unwrap_or_default();
    assert!(requests.is_empty(), "file store was called for a reader");
}

#[tokio::test]
async fn oversized_attachment_is_rejected_with_400() {
    let app = TestApp::spawn().await;

    let oversized = reqwest::multipart::Part::bytes(vec![0u8; 5 * 1024 * 1024 + 1])
        .file_name("huge.png")
        .mime_str("image/png")
        .expect("Failed to build file part");
    let form = creator_form("creator@test.com").part("file", oversized);

    let res = app.submit_signup(form).await;

    assert_eq!(400, res.status().as_u16());
    assert!(app.store.is_empty());
}
