use anyhow::Result;
use reqwest::{header::CONTENT_DISPOSITION, StatusCode};
use serde_json::Value;
use wiremock::{
    matchers::{any, method, path},
    Mock, ResponseTemplate,
};

use crate::helpers::TestApp;

const VALID_FORM: [(&str, &str); 3] = [
    ("firstName", "Ursula"),
    ("lastName", "Le Guin"),
    ("email", "le_guin@gmail.com"),
];

fn content_disposition(res: &reqwest::Response) -> Option<String> {
    res.headers()
        .get(CONTENT_DISPOSITION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

#[tokio::test]
async fn landing_page_ok() -> Result<()> {
    let app = TestApp::spawn().await?;

    let res = app.http_client.get(app.url("/")).send().await?;

    assert_eq!(res.status(), StatusCode::OK);
    let body = res.text().await?;
    assert!(body.contains(&app.download.display_name));
    assert!(body.contains(&app.download.file_size));
    assert!(body.contains(r#"action="/download""#));

    Ok(())
}

#[tokio::test]
async fn files_serves_the_configured_file_as_attachment() -> Result<()> {
    let app = TestApp::spawn().await?;

    let res = app
        .http_client
        .get(app.url(&format!("/{}", app.download.file_url())))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        content_disposition(&res),
        Some(format!("attachment; filename=\"{}\"", app.download.file_name))
    );
    let bytes = res.bytes().await?;
    let expected = tokio::fs::read(app.download.file_path()).await?;
    assert_eq!(bytes.as_ref(), expected.as_slice());

    Ok(())
}

#[tokio::test]
async fn files_other_names_are_404() -> Result<()> {
    let app = TestApp::spawn().await?;

    for name in ["other.pdf", "..%2FCargo.toml", "base.toml"] {
        let res = app
            .http_client
            .get(app.url(&format!("/files/{name}")))
            .send()
            .await?;

        assert_eq!(res.status(), StatusCode::NOT_FOUND, "{name}");
        let body: Value = res.json().await?;
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Not found");
    }

    Ok(())
}

#[tokio::test]
async fn download_form_valid_creates_contact_and_sends_file() -> Result<()> {
    let app = TestApp::spawn().await?;

    Mock::given(path("/contacts"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&app.contact_server)
        .await;

    let res = app.post_download_form(&VALID_FORM).await?;

    assert_eq!(res.status(), StatusCode::OK);
    assert!(content_disposition(&res).is_some_and(|cd| cd.starts_with("attachment")));

    Ok(())
}

#[tokio::test]
async fn download_form_invalid_rerenders_page_with_feedback() -> Result<()> {
    let app = TestApp::spawn().await?;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.contact_server)
        .await;

    let res = app
        .post_download_form(&[
            ("firstName", "Ursula"),
            ("lastName", "L"),
            ("email", "le_guin@gmail.com"),
        ])
        .await?;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert!(content_disposition(&res).is_none());
    let body = res.text().await?;
    assert!(body.contains("Must be at least 2 characters"));
    assert!(body.contains("Please fix the errors in the form"));
    assert!(body.contains(r#"value="Ursula""#));

    Ok(())
}

#[tokio::test]
async fn download_form_mailing_list_failure_sends_no_file() -> Result<()> {
    let app = TestApp::spawn().await?;

    Mock::given(path("/contacts"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&app.contact_server)
        .await;

    let res = app.post_download_form(&VALID_FORM).await?;

    assert_eq!(res.status(), StatusCode::BAD_GATEWAY);
    assert!(content_disposition(&res).is_none());
    let body = res.text().await?;
    assert!(body.contains("Failed to create contact"));

    Ok(())
}
