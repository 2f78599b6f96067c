use std::time::Duration;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};
use wiremock::{
    matchers::{any, body_partial_json, header_exists, method, path},
    Mock, ResponseTemplate,
};

use crate::helpers::TestApp;

#[tokio::test]
async fn create_contact_ok_forwards_trimmed_contact() -> Result<()> {
    let app = TestApp::spawn().await?;

    Mock::given(path("/contacts"))
        .and(method("POST"))
        .and(header_exists("Authorization"))
        .and(body_partial_json(json!({
            "email": "le_guin@gmail.com",
            "first_name": "Ursula",
            "last_name": "Le Guin",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 1})))
        .expect(1)
        .mount(&app.contact_server)
        .await;

    let res = app
        .post_create_contact(&json!({
            "email": " le_guin@gmail.com ",
            "firstName": "Ursula ",
            "lastName": " Le Guin",
        }))
        .await?;

    assert_eq!(
        res.status(),
        StatusCode::OK,
        "Wrong response StatusCode: {}",
        res.status()
    );
    let body: Value = res.json().await?;
    assert_eq!(
        body,
        json!({"success": true, "message": "Contact created successfully"})
    );

    Ok(())
}

#[tokio::test]
async fn create_contact_unprocessable_entity() -> Result<()> {
    let app = TestApp::spawn().await?;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.contact_server)
        .await;

    let tests = [
        (
            json!({
                "firstName": "John",
                "lastName": "Doe",
            }),
            "Missing email",
        ),
        (
            json!({
                "firstName": null,
                "lastName": "Doe",
                "email": "jd@example.com",
            }),
            "Null first name",
        ),
        (
            json!({
                "name": "John Doe",
                "email": "jd@example.com",
            }),
            "Legacy field names",
        ),
        (json!({}), "Empty json"),
    ];

    for (json_request, params) in tests {
        let res = app.post_create_contact(&json_request).await?;
        assert_eq!(
            res.status(),
            StatusCode::UNPROCESSABLE_ENTITY,
            "Wrong response: ({}), Expected: ({}); for request with: {params}",
            res.status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    Ok(())
}

#[tokio::test]
async fn create_contact_returns_a_400_when_fields_are_present_but_invalid() -> Result<()> {
    let app = TestApp::spawn().await?;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.contact_server)
        .await;

    let cases = [
        (
            json!({"firstName": "", "lastName": "Doe", "email": "jd@example.com"}),
            "This field is required",
        ),
        (
            json!({"firstName": "J", "lastName": "Doe", "email": "jd@example.com"}),
            "Must be at least 2 characters",
        ),
        (
            json!({"firstName": "John", "lastName": " D ", "email": "jd@example.com"}),
            "Must be at least 2 characters",
        ),
        (
            json!({"firstName": "John", "lastName": "Doe", "email": ""}),
            "Email is required",
        ),
        (
            json!({"firstName": "John", "lastName": "Doe", "email": "not an email"}),
            "Please enter a valid email",
        ),
    ];

    for (body, expected_message) in cases {
        let response = app.post_create_contact(&body).await?;
        assert_eq!(
            400,
            response.status().as_u16(),
            "The API did not return a 400 BAD REQUEST the payload was {body}."
        );
        assert!(response.headers().contains_key("x-request-id"));

        let res_body: Value = response.json().await?;
        assert_eq!(res_body["success"], false);
        assert_eq!(res_body["message"], expected_message, "payload: {body}");
        assert!(res_body["req_id"].is_string());
    }

    Ok(())
}

#[tokio::test]
async fn create_contact_mailing_list_failure_is_a_502() -> Result<()> {
    let app = TestApp::spawn().await?;

    Mock::given(path("/contacts"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&app.contact_server)
        .await;

    let res = app
        .post_create_contact(&json!({
            "firstName": "Ursula",
            "lastName": "Le Guin",
            "email": "le_guin@gmail.com",
        }))
        .await?;

    assert_eq!(res.status(), StatusCode::BAD_GATEWAY);
    let body: Value = res.json().await?;
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Failed to create contact");

    Ok(())
}

#[tokio::test]
async fn create_contact_mailing_list_timeout_is_a_504() -> Result<()> {
    let app = TestApp::spawn().await?;

    Mock::given(path("/contacts"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(180)))
        .expect(1)
        .mount(&app.contact_server)
        .await;

    let res = app
        .post_create_contact(&json!({
            "firstName": "Ursula",
            "lastName": "Le Guin",
            "email": "le_guin@gmail.com",
        }))
        .await?;

    assert_eq!(res.status(), StatusCode::GATEWAY_TIMEOUT);
    let body: Value = res.json().await?;
    assert_eq!(body["message"], "Mailing list service timed out");

    Ok(())
}

#[tokio::test]
async fn create_contact_cors_preflight_for_allowed_origin() -> Result<()> {
    let app = TestApp::spawn().await?;

    let res = app
        .http_client
        .request(reqwest::Method::OPTIONS, app.url("/api/create-contact"))
        .header("Origin", "http://127.0.0.1:8080")
        .header("Access-Control-Request-Method", "POST")
        .header("Access-Control-Request-Headers", "content-type")
        .send()
        .await?;

    assert!(res.status().is_success());
    assert_eq!(
        res.headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("http://127.0.0.1:8080")
    );

    Ok(())
}
