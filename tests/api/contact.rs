use crate::helpers::{spawn_app, valid_contact_body};
use wiremock::matchers::{any, method, path};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn send_email_returns_400_when_any_field_is_missing_or_empty() {
    let app = spawn_app().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.email_server)
        .await;

    let test_cases = vec![
        (
            serde_json::json!({ "email": "ursula@example.com", "message": "hi" }),
            "missing name",
        ),
        (
            serde_json::json!({ "name": "Ursula", "message": "hi" }),
            "missing email",
        ),
        (
            serde_json::json!({ "name": "Ursula", "email": "ursula@example.com" }),
            "missing message",
        ),
        (serde_json::json!({}), "missing everything"),
        (
            serde_json::json!({ "name": "", "email": "ursula@example.com", "message": "hi" }),
            "empty name",
        ),
        (
            serde_json::json!({ "name": "Ursula", "email": "", "message": "hi" }),
            "empty email",
        ),
        (
            serde_json::json!({ "name": "Ursula", "email": "ursula@example.com", "message": "" }),
            "empty message",
        ),
    ];

    for (body, description) in test_cases {
        let response = app.post_contact(body).await;

        assert_eq!(
            response.status().as_u16(),
            400,
            "The API did not return 400 when the payload was {}",
            description
        );
        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body["msg"], "Please fill in all fields");
    }
}

#[tokio::test]
async fn a_valid_submission_sends_exactly_one_email_to_the_operator() {
    let app = spawn_app().await;

    Mock::given(path("/email"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&app.email_server)
        .await;

    let response = app.post_contact(valid_contact_body()).await;

    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["msg"], "Message sent successfully!");
}

#[tokio::test]
async fn the_relayed_email_carries_the_submission_fields() {
    let app = spawn_app().await;

    Mock::given(path("/email"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&app.email_server)
        .await;

    app.post_contact(valid_contact_body()).await;

    let email_request = &app.email_server.received_requests().await.unwrap()[0];
    let body: serde_json::Value = serde_json::from_slice(&email_request.body).unwrap();

    let subject = body["Subject"].as_str().unwrap();
    assert!(subject.contains("Ursula K. Le Guin"));

    let text = body["TextContent"].as_str().unwrap();
    assert!(text.contains("Ursula K. Le Guin"));
    assert!(text.contains("ursula@example.com"));
    assert!(text.contains("I would like a website for my bakery."));

    let html = body["HtmlContent"].as_str().unwrap();
    assert!(html.contains("Ursula K. Le Guin"));
    assert!(html.contains("ursula@example.com"));
}

#[tokio::test]
async fn markup_in_the_message_is_escaped_in_the_html_body() {
    let app = spawn_app().await;

    Mock::given(path("/email"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&app.email_server)
        .await;

    app.post_contact(serde_json::json!({
        "name": "Ursula",
        "email": "ursula@example.com",
        "message": "<script>alert('hi')</script>"
    }))
    .await;

    let email_request = &app.email_server.received_requests().await.unwrap()[0];
    let body: serde_json::Value = serde_json::from_slice(&email_request.body).unwrap();

    let html = body["HtmlContent"].as_str().unwrap();
    assert!(!html.contains("<script>"));
    assert!(html.contains("&lt;script&gt;"));
}

#[tokio::test]
async fn send_email_returns_500_with_the_transport_error_when_delivery_fails() {
    let app = spawn_app().await;

    Mock::given(path("/email"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&app.email_server)
        .await;

    let response = app.post_contact(valid_contact_body()).await;

    assert_eq!(response.status().as_u16(), 500);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["msg"], "Failed to send message.");
    let error = body["error"].as_str().unwrap();
    assert!(error.contains("500"));
}

#[tokio::test]
async fn identical_submissions_produce_independent_emails() {
    let app = spawn_app().await;

    Mock::given(path("/email"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(2)
        .mount(&app.email_server)
        .await;

    let first = app.post_contact(valid_contact_body()).await;
    let second = app.post_contact(valid_contact_body()).await;

    assert_eq!(first.status().as_u16(), 200);
    assert_eq!(second.status().as_u16(), 200);
}
