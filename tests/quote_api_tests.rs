mod common;

use axum::http::StatusCode;
use serde_json::{json, Value};

use common::{id_of, test_app, ADMIN_INBOX};

fn draft() -> Value {
    json!({
        "project_type": "ecommerce",
        "services": { "ecommerce": true, "seo": true },
        "timeline": "one_to_three_months",
        "budget": "3k_5k",
        "description": "An online shop for our bakery with click and collect",
        "location": "Bristol",
        "name": "Jo Baker",
        "email": "jo@example.com",
        "phone": "07700 900123",
        "referral_source": "Google"
    })
}

#[tokio::test]
async fn test_submit_quote_stores_and_notifies() {
    let app = test_app();
    let (status, body) = app.public("POST", "/quotes", Some(draft())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], "new");
    assert_eq!(body["budget"], "3k_5k");
    assert!(body["created_at"].is_string());

    let messages = app.mailer.messages();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].to, "jo@example.com");
    assert_eq!(messages[1].to, ADMIN_INBOX);
    assert_eq!(messages[1].reply_to.as_deref(), Some("jo@example.com"));
}

#[tokio::test]
async fn test_submit_quote_succeeds_when_email_fails() {
    let app = test_app();
    app.mailer.set_failing(true);
    let (status, _) = app.public("POST", "/quotes", Some(draft())).await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, page) = app.admin("GET", "/quotes", None).await;
    assert_eq!(page["total"], 1);
}

#[tokio::test]
async fn test_incomplete_quote_is_rejected() {
    let app = test_app();
    let mut body = draft();
    body["services"] = json!({});
    let (status, err) = app.public("POST", "/quotes", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(err["error"], "Validation");
    assert!(err["message"].as_str().unwrap().contains("Services"));
    assert!(app.mailer.messages().is_empty());
}

#[tokio::test]
async fn test_wizard_step_navigation() {
    let app = test_app();

    let (status, resp) = app
        .public("POST", "/quotes/wizard/step", Some(json!({ "step": 1, "direction": "next", "draft": {} })))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(resp["step"], 1);
    assert_eq!(resp["valid"], false);
    assert_eq!(resp["errors"][0], "Please choose a project type");

    let (_, resp) = app
        .public(
            "POST",
            "/quotes/wizard/step",
            Some(json!({ "step": 1, "direction": "next", "draft": { "project_type": "landing_page" } })),
        )
        .await;
    assert_eq!(resp["step"], 2);
    assert_eq!(resp["title"], "Services");
    assert_eq!(resp["total_steps"], 5);

    let (_, resp) = app
        .public("POST", "/quotes/wizard/step", Some(json!({ "step": 5, "direction": "validate", "draft": draft() })))
        .await;
    assert_eq!(resp["valid"], true);
    assert_eq!(resp["is_last"], true);

    let (_, resp) = app
        .public("POST", "/quotes/wizard/step", Some(json!({ "step": 3, "direction": "back" })))
        .await;
    assert_eq!(resp["step"], 2);

    let (status, _) = app.public("POST", "/quotes/wizard/step", Some(json!({ "step": 9 }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_admin_routes_require_an_admin_token() {
    let app = test_app();
    let (status, err) = app.public("GET", "/quotes", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(err["error"], "Unauthorized");

    let (status, _) = app.request("GET", "/quotes", Some("garbage"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let editor = app.token_for_role("editor");
    let (status, err) = app.request("GET", "/quotes", Some(&editor), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(err["error"], "Forbidden");
}

#[tokio::test]
async fn test_quote_status_lifecycle_over_http() {
    let app = test_app();
    let (_, created) = app.public("POST", "/quotes", Some(draft())).await;
    let uri = format!("/quotes/{}", id_of(&created));

    let (status, _) = app.admin("PATCH", &uri, Some(json!({ "status": "accepted" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, updated) = app
        .admin("PATCH", &uri, Some(json!({ "status": "reviewed", "notes": "  Call on Monday  " })))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["status"], "reviewed");
    assert_eq!(updated["notes"], "Call on Monday");

    let (_, fetched) = app.admin("GET", &uri, None).await;
    assert_eq!(fetched["status"], "reviewed");

    let (status, _) = app.admin("DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, err) = app.admin("GET", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(err["error"], "NotFound");
}

#[tokio::test]
async fn test_list_quotes_search_and_status_filter() {
    let app = test_app();
    app.public("POST", "/quotes", Some(draft())).await;
    let mut other = draft();
    other["name"] = json!("Sam Fisher");
    other["email"] = json!("sam@fisher.example");
    other["description"] = json!("Booking site for a fishing charter");
    let (_, sam) = app.public("POST", "/quotes", Some(other)).await;
    app.admin("PATCH", &format!("/quotes/{}", id_of(&sam)), Some(json!({ "status": "declined" }))).await;

    let (_, page) = app.admin("GET", "/quotes?q=FISHING", None).await;
    assert_eq!(page["total"], 1);
    assert_eq!(page["items"][0]["name"], "Sam Fisher");

    let (_, page) = app.admin("GET", "/quotes?status=new", None).await;
    assert_eq!(page["total"], 1);
    assert_eq!(page["items"][0]["name"], "Jo Baker");

    let (_, page) = app.admin("GET", "/quotes?status=all&limit=1", None).await;
    assert_eq!(page["total"], 2);
    assert_eq!(page["items"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_resend_confirmation() {
    let app = test_app();
    let (_, created) = app.public("POST", "/quotes", Some(draft())).await;
    let before = app.mailer.messages().len();

    let (status, body) = app
        .public("POST", "/send-quote-confirmation", Some(json!({ "quote_id": id_of(&created) })))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["sent"], true);
    assert_eq!(app.mailer.messages().len(), before + 1);

    app.mailer.set_failing(true);
    let (status, err) = app
        .public("POST", "/send-quote-confirmation", Some(json!({ "quote_id": id_of(&created) })))
        .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(err["message"], "Internal server error");

    let (status, _) = app
        .public("POST", "/send-quote-confirmation", Some(json!({ "quote_id": "6650f0c2a1b2c3d4e5f60000" })))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app.public("POST", "/send-quote-confirmation", Some(json!({ "quote_id": "short" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
