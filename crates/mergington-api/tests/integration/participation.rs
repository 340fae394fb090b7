//! Signup and unregister endpoints.

use axum::http::StatusCode;

use crate::common::{TestApp, single_activity_store};

#[tokio::test]
async fn test_signup_for_activity() {
    let app = TestApp::new();
    let email = "test_student@mergington.edu";

    let resp = app
        .post("/activities/Chess%20Club/signup?email=test_student@mergington.edu")
        .await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(
        resp.body,
        serde_json::json!({"message": "Signed up test_student@mergington.edu for Chess Club"})
    );

    assert!(app.participants("Chess Club").await.contains(&email.to_string()));
}

#[tokio::test]
async fn test_signup_appends_after_existing_participants() {
    let app = TestApp::new();
    let before = app.participants("Programming Class").await;

    app.signup("Programming Class", "late@mergington.edu").await;

    let after = app.participants("Programming Class").await;
    assert_eq!(&after[..before.len()], &before[..]);
    assert_eq!(after.last().unwrap(), "late@mergington.edu");
}

#[tokio::test]
async fn test_signup_duplicate() {
    let app = TestApp::new();
    let email = "duplicate@mergington.edu";

    let first = app.signup("Programming Class", email).await;
    assert_eq!(first.status, StatusCode::OK);
    let after_first = app.get("/activities").await.body;

    let second = app.signup("Programming Class", email).await;
    assert_eq!(second.status, StatusCode::BAD_REQUEST);
    assert!(second.detail().contains("already signed up"));

    assert_eq!(app.get("/activities").await.body, after_first);
    let count = app
        .participants("Programming Class")
        .await
        .iter()
        .filter(|p| *p == email)
        .count();
    assert_eq!(count, 1);
}

#[tokio::test]
async fn test_signup_seeded_participant_is_duplicate() {
    let app = TestApp::new();
    let resp = app.signup("Chess Club", "michael@mergington.edu").await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_signup_nonexistent_activity() {
    let app = TestApp::new();
    let resp = app
        .post("/activities/NonexistentClub/signup?email=test@mergington.edu")
        .await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
    assert!(resp.detail().contains("not found"));
}

#[tokio::test]
async fn test_activity_names_are_case_sensitive() {
    let app = TestApp::new();
    let resp = app.signup("chess club", "a@mergington.edu").await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unregister_from_activity() {
    let app = TestApp::new();
    let email = "unregister_test@mergington.edu";
    app.signup("Art Club", email).await;

    let resp = app.unregister("Art Club", email).await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(
        resp.body["message"],
        format!("Unregistered {email} from Art Club")
    );

    assert!(!app.participants("Art Club").await.contains(&email.to_string()));
}

#[tokio::test]
async fn test_unregister_seeded_participant() {
    let app = TestApp::new();
    let resp = app.unregister("Chess Club", "michael@mergington.edu").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(
        app.participants("Chess Club").await,
        vec!["daniel@mergington.edu"]
    );
}

#[tokio::test]
async fn test_unregister_not_registered() {
    let app = TestApp::new();
    let before = app.get("/activities").await.body;

    let resp = app
        .post("/activities/Chess%20Club/unregister?email=notregistered@mergington.edu")
        .await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert!(resp.detail().contains("not registered"));

    assert_eq!(app.get("/activities").await.body, before);
}

#[tokio::test]
async fn test_unregister_twice() {
    let app = TestApp::new();
    app.signup("Drama Club", "twice@mergington.edu").await;
    assert_eq!(
        app.unregister("Drama Club", "twice@mergington.edu").await.status,
        StatusCode::OK
    );
    assert_eq!(
        app.unregister("Drama Club", "twice@mergington.edu").await.status,
        StatusCode::BAD_REQUEST
    );
}

#[tokio::test]
async fn test_unregister_nonexistent_activity() {
    let app = TestApp::new();
    let resp = app
        .post("/activities/NonexistentClub/unregister?email=test@mergington.edu")
        .await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
    assert!(resp.detail().contains("not found"));
}

#[tokio::test]
async fn test_nonexistent_activity_wins_over_email_checks() {
    let app = TestApp::new();
    for email in ["michael@mergington.edu", "", "not-an-email"] {
        assert_eq!(
            app.signup("Knitting Circle", email).await.status,
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            app.unregister("Knitting Circle", email).await.status,
            StatusCode::NOT_FOUND
        );
    }
}

#[tokio::test]
async fn test_email_with_plus_sign_is_preserved() {
    let app = TestApp::new();
    let email = "first+clubs@mergington.edu";
    let resp = app.signup("Math Club", email).await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(app.participants("Math Club").await.contains(&email.to_string()));
}

#[tokio::test]
async fn test_missing_email_rejected() {
    let app = TestApp::new();
    let before = app.get("/activities").await.body;
    let resp = app.post("/activities/Chess%20Club/signup").await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert!(resp.detail().contains("email"));
    assert_eq!(app.get("/activities").await.body, before);
}

#[tokio::test]
async fn test_repeated_email_rejected_with_detail() {
    let app = TestApp::new();
    let resp = app
        .post("/activities/Chess%20Club/unregister?email=x@mergington.edu&email=y@mergington.edu")
        .await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert!(!resp.detail().is_empty());
}

#[tokio::test]
async fn test_invalid_utf8_activity_name_rejected_with_detail() {
    let app = TestApp::new();
    let resp = app.post("/activities/%FF/signup?email=a@mergington.edu").await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert!(resp.detail().contains("utf-8"));
}

#[tokio::test]
async fn test_non_ascii_activity_name_is_decoded() {
    let app = TestApp::new();
    let resp = app.signup("Café Society", "a@mergington.edu").await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
    assert!(resp.detail().contains("café society"));
}

#[tokio::test]
async fn test_get_on_signup_not_allowed() {
    let app = TestApp::new();
    let resp = app
        .get("/activities/Chess%20Club/signup?email=a@mergington.edu")
        .await;
    assert_eq!(resp.status, StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_capacity_is_informational_by_default() {
    let app = TestApp::with_store(single_activity_store("Quartet", 1));
    assert_eq!(app.signup("Quartet", "a@mergington.edu").await.status, StatusCode::OK);
    assert_eq!(app.signup("Quartet", "b@mergington.edu").await.status, StatusCode::OK);
    assert_eq!(app.participants("Quartet").await.len(), 2);
}

#[tokio::test]
async fn test_capacity_enforced_rejects_full_activity() {
    let app = TestApp::with_store(single_activity_store("Quartet", 1).with_capacity_enforced(true));
    assert_eq!(app.signup("Quartet", "a@mergington.edu").await.status, StatusCode::OK);

    let resp = app.signup("Quartet", "b@mergington.edu").await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert!(resp.detail().contains("is full"));
    assert_eq!(app.participants("Quartet").await, vec!["a@mergington.edu"]);

    app.unregister("Quartet", "a@mergington.edu").await;
    assert_eq!(app.signup("Quartet", "b@mergington.edu").await.status, StatusCode::OK);
}
