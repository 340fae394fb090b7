//! Listing, health and redirect endpoints.

use axum::http::{StatusCode, header};

use crate::common::TestApp;

#[tokio::test]
async fn test_root_redirects_to_landing_page() {
    let app = TestApp::new();
    let resp = app.get("/").await;
    assert_eq!(resp.status, StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(resp.headers[header::LOCATION], "/static/index.html");
}

#[tokio::test]
async fn test_get_activities_returns_object() {
    let app = TestApp::new();
    let resp = app.get("/activities").await;
    assert_eq!(resp.status, StatusCode::OK);
    let activities = resp.body.as_object().expect("activities should be an object");
    assert!(activities.contains_key("Chess Club"));
    assert!(activities.contains_key("Programming Class"));
}

#[tokio::test]
async fn test_every_seeded_activity_listed() {
    let app = TestApp::new();
    let resp = app.get("/activities").await;
    let activities = resp.body.as_object().unwrap();
    for name in app.state.store().names() {
        assert!(activities.contains_key(name), "{name} missing from listing");
    }
    assert_eq!(activities.len(), app.state.store().len());
}

#[tokio::test]
async fn test_activity_structure() {
    let app = TestApp::new();
    let resp = app.get("/activities").await;
    for (name, activity) in resp.body.as_object().unwrap() {
        let activity = activity.as_object().unwrap();
        assert!(activity["description"].is_string(), "{name}");
        assert!(activity["schedule"].is_string(), "{name}");
        assert!(activity["max_participants"].is_u64(), "{name}");
        assert!(activity["participants"].is_array(), "{name}");
    }
}

#[tokio::test]
async fn test_listing_has_no_side_effects() {
    let app = TestApp::new();
    let first = app.get("/activities").await;
    let second = app.get("/activities").await;
    assert_eq!(first.body, second.body);
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::new();
    let resp = app.get("/health").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body["status"], "healthy");
    assert_eq!(resp.body["name"], "mergington");
    assert_eq!(
        resp.body["activity_count"].as_u64().unwrap() as usize,
        app.state.store().len()
    );
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let app = TestApp::new();
    let resp = app.get("/static/index.html").await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
}
