//! HTTP routes and handlers.
//!
//! | Method | Path                               | Handler             |
//! |--------|------------------------------------|---------------------|
//! | GET    | `/`                                | [`root_redirect`]   |
//! | GET    | `/health`                          | [`health`]          |
//! | GET    | `/activities`                      | [`list_activities`] |
//! | POST   | `/activities/{name}/signup`        | [`signup`]          |
//! | POST   | `/activities/{name}/unregister`    | [`unregister`]      |

use std::sync::Arc;

use axum::Json;
use axum::Router;
use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::response::Redirect;
use axum::routing::{get, post};
use mergington_core::{ActivityStore, Catalog};
use serde::{Deserialize, Serialize};
use tower_http::trace::TraceLayer;
use tracing::field::Empty;

use crate::Result;

/// Landing page the root path redirects to.
pub const INDEX_PATH: &str = "/static/index.html";

// ============================================================================
// State
// ============================================================================

/// Shared state handed to every handler.
#[derive(Clone, Debug)]
pub struct AppState {
    store: Arc<ActivityStore>,
    name: Arc<str>,
    version: Arc<str>,
}

impl AppState {
    /// Wrap a store, reporting this crate's name and version on `/health`.
    pub fn new(store: ActivityStore) -> Self {
        Self::from_shared(Arc::new(store))
    }

    /// Wrap an already shared store.
    pub fn from_shared(store: Arc<ActivityStore>) -> Self {
        Self {
            store,
            name: Arc::from("mergington"),
            version: Arc::from(env!("CARGO_PKG_VERSION")),
        }
    }

    /// Override the service name reported on `/health`.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Arc::from(name.into());
        self
    }

    /// The underlying store.
    pub fn store(&self) -> &Arc<ActivityStore> {
        &self.store
    }
}

// ============================================================================
// Request / response types
// ============================================================================

/// Query string of the participation endpoints.
#[derive(Clone, Debug, Deserialize)]
pub struct ParticipantQuery {
    /// Student email.
    pub email: String,
}

/// Confirmation body of a successful signup or unregister.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Human-readable confirmation.
    pub message: String,
}

/// Body of `GET /health`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `"healthy"` while the server answers.
    pub status: String,
    /// Service name.
    pub name: String,
    /// Service version.
    pub version: String,
    /// Number of activities in the directory.
    pub activity_count: usize,
}

// ============================================================================
// Router
// ============================================================================

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root_redirect))
        .route("/health", get(health))
        .route("/activities", get(list_activities))
        .route("/activities/{activity_name}/signup", post(signup))
        .route("/activities/{activity_name}/unregister", post(unregister))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ============================================================================
// Handlers
// ============================================================================

/// `GET /`: temporary redirect to the landing page.
pub async fn root_redirect() -> Redirect {
    Redirect::temporary(INDEX_PATH)
}

/// `GET /health`
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        name: state.name.to_string(),
        version: state.version.to_string(),
        activity_count: state.store.len(),
    })
}

/// `GET /activities`: every activity keyed by name.
pub async fn list_activities(State(state): State<AppState>) -> Json<Catalog> {
    Json(state.store.list())
}

/// `POST /activities/{name}/signup?email=..`
#[tracing::instrument(skip_all, fields(activity = Empty, email = Empty))]
pub async fn signup(
    State(state): State<AppState>,
    path: std::result::Result<Path<String>, PathRejection>,
    query: std::result::Result<Query<ParticipantQuery>, QueryRejection>,
) -> Result<Json<MessageResponse>> {
    let (activity_name, email) = participation(path, query)?;
    state
        .store
        .signup(&activity_name, &email)
        .inspect_err(|e| tracing::debug!(error = %e, "signup rejected"))?;

    Ok(Json(MessageResponse {
        message: format!("Signed up {email} for {activity_name}"),
    }))
}

/// `POST /activities/{name}/unregister?email=..`
#[tracing::instrument(skip_all, fields(activity = Empty, email = Empty))]
pub async fn unregister(
    State(state): State<AppState>,
    path: std::result::Result<Path<String>, PathRejection>,
    query: std::result::Result<Query<ParticipantQuery>, QueryRejection>,
) -> Result<Json<MessageResponse>> {
    let (activity_name, email) = participation(path, query)?;
    state
        .store
        .unregister(&activity_name, &email)
        .inspect_err(|e| tracing::debug!(error = %e, "unregister rejected"))?;

    Ok(Json(MessageResponse {
        message: format!("Unregistered {email} from {activity_name}"),
    }))
}

/// Unpack the participation extractors, turning rejections into JSON errors
/// and recording the request on the current span.
fn participation(
    path: std::result::Result<Path<String>, PathRejection>,
    query: std::result::Result<Query<ParticipantQuery>, QueryRejection>,
) -> Result<(String, String)> {
    let Path(activity_name) = path?;
    let Query(ParticipantQuery { email }) = query?;
    let span = tracing::Span::current();
    span.record("activity", activity_name.as_str());
    span.record("email", email.as_str());
    Ok((activity_name, email))
}
