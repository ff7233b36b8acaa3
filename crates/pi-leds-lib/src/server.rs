//! HTTP control surface.
//!
//! Every mutating route performs exactly one controller operation and answers
//! with the full status. Hardware failures are already logged by the driver;
//! the response just reflects the state as it stands after the attempt.
//! Anything not in the route table, including a known path with the wrong
//! method, gets a bare 404.

use std::str::FromStr;
use std::sync::Arc;
use std::sync::mpsc::Sender;
use std::thread::JoinHandle;

use axum::{
    Json, Router,
    extract::{Path, State, rejection::PathRejection},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;

use crate::controller::LedController;
use crate::error::{PiLedsError, Result};
use crate::led::Channel;
use crate::lifecycle::ShutdownReason;
use crate::state::StatusSnapshot;
use crate::template::{PageModel, TemplateSource};

/// Shared state behind every handler.
pub struct AppState {
    pub controller: Arc<LedController>,
    pub template: TemplateSource,
}

/// Body of every `/api/*` response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusResponse {
    pub success: bool,
    pub state: StatusSnapshot,
}

impl From<StatusSnapshot> for StatusResponse {
    fn from(state: StatusSnapshot) -> Self {
        Self {
            success: true,
            state,
        }
    }
}

/// What `/api/toggle/{target}` can flip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleTarget {
    Led(Channel),
    Auto,
}

impl FromStr for ToggleTarget {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "auto" => Ok(ToggleTarget::Auto),
            other => other.parse().map(ToggleTarget::Led),
        }
    }
}

/// GET routes answer HEAD implicitly; only GET and POST are served.
pub fn router(app: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index).head(not_found))
        .route("/index.html", get(index).head(not_found))
        .route("/api/status", get(status).head(not_found))
        .route("/api/toggle/{target}", post(toggle))
        .route("/api/enable_all", post(enable_all))
        .route("/api/disable_all", post(disable_all))
        .fallback(not_found)
        .method_not_allowed_fallback(not_found)
        .with_state(app)
}

async fn index(State(app): State<Arc<AppState>>) -> Html<String> {
    let model = PageModel::from(app.controller.snapshot());
    Html(app.template.render(&model))
}

async fn status(State(app): State<Arc<AppState>>) -> Json<StatusResponse> {
    Json(app.controller.snapshot().into())
}

// Undecodable segments (e.g. invalid UTF-8) are unknown targets, not 400s.
async fn toggle(
    State(app): State<Arc<AppState>>,
    target: std::result::Result<Path<String>, PathRejection>,
) -> Response {
    let Some(target) = target.ok().and_then(|Path(t)| t.parse::<ToggleTarget>().ok()) else {
        return not_found().await.into_response();
    };
    match target {
        ToggleTarget::Led(channel) => {
            let _ = app.controller.toggle(channel);
        }
        ToggleTarget::Auto => {
            app.controller.toggle_auto_mode();
        }
    }
    status(State(app)).await.into_response()
}

async fn enable_all(State(app): State<Arc<AppState>>) -> Json<StatusResponse> {
    let _ = app.controller.enable_all();
    Json(app.controller.snapshot().into())
}

async fn disable_all(State(app): State<Arc<AppState>>) -> Json<StatusResponse> {
    let _ = app.controller.disable_all();
    Json(app.controller.snapshot().into())
}

async fn not_found() -> StatusCode {
    StatusCode::NOT_FOUND
}

/// Serve on an already-bound listener until the server fails.
pub async fn serve(listener: TcpListener, app: Arc<AppState>) -> Result<()> {
    axum::serve(listener, router(app)).await?;
    Ok(())
}

/// Run the server on a dedicated thread with its own tokio runtime.
///
/// The thread reports back on `on_stop` when the server ends for any reason,
/// including a failed bind, so the main thread can run the shutdown hook.
pub fn spawn(
    addr: String,
    app: Arc<AppState>,
    on_stop: Sender<ShutdownReason>,
) -> Result<JoinHandle<()>> {
    let handle = std::thread::Builder::new()
        .name("http".into())
        .spawn(move || {
            let why = match run(&addr, app) {
                Ok(()) => "server exited".to_string(),
                Err(PiLedsError::Server(why)) => why,
                Err(e) => e.to_string(),
            };
            let _ = on_stop.send(ShutdownReason::ServerStopped(why));
        })?;
    Ok(handle)
}

fn run(addr: &str, app: Arc<AppState>) -> Result<()> {
    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    rt.block_on(async move {
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| PiLedsError::Server(format!("failed to bind {addr}: {e}")))?;
        log::info!("Starting LED control server on {addr}");
        serve(listener, app).await
    })
}
