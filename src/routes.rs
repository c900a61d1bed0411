use axum::extract::{Form, Path, State};
use axum::response::Redirect;
use axum::routing::{get, post};
use axum::{Json, Router, http::StatusCode};
use maud::Markup;
use serde::Deserialize;
use tracing::debug;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::Draft;
use crate::state::{AppState, ConsoleSnapshot};
use crate::view::render_page;

#[derive(Deserialize)]
struct SearchForm {
    #[serde(default)]
    term: String,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/api/view", get(view_json))
        .route("/students", post(add_student))
        .route("/students/{id}/edit", post(start_edit))
        .route("/students/{id}/save", post(save_edit))
        .route("/students/{id}/delete", post(delete_student))
        .route("/edit/cancel", post(cancel_edit))
        .route("/search", post(search))
        .route("/page/next", post(next_page))
        .route("/page/prev", post(previous_page))
        .route("/refresh", post(refresh))
        .route("/notifications/{id}/dismiss", post(dismiss))
        .with_state(state)
}

/// Failed actions already raised a notification, so the browser just goes
/// back to the page. Only unknown rows are reported as errors.
fn back_home<T>(result: Result<T, AppError>) -> Result<Redirect, AppError> {
    match result {
        Err(AppError::NotFound) => Err(AppError::NotFound),
        Err(e) => {
            debug!("action failed: {}", e);
            Ok(Redirect::to("/"))
        }
        Ok(_) => Ok(Redirect::to("/")),
    }
}

async fn health() -> StatusCode {
    StatusCode::OK
}

async fn index(State(state): State<AppState>) -> Markup {
    let snapshot = state.console.snapshot().await;
    render_page(&snapshot)
}

async fn view_json(State(state): State<AppState>) -> Json<ConsoleSnapshot> {
    Json(state.console.snapshot().await)
}

async fn add_student(
    State(state): State<AppState>,
    Form(draft): Form<Draft>,
) -> Result<Redirect, AppError> {
    state.console.set_add_draft(&draft).await;
    back_home(state.console.submit_add().await)
}

async fn start_edit(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Redirect, AppError> {
    back_home(state.console.start_edit(&id).await)
}

async fn save_edit(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(draft): Form<Draft>,
) -> Result<Redirect, AppError> {
    state.console.set_edit_draft(&id, &draft).await?;
    back_home(state.console.save_edit(&id).await)
}

async fn delete_student(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Redirect, AppError> {
    back_home(state.console.delete(&id).await)
}

async fn cancel_edit(State(state): State<AppState>) -> Redirect {
    state.console.cancel_edit().await;
    Redirect::to("/")
}

async fn search(State(state): State<AppState>, Form(form): Form<SearchForm>) -> Redirect {
    state.console.search(form.term).await;
    Redirect::to("/")
}

async fn next_page(State(state): State<AppState>) -> Redirect {
    state.console.next_page().await;
    Redirect::to("/")
}

async fn previous_page(State(state): State<AppState>) -> Redirect {
    state.console.previous_page().await;
    Redirect::to("/")
}

async fn refresh(State(state): State<AppState>) -> Redirect {
    state.console.refresh().await;
    Redirect::to("/")
}

async fn dismiss(State(state): State<AppState>, Path(id): Path<Uuid>) -> Redirect {
    state.console.dismiss(id).await;
    Redirect::to("/")
}
