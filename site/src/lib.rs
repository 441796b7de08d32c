//! Invite pages backed by the guest record store.
//!
//! # Overview
//! Each route is a loader (read the guest, return its view model) or an
//! action (turn a form into a partial update or a delete, then redirect).
//!
//! # Design
//! - `GuestRepository` is blocking, so every call runs on tokio's blocking
//!   pool via `spawn_blocking`.
//! - Repository errors are never swallowed: they become a `PageError`, which
//!   logs and maps them to a status code.
//! - An empty field mapping counts as a missing guest.

pub mod error;
pub mod form;
pub mod view;

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    response::Redirect,
    routing::{get, post},
    Form, Json, Router,
};
use invite_core::{GuestFields, GuestRepository};

pub use error::PageError;
pub use form::{FavoriteSubmission, RsvpSubmission};
pub use view::{InviteView, RsvpFormView};

#[derive(Clone)]
pub struct AppState {
    guests: Arc<GuestRepository>,
}

impl AppState {
    pub fn new(guests: GuestRepository) -> Self {
        Self {
            guests: Arc::new(guests),
        }
    }

    async fn load(&self, id: String) -> Result<GuestFields, PageError> {
        let guests = Arc::clone(&self.guests);
        let fields = tokio::task::spawn_blocking(move || guests.get_guest(&id)).await??;
        if fields.is_empty() {
            return Err(PageError::NotFound);
        }
        Ok(fields)
    }

    async fn update(&self, id: String, fields: GuestFields) -> Result<(), PageError> {
        let guests = Arc::clone(&self.guests);
        tokio::task::spawn_blocking(move || guests.update_guest(&id, &fields)).await??;
        Ok(())
    }

    async fn delete(&self, id: String) -> Result<(), PageError> {
        let guests = Arc::clone(&self.guests);
        tokio::task::spawn_blocking(move || guests.delete_guest(&id)).await??;
        Ok(())
    }
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/invite/{id}", get(invite).post(toggle_favorite))
        .route("/invite/{id}/edit", get(edit_form).post(submit_rsvp))
        .route("/invite/{id}/destroy", post(destroy))
        .with_state(state)
}

fn invite_path(id: &str) -> String {
    format!("/invite/{id}")
}

async fn invite(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<InviteView>, PageError> {
    let fields = state.load(id.clone()).await?;
    Ok(Json(InviteView::new(&id, &fields)))
}

async fn toggle_favorite(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(input): Form<FavoriteSubmission>,
) -> Result<Redirect, PageError> {
    state.update(id.clone(), input.into_update()).await?;
    Ok(Redirect::to(&invite_path(&id)))
}

async fn edit_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<RsvpFormView>, PageError> {
    let fields = state.load(id.clone()).await?;
    Ok(Json(RsvpFormView::new(&id, &fields)))
}

async fn submit_rsvp(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(input): Form<RsvpSubmission>,
) -> Result<Redirect, PageError> {
    let update = input.into_update();
    let attending = update.rsvp.as_ref().map(ToString::to_string);
    state.update(id.clone(), update).await?;
    tracing::info!(guest = %id, rsvp = attending.as_deref().unwrap_or("unset"), "rsvp recorded");
    Ok(Redirect::to(&invite_path(&id)))
}

async fn destroy(State(state): State<AppState>, Path(id): Path<String>) -> Result<Redirect, PageError> {
    state.delete(id.clone()).await?;
    tracing::info!(guest = %id, "invite deleted");
    Ok(Redirect::to("/"))
}
