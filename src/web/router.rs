use std::path::Path;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::web::{
    handlers::{
        about, add_form, contact_detail, create_contact, delete_contact, edit_form, home,
        list_contacts, not_found, update_contact,
    },
    state::AppState,
};

/// Routes of the contact book. Static assets under `public_dir` are served at `/static`.
pub fn build_router(state: AppState, public_dir: impl AsRef<Path>) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/about", get(about))
        .route("/contact", get(list_contacts).post(create_contact))
        .route("/contact/add", get(add_form))
        .route("/contact/update", post(update_contact))
        .route("/contact/edit/:name", get(edit_form))
        .route("/contact/delete/:name", get(delete_contact))
        .route("/contact/:name", get(contact_detail))
        .nest_service("/static", ServeDir::new(public_dir.as_ref()))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
