// Presentation layer - HTTP routes for dashboard actions
pub mod app_state;
pub mod handlers;

use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    add_widget, cancel_edit, enter_edit, get_tab, health_check, list_tabs, move_widget,
    project_overview, remove_widget, save_edit, select_tab, set_visibility, update_form,
};
use axum::{
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(health_check))
        .route("/tabs", get(list_tabs))
        .route("/tabs/:id", get(get_tab))
        .route("/tabs/:id/select", post(select_tab))
        .route("/tabs/:id/edit", post(enter_edit))
        .route("/tabs/:id/cancel", post(cancel_edit))
        .route("/tabs/:id/save", post(save_edit))
        .route("/tabs/:id/form", put(update_form))
        .route("/tabs/:id/widgets", post(add_widget))
        .route("/tabs/:id/widgets/:col/:row", delete(remove_widget))
        .route("/tabs/:id/widgets/:col/:row/move", post(move_widget))
        .route("/tabs/:id/widgets/:col/:row/visibility", put(set_visibility))
        .route("/overview/:test_case", get(project_overview))
        .with_state(state)
}
