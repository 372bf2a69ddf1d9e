// HTTP request handlers
use crate::application::layout_controller::{LayoutError, TabView};
use crate::application::overview_service::CarouselItem;
use crate::domain::dashlet::GridPosition;
use crate::domain::edit_form::EditFormUpdate;
use crate::infrastructure::http_response::error_response;
use crate::presentation::app_state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Response,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

type TabResult = Result<Json<TabView>, LayoutError>;

#[derive(Deserialize)]
pub struct MoveTarget {
    pub col: u32,
    pub row: u32,
}

#[derive(Deserialize)]
pub struct Visibility {
    pub show: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrollQuery {
    pub scroll_top: Option<u32>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigatorView {
    pub tabs: Vec<String>,
    pub active: Option<String>,
    pub fragment: Option<String>,
    pub scroll_top: u32,
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

pub async fn list_tabs(State(state): State<Arc<AppState>>) -> Json<NavigatorView> {
    let navigator = state.navigator.lock().await;
    Json(NavigatorView {
        tabs: navigator.tabs().to_vec(),
        active: navigator.active().map(String::from),
        fragment: navigator.fragment(),
        scroll_top: navigator.scroll_top(),
    })
}

/// Activate a tab; the caller's scroll offset is remembered and echoed back
pub async fn select_tab(
    Path(id): Path<String>,
    Query(query): Query<ScrollQuery>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<NavigatorView>, Response> {
    {
        let mut navigator = state.navigator.lock().await;
        if let Some(scroll_top) = query.scroll_top {
            navigator.remember_scroll(scroll_top);
        }
        if navigator.select(&id).is_none() {
            return Err(error_response(
                StatusCode::NOT_FOUND,
                format!("unknown dashboard tab '{}'", id),
            ));
        }
    }
    Ok(list_tabs(State(state)).await)
}

pub async fn get_tab(Path(id): Path<String>, State(state): State<Arc<AppState>>) -> TabResult {
    Ok(Json(state.controller.lock().await.view(&id)?))
}

pub async fn enter_edit(Path(id): Path<String>, State(state): State<Arc<AppState>>) -> TabResult {
    let mut controller = state.controller.lock().await;
    controller.enter_edit(&id).await?;
    Ok(Json(controller.view(&id)?))
}

pub async fn cancel_edit(Path(id): Path<String>, State(state): State<Arc<AppState>>) -> TabResult {
    let mut controller = state.controller.lock().await;
    controller.cancel_edit(&id).await?;
    Ok(Json(controller.view(&id)?))
}

pub async fn save_edit(Path(id): Path<String>, State(state): State<Arc<AppState>>) -> TabResult {
    let mut controller = state.controller.lock().await;
    controller.save(&id).await?;
    Ok(Json(controller.view(&id)?))
}

pub async fn update_form(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(update): Json<EditFormUpdate>,
) -> TabResult {
    let mut controller = state.controller.lock().await;
    controller.update_form(&id, update).await?;
    Ok(Json(controller.view(&id)?))
}

pub async fn add_widget(Path(id): Path<String>, State(state): State<Arc<AppState>>) -> TabResult {
    let mut controller = state.controller.lock().await;
    controller.add_widget(&id)?;
    Ok(Json(controller.view(&id)?))
}

pub async fn remove_widget(
    Path((id, col, row)): Path<(String, u32, u32)>,
    State(state): State<Arc<AppState>>,
) -> TabResult {
    let mut controller = state.controller.lock().await;
    controller.remove_widget(&id, GridPosition::new(col, row))?;
    Ok(Json(controller.view(&id)?))
}

pub async fn move_widget(
    Path((id, col, row)): Path<(String, u32, u32)>,
    State(state): State<Arc<AppState>>,
    Json(target): Json<MoveTarget>,
) -> TabResult {
    let mut controller = state.controller.lock().await;
    controller.move_widget(
        &id,
        GridPosition::new(col, row),
        GridPosition::new(target.col, target.row),
    )?;
    Ok(Json(controller.view(&id)?))
}

pub async fn set_visibility(
    Path((id, col, row)): Path<(String, u32, u32)>,
    State(state): State<Arc<AppState>>,
    Json(visibility): Json<Visibility>,
) -> TabResult {
    let mut controller = state.controller.lock().await;
    controller.set_visibility(&id, GridPosition::new(col, row), visibility.show)?;
    Ok(Json(controller.view(&id)?))
}

/// Carousel items for the project overview page
pub async fn project_overview(
    Path(test_case): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<CarouselItem>>, Response> {
    state
        .overview_service
        .carousel(&test_case)
        .await
        .map(Json)
        .map_err(|e| {
            tracing::error!("Error building overview for {}: {:#}", test_case, e);
            error_response(StatusCode::BAD_GATEWAY, format!("{:#}", e))
        })
}
