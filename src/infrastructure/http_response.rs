// HTTP response utilities for controller results
use crate::application::layout_controller::LayoutError;
use crate::domain::grid::GridError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

pub fn status_for(error: &LayoutError) -> StatusCode {
    match error {
        LayoutError::UnknownTab(_) | LayoutError::Grid(GridError::NotFound(_)) => StatusCode::NOT_FOUND,
        LayoutError::NotEditing(_) | LayoutError::Grid(GridError::Occupied(_)) => StatusCode::CONFLICT,
        LayoutError::IncompleteForm(_) => StatusCode::UNPROCESSABLE_ENTITY,
        LayoutError::Backend(_) => StatusCode::BAD_GATEWAY,
    }
}

/// JSON error body with a status derived from the error kind
pub fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(json!({ "error": message.into() }))).into_response()
}

impl IntoResponse for LayoutError {
    fn into_response(self) -> Response {
        let status = status_for(&self);
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        } else {
            tracing::debug!("Request rejected: {}", self);
        }
        error_response(status, self.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dashlet::GridPosition;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            status_for(&LayoutError::UnknownTab("t9".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_for(&LayoutError::Grid(GridError::Occupied(GridPosition::new(1, 1)))),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_for(&LayoutError::IncompleteForm("Host Health".to_string())),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            status_for(&LayoutError::Backend(anyhow::anyhow!("timeout"))),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn test_error_response_status() {
        let response = LayoutError::NotEditing("t1".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }
}
