// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc};
use tokio::sync::Mutex;
use tower_http::{compression::CompressionLayer, trace::TraceLayer};
use tracing_subscriber::EnvFilter;

use crate::application::layout_controller::DashboardLayoutController;
use crate::application::overview_service::ProjectOverviewService;
use crate::domain::grid::GridGeometry;
use crate::domain::navigation::TabNavigator;
use crate::infrastructure::config::{load_app_config, ConfigScope};
use crate::infrastructure::jenkins_backend::JenkinsBackend;
use crate::presentation::app_state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let config = load_app_config()?;

    // Backends (infrastructure layer); the overview always addresses test cases
    let backend = Arc::new(JenkinsBackend::new(&config.jenkins, config.dashboard.scope));
    let overview_backend = Arc::new(JenkinsBackend::new(&config.jenkins, ConfigScope::TestCase));

    // Controller and services (application layer)
    let mut controller = DashboardLayoutController::new(backend, GridGeometry::from(&config.grid));
    controller.initialize(&config.dashboard.tabs).await;
    let navigator = TabNavigator::restore(
        config.dashboard.tabs.clone(),
        config.dashboard.fragment.as_deref(),
    );

    let state = Arc::new(AppState {
        controller: Mutex::new(controller),
        navigator: Mutex::new(navigator),
        overview_service: ProjectOverviewService::new(overview_backend),
    });

    // Build router (presentation layer)
    let router = presentation::router(state)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = config.server.listen.parse()?;
    tracing::info!("Starting perfsig-dashboard on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
