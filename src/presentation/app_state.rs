// Application state for HTTP handlers
use crate::application::layout_controller::DashboardLayoutController;
use crate::application::overview_service::ProjectOverviewService;
use crate::domain::navigation::TabNavigator;
use tokio::sync::Mutex;

pub struct AppState {
    pub controller: Mutex<DashboardLayoutController>,
    pub navigator: Mutex<TabNavigator>,
    pub overview_service: ProjectOverviewService,
}
