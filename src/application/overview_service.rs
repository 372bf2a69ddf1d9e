// Project overview service - carousel of dashlets flagged for the overview
use crate::application::dashboard_backend::DashboardBackend;
use serde::Serialize;
use std::sync::Arc;

const TEST_CASE_PLACEHOLDER: &str = "###";
const RELATIVE_PREFIX: &str = "./";
const ACTION_PREFIX: &str = "performance-signature/";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CarouselItem {
    pub html: String,
    pub active: bool,
}

#[derive(Clone)]
pub struct ProjectOverviewService {
    backend: Arc<dyn DashboardBackend>,
}

impl ProjectOverviewService {
    pub fn new(backend: Arc<dyn DashboardBackend>) -> Self {
        Self { backend }
    }

    pub async fn carousel(&self, test_case: &str) -> anyhow::Result<Vec<CarouselItem>> {
        let records = self.backend.get_dashboard_configuration(test_case).await?;

        let items: Vec<CarouselItem> = records
            .into_iter()
            .filter(|r| r.show)
            .filter_map(|r| r.html)
            .filter(|html| !html.is_empty())
            .enumerate()
            .map(|(index, html)| CarouselItem {
                html: resolve_fragment(&html, test_case),
                active: index == 0,
            })
            .collect();

        tracing::debug!("Overview for {} has {} items", test_case, items.len());
        Ok(items)
    }
}

/// Fill in the test case and make the chart link relative to the project page
fn resolve_fragment(html: &str, test_case: &str) -> String {
    html.replacen(TEST_CASE_PLACEHOLDER, test_case, 1)
        .replacen(RELATIVE_PREFIX, ACTION_PREFIX, 1)
}
