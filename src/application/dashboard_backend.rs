// Backend trait for dashboard configuration and measure lookups
use crate::domain::dashlet::DashletConfig;
use async_trait::async_trait;
use std::collections::BTreeMap;

#[async_trait]
pub trait DashboardBackend: Send + Sync {
    /// Persisted dashlets for a tab (may contain records of other tabs)
    async fn get_dashboard_configuration(&self, tab: &str) -> anyhow::Result<Vec<DashletConfig>>;

    /// Replace the persisted dashlets of a tab
    async fn set_dashboard_configuration(
        &self,
        tab: &str,
        dashlets: &[DashletConfig],
    ) -> anyhow::Result<()>;

    /// Measures of a dashlet group, value -> display label
    async fn get_available_measures(
        &self,
        tab: &str,
        dashlet: &str,
    ) -> anyhow::Result<BTreeMap<String, String>>;

    /// Default aggregation function name for a measure
    async fn get_aggregation_from_measure(
        &self,
        tab: &str,
        dashlet: &str,
        measure: &str,
    ) -> anyhow::Result<String>;
}
