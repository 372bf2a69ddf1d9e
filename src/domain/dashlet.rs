// Dashlet domain model
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Widget id that selects the fixed unit-test overview chart
pub const UNIT_TEST_OVERVIEW_ID: &str = "unittest_overview";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridPosition {
    pub col: u32,
    pub row: u32,
}

impl GridPosition {
    pub fn new(col: u32, row: u32) -> Self {
        Self { col, row }
    }
}

impl fmt::Display for GridPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.col, self.row)
    }
}

// Row-major: rows first, columns break ties
impl Ord for GridPosition {
    fn cmp(&self, other: &Self) -> Ordering {
        self.row.cmp(&other.row).then(self.col.cmp(&other.col))
    }
}

impl PartialOrd for GridPosition {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum WidgetKind {
    UnitTestOverview,
    Measurement,
}

/// One positioned widget on a dashboard tab, as persisted by the plugin
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashletConfig {
    pub dashboard: String,
    pub id: String,
    pub col: u32,
    pub row: u32,
    #[serde(default = "default_show")]
    pub show: bool,
    #[serde(default)]
    pub chart_dashlet: String,
    #[serde(default)]
    pub measure: String,
    #[serde(default)]
    pub custom_name: String,
    #[serde(default)]
    pub custom_build_count: String,
    #[serde(default)]
    pub aggregation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
}

fn default_show() -> bool {
    true
}

impl DashletConfig {
    pub fn unit_test_overview(dashboard: impl Into<String>) -> Self {
        Self::new(dashboard, UNIT_TEST_OVERVIEW_ID)
    }

    pub fn measurement(
        dashboard: impl Into<String>,
        chart_dashlet: impl Into<String>,
        measure: impl Into<String>,
    ) -> Self {
        let measure = measure.into();
        let mut dashlet = Self::new(dashboard, measure.clone());
        dashlet.chart_dashlet = chart_dashlet.into();
        dashlet.measure = measure;
        dashlet
    }

    fn new(dashboard: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            dashboard: dashboard.into(),
            id: id.into(),
            col: 0,
            row: 0,
            show: true,
            chart_dashlet: String::new(),
            measure: String::new(),
            custom_name: String::new(),
            custom_build_count: String::new(),
            aggregation: String::new(),
            description: None,
            html: None,
        }
    }

    pub fn kind(&self) -> WidgetKind {
        if self.id == UNIT_TEST_OVERVIEW_ID {
            WidgetKind::UnitTestOverview
        } else {
            WidgetKind::Measurement
        }
    }

    pub fn position(&self) -> GridPosition {
        GridPosition::new(self.col, self.row)
    }

    pub fn set_position(&mut self, position: GridPosition) {
        self.col = position.col;
        self.row = position.row;
    }

    pub fn belongs_to(&self, dashboard: &str) -> bool {
        self.dashboard == dashboard
    }
}

/// Sort dashlets ascending by row, then by column
pub fn canonical_sort(dashlets: &mut [DashletConfig]) {
    dashlets.sort_by_key(DashletConfig::position);
}
