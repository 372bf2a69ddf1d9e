// Edit-form selections used when adding a dashlet
use super::dashlet::DashletConfig;
use serde::{Deserialize, Serialize};

/// Label of the measure group that stands for the unit-test overview chart
pub const UNIT_TEST_OVERVIEW_GROUP: &str = "Unit Test Overview";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditForm {
    pub measure_group: String,
    pub measure: Option<String>,
    pub custom_name: String,
    pub custom_build_count: String,
    pub aggregation: String,
}

/// Partial form update; absent fields are left as they are
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditFormUpdate {
    pub measure_group: Option<String>,
    pub measure: Option<String>,
    pub custom_name: Option<String>,
    pub custom_build_count: Option<String>,
    pub aggregation: Option<String>,
}

impl EditForm {
    pub fn is_unit_test_overview(&self) -> bool {
        self.measure_group == UNIT_TEST_OVERVIEW_GROUP
    }

    /// Switching groups resets the fields that only make sense for one measure
    pub fn select_group(&mut self, group: impl Into<String>) {
        self.measure_group = group.into();
        self.measure = None;
        self.custom_name.clear();
        self.custom_build_count.clear();
        self.aggregation.clear();
    }

    /// Returns `None` when a measurement chart is requested without a measure
    pub fn to_dashlet(&self, dashboard: &str) -> Option<DashletConfig> {
        let mut dashlet = if self.is_unit_test_overview() {
            DashletConfig::unit_test_overview(dashboard)
        } else {
            let measure = self.measure.as_deref().filter(|m| !m.is_empty())?;
            let mut dashlet = DashletConfig::measurement(dashboard, &self.measure_group, measure);
            dashlet.aggregation = self.aggregation.clone();
            dashlet
        };
        dashlet.custom_name = self.custom_name.clone();
        dashlet.custom_build_count = self.custom_build_count.clone();
        Some(dashlet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dashlet::WidgetKind;

    #[test]
    fn test_unit_test_overview_ignores_measure() {
        let form = EditForm {
            measure_group: UNIT_TEST_OVERVIEW_GROUP.to_string(),
            measure: Some("cpu".to_string()),
            custom_name: "Tests".to_string(),
            ..Default::default()
        };
        let dashlet = form.to_dashlet("t1").unwrap();
        assert_eq!(dashlet.kind(), WidgetKind::UnitTestOverview);
        assert_eq!(dashlet.custom_name, "Tests");
        assert!(dashlet.measure.is_empty());
    }

    #[test]
    fn test_measurement_requires_measure() {
        let form = EditForm {
            measure_group: "Host Health".to_string(),
            ..Default::default()
        };
        assert!(form.to_dashlet("t1").is_none());
    }

    #[test]
    fn test_select_group_clears_custom_fields() {
        let mut form = EditForm {
            measure_group: "Host Health".to_string(),
            measure: Some("cpu".to_string()),
            custom_name: "x".to_string(),
            custom_build_count: "5".to_string(),
            aggregation: "Max".to_string(),
        };
        form.select_group("Web Requests");
        assert_eq!(form.measure_group, "Web Requests");
        assert_eq!(form, EditForm { measure_group: "Web Requests".to_string(), ..Default::default() });
    }
}
