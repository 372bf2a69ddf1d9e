// Rendering URLs and view models for dashlets
use super::dashlet::{DashletConfig, GridPosition, WidgetKind};
use serde::Serialize;

pub const THUMBNAIL_SIZE: (u32, u32) = (410, 300);
pub const LIGHTBOX_SIZE: (u32, u32) = (800, 585);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphEndpoint {
    TestRun,
    Summarizer,
}

impl GraphEndpoint {
    pub fn for_kind(kind: &WidgetKind) -> Self {
        match kind {
            WidgetKind::UnitTestOverview => GraphEndpoint::TestRun,
            WidgetKind::Measurement => GraphEndpoint::Summarizer,
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            GraphEndpoint::TestRun => "./testRunGraph",
            GraphEndpoint::Summarizer => "./summarizerGraph",
        }
    }
}

/// Build the chart URL for a dashlet at the given size.
///
/// Optional parameters are only emitted when set.
pub fn graph_url(dashlet: &DashletConfig, (width, height): (u32, u32)) -> String {
    let endpoint = GraphEndpoint::for_kind(&dashlet.kind());
    let mut url = format!(
        "{}?width={}&height={}&id={}",
        endpoint.path(),
        width,
        height,
        urlencoding::encode(&dashlet.id)
    );

    let optional = [
        ("customName", &dashlet.custom_name),
        ("customBuildCount", &dashlet.custom_build_count),
        ("aggregation", &dashlet.aggregation),
    ];
    for (key, value) in optional {
        if !value.is_empty() {
            url.push('&');
            url.push_str(key);
            url.push('=');
            url.push_str(&urlencoding::encode(value));
        }
    }
    url
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashletView {
    pub kind: WidgetKind,
    pub id: String,
    pub position: GridPosition,
    pub show: bool,
    pub thumbnail_url: String,
    pub lightbox_url: String,
    pub title: Option<String>,
}

impl DashletView {
    pub fn from_config(dashlet: &DashletConfig) -> Self {
        let title = match dashlet.kind() {
            WidgetKind::UnitTestOverview => None,
            WidgetKind::Measurement => Some(format!(
                "source: {}-{}\n{}",
                dashlet.chart_dashlet,
                dashlet.measure,
                dashlet.description.as_deref().unwrap_or_default()
            )),
        };

        Self {
            kind: dashlet.kind(),
            id: dashlet.id.clone(),
            position: dashlet.position(),
            show: dashlet.show,
            thumbnail_url: graph_url(dashlet, THUMBNAIL_SIZE),
            lightbox_url: graph_url(dashlet, LIGHTBOX_SIZE),
            title,
        }
    }
}
