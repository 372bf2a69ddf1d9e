use crate::domain::grid::GridGeometry;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerSettings,
    pub jenkins: JenkinsSettings,
    pub grid: GridSettings,
    pub dashboard: DashboardSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub listen: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JenkinsSettings {
    pub root_url: String,
    /// Path of the plugin's project action below the root, e.g. `job/<name>/performance-signature`
    pub action_path: String,
    pub username: Option<String>,
    pub api_token: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GridSettings {
    pub columns: u32,
    pub origin: u32,
}

impl From<&GridSettings> for GridGeometry {
    fn from(settings: &GridSettings) -> Self {
        GridGeometry {
            columns: settings.columns,
            origin: settings.origin,
        }
    }
}

/// Request parameter naming the tab on configuration endpoints
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum ConfigScope {
    Dashboard,
    TestCase,
}

impl ConfigScope {
    pub fn param(&self) -> &'static str {
        match self {
            ConfigScope::Dashboard => "dashboard",
            ConfigScope::TestCase => "testCase",
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct DashboardSettings {
    pub scope: ConfigScope,
    #[serde(default)]
    pub tabs: Vec<String>,
    /// Fragment of the page URL used to pick the initially active tab
    pub fragment: Option<String>,
}

fn builder() -> Result<config::ConfigBuilder<config::builder::DefaultState>, config::ConfigError> {
    config::Config::builder()
        .set_default("server.listen", "0.0.0.0:8080")?
        .set_default("jenkins.root_url", "http://localhost:8080/jenkins")?
        .set_default("jenkins.action_path", "performance-signature")?
        .set_default("grid.columns", 3)?
        .set_default("grid.origin", 1)?
        .set_default("dashboard.scope", "dashboard")?
        .set_default("dashboard.tabs", Vec::<String>::new())
}

pub fn load_app_config() -> anyhow::Result<AppConfig> {
    let settings = builder()?
        .add_source(config::File::with_name("config/dashboard").required(false))
        .add_source(
            config::Environment::with_prefix("PERFSIG")
                .prefix_separator("__")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("dashboard.tabs")
                .try_parsing(true),
        )
        .build()?;

    Ok(settings.try_deserialize()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_deserialize() {
        let settings = builder().unwrap().build().unwrap();
        let config: AppConfig = settings.try_deserialize().unwrap();

        assert_eq!(config.server.listen, "0.0.0.0:8080");
        assert_eq!(config.dashboard.scope, ConfigScope::Dashboard);
        assert!(config.dashboard.tabs.is_empty());
        assert!(config.jenkins.username.is_none());
        assert_eq!(GridGeometry::from(&config.grid), GridGeometry::default());
    }

    #[test]
    fn test_file_overrides_defaults() {
        let toml = r#"
            [jenkins]
            root_url = "https://ci.example.com"
            action_path = "job/shop/performance-signature"

            [dashboard]
            scope = "testCase"
            tabs = ["loadtest", "smoketest"]
        "#;
        let settings = builder()
            .unwrap()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()
            .unwrap();
        let config: AppConfig = settings.try_deserialize().unwrap();

        assert_eq!(config.jenkins.root_url, "https://ci.example.com");
        assert_eq!(config.dashboard.scope, ConfigScope::TestCase);
        assert_eq!(config.dashboard.scope.param(), "testCase");
        assert_eq!(config.dashboard.tabs, vec!["loadtest", "smoketest"]);
    }
}
