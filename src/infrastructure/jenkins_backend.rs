// Jenkins plugin backend implementation
use crate::application::dashboard_backend::DashboardBackend;
use crate::domain::dashlet::DashletConfig;
use crate::infrastructure::config::{ConfigScope, JenkinsSettings};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use std::collections::BTreeMap;
use tokio::sync::OnceCell;

const CRUMB_ISSUER_PATH: &str = "crumbIssuer/api/json";

/// CSRF token issued by Jenkins
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Crumb {
    pub crumb_request_field: String,
    pub crumb: String,
}

#[derive(Debug)]
pub struct JenkinsBackend {
    client: reqwest::Client,
    root_url: String,
    action_url: String,
    scope: ConfigScope,
    credentials: Option<(String, String)>,
    crumb: OnceCell<Option<Crumb>>,
}

impl JenkinsBackend {
    pub fn new(settings: &JenkinsSettings, scope: ConfigScope) -> Self {
        let root_url = settings.root_url.trim_end_matches('/').to_string();
        let action_url = format!("{}/{}", root_url, settings.action_path.trim_matches('/'));
        let credentials = match (&settings.username, &settings.api_token) {
            (Some(user), Some(token)) => Some((user.clone(), token.clone())),
            _ => None,
        };

        Self {
            client: reqwest::Client::new(),
            root_url,
            action_url,
            scope,
            credentials,
            crumb: OnceCell::new(),
        }
    }

    fn endpoint(&self, name: &str) -> String {
        format!("{}/{}", self.action_url, name)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.credentials {
            Some((user, token)) => request.basic_auth(user, Some(token)),
            None => request,
        }
    }

    /// Crumb for the next request. Only a missing issuer (CSRF protection disabled) is
    /// remembered; other failures are retried on the next request.
    async fn crumb(&self) -> Option<&Crumb> {
        match self.crumb.get_or_try_init(|| self.fetch_crumb()).await {
            Ok(crumb) => crumb.as_ref(),
            Err(e) => {
                tracing::warn!("Sending request without crumb: {:#}", e);
                None
            }
        }
    }

    async fn fetch_crumb(&self) -> Result<Option<Crumb>> {
        let url = format!("{}/{}", self.root_url, CRUMB_ISSUER_PATH);
        let response = self
            .authorize(self.client.get(&url))
            .send()
            .await
            .context("Failed to send request to crumb issuer")?;
        if response.status() == StatusCode::NOT_FOUND {
            tracing::info!("No crumb issuer at {}, CSRF protection is disabled", url);
            return Ok(None);
        }

        let crumb = check_status(response)
            .await?
            .json::<Crumb>()
            .await
            .context("Failed to parse crumb")?;
        Ok(Some(crumb))
    }

    async fn execute(&self, request: RequestBuilder) -> Result<Response> {
        let mut request = self.authorize(request);
        if let Some(crumb) = self.crumb().await {
            request = request.header(crumb.crumb_request_field.as_str(), crumb.crumb.as_str());
        }

        let response = request
            .send()
            .await
            .context("Failed to send request to Jenkins")?;
        check_status(response).await
    }
}

async fn check_status(response: Response) -> Result<Response> {
    if !response.status().is_success() {
        let status = response.status();
        let url = response.url().clone();
        let body = response.text().await.unwrap_or_default();
        anyhow::bail!("Request to {} failed with status {}: {}", url, status, body);
    }
    Ok(response)
}

#[async_trait]
impl DashboardBackend for JenkinsBackend {
    async fn get_dashboard_configuration(&self, tab: &str) -> Result<Vec<DashletConfig>> {
        tracing::debug!("Fetching dashboard configuration for {}", tab);
        let request = self
            .client
            .get(self.endpoint("getDashboardConfiguration"))
            .query(&[(self.scope.param(), tab)]);

        self.execute(request)
            .await?
            .json::<Vec<DashletConfig>>()
            .await
            .context("Failed to parse dashboard configuration")
    }

    async fn set_dashboard_configuration(
        &self,
        tab: &str,
        dashlets: &[DashletConfig],
    ) -> Result<()> {
        let data = serde_json::to_string(dashlets).context("Failed to encode dashlets")?;
        tracing::debug!("Saving {} dashlets for {}", dashlets.len(), tab);
        let request = self
            .client
            .post(self.endpoint("setDashboardConfiguration"))
            .form(&[("data", data.as_str()), (self.scope.param(), tab)]);

        self.execute(request).await?;
        Ok(())
    }

    async fn get_available_measures(
        &self,
        tab: &str,
        dashlet: &str,
    ) -> Result<BTreeMap<String, String>> {
        let request = self
            .client
            .get(self.endpoint("getAvailableMeasures"))
            .query(&[("dashboard", tab), ("dashlet", dashlet)]);

        self.execute(request)
            .await?
            .json::<BTreeMap<String, String>>()
            .await
            .context("Failed to parse available measures")
    }

    async fn get_aggregation_from_measure(
        &self,
        tab: &str,
        dashlet: &str,
        measure: &str,
    ) -> Result<String> {
        let request = self
            .client
            .get(self.endpoint("getAggregationFromMeasure"))
            .query(&[("dashboard", tab), ("dashlet", dashlet), ("measure", measure)]);

        let body = self
            .execute(request)
            .await?
            .text()
            .await
            .context("Failed to read aggregation")?;
        Ok(body.trim().to_string())
    }
}
