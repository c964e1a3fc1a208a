use crate::config::Config;
use crate::errors::RemoteError;
use crate::models::{CalculationRequest, CalculationResponse};
use serde::de::DeserializeOwned;
use tracing::{debug, error};

pub const STATS_ENDPOINT: &str = "/api/stats";
pub const LATEST_OPERATION_ENDPOINT: &str = "/api/operations/latest";
pub const RECENT_OPERATIONS_ENDPOINT: &str = "/api/operations/recent";

/// Outbound HTTP for both the calculation webhook and the stats backend.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    calc_url: String,
    api_base: String,
}

impl ApiClient {
    pub fn new(config: &Config) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("calc_dashboard/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            calc_url: config.calc_url.clone(),
            api_base: config.api_base.clone(),
        })
    }

    pub fn calc_url(&self) -> &str {
        &self.calc_url
    }

    /// Any 2xx body is returned as-is; `success: false` is for the caller to judge.
    pub async fn calculate(&self, expression: &str) -> Result<CalculationResponse, RemoteError> {
        debug!(url = %self.calc_url, "sending expression to calculation webhook");
        let response = self
            .http
            .post(&self.calc_url)
            .json(&CalculationRequest {
                expression: expression.to_string(),
            })
            .send()
            .await?;

        let status = response.status();
        debug!(%status, "calculation webhook responded");
        if !status.is_success() {
            return Err(RemoteError::Status(status.as_u16()));
        }

        Ok(response.json::<CalculationResponse>().await?)
    }

    /// Fetches `<api_base><endpoint>`; any failure is logged and becomes `None`.
    pub async fn fetch_api<T: DeserializeOwned>(&self, endpoint: &str) -> Option<T> {
        let url = format!("{}{}", self.api_base, endpoint);
        debug!(%url, "fetching");
        match self.get_json(&url).await {
            Ok(data) => Some(data),
            Err(err) => {
                error!(%endpoint, "error fetching: {err}");
                None
            }
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, RemoteError> {
        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(RemoteError::Status(status.as_u16()));
        }
        Ok(response.json::<T>().await?)
    }
}
