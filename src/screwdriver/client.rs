use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::de::DeserializeOwned;
use url::Url;

use crate::auth::Token;
use crate::error::{ApiError, Result};

use super::api::ScrewdriverApi;
use super::types::{Build, Job, Pipeline};

/// HTTP client for the Screwdriver v3 REST API.
///
/// Every lookup is a single GET; failures are returned as-is without retry.
pub struct ScrewdriverClient {
    client: Client,
    api_url: Url,
    token: Option<Token>,
}

impl ScrewdriverClient {
    /// Creates a client rooted at `base_url` (e.g. <https://api.screwdriver.cd>).
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Config` if the HTTP client cannot be built or the
    /// base URL is invalid.
    pub fn new(base_url: &str, token: Option<Token>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("launcher/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::Config(format!("Failed to create HTTP client: {e}")))?;

        // A base without a trailing slash would lose its last segment on join.
        let base = if base_url.ends_with('/') {
            base_url.to_owned()
        } else {
            format!("{base_url}/")
        };

        let api_url = Url::parse(&base)
            .map_err(|e| ApiError::Config(format!("Invalid base URL: {e}")))?
            .join("v3/")
            .map_err(|e| ApiError::Config(format!("Invalid API base URL: {e}")))?;

        Ok(Self {
            client,
            api_url,
            token,
        })
    }

    pub fn api_url(&self) -> &Url {
        &self.api_url
    }

    fn auth_request(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        if let Some(token) = &self.token {
            request.bearer_auth(token.as_str())
        } else {
            request
        }
    }

    /// Construct the URL of a single resource, e.g. `v3/builds/1234`
    fn resource_url(&self, collection: &str, id: &str) -> Result<Url> {
        self.api_url
            .join(&format!("{collection}/{}", urlencoding::encode(id)))
            .map_err(|e| ApiError::Config(format!("Invalid {collection} URL: {e}")))
    }

    async fn get<T>(&self, collection: &str, id: &str) -> Result<T>
    where
        T: DeserializeOwned,
    {
        // Empty, `.` and `..` would address the collection or its parent
        // instead of a single resource.
        if matches!(id, "" | "." | "..") {
            return Err(ApiError::Api(format!("invalid ID {id:?} for {collection} lookup")));
        }

        let url = self.resource_url(collection, id)?;
        debug!("GET {url}");

        let response = self.auth_request(self.client.get(url)).send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error response".to_string());
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl ScrewdriverApi for ScrewdriverClient {
    async fn build_from_id(&self, build_id: &str) -> Result<Build> {
        self.get("builds", build_id).await
    }

    async fn job_from_id(&self, job_id: &str) -> Result<Job> {
        self.get("jobs", job_id).await
    }

    async fn pipeline_from_id(&self, pipeline_id: &str) -> Result<Pipeline> {
        self.get("pipelines", pipeline_id).await
    }
}
