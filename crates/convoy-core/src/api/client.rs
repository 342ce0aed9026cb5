use async_trait::async_trait;
use reqwest::{RequestBuilder, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use convoy_protocol::{Build, Container, Job, TeamInfo};

use super::errors::ApiError;
use super::stream::SseBuildEvents;
use super::{BuildEvents, FleetApi, TeamApi};

/// HTTP client for one orchestration service target.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    token: Option<String>,
}

impl ApiClient {
    /// Build a client for `api`, e.g. `https://ci.example.com`.
    ///
    /// `insecure` disables TLS certificate verification.
    pub fn new(api: &str, token: Option<String>, insecure: bool) -> Result<Self, ApiError> {
        let base_url = Url::parse(api).map_err(|e| ApiError::InvalidRequest {
            message: format!("'{}' is not a valid URL: {}", api, e),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidRequest {
                message: format!("'{}' cannot be used as a base URL", api),
            });
        }

        let http = reqwest::Client::builder()
            .danger_accept_invalid_certs(insecure)
            .build()
            .map_err(|e| ApiError::InvalidRequest {
                message: format!("failed to create HTTP client: {}", e),
            })?;

        if insecure {
            warn!(event = "core.api.tls_verification_disabled", api = api);
        }

        Ok(Self {
            http,
            base_url,
            token,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Client scoped to `team`.
    pub fn team_client(&self, team: &str) -> TeamClient {
        TeamClient {
            client: self.clone(),
            team: team.to_string(),
        }
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // `new` rejects cannot-be-a-base URLs, so segments are always available.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        url: &Url,
    ) -> Result<T, ApiError> {
        debug!(event = "core.api.request_started", url = %url);

        let response = self
            .authorize(request)
            .send()
            .await
            .map_err(|source| ApiError::Connection {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(
                event = "core.api.request_rejected",
                url = %url,
                status = status.as_u16()
            );
            return Err(ApiError::from_status(status, url.as_str(), body));
        }

        let bytes = response.bytes().await.map_err(|source| ApiError::Connection {
            url: url.to_string(),
            source,
        })?;
        let decoded = serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode {
            url: url.to_string(),
            message: e.to_string(),
        })?;

        debug!(
            event = "core.api.request_completed",
            url = %url,
            status = status.as_u16()
        );
        Ok(decoded)
    }
}

#[async_trait]
impl FleetApi for ApiClient {
    type Team = TeamClient;

    fn team(&self, name: &str) -> TeamClient {
        self.team_client(name)
    }

    async fn list_teams(&self) -> Result<Vec<TeamInfo>, ApiError> {
        let url = self.endpoint(&["api", "v1", "teams"]);
        self.send_json(self.http.get(url.clone()), &url).await
    }

    async fn build_events(&self, build_id: &str) -> Result<Box<dyn BuildEvents>, ApiError> {
        let url = self.endpoint(&["api", "v1", "builds", build_id, "events"]);
        let request = self.authorize(self.http.get(url.clone()));
        let events = SseBuildEvents::open(request, &url).await?;
        Ok(Box::new(events))
    }
}

/// [`ApiClient`] bound to one team.
#[derive(Debug, Clone)]
pub struct TeamClient {
    client: ApiClient,
    team: String,
}

impl TeamClient {
    fn job_endpoint(&self, pipeline: &str, job: &str, rest: &[&str]) -> Url {
        let mut segments = vec![
            "api",
            "v1",
            "teams",
            self.team.as_str(),
            "pipelines",
            pipeline,
            "jobs",
            job,
        ];
        segments.extend_from_slice(rest);
        self.client.endpoint(&segments)
    }
}

#[async_trait]
impl TeamApi for TeamClient {
    fn name(&self) -> &str {
        &self.team
    }

    async fn create_job_build(&self, pipeline: &str, job: &str) -> Result<Build, ApiError> {
        let url = self.job_endpoint(pipeline, job, &["builds"]);
        self.client
            .send_json(self.client.http.post(url.clone()), &url)
            .await
    }

    async fn job(&self, pipeline: &str, job: &str) -> Result<Job, ApiError> {
        let url = self.job_endpoint(pipeline, job, &[]);
        self.client
            .send_json(self.client.http.get(url.clone()), &url)
            .await
    }

    async fn job_build(&self, pipeline: &str, job: &str, name: &str) -> Result<Build, ApiError> {
        let url = self.job_endpoint(pipeline, job, &["builds", name]);
        self.client
            .send_json(self.client.http.get(url.clone()), &url)
            .await
    }

    async fn list_containers(&self) -> Result<Vec<Container>, ApiError> {
        let url = self
            .client
            .endpoint(&["api", "v1", "teams", self.team.as_str(), "containers"]);
        self.client
            .send_json(self.client.http.get(url.clone()), &url)
            .await
    }
}
