//! Orchestration service API.
//!
//! Operations in this crate are written against the [`FleetApi`] and
//! [`TeamApi`] traits; [`ApiClient`] is the HTTP implementation used by the
//! CLI, and tests substitute in-memory fakes.

mod client;
mod errors;
mod stream;

pub use client::{ApiClient, TeamClient};
pub use errors::{ApiError, StreamError};
pub use stream::SseBuildEvents;

use async_trait::async_trait;
use convoy_protocol::{Build, BuildEvent, Container, Job, TeamInfo};

/// Calls scoped to a single team.
#[async_trait]
pub trait TeamApi: Send + Sync {
    fn name(&self) -> &str;

    /// Create a new build of `pipeline/job`.
    async fn create_job_build(&self, pipeline: &str, job: &str) -> Result<Build, ApiError>;

    async fn job(&self, pipeline: &str, job: &str) -> Result<Job, ApiError>;

    async fn job_build(&self, pipeline: &str, job: &str, name: &str) -> Result<Build, ApiError>;

    /// Live containers of this team, in the order the service returns them.
    async fn list_containers(&self) -> Result<Vec<Container>, ApiError>;
}

/// Calls that are not scoped to a team.
#[async_trait]
pub trait FleetApi: Send + Sync {
    type Team: TeamApi;

    fn team(&self, name: &str) -> Self::Team;

    /// Teams the current credentials may see, in service order.
    async fn list_teams(&self) -> Result<Vec<TeamInfo>, ApiError>;

    /// Open the live event stream of a build, keyed by its decimal id.
    async fn build_events(&self, build_id: &str) -> Result<Box<dyn BuildEvents>, ApiError>;
}

/// A lazily consumed, time-ordered build event sequence.
#[async_trait]
pub trait BuildEvents: Send {
    /// Next event, or `None` once the service signalled the end of the stream.
    async fn next_event(&mut self) -> Option<Result<BuildEvent, StreamError>>;

    fn close(&mut self);
}
