//! In-memory [`FleetApi`] used by unit tests.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use reqwest::StatusCode;

use convoy_protocol::{Build, BuildEvent, Container, ContainerType, Job, TeamInfo};

use crate::api::{ApiError, BuildEvents, FleetApi, StreamError, TeamApi};

#[derive(Default)]
struct FakeState {
    teams: Option<Result<Vec<TeamInfo>, StatusCode>>,
    containers: HashMap<String, Result<Vec<Container>, StatusCode>>,
    created: HashMap<String, Result<Build, StatusCode>>,
    jobs: HashMap<String, Job>,
    job_builds: HashMap<String, Build>,
    events: Mutex<Option<FakeEvents>>,
    calls: Mutex<Vec<String>>,
}

impl FakeState {
    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

fn rejected(status: StatusCode, url: &str) -> ApiError {
    ApiError::from_status(status, url, format!("{} from fake", status.as_u16()))
}

#[derive(Default)]
pub struct FakeFleet {
    state: Arc<FakeState>,
}

impl FakeFleet {
    pub fn new() -> Self {
        Self::default()
    }

    fn state_mut(&mut self) -> &mut FakeState {
        Arc::get_mut(&mut self.state).expect("configure the fake before handing out teams")
    }

    pub fn with_teams(mut self, names: &[&str]) -> Self {
        let teams = names
            .iter()
            .enumerate()
            .map(|(i, name)| TeamInfo {
                id: Some(i as u64 + 1),
                name: name.to_string(),
            })
            .collect();
        self.state_mut().teams = Some(Ok(teams));
        self
    }

    pub fn with_teams_error(mut self, status: StatusCode) -> Self {
        self.state_mut().teams = Some(Err(status));
        self
    }

    pub fn with_containers(mut self, team: &str, containers: Vec<Container>) -> Self {
        self.state_mut()
            .containers
            .insert(team.to_string(), Ok(containers));
        self
    }

    pub fn with_containers_error(mut self, team: &str, status: StatusCode) -> Self {
        self.state_mut()
            .containers
            .insert(team.to_string(), Err(status));
        self
    }

    pub fn with_created_build(mut self, team: &str, build: Build) -> Self {
        self.state_mut().created.insert(team.to_string(), Ok(build));
        self
    }

    pub fn with_create_error(mut self, team: &str, status: StatusCode) -> Self {
        self.state_mut().created.insert(team.to_string(), Err(status));
        self
    }

    pub fn with_job(mut self, team: &str, pipeline: &str, job: Job) -> Self {
        let key = format!("{}/{}/{}", team, pipeline, job.name);
        self.state_mut().jobs.insert(key, job);
        self
    }

    pub fn with_job_build(mut self, team: &str, pipeline: &str, job: &str, build: Build) -> Self {
        let key = format!("{}/{}/{}/{}", team, pipeline, job, build.name);
        self.state_mut().job_builds.insert(key, build);
        self
    }

    pub fn with_events(self, events: FakeEvents) -> Self {
        *self.state.events.lock().unwrap() = Some(events);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.state.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl FleetApi for FakeFleet {
    type Team = FakeTeam;

    fn team(&self, name: &str) -> FakeTeam {
        FakeTeam {
            name: name.to_string(),
            state: Arc::clone(&self.state),
        }
    }

    async fn list_teams(&self) -> Result<Vec<TeamInfo>, ApiError> {
        self.state.record("list_teams".to_string());
        match &self.state.teams {
            Some(Ok(teams)) => Ok(teams.clone()),
            Some(Err(status)) => Err(rejected(*status, "/api/v1/teams")),
            None => Ok(Vec::new()),
        }
    }

    async fn build_events(&self, build_id: &str) -> Result<Box<dyn BuildEvents>, ApiError> {
        self.state.record(format!("events:{}", build_id));
        let events = self.state.events.lock().unwrap().take();
        match events {
            Some(events) => Ok(Box::new(events)),
            None => Err(rejected(StatusCode::NOT_FOUND, "/api/v1/builds/events")),
        }
    }
}

pub struct FakeTeam {
    name: String,
    state: Arc<FakeState>,
}

#[async_trait]
impl TeamApi for FakeTeam {
    fn name(&self) -> &str {
        &self.name
    }

    async fn create_job_build(&self, pipeline: &str, job: &str) -> Result<Build, ApiError> {
        self.state
            .record(format!("create:{}/{}/{}", self.name, pipeline, job));
        match self.state.created.get(&self.name) {
            Some(Ok(build)) => Ok(build.clone()),
            Some(Err(status)) => Err(rejected(*status, "/builds")),
            None => Err(rejected(StatusCode::NOT_FOUND, "/builds")),
        }
    }

    async fn job(&self, pipeline: &str, job: &str) -> Result<Job, ApiError> {
        self.state.record(format!("job:{}/{}/{}", self.name, pipeline, job));
        self.state
            .jobs
            .get(&format!("{}/{}/{}", self.name, pipeline, job))
            .cloned()
            .ok_or_else(|| rejected(StatusCode::NOT_FOUND, "/jobs"))
    }

    async fn job_build(&self, pipeline: &str, job: &str, name: &str) -> Result<Build, ApiError> {
        self.state
            .record(format!("job_build:{}/{}/{}/{}", self.name, pipeline, job, name));
        self.state
            .job_builds
            .get(&format!("{}/{}/{}/{}", self.name, pipeline, job, name))
            .cloned()
            .ok_or_else(|| rejected(StatusCode::NOT_FOUND, "/builds"))
    }

    async fn list_containers(&self) -> Result<Vec<Container>, ApiError> {
        self.state.record(format!("containers:{}", self.name));
        match self.state.containers.get(&self.name) {
            Some(Ok(containers)) => Ok(containers.clone()),
            Some(Err(status)) => Err(rejected(*status, "/containers")),
            None => Ok(Vec::new()),
        }
    }
}

/// Scripted event stream. Once the script runs out it either ends or, when
/// `hang` is set, never yields again.
pub struct FakeEvents {
    script: VecDeque<Result<BuildEvent, StreamError>>,
    hang: bool,
    closed: Arc<AtomicBool>,
}

impl FakeEvents {
    pub fn new(script: Vec<Result<BuildEvent, StreamError>>) -> Self {
        Self {
            script: script.into(),
            hang: false,
            closed: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn hanging(mut self) -> Self {
        self.hang = true;
        self
    }

    /// Flag set once `close` runs.
    pub fn closed_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.closed)
    }
}

#[async_trait]
impl BuildEvents for FakeEvents {
    async fn next_event(&mut self) -> Option<Result<BuildEvent, StreamError>> {
        match self.script.pop_front() {
            Some(event) => Some(event),
            None if self.hang => std::future::pending().await,
            None => None,
        }
    }

    fn close(&mut self) {
        self.closed.store(true, Ordering::SeqCst);
    }
}

pub fn build(id: u64, name: &str) -> Build {
    Build {
        id,
        name: name.to_string(),
        status: None,
        team_name: None,
        pipeline_name: None,
        job_name: None,
        api_url: None,
    }
}

pub fn container(id: &str) -> Container {
    Container::new(id, "worker", ContainerType::Task)
}
