use serde::{Deserialize, Serialize};

/// Kind of step a container executes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContainerType {
    Check,
    Get,
    Put,
    Task,
}

impl std::fmt::Display for ContainerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContainerType::Check => write!(f, "check"),
            ContainerType::Get => write!(f, "get"),
            ContainerType::Put => write!(f, "put"),
            ContainerType::Task => write!(f, "task"),
        }
    }
}

/// A live execution container as listed by the service.
///
/// Pipeline, job and build fields are absent for one-off builds and for
/// checks with no build association. A present `job_name` implies a present
/// `pipeline_name`.
///
/// Fields this type does not model are kept in `extra` so re-encoding a
/// listing reproduces what the service sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Container {
    /// Container handle, unique within one listing.
    pub id: String,
    pub worker_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pipeline_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build_id: Option<u64>,
    #[serde(rename = "type")]
    pub container_type: ContainerType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_name: Option<String>,
    /// Dotted attempt ordinal, e.g. `1.5`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attempt: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Container {
    /// Minimal container with only the required fields set.
    pub fn new(
        id: impl Into<String>,
        worker_name: impl Into<String>,
        container_type: ContainerType,
    ) -> Self {
        Self {
            id: id.into(),
            worker_name: worker_name.into(),
            pipeline_name: None,
            job_name: None,
            build_name: None,
            build_id: None,
            container_type,
            step_name: None,
            resource_name: None,
            attempt: None,
            extra: serde_json::Map::new(),
        }
    }

    /// The step or resource this container runs for.
    pub fn display_name(&self) -> Option<&str> {
        self.step_name.as_deref().or(self.resource_name.as_deref())
    }

    /// False when a job is named without its pipeline.
    pub fn has_consistent_context(&self) -> bool {
        self.job_name.is_none() || self.pipeline_name.is_some()
    }
}
