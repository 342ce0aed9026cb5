use serde::{Deserialize, Serialize};

/// Lifecycle status of a build as reported by the service.
///
/// The client never sets this; it only reads what the service returns.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildStatus {
    Pending,
    Started,
    Succeeded,
    Failed,
    Errored,
    Aborted,
}

impl BuildStatus {
    /// Whether the build can no longer change status.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            BuildStatus::Succeeded | BuildStatus::Failed | BuildStatus::Errored | BuildStatus::Aborted
        )
    }
}

impl std::fmt::Display for BuildStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BuildStatus::Pending => write!(f, "pending"),
            BuildStatus::Started => write!(f, "started"),
            BuildStatus::Succeeded => write!(f, "succeeded"),
            BuildStatus::Failed => write!(f, "failed"),
            BuildStatus::Errored => write!(f, "errored"),
            BuildStatus::Aborted => write!(f, "aborted"),
        }
    }
}

/// A build as returned by the create-build and get-build endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Build {
    pub id: u64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<BuildStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pipeline_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,
}

impl Build {
    /// Identifier used to open the build's event stream (decimal id).
    pub fn event_stream_id(&self) -> String {
        self.id.to_string()
    }
}

/// A job definition, as far as the CLI cares about it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pipeline_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_build: Option<Build>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finished_build: Option<Build>,
}

impl Job {
    /// The build to follow: the running/pending one, else the last finished one.
    pub fn current_build(&self) -> Option<&Build> {
        self.next_build.as_ref().or(self.finished_build.as_ref())
    }
}

/// A team visible to the current credentials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub name: String,
}

/// A `<pipeline>/<job>` reference as given on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobFlag {
    pub pipeline: String,
    pub job: String,
}

/// Error parsing a [`JobFlag`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobFlagError {
    MissingSeparator { input: String },
    EmptyPart { input: String },
}

impl std::fmt::Display for JobFlagError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JobFlagError::MissingSeparator { input } => write!(
                f,
                "argument format should be <pipeline>/<job>, got '{}'",
                input
            ),
            JobFlagError::EmptyPart { input } => write!(
                f,
                "pipeline and job names must not be empty, got '{}'",
                input
            ),
        }
    }
}

impl std::error::Error for JobFlagError {}

impl std::str::FromStr for JobFlag {
    type Err = JobFlagError;

    // Only the first '/' separates; the service validates the job name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (pipeline, job) = s
            .split_once('/')
            .ok_or_else(|| JobFlagError::MissingSeparator {
                input: s.to_string(),
            })?;
        if pipeline.is_empty() || job.is_empty() {
            return Err(JobFlagError::EmptyPart {
                input: s.to_string(),
            });
        }
        Ok(JobFlag {
            pipeline: pipeline.to_string(),
            job: job.to_string(),
        })
    }
}

impl std::fmt::Display for JobFlag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.pipeline, self.job)
    }
}
