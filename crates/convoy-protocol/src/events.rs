use serde::{Deserialize, Serialize};

use crate::types::BuildStatus;

/// Envelope wrapping every message on a build's event stream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventEnvelope {
    pub event: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default)]
    pub data: serde_json::Value,
}

/// The step a build event belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Origin {
    #[serde(default)]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// One decoded event from a build's event stream.
#[derive(Debug, Clone, PartialEq)]
pub enum BuildEvent {
    Status {
        status: BuildStatus,
        time: Option<i64>,
    },
    Log {
        origin: Origin,
        payload: String,
    },
    Error {
        message: String,
        origin: Option<Origin>,
    },
    SelectedWorker {
        worker: String,
    },
    InitializeTask {
        origin: Option<Origin>,
    },
    Finish {
        kind: String,
        origin: Option<Origin>,
        exit_status: Option<i32>,
    },
    /// Any event kind the CLI has no use for.
    Other {
        kind: String,
    },
}

#[derive(Deserialize)]
struct StatusData {
    status: BuildStatus,
    #[serde(default)]
    time: Option<i64>,
}

#[derive(Deserialize)]
struct LogData {
    #[serde(default = "default_origin")]
    origin: Origin,
    #[serde(default)]
    payload: String,
}

#[derive(Deserialize)]
struct ErrorData {
    message: String,
    #[serde(default)]
    origin: Option<Origin>,
}

#[derive(Deserialize)]
struct SelectedWorkerData {
    selected_worker: String,
}

#[derive(Deserialize)]
struct StepData {
    #[serde(default)]
    origin: Option<Origin>,
    #[serde(default)]
    exit_status: Option<i32>,
}

fn default_origin() -> Origin {
    Origin {
        id: String::new(),
        source: None,
    }
}

impl BuildEvent {
    /// Decode an event from the JSON text of one stream message.
    pub fn parse(data: &str) -> Result<Self, serde_json::Error> {
        let envelope: EventEnvelope = serde_json::from_str(data)?;
        Self::from_envelope(envelope)
    }

    /// Decode the typed event carried by an envelope.
    pub fn from_envelope(envelope: EventEnvelope) -> Result<Self, serde_json::Error> {
        let EventEnvelope { event, data, .. } = envelope;
        let decoded = match event.as_str() {
            "status" => {
                let d: StatusData = serde_json::from_value(data)?;
                BuildEvent::Status {
                    status: d.status,
                    time: d.time,
                }
            }
            "log" => {
                let d: LogData = serde_json::from_value(data)?;
                BuildEvent::Log {
                    origin: d.origin,
                    payload: d.payload,
                }
            }
            "error" => {
                let d: ErrorData = serde_json::from_value(data)?;
                BuildEvent::Error {
                    message: d.message,
                    origin: d.origin,
                }
            }
            "selected-worker" => {
                let d: SelectedWorkerData = serde_json::from_value(data)?;
                BuildEvent::SelectedWorker {
                    worker: d.selected_worker,
                }
            }
            "initialize-task" => {
                let d: StepData = serde_json::from_value(data)?;
                BuildEvent::InitializeTask { origin: d.origin }
            }
            "finish-task" | "finish-get" | "finish-put" => {
                let d: StepData = serde_json::from_value(data)?;
                BuildEvent::Finish {
                    kind: event,
                    origin: d.origin,
                    exit_status: d.exit_status,
                }
            }
            _ => BuildEvent::Other { kind: event },
        };
        Ok(decoded)
    }
}
