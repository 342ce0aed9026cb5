//! Wire types for the orchestration service API.
//!
//! Everything here mirrors the JSON the service sends and accepts. Optional
//! fields stay `Option` all the way through; presentation-level substitutions
//! (`none`, `n/a`) belong to the CLI, never to these types.

mod container;
mod events;
mod types;

pub use container::{Container, ContainerType};
pub use events::{BuildEvent, EventEnvelope, Origin};
pub use types::{Build, BuildStatus, Job, JobFlag, JobFlagError, TeamInfo};
