//! convoy-core: client-side control surface for a build orchestration service
//!
//! # Main Entry Points
//!
//! - [`target`] - Resolve the active target, its default team and API client
//! - [`builds`] - Trigger job builds and look up builds to watch
//! - [`watch`] - Follow a build's live output with detach-on-interrupt
//! - [`containers`] - List containers for one team or all teams
//! - [`api`] - HTTP client and the traits the operations are written against

pub mod api;
pub mod builds;
pub mod containers;
pub mod errors;
pub mod events;
pub mod logging;
pub mod target;
pub mod watch;

#[cfg(test)]
mod test_support;

pub use api::{ApiClient, ApiError, BuildEvents, FleetApi, StreamError, TeamApi, TeamClient};
pub use builds::{BuildError, TEAM_HINT, find_build, trigger_build};
pub use containers::{ContainerScope, list_containers};
pub use errors::ConvoyError;
pub use target::Target;
pub use watch::{
    DETACH_EXIT_CODE, Renderer, WatchOutcome, WatchSession, WatchState, arm_interrupt_listener,
};

pub use convoy_protocol::{
    Build, BuildEvent, BuildStatus, Container, ContainerType, Job, JobFlag, Origin, TeamInfo,
};

// Re-export logging initialization
pub use logging::init_logging;
