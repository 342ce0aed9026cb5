//! Container aggregator: list containers for one team, the default team, or
//! every team the credentials can see.

use tracing::{error, info, warn};

use convoy_protocol::Container;

use crate::api::{ApiError, FleetApi, TeamApi};

/// Which teams a listing covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContainerScope {
    /// An explicitly named team.
    Team(String),
    /// The target's default team.
    Default,
    /// Every team returned by the service, in its order.
    All,
}

impl ContainerScope {
    /// Scope from the `--team` and `--all-teams` flags.
    ///
    /// The flags are mutually exclusive at the CLI level; `--all-teams` wins
    /// if both are somehow set.
    pub fn from_flags(team: Option<&str>, all_teams: bool) -> Self {
        match (team, all_teams) {
            (_, true) => ContainerScope::All,
            (Some(team), false) => ContainerScope::Team(team.to_string()),
            (None, false) => ContainerScope::Default,
        }
    }
}

/// List containers for `scope`.
///
/// Teams are queried one at a time and their results concatenated in team
/// order. The first failing call aborts the listing and nothing is returned.
pub async fn list_containers<A: FleetApi>(
    api: &A,
    default_team: &str,
    scope: &ContainerScope,
) -> Result<Vec<Container>, ApiError> {
    let teams: Vec<String> = match scope {
        ContainerScope::Team(name) => vec![name.clone()],
        ContainerScope::Default => vec![default_team.to_string()],
        ContainerScope::All => api
            .list_teams()
            .await
            .inspect_err(|e| {
                error!(event = "core.containers.list_teams_failed", error = %e);
            })?
            .into_iter()
            .map(|team| team.name)
            .collect(),
    };

    info!(
        event = "core.containers.list_started",
        teams = teams.len(),
        scope = ?scope
    );

    let mut containers = Vec::new();
    for name in &teams {
        let team = api.team(name);
        let listed = team.list_containers().await.map_err(|e| {
            error!(
                event = "core.containers.list_failed",
                team = team.name(),
                error_code = crate::errors::ConvoyError::error_code(&e),
                error = %e
            );
            e
        })?;

        for container in listed.iter().filter(|c| !c.has_consistent_context()) {
            warn!(
                event = "core.containers.inconsistent_context",
                team = team.name(),
                handle = %container.id
            );
        }

        containers.extend(listed);
    }

    info!(
        event = "core.containers.list_completed",
        teams = teams.len(),
        containers = containers.len()
    );
    Ok(containers)
}
