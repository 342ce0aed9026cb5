//! Build trigger controller and build lookup for `watch`.

mod errors;
mod lookup;
mod trigger;

pub use errors::BuildError;
pub use lookup::find_build;
pub use trigger::{TEAM_HINT, trigger_build};
