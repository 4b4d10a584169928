pub mod log_picks;
pub mod pending;
pub mod update_result;
pub mod validation;

pub use log_picks::{log_picks, LogSummary};
pub use pending::{pending_games, PendingGame};
pub use update_result::{ResultUpdate, ResultUpdater, TeamScore, UpdateOutcome};
