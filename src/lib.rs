pub mod config;
pub mod error;
pub mod ledger;
pub mod models;
pub mod store;
pub mod utils;

pub use config::Config;
pub use error::{Result, TrackerError};
pub use ledger::*;
pub use models::*;
pub use store::*;
pub use utils::*;
