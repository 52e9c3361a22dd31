//! CLI command implementations.

mod ask;
mod config;
mod doctor;
mod search;

pub use ask::run_ask;
pub use config::run_config;
pub use doctor::run_doctor;
pub use search::run_search;
