//! CLI command implementations.

mod budget;
mod config;
mod doctor;
mod export;
mod formats;
mod read;

pub use budget::run_budget;
pub use config::run_config;
pub use doctor::run_doctor;
pub use export::{run_export, ExportFlags};
pub use formats::run_formats;
pub use read::run_read;
