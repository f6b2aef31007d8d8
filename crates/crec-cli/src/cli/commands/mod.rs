//! CLI command handlers. Each command is in its own file for clarity.

mod get;
mod info;
mod open;

pub use get::run_get;
pub use info::run_info;
pub use open::run_open;
