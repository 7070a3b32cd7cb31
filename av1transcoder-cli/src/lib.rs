// av1transcoder-cli/src/lib.rs
//
// Library portion of the av1transcoder CLI application.
// Contains the option schema, argument file expansion and command logic.

pub mod argfile;
pub mod cli;
pub mod commands;
pub mod error;
pub mod logging;

// Re-export items needed by the binary or integration tests
pub use argfile::expand_argument_files;
pub use cli::Cli;
pub use commands::plan::report_plan;
