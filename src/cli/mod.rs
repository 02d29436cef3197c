pub mod commands;
pub mod handlers;
pub mod output;

pub use commands::{CliArgs, Commands, ConfigArgs, DiscoverArgs, OutputFormatArg};
pub use output::{OutputFormat, OutputFormatter};
