use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Heuristic service discovery for source repositories
#[derive(Parser, Debug)]
#[command(
    name = "infrascope",
    about = "Heuristic service discovery for source repositories",
    version,
    author,
    long_about = "infrascope walks repository trees and infers the infrastructure services \
                  they rely on (databases, caches, message queues, load balancers, \
                  containers, AWS services) from Dockerfiles, dependency manifests, \
                  load-balancer configuration and source files."
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(short = 'v', long, global = true, help = "Enable debug logging")]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Quiet mode - suppress non-error output"
    )]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(
        about = "Discover services used by one or more repositories",
        long_about = "Scans each repository independently and prints its service inventory.\n\
                      Exits with status 1 if any repository could not be scanned.\n\n\
                      Examples:\n  \
                      infrascope discover .\n  \
                      infrascope discover repos/a repos/b --format json\n  \
                      infrascope discover . --respect-gitignore --heuristic-log facts.jsonl"
    )]
    Discover(DiscoverArgs),

    #[command(
        about = "Show the effective configuration",
        long_about = "Prints configuration resolved from INFRASCOPE_* environment variables.\n\n\
                      Examples:\n  \
                      infrascope config\n  \
                      infrascope config --format json"
    )]
    Config(ConfigArgs),
}

#[derive(Parser, Debug, Clone)]
pub struct DiscoverArgs {
    #[arg(
        value_name = "PATH",
        required = true,
        help = "Repository roots to scan"
    )]
    pub paths: Vec<PathBuf>,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,

    #[arg(
        long,
        value_name = "N",
        help = "Deepest directory level to visit (default: unlimited)"
    )]
    pub max_depth: Option<usize>,

    #[arg(long, value_name = "N", help = "Stop each walk after N files")]
    pub max_files: Option<usize>,

    #[arg(long, help = "Mark static content for every visited file")]
    pub blanket_static: bool,

    #[arg(long, help = "Skip files ignored by .gitignore")]
    pub respect_gitignore: bool,

    #[arg(
        long,
        value_name = "FILE",
        help = "Append one JSON line per parsed file to FILE"
    )]
    pub heuristic_log: Option<PathBuf>,

    #[arg(
        short = 'o',
        long,
        value_name = "FILE",
        help = "Write output to file instead of stdout"
    )]
    pub output: Option<PathBuf>,
}

#[derive(Parser, Debug, Clone)]
pub struct ConfigArgs {
    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormatArg {
    Json,
    Yaml,
    Human,
}

impl From<OutputFormatArg> for super::output::OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Json => super::output::OutputFormat::Json,
            OutputFormatArg::Yaml => super::output::OutputFormat::Yaml,
            OutputFormatArg::Human => super::output::OutputFormat::Human,
        }
    }
}
