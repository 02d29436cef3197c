use infrascope::cli::commands::{CliArgs, Commands};
use infrascope::cli::handlers::{handle_config, handle_discover};
use infrascope::util::logging::{self, LoggingConfig};
use infrascope::VERSION;

use clap::Parser;
use tracing::{debug, Level};

#[tokio::main]
async fn main() {
    let args = CliArgs::parse();
    init_logging_from_args(&args);

    debug!("infrascope v{} starting", VERSION);
    debug!("Arguments: {:?}", args);

    let exit_code = match &args.command {
        Commands::Discover(discover_args) => handle_discover(discover_args, args.quiet).await,
        Commands::Config(config_args) => handle_config(config_args),
    };

    std::process::exit(exit_code);
}

fn init_logging_from_args(args: &CliArgs) {
    let from_env = logging::config_from_env();
    let level = if let Some(level_str) = &args.log_level {
        logging::parse_level(level_str)
    } else if args.verbose {
        Level::DEBUG
    } else if args.quiet {
        Level::ERROR
    } else {
        from_env.level
    };

    logging::init_logging(LoggingConfig { level, ..from_env });
}
