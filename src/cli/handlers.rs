use crate::cli::commands::{ConfigArgs, DiscoverArgs};
use crate::cli::output::OutputFormatter;
use crate::config::InfrascopeConfig;
use crate::discovery::discover_many;
use tracing::{debug, error, info, warn};

/// Runs discovery for every path and prints the combined result.
///
/// Returns the process exit code: 1 if any repository could not be scanned
/// or the output could not be produced, 0 otherwise.
pub async fn handle_discover(args: &DiscoverArgs, quiet: bool) -> i32 {
    info!(repos = args.paths.len(), "Starting service discovery");

    let config = match InfrascopeConfig::from_env() {
        Ok(config) => apply_overrides(config, args),
        Err(e) => {
            error!("Configuration error: {}", e);
            eprintln!("\nPlease check your INFRASCOPE_* environment variables.");
            return 1;
        }
    };

    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        eprintln!("\nPlease check your environment variables and command-line arguments.");
        return 1;
    }
    debug!(?config, "Effective configuration");

    let results = discover_many(
        args.paths.clone(),
        config.scan_config(),
        config.heuristic_logger(),
    )
    .await;

    let mut failed = 0usize;
    for (path, result) in &results {
        match result {
            Ok(report) => {
                for diagnostic in &report.diagnostics {
                    warn!(
                        repo = %path.display(),
                        path = ?diagnostic.path,
                        "Skipped: {}",
                        diagnostic.message
                    );
                }
            }
            Err(e) => {
                failed += 1;
                error!(repo = %path.display(), "Discovery failed: {}", e);
            }
        }
    }

    let formatter = OutputFormatter::new(args.format.into());
    let output = match formatter.format_results(&results) {
        Ok(output) => output,
        Err(e) => {
            error!("Failed to format output: {:#}", e);
            return 1;
        }
    };

    if let Some(output_file) = &args.output {
        match std::fs::write(output_file, &output) {
            Ok(_) => {
                info!("Output written to: {}", output_file.display());
                if !quiet {
                    println!("Output written to: {}", output_file.display());
                }
            }
            Err(e) => {
                error!("Failed to write output to file: {}", e);
                return 1;
            }
        }
    } else {
        println!("{}", output);
    }

    if failed > 0 {
        error!(failed, total = results.len(), "Some repositories failed");
        1
    } else {
        0
    }
}

pub fn handle_config(args: &ConfigArgs) -> i32 {
    let config = match InfrascopeConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Configuration error: {}", e);
            eprintln!("\nPlease check your INFRASCOPE_* environment variables.");
            return 1;
        }
    };

    if let Err(e) = config.validate() {
        warn!("Configuration is invalid: {}", e);
    }

    match OutputFormatter::new(args.format.into()).format_config(&config) {
        Ok(output) => {
            println!("{}", output);
            0
        }
        Err(e) => {
            error!("Failed to format configuration: {:#}", e);
            1
        }
    }
}

fn apply_overrides(config: InfrascopeConfig, args: &DiscoverArgs) -> InfrascopeConfig {
    InfrascopeConfig {
        max_depth: args.max_depth.or(config.max_depth),
        max_files: args.max_files.unwrap_or(config.max_files),
        respect_gitignore: args.respect_gitignore || config.respect_gitignore,
        blanket_static_content: args.blanket_static || config.blanket_static_content,
        heuristic_log: args.heuristic_log.clone().or(config.heuristic_log.clone()),
        ..config
    }
}
