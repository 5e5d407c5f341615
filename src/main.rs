use anyhow::Result;
use commonkit::cli;

fn main() -> Result<()> {
    // Process CLI arguments first (before logging init for cleaner output)
    let options = match cli::process_cli() {
        cli::CliResult::Exit(code) => {
            if code == 0 {
                return Ok(());
            }
            std::process::exit(code);
        }
        cli::CliResult::Continue(options) => options,
    };

    let config = options.load_config()?;
    // CLI --log-level flag takes highest precedence, then RUST_LOG, then config
    commonkit::logging::init_logging(options.log_level, config.log_level);

    log::info!(
        "commonkit {} replaying {}",
        commonkit::VERSION,
        options.trace.display()
    );

    let result = cli::run_replay(&options, &config);
    if let Err(ref e) = result {
        eprintln!("commonkit: error: {e:#}");
    }
    result
}
