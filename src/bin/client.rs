//! Burst client - fires a burst of concurrent GET requests and prints one summary line

use burst_bench::{
    cli::ClientCli,
    client::HttpFetcher,
    config::{display_client_config, ConfigParser},
    error::Result,
    executor::BurstExecutor,
    logging::Logger,
    output::{render_report, FormatterFactory},
    PKG_NAME, VERSION,
};
use std::process;
use std::sync::Arc;

#[tokio::main]
async fn main() {
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("Application panic: {}", panic_info);
        process::exit(1);
    }));

    let cli = ClientCli::parse_args();
    let use_color = cli.color;

    if let Err(e) = run_client(cli).await {
        eprintln!("{}", e.format_for_console(use_color));
        process::exit(e.exit_code());
    }
}

/// Main client logic
async fn run_client(cli: ClientCli) -> Result<()> {
    let parser = ConfigParser::new()?;
    let config = parser.parse_client(&cli)?;

    if config.debug {
        eprintln!("{} v{}", PKG_NAME, VERSION);
        if parser.env_file_loaded() {
            eprintln!("Loaded configuration from .env file");
        }
        eprintln!("{}", display_client_config(&config));
        eprintln!();
    }

    let logger = Logger::for_verbosity("CLIENT", config.verbose, config.debug, config.enable_color);
    logger.start_operation("burst").await;

    let fetcher = Arc::new(HttpFetcher::from_config(&config)?);
    let executor = BurstExecutor::new(&config, fetcher)?.with_logger(logger.clone());
    let summary = match executor.run().await {
        Ok(summary) => summary,
        Err(e) => {
            logger.error("Burst aborted").error_info(&e).log().await;
            logger.end_operation("burst", false).await;
            return Err(e);
        }
    };

    logger.info("Burst finished").summary(&summary).log().await;
    logger.end_operation("burst", summary.abandoned == 0).await;

    let formatter = FormatterFactory::create(config.enable_color);
    println!("{}", render_report(formatter.as_ref(), &summary, config.verbose)?);

    Ok(())
}
