//! Burst target server - answers every request with a fixed body until killed

use burst_bench::{
    cli::ServerCli,
    config::load_server_config,
    error::Result,
    logging::Logger,
    server::TargetServer,
};
use std::process;

#[tokio::main]
async fn main() {
    let cli = ServerCli::parse_args();

    if let Err(e) = run_server(cli).await {
        eprintln!("{}", e.format_for_console(false));
        process::exit(e.exit_code());
    }
}

async fn run_server(cli: ServerCli) -> Result<()> {
    let config = load_server_config(&cli)?;
    let logger = Logger::for_verbosity("SERVER", config.verbose, config.debug, false);

    TargetServer::bind(&config)?
        .with_logger(logger)
        .serve()
        .await
}
