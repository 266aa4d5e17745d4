use clap::Parser;
use cockpit::cli::Cli;
use cockpit::logging::setup_logging;
use cockpit::Cockpit;
use log::info;
use std::process;

fn main() {
    let cli = Cli::parse();
    setup_logging(cli.logging_level);

    let config = cli.load_config().unwrap_or_else(|e| {
        log::error!("{e}");
        process::exit(2);
    });
    info!(
        "Main: starting {} ({}x{}, locale {})",
        config.title,
        config.window_width,
        config.window_height,
        config.locale.code()
    );

    let result = Cockpit::new(config).and_then(|cockpit| cockpit.show());
    if let Err(e) = result {
        log::error!("{e}");
        process::exit(1);
    }
    info!("Main: display closed.");
}
