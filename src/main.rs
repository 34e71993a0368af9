use clap::Parser;
use std::io::{self, Write};
use tracing::debug;

use audio_grab::cli::{Cli, Commands, ConfigCommand};
use audio_grab::commands;
use audio_grab::utils::logging::init_tracing;
use audio_grab::{AppConfig, AppError, AppResult, NAME, VERSION};

/// Print a failure once for the user; the debug form only reaches the log
fn report_error<W: Write>(err: &AppError, out: &mut W) {
    debug!("{:?}", err);
    let _ = writeln!(out, "Error: {}", err);
}

async fn run(cli: Cli) -> AppResult<()> {
    let config_path = cli.config.as_deref();

    match cli.command {
        Some(Commands::Config { ref command }) => {
            let mut stdout = io::stdout();
            match command {
                ConfigCommand::Show => {
                    let config = AppConfig::load_or_default(config_path);
                    commands::config::show(&config, &mut stdout)
                }
                ConfigCommand::Path => commands::config::path(config_path, &mut stdout),
                ConfigCommand::Reset => commands::config::reset(config_path, &mut stdout),
            }
        }
        Some(Commands::CheckDeps) => {
            let config = AppConfig::load_or_default(config_path);
            let all_present = commands::system::check_deps(&config, &mut io::stdout()).await?;
            if !all_present {
                std::process::exit(1);
            }
            Ok(())
        }
        None => {
            let config = AppConfig::load_or_default(config_path);
            let result = commands::grab::execute(cli.grab_args(), &config).await?;
            debug!("Finished: {:?}", result);
            Ok(())
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    debug!("{} v{}", NAME, VERSION);

    if let Err(err) = run(cli).await {
        report_error(&err, &mut io::stderr());
        std::process::exit(err.exit_code());
    }
}
