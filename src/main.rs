use anyhow::Context;
use clap::Parser;
use phonebook::utils::{logger, validation::Validate};
use phonebook::{CliConfig, PhonebookError, Session, TomlConfig};

fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting phonebook");
    tracing::debug!("CLI config: {:?}", cli);

    if let Err(e) = cli.validate() {
        exit_with(&e);
    }

    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path);
            match TomlConfig::from_file(path) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("Failed to load config file '{}': {}", path, e);
                    exit_with(&e);
                }
            }
        }
        None => TomlConfig::default(),
    };

    if let Some(prompt) = cli.prompt {
        tracing::debug!("Prompt overridden to: {:?}", prompt);
        config.shell.prompt = Some(prompt);
    }

    if let Err(e) = config.validate() {
        exit_with(&e);
    }

    let session = Session::new(config);
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    session
        .run(stdin.lock(), stdout.lock())
        .context("interactive session failed")?;

    Ok(())
}

fn exit_with(e: &PhonebookError) -> ! {
    tracing::error!(
        "{} (Severity: {:?}) Suggestion: {}",
        e,
        e.severity(),
        e.recovery_suggestion()
    );
    eprintln!("{}", e.user_friendly_message());
    eprintln!("Suggestion: {}", e.recovery_suggestion());
    std::process::exit(e.exit_code().max(1));
}
