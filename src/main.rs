use anyhow::Context;
use cart_store::utils::error::ErrorSeverity;
use cart_store::utils::{logger, validation::Validate};
use cart_store::{CartEngine, CartService, CliConfig, FsRecordStore};
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let settings = match cli.load_settings() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    if cli.json_logs || settings.json_logs() {
        logger::init_json_logger(cli.verbose, settings.log_level());
    } else {
        logger::init_cli_logger(cli.verbose, settings.log_level());
    }

    tracing::debug!("CLI config: {:?}", cli);

    if let Err(e) = settings.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(1);
    }

    let store = FsRecordStore::from_config(&settings);
    tracing::debug!("Using data directory {}", store.root().display());
    let engine = CartEngine::new(CartService::new(store, settings));

    let operation = cli.operation();
    match engine.run(&operation).await {
        Ok(output) => {
            let rendered =
                serde_json::to_string_pretty(&output).context("failed to render result")?;
            println!("{}", rendered);
        }
        Err(e) => {
            tracing::error!(
                "{} failed: {} (Category: {:?}, Severity: {:?})",
                operation.name(),
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };
            std::process::exit(exit_code);
        }
    }

    Ok(())
}
