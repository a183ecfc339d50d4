use clap::Parser;
use ergani::utils::{logger, validation::Validate};
use ergani::{
    CliConfig, ClientConfig, DeclarationBatch, ErganiClient, ErganiError, FileConfig, HttpTransport,
};

fn load_config(cli: &CliConfig) -> ergani::Result<FileConfig> {
    let config = match &cli.config {
        Some(path) => FileConfig::from_file(path)?,
        // A dry run never talks to Ergani, credentials are optional.
        None if cli.dry_run => FileConfig {
            client: ClientConfig::from_env().unwrap_or_else(|_| ClientConfig::new("", "")),
            logging: Default::default(),
        },
        None => FileConfig {
            client: ClientConfig::from_env()?,
            logging: Default::default(),
        },
    };
    if !cli.dry_run {
        config.validate()?;
    }
    Ok(config)
}

async fn run(cli: &CliConfig, client_config: ClientConfig) -> ergani::Result<()> {
    let input = std::fs::read_to_string(&cli.input)?;
    let batch = DeclarationBatch::from_json(cli.kind, &input)?;
    tracing::info!(
        "📋 Loaded {} {} envelope(s) from {}",
        batch.len(),
        cli.kind.label(),
        cli.input.display()
    );

    if cli.dry_run {
        tracing::info!("🧪 Dry run, nothing is sent to {}", client_config.base_url);
        println!("{}", serde_json::to_string_pretty(&batch.payload())?);
        return Ok(());
    }

    let client = ErganiClient::new(HttpTransport::new(client_config)?);
    let receipts = batch.submit(&client).await?;

    for receipt in &receipts {
        println!(
            "✅ {} protocol {} submitted at {}",
            receipt.submission_id, receipt.protocol, receipt.submission_date
        );
    }
    if receipts.is_empty() {
        println!("✅ Submission accepted, Ergani returned no receipts");
    }

    Ok(())
}

fn report(e: &ErganiError) -> ! {
    tracing::error!("❌ {} (exit code {})", e, e.exit_code());
    eprintln!("❌ {}", e);
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
    std::process::exit(e.exit_code());
}

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => report(&e),
    };

    let mut logging = config.logging.clone();
    logging.json |= cli.json_logs;
    logger::init_logger(&logging, cli.verbose);

    tracing::info!("Starting ergani CLI");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
        tracing::debug!("Client config: {:?}", config.client);
    }

    if let Err(e) = run(&cli, config.client).await {
        report(&e);
    }
}
