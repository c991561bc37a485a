use anyhow::Context;
use clap::Parser;
use day_grid::core::ConfigProvider;
use day_grid::utils::{logger, validation::Validate};
use day_grid::{CalendarPipeline, LocalStorage, RenderEngine, TomlConfig};

#[derive(Parser)]
#[command(name = "toml-render")]
#[command(about = "Render a calendar grid from a TOML configuration file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "day-grid.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override the output directory from config
    #[arg(long)]
    output_path: Option<String>,

    /// Show what would be rendered without fetching or writing anything
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = TomlConfig::from_file(&args.config)
        .with_context(|| format!("Failed to load config file '{}'", args.config))?;

    let verbose = args.verbose || config.verbose();
    if config.json_logs() {
        logger::init_json_logger(verbose);
    } else {
        logger::init_cli_logger(verbose);
    }

    tracing::info!("🚀 Starting TOML-based calendar render");
    tracing::info!("📁 Loaded configuration from: {}", args.config);

    if let Some(output_path) = args.output_path {
        tracing::info!("🔧 Output path overridden to: {}", output_path);
        config.output.output_path = output_path;
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    display_config_summary(&config);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - nothing will be fetched or written");
        return Ok(());
    }

    let storage = LocalStorage::new(config.output_path().to_string());
    let pipeline = CalendarPipeline::new(storage, config);
    let engine = RenderEngine::new(pipeline);

    let output_path = engine.run().await.map_err(|e| {
        tracing::error!(
            "❌ Rendering failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
        anyhow::anyhow!(e.user_friendly_message())
    })?;

    println!("✅ Calendar rendered successfully!");
    println!("📁 Output saved to: {}", output_path);
    Ok(())
}

fn display_config_summary(config: &TomlConfig) {
    let days = config.days();
    tracing::info!("📋 Configuration Summary:");
    tracing::info!("   Source: {}", config.source().location());
    match (days.first(), days.last()) {
        (Some(first), Some(last)) => {
            tracing::info!("   Days: {} ({} to {})", days.len(), first, last)
        }
        _ => tracing::warn!("   Days: none requested"),
    }
    tracing::info!("   Slot size: {} minutes", config.quantum_minutes());
    tracing::info!("   Locale: {}", config.locale());
    tracing::info!("   Output: {} {:?}", config.output_path(), config.output_formats());
}
