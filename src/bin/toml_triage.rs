use anyhow::Context;
use clap::Parser;
use service_triage::core::{ConfigProvider, Pipeline};
use service_triage::utils::{logger, validation::Validate};
use service_triage::{IntakePipeline, LocalStorage, TomlConfig, TriageRunner};

#[derive(Parser)]
#[command(name = "toml-triage")]
#[command(about = "Service request intake driven by a TOML configuration file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "triage-config.toml")]
    config: String,

    /// Enable verbose output (overrides the config file)
    #[arg(short, long)]
    verbose: bool,

    /// Override the seed file from config
    #[arg(long)]
    seed_file: Option<String>,

    /// Classify and summarise without writing any report
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // 載入 TOML 配置
    let mut config = TomlConfig::from_file(&args.config)
        .with_context(|| format!("failed to load config file '{}'", args.config))?;

    logger::init_logger(config.log_format(), args.verbose || config.verbose());
    tracing::info!("🚀 Starting TOML-based triage: {}", config.intake.name);
    tracing::info!("📁 Configuration loaded from: {}", args.config);

    // 應用命令列覆蓋設定
    if let Some(seed_file) = args.seed_file {
        tracing::info!("🔧 Seed file overridden to: {}", seed_file);
        config.intake.seed_file = seed_file;
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        return Err(e).context("invalid configuration");
    }

    tracing::info!(
        "Seed: {} | Output: {} | Formats: {}",
        config.seed_file(),
        config.output_path(),
        config.output_formats().join(", ")
    );

    let pipeline = IntakePipeline::new(LocalStorage::default(), config);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - no reports will be written");
        let seeds = pipeline.extract().await?;
        let result = pipeline.transform(seeds).await?;
        println!("{}", serde_json::to_string_pretty(&result.summary)?);
        return Ok(());
    }

    let output_path = TriageRunner::new(pipeline)
        .run()
        .await
        .context("intake run failed")?;

    println!("✅ Intake completed successfully!");
    println!("📁 Reports saved to: {}", output_path);
    Ok(())
}
