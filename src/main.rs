use clap::Parser;
use service_triage::config::Command;
use service_triage::utils::error::{ErrorSeverity, TriageError};
use service_triage::utils::{logger, validation::Validate};
use service_triage::{advance_workflow, classify, Cli, IntakePipeline, LocalStorage, TriageRunner};

fn exit_with(e: &TriageError) -> ! {
    tracing::error!(
        "❌ Triage failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

    // 根據錯誤嚴重程度決定退出碼
    let exit_code = match e.severity() {
        ErrorSeverity::Low | ErrorSeverity::High => 1,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    logger::init_logger(&cli.log_format, cli.verbose);
    tracing::debug!("CLI args: {:?}", cli);

    match cli.command {
        Command::Classify(args) => {
            let result = classify(&args.summary, &args.description, &args.channel);
            tracing::debug!(
                "Classified via {} as {} / {}",
                args.channel,
                result.department,
                result.priority
            );
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Command::Advance { status } => {
            let next = advance_workflow(&status);
            println!("{}", next);
        }
        Command::Intake(config) => {
            if let Err(e) = config.validate() {
                tracing::error!("❌ Configuration validation failed: {}", e);
                exit_with(&e);
            }

            tracing::info!("Starting service-triage intake from {}", config.seed_file);

            let storage = LocalStorage::default();
            let pipeline = IntakePipeline::new(storage, config);
            let runner = TriageRunner::new(pipeline);

            match runner.run().await {
                Ok(output_path) => {
                    tracing::info!("✅ Intake completed successfully!");
                    println!("✅ Intake completed successfully!");
                    println!("📁 Reports saved to: {}", output_path);
                }
                Err(e) => exit_with(&e),
            }
        }
    }

    Ok(())
}
