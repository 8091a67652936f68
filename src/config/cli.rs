use crate::core::pipeline::OUTPUT_FORMATS;
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_file_extension, validate_one_of, validate_path, Validate};
use clap::{Args, Parser, Subcommand};
use serde::{Deserialize, Serialize};

#[derive(Debug, Parser)]
#[command(name = "service-triage")]
#[command(about = "Keyword triage and workflow tracking for government service requests")]
pub struct Cli {
    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text", help = "Log format: text or json")]
    pub log_format: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Classify a single request and print the result as JSON
    Classify(ClassifyArgs),
    /// Print the status that follows the given one
    Advance {
        #[arg(long)]
        status: String,
    },
    /// Classify a seed file of requests and write reports
    Intake(IntakeConfig),
}

#[derive(Debug, Clone, Args)]
pub struct ClassifyArgs {
    #[arg(long)]
    pub summary: String,

    #[arg(long, default_value = "")]
    pub description: String,

    #[arg(long, default_value = "Resident Portal")]
    pub channel: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Args)]
pub struct IntakeConfig {
    #[arg(long, default_value = "data/sample_requests.json")]
    pub seed_file: String,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    #[arg(long, value_delimiter = ',', default_value = "csv,json,summary")]
    pub output_formats: Vec<String>,
}

impl ConfigProvider for IntakeConfig {
    fn seed_file(&self) -> &str {
        &self.seed_file
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn output_formats(&self) -> &[String] {
        &self.output_formats
    }
}

impl Validate for IntakeConfig {
    fn validate(&self) -> Result<()> {
        validate_path("seed_file", &self.seed_file)?;
        validate_file_extension("seed_file", &self.seed_file, &["json"])?;
        validate_path("output_path", &self.output_path)?;
        for format in &self.output_formats {
            validate_one_of("output_formats", format, &OUTPUT_FORMATS)?;
        }
        Ok(())
    }
}
