use crate::core::report::ReportFormat;
use clap::Parser;

#[derive(Debug, Clone, Default, Parser)]
#[command(name = "validate-docs")]
#[command(about = "Validate cross-references between service specification documents")]
pub struct CliConfig {
    /// Validate only this service
    #[arg(short, long)]
    pub service: Option<String>,

    /// Documents root directory [default: docs]
    #[arg(short = 'd', long)]
    pub docs_dir: Option<String>,

    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Report format [default: text]
    #[arg(long, value_enum)]
    pub format: Option<ReportFormat>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines on stderr")]
    pub log_json: bool,
}
