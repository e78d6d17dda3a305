use anyhow::Context;
use clap::Parser;
use docs_validator::core::report;
use docs_validator::utils::{logger, validation::Validate};
use docs_validator::{CliConfig, LocalDocumentStore, RunOutcome, Settings, ValidationEngine};
use std::io::Write;
use std::process::ExitCode;

const EXIT_CONFIG_ERROR: u8 = 2;
const EXIT_STORE_FAULT: u8 = 3;

fn main() -> anyhow::Result<ExitCode> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }
    tracing::debug!("CLI config: {:?}", cli);

    // 載入並驗證配置
    let settings = match Settings::from_cli(&cli).and_then(|s| s.validate().map(|_| s)) {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
            return Ok(ExitCode::from(EXIT_CONFIG_ERROR));
        }
    };

    let store = LocalDocumentStore::new(&settings.docs_root);
    let engine = ValidationEngine::new(store, settings.clone());

    let outcome = match engine.run(settings.service.as_deref()) {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::error!("❌ Validation aborted: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
            return Ok(ExitCode::from(EXIT_STORE_FAULT));
        }
    };

    let mut stdout = std::io::stdout().lock();
    match &outcome {
        RunOutcome::ServiceNotFound(service) => {
            writeln!(
                stdout,
                "Service '{}' not found in {}/",
                service, settings.docs_root
            )?;
        }
        RunOutcome::NoServices => {
            writeln!(
                stdout,
                "No services found in {}/ (this is OK if no services are set up yet)",
                settings.docs_root
            )?;
        }
        RunOutcome::Completed { result, .. } => {
            stdout
                .write_all(report::render(result, settings.format).as_bytes())
                .context("failed to write report")?;
        }
    }
    stdout.flush()?;

    Ok(ExitCode::from(outcome.exit_status()))
}
