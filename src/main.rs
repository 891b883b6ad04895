use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use taxbridge::logging::{init_tracing, LogLevel, LogSvc};
use taxbridge::wire::{decode_get_tax, WireGetTaxRequest};
use taxbridge::{Config, HttpTaxService, TaxService, TaxSvc};

#[derive(Debug, Parser)]
#[command(
    name = "taxbridge",
    about = "Client adapter for the remote tax calculation service",
    after_help = "Examples:\n  taxbridge ping\n  taxbridge get-tax captured-request.json"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Check connectivity and report the service version")]
    Ping { message: Option<String> },
    #[command(about = "Re-submit a wire-format GetTax request and print the result")]
    GetTax { file: PathBuf },
    #[command(about = "Write a client message to the adapter log")]
    Log {
        client: String,
        level: String,
        message: String,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    if let Command::Log {
        client,
        level,
        message,
    } = &cli.command
    {
        return match level.parse::<LogLevel>() {
            Ok(level) => {
                LogSvc::log_message(client, level, message);
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("{}", e);
                ExitCode::FAILURE
            }
        };
    }

    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    match run(cli.command, &config).await {
        Ok((output, success)) => {
            println!("{}", output);
            if success {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(2)
            }
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Run a service command, returning the pretty-printed result and whether it
/// succeeded.
async fn run(command: Command, config: &Config) -> anyhow::Result<(String, bool)> {
    let service: Arc<dyn TaxService> = Arc::new(
        HttpTaxService::from_config(config).context("Failed to initialize tax service client")?,
    );
    let svc = TaxSvc::new(service, config);

    match command {
        Command::Ping { message } => {
            let result = svc.ping(message.as_deref().unwrap_or("")).await;
            Ok((serde_json::to_string_pretty(&result)?, result.base.is_success()))
        }
        Command::GetTax { file } => {
            let raw = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let wire: WireGetTaxRequest = serde_json::from_str(&raw)
                .with_context(|| format!("{} is not a wire GetTax request", file.display()))?;
            let mut request = decode_get_tax(wire)?;
            let result = svc.get_tax(&mut request).await;
            Ok((serde_json::to_string_pretty(&result)?, result.base.is_success()))
        }
        Command::Log { .. } => anyhow::bail!("log does not call the service"),
    }
}
