//! smboard - Social media vs productivity dashboard

mod cli;

use clap::{Parser, Subcommand, ValueEnum};
use cli::CliError;
use smboard_core::{
    export_report_to_json, export_report_to_markdown, load_report, DashboardConfig,
};
use smboard_web::AppState;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "smboard=info,smboard_core=info,smboard_web=info";

#[derive(Parser)]
#[command(
    name = "smboard",
    version,
    about = "Social media vs productivity dashboard",
    long_about = "Loads the cleaned survey dataset and builds the dashboard report:\n\
                  headline metrics, six charts and advisory notes.\n\
                  \n\
                  Examples:\n\
                    smboard report                          # Print tables to the terminal\n\
                    smboard report --json                   # Full report as JSON\n\
                    smboard export --format markdown -o r.md\n\
                    smboard web --port 8080                 # Serve the HTML dashboard\n\
                  \n\
                  Environment Variables:\n\
                    SMBOARD_DATA                            # Dataset path (default: cleandata.csv)\n\
                    SMBOARD_CONFIG                          # Config file (default: smboard.toml)\n\
                    RUST_LOG                                # Log filter"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Path to the cleaned CSV dataset (overrides config)
    #[arg(long, env = "SMBOARD_DATA")]
    data: Option<PathBuf>,

    /// Path to a TOML config file
    #[arg(long, env = "SMBOARD_CONFIG")]
    config: Option<PathBuf>,

    /// Disable ANSI colors (log-friendly)
    #[arg(long, env = "SMBOARD_NO_COLOR")]
    no_color: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Print the report to the terminal
    Report {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Write the report to a file
    Export {
        #[arg(long, value_enum)]
        format: ExportFormat,
        /// Destination file
        #[arg(long, short = 'o')]
        output: PathBuf,
    },
    /// Serve the HTML dashboard
    Web {
        /// Port for web server (default: config value, 8501)
        #[arg(long, value_parser = clap::value_parser!(u16).range(1..))]
        port: Option<u16>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ExportFormat {
    Json,
    Markdown,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(!cli.no_color)
        .try_init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {}", err);
            if let Some(suggestion) = err.suggestion() {
                eprintln!("  Suggestion: {}", suggestion);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let port = match &cli.command {
        Command::Web { port } => *port,
        _ => None,
    };
    let config = DashboardConfig::discover(cli.config.as_deref())?.with_overrides(cli.data, port);

    match cli.command {
        Command::Report { json } => run_report(&config, json, cli.no_color),
        Command::Export { format, output } => run_export(&config, format, output),
        Command::Web { .. } => run_web(config).await,
    }
}

fn run_report(config: &DashboardConfig, json: bool, no_color: bool) -> Result<(), CliError> {
    let report = load_report(&config.data_path, &config.title)?;
    println!("{}", cli::format_report(&report, json, no_color)?);
    Ok(())
}

fn run_export(
    config: &DashboardConfig,
    format: ExportFormat,
    output: PathBuf,
) -> Result<(), CliError> {
    let report = load_report(&config.data_path, &config.title)?;
    match format {
        ExportFormat::Json => export_report_to_json(&report, &output)?,
        ExportFormat::Markdown => export_report_to_markdown(&report, &output)?,
    }
    info!(path = %output.display(), widgets = report.widgets.len(), "Exported report");
    eprintln!("✓ Exported report to {}", output.display());
    Ok(())
}

async fn run_web(config: DashboardConfig) -> Result<(), CliError> {
    if !config.data_path.is_file() {
        warn!(
            path = %config.data_path.display(),
            "Dataset not found; pages will show an error until it exists"
        );
    }
    if let Some(banner) = config.banner.as_ref().filter(|b| !b.is_file()) {
        warn!(path = %banner.display(), "Banner image not found");
    }

    let state = Arc::new(AppState::from_config(&config));
    println!("\n🌐 Dashboard:  http://localhost:{}", config.port);
    println!("   API:        http://localhost:{}/api/report", config.port);

    smboard_web::run(state, config.port).await?;
    Ok(())
}
