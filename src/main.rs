use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use beadloom::models::AppConfig;
use beadloom::server;
use beadloom::services::PatternService;

#[derive(Parser)]
#[command(name = "beadloom")]
#[command(about = "Turns raster images into printable bead pattern diagrams")]
struct Cli {
    /// Path to config.yaml (overrides the BEADLOOM_CONFIG env var)
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Generate diagrams for every PNG in a directory
    Generate {
        /// Directory with source PNG files; diagrams land in "<dir>-generated"
        path: PathBuf,
    },
    /// Render a single image to a diagram PNG
    Render {
        /// Source PNG file
        input: PathBuf,

        /// Output PNG file path
        #[arg(short, long)]
        output: PathBuf,

        /// Caption shown under the preview
        #[arg(short, long)]
        label: Option<String>,

        /// Cell size in pixels (overrides the config value)
        #[arg(short, long)]
        multiplier: Option<u32>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config_path = cli.config.unwrap_or_else(AppConfig::default_path);

    match cli.command {
        Commands::Serve => run_server(&config_path).await,
        Commands::Generate { path } => run_generate_command(&config_path, &path),
        Commands::Render {
            input,
            output,
            label,
            multiplier,
        } => run_render_command(&config_path, &input, &output, label.as_deref(), multiplier),
    }
}

async fn run_server(config_path: &Path) -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "beadloom=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load(config_path);
    let bind_addr = config.bind_addr.clone();

    let state = server::create_app_state(&config)?;
    let app = server::build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "Beadloom server listening");

    axum::serve(listener, app).await?;

    Ok(())
}

/// Generate a diagram for every PNG in `path`, writing results next to it
/// into `<path>-generated`. Failures are logged and skipped.
fn run_generate_command(config_path: &Path, path: &Path) -> anyhow::Result<()> {
    init_cli_logging();

    let config = AppConfig::load(config_path);
    let service = PatternService::new(&config);

    let output_dir = generated_dir(path);
    std::fs::create_dir_all(&output_dir)?;

    let (generated, failed) = generate_directory(&service, path, &output_dir)?;

    tracing::info!(generated, failed, output = %output_dir.display(), "Batch done");
    Ok(())
}

/// Generate a diagram for every PNG in `path` into `output_dir`, labelling
/// each diagram with its source file name. Returns (generated, failed).
fn generate_directory(
    service: &PatternService,
    path: &Path,
    output_dir: &Path,
) -> anyhow::Result<(u32, u32)> {
    let mut generated = 0u32;
    let mut failed = 0u32;
    for entry in std::fs::read_dir(path)? {
        let entry = entry?;
        let source = entry.path();
        if source.extension().and_then(|ext| ext.to_str()) != Some("png") {
            continue;
        }

        let target = output_dir.join(entry.file_name());
        let label = entry.file_name().to_string_lossy().into_owned();
        match generate_file(service, &source, &target, Some(&label)) {
            Ok(bead_count) => {
                tracing::info!(source = %source.display(), beads = bead_count, "Generated");
                generated += 1;
            }
            Err(e) => {
                tracing::warn!(source = %source.display(), %e, "Skipped");
                failed += 1;
            }
        }
    }
    Ok((generated, failed))
}

fn run_render_command(
    config_path: &Path,
    input: &Path,
    output: &Path,
    label: Option<&str>,
    multiplier: Option<u32>,
) -> anyhow::Result<()> {
    init_cli_logging();

    let mut config = AppConfig::load(config_path);
    if let Some(multiplier) = multiplier {
        config.multiplier = multiplier;
    }
    let service = PatternService::new(&config);

    let bead_count = generate_file(&service, input, output, label)?;
    tracing::info!(output = %output.display(), beads = bead_count, "Rendered");
    Ok(())
}

fn generate_file(
    service: &PatternService,
    source: &Path,
    target: &Path,
    label: Option<&str>,
) -> anyhow::Result<u64> {
    let bytes = std::fs::read(source)?;
    let pattern = service.generate(&bytes, label)?;
    std::fs::write(target, &pattern.png)?;
    Ok(pattern.bead_count)
}

/// Sibling directory for batch output: `sprites` becomes `sprites-generated`.
fn generated_dir(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("patterns");
    path.with_file_name(format!("{name}-generated"))
}

fn init_cli_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "beadloom=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();
}
