mod renderer;

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use magdock_core::config::DockConfig;
use magdock_core::session::DockSession;
use magdock_core::svg::render_svg;
use magdock_core::views::render_dock;
use magdock_protocol::Viewport;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "magdock")]
#[command(about = "A magnifying dock: hover to magnify, click to bounce")]
struct Cli {
    /// TOML config (geometry, timing, items). Defaults to the stock dock.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Write logs here. The terminal belongs to the dock, so without this
    /// nothing is logged. Filter with RUST_LOG.
    #[arg(long, global = true)]
    log: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Interactive dock in the terminal (the default)
    Run,
    /// Print the dock as it looks for one pointer position
    Snapshot {
        /// Pointer x from the container's left edge. Omit for no pointer.
        #[arg(short, long, allow_hyphen_values = true)]
        pointer: Option<f64>,

        /// Click this item index at t=0
        #[arg(long)]
        click: Option<usize>,

        /// Milliseconds since the session started when the snapshot is taken
        #[arg(long, default_value_t = 0)]
        at_ms: u64,

        #[arg(short, long, value_enum, default_value_t = Format::Json)]
        format: Format,

        /// Viewport width for SVG output
        #[arg(long, default_value_t = 800.0)]
        width: f64,

        /// Viewport height for SVG output
        #[arg(long, default_value_t = 400.0)]
        height: f64,

        /// Light palette for SVG output
        #[arg(long)]
        light: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Svg,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log.as_deref())?;

    let config = match &cli.config {
        Some(path) => DockConfig::load(path)?,
        None => DockConfig::default(),
    };

    match cli.command.unwrap_or(Command::Run) {
        Command::Run => {
            let mut session = DockSession::new(config)?;
            renderer::render_tui(&mut session)
        }
        Command::Snapshot {
            pointer,
            click,
            at_ms,
            format,
            width,
            height,
            light,
        } => {
            let mut session = DockSession::new(config)?;
            if let Some(index) = click {
                session.click(index, Duration::ZERO)?;
            }
            session.pointer_move(pointer);
            let now = Duration::from_millis(at_ms);
            session.frame(now);
            let snapshot = session.snapshot(now);

            let output = match format {
                Format::Json => serde_json::to_string_pretty(&snapshot)?,
                Format::Svg => {
                    let viewport = Viewport::new(width, height);
                    render_svg(&render_dock(&snapshot, &viewport), width, height, !light)
                }
            };
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{output}")?;
            Ok(())
        }
    }
}

fn init_logging(path: Option<&Path>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = std::fs::File::create(path)
        .with_context(|| format!("creating log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("magdock_core=debug,magdock_tui=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}
