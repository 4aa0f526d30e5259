use clap::{Parser, Subcommand, ValueEnum};
use retouch_landing::slider::Phase;
use retouch_landing::{config, generate, output};
use std::path::PathBuf;

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

/// Interaction phase accepted by `snapshot`.
#[derive(Clone, Copy, ValueEnum)]
enum PhaseArg {
    Idle,
    Hovering,
    Dragging,
}

impl From<PhaseArg> for Phase {
    fn from(arg: PhaseArg) -> Self {
        match arg {
            PhaseArg::Idle => Phase::Idle,
            PhaseArg::Hovering => Phase::Hovering,
            PhaseArg::Dragging => Phase::Dragging,
        }
    }
}

#[derive(Parser)]
#[command(name = "retouch-landing")]
#[command(about = "Static landing page generator for a photo retouching service")]
#[command(long_about = "\
Static landing page generator for a photo retouching service

Renders a single index.html with a before/after comparison slider, a
\"how it works\" section and an FAQ, and publishes fingerprinted assets.

Source structure:

  site/
  ├── landing.toml                 # Page config (optional, stock defaults apply)
  └── assets/                      # Images and static files → assets/<name>.<hash>.<ext>
      ├── before.jpg               # Comparison: original photo
      ├── after.jpg                # Comparison: retouched photo
      └── steps/
          └── upload.png           # Step illustration

Image references in landing.toml starting with assets/ must exist; anything
else (https://…, /static/…) is used as written.

Run 'retouch-landing gen-config' to generate a documented landing.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Source directory containing landing.toml and assets/
    #[arg(long, default_value = "site", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// Show debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build index.html and publish assets
    Build,
    /// Validate config and asset references without writing anything
    Check,
    /// Print a stock landing.toml with all options documented
    GenConfig,
    /// Print the comparison slider's markup at a given state
    Snapshot {
        /// Split position in percent, clamped to 0–100
        #[arg(long, default_value_t = 50.0, allow_negative_numbers = true)]
        position: f64,

        /// Interaction phase to render
        #[arg(long, value_enum, default_value = "idle")]
        phase: PhaseArg,
    },
}

fn init_logging(verbose: bool) {
    let default_level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(default_level.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Build => {
            println!("==> Building {}", cli.source.display());
            let report = generate::generate(&cli.source, &cli.output)?;
            output::print_build_output(&report);
            println!("==> Build complete: {}", report.output_dir.display());
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let prepared = generate::prepare(&cli.source)?;
            output::print_check_output(&prepared);
            println!("==> Content is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
        Command::Snapshot { position, phase } => {
            let prepared = generate::prepare(&cli.source)?;
            let props =
                generate::comparison_props(&prepared.config.comparison, &prepared.manifest)?;
            let markup = generate::render_slider_snapshot(&props, position, phase.into());
            println!("{}", markup.into_string());
        }
    }

    Ok(())
}
