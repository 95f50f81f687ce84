//! matsync - photometric material synchronizer CLI
//!
//! Remaps colors to a target luminance and replays material edits.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use matsync_material::MaterialType;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "matsync")]
#[command(author, version, about = "Photometric material synchronizer")]
#[command(long_about = "
Keeps a material's photometric parameters and its appearance color in sync.

Examples:
  matsync remap --color 1,0,0 --luminance 0.5         # Red at half luminance
  matsync remap -c 1,1,0 -y 0.99 --report             # Show water-filling steps
  matsync edit refl=0.5 coat=0.3 color=1,0,0          # Replay edits on a fresh material
  matsync edit --config glass.yaml type=metallic --json
  matsync edit --script edits.yaml
  matsync model --type painted --refl 0.5 --coat 0.2  # Forward mapping only
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Remap a color to a target relative luminance
    #[command(visible_alias = "r")]
    Remap(RemapArgs),

    /// Apply edits to a material and print the render tuple
    #[command(visible_alias = "e")]
    Edit(EditArgs),

    /// Print the forward mapping of a parameter set
    #[command(visible_alias = "m")]
    Model(ModelArgs),
}

/// Arguments for the `remap` command.
#[derive(Args)]
struct RemapArgs {
    /// sRGB color as R,G,B in [0, 1]
    #[arg(short, long)]
    color: String,

    /// Target relative luminance in [0, 1]
    #[arg(short = 'y', long)]
    luminance: f64,

    /// Show intermediate values
    #[arg(long)]
    report: bool,

    /// Print JSON instead of text
    #[arg(long)]
    json: bool,
}

/// Arguments for the `edit` command.
#[derive(Args)]
struct EditArgs {
    /// Material defaults (YAML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Edit script, a YAML or JSON list applied before the inline edits
    #[arg(short, long)]
    script: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long)]
    json: bool,

    /// Edits: color=R,G,B type=NAME refl=X coat=X trans=X n=X n-only=X
    edits: Vec<String>,
}

/// Arguments for the `model` command.
#[derive(Args)]
struct ModelArgs {
    /// Material type: metallic, painted, transparent
    #[arg(short = 't', long = "type")]
    material_type: MaterialType,

    /// Reflection factor
    #[arg(short, long)]
    refl: f64,

    /// Specular coating (metallic, painted)
    #[arg(long, default_value = "0.0")]
    coat: f64,

    /// Transmission (transparent)
    #[arg(long, default_value = "0.0")]
    trans: f64,

    /// Refractive index (transparent)
    #[arg(short, long, default_value = "1.0")]
    n: f64,

    /// Base color, also prints the render tuple
    #[arg(short, long)]
    color: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let fallback = if cli.verbose { "matsync_cli=debug,matsync_material=debug,matsync_color=debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| fallback.into()))
        .with(tracing_subscriber::fmt::layer().without_time().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Remap(args) => commands::remap::run(args, cli.verbose),
        Commands::Edit(args) => commands::edit::run(args, cli.verbose),
        Commands::Model(args) => commands::model::run(args, cli.verbose),
    }
}
