use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use starlane_cli::commands::generate::handle_generate;
use starlane_cli::commands::play::{handle_play_command, PlayCommandArgs};
use starlane_cli::commands::route::{handle_route_command, RouteCommandArgs};
use starlane_cli::commands::stars::handle_stars;
use starlane_cli::commands::MapArgs;
use starlane_cli::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(author, version, about = "Procedural star maps and danger-aware route planning")]
struct Cli {
    /// JSON generation config file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Seed for reproducible maps; overrides the config file.
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Text file of star names, one per line.
    #[arg(long, global = true)]
    names: Option<PathBuf>,

    /// Output format.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a map and print a summary.
    Generate,
    /// Plan a route between two stars.
    Route(RouteCommandArgs),
    /// List the stars of the generated map.
    Stars,
    /// Fly to a star in a scripted session and print the state log.
    Play(PlayCommandArgs),
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let map_args = MapArgs {
        config: cli.config,
        seed: cli.seed,
        names: cli.names,
    };

    match cli.command {
        Command::Generate => handle_generate(&map_args, cli.format),
        Command::Route(args) => handle_route_command(&map_args, cli.format, &args),
        Command::Stars => handle_stars(&map_args, cli.format),
        Command::Play(args) => handle_play_command(&map_args, cli.format, &args),
    }
}

/// Logs go to stderr so JSON output on stdout stays parseable.
fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
