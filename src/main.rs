use alchemy_randomizer::config::Settings;
use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};
use std::process;
use tracing::{error, info, Level};

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Load order dump (JSON) holding the ingredient records.
    #[arg(global = true, short, long, default_value = "data/load_order.json")]
    input: String,

    /// Settings file (JSON). Flags given on the command line win.
    #[arg(global = true, short, long)]
    settings: Option<String>,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    Randomize(cmd::randomize::RandomizeArgs),
    Inspect(cmd::inspect::InspectArgs),
}

fn main() {
    // Parse raw matches first so file settings only yield to flags the user typed.
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    tracing_subscriber::fmt()
        .with_max_level(if cli.debug { Level::DEBUG } else { Level::INFO })
        .init();

    info!("🚀 Initializing Alchemy Randomizer...");

    let result = match cli.command {
        Commands::Randomize(args) => {
            let mut settings = Settings::default();
            if let Some(path) = &cli.settings {
                info!("⚙️  Loading Settings from: {}", path);
                settings = Settings::load_from_file(path).unwrap_or_else(|e| {
                    error!("❌ Failed to load settings: {}", e);
                    process::exit(1);
                });
            }

            match matches.subcommand_matches("randomize") {
                Some(sub_matches) if cli.settings.is_some() => {
                    settings.merge_from_cli(&args.settings, sub_matches)
                }
                _ => settings = args.settings.clone(),
            }

            cmd::randomize::run(args, settings, &cli.input)
        }
        Commands::Inspect(args) => cmd::inspect::run(args, &cli.input),
    };

    if let Err(e) = result {
        error!("❌ FATAL: {}", e);
        process::exit(1);
    }
}
