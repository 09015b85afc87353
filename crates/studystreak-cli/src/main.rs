use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "studystreak-cli", version, about = "StudyStreak CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the last 7 days and the current streak
    Show {
        /// Print the window as JSON
        #[arg(long)]
        json: bool,
    },
    /// Mark today as studied
    Mark {
        /// Hours studied today
        #[arg(long, allow_negative_numbers = true)]
        hours: Option<f64>,
        /// Update today even if it is already marked
        #[arg(long)]
        force: bool,
    },
    /// Streak statistics for the current window
    Stats {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Keep the window on screen, refreshing when the day rolls over
    Watch {
        /// Poll interval in seconds (defaults to watch.interval_secs)
        #[arg(long)]
        interval: Option<u64>,
    },
    /// Read or change settings in config.toml
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init();
}

#[tokio::main]
async fn main() {
    init_tracing();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Show { json } => commands::streak::show(json).await,
        Commands::Mark { hours, force } => commands::streak::mark(hours, force).await,
        Commands::Stats { json } => commands::stats::run(json).await,
        Commands::Watch { interval } => commands::streak::watch(interval).await,
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
