use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "studybalance", version, about = "Study-stress balancer CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify a week of daily logs
    Classify(commands::classify::ClassifyArgs),
    /// Classify a week and synthesize a daily study/rest plan
    Plan(commands::plan::PlanArgs),
    /// Mood history: log, series, forecast, accuracy
    Mood {
        #[command(subcommand)]
        action: commands::mood::MoodAction,
    },
    /// Read or update configuration
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Liveness check
    Health,
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Classify(args) => commands::classify::run(args),
        Commands::Plan(args) => commands::plan::run(args),
        Commands::Mood { action } => commands::mood::run(action),
        Commands::Config { action } => commands::config::run(action),
        Commands::Health => commands::health::run(),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
