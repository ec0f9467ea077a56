use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{error, Level};
use tracing_subscriber::FmtSubscriber;

use diarytext::{run_daily, run_subject, BuildConfig, Config};

#[derive(Parser)]
#[command(name = "diarytext")]
#[command(author, version, about = "Diary transcript normalization and aggregation pipeline", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build one normalized document per diary day for a subject
    Daily {
        /// Study identifier
        study: String,

        /// Subject identifier
        subject: String,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Roll every subject's daily documents up into one row per subject
    Subject {
        /// Study identifier
        study: String,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Daily {
            study,
            subject,
            verbose,
        } => {
            setup_logging(verbose);
            let config = Config::from_env()?;
            if let Err(err) = run_daily(&config, &study, &subject, &BuildConfig::default()) {
                error!("Daily run for {} failed: {}", subject, err);
            }
        }
        Commands::Subject { study, verbose } => {
            setup_logging(verbose);
            let config = Config::from_env()?;
            if let Err(err) = run_subject(&config, &study) {
                error!("Subject run for {} failed: {}", study, err);
            }
        }
    }

    Ok(())
}

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber).ok();
}
