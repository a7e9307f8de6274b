//! sahayak CLI - AI teaching assistant.

use clap::{Parser, Subcommand};
use sahayak::cli;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sahayak")]
#[command(author, version, about = "AI teaching assistant", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate hyper-local lesson content.
    LocalContent {
        /// Topic to generate content about (e.g. "Photosynthesis").
        #[arg(long)]
        topic: String,

        /// Target language (e.g. "Hindi").
        #[arg(long)]
        language: String,

        /// Local context to tailor to (e.g. "Delhi, India").
        #[arg(long)]
        location: String,
    },

    /// Create differentiated worksheets from a textbook page image.
    Worksheets {
        /// Path to the textbook page image.
        #[arg(long)]
        page: PathBuf,

        /// Grade levels, comma separated (e.g. "3rd, 5th").
        #[arg(long)]
        grade_levels: String,
    },

    /// Explain a student question in the local language.
    Explain {
        /// The student's question.
        #[arg(long)]
        question: String,

        /// Language for the explanation.
        #[arg(long)]
        language: String,
    },

    /// Generate a visual aid (drawing or chart) from a description.
    VisualAid {
        /// Description of the drawing or chart.
        #[arg(long)]
        description: String,

        /// Write the generated image to this file.
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// List recent history entries.
    History {
        /// Maximum number of entries to show. Defaults to 20.
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Clear the history log.
    ClearHistory,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::LocalContent {
            topic,
            language,
            location,
        } => cli::generate::local_content(topic, language, location).await,
        Commands::Worksheets { page, grade_levels } => {
            cli::generate::worksheets(page, grade_levels).await
        }
        Commands::Explain { question, language } => {
            cli::generate::explain(question, language).await
        }
        Commands::VisualAid { description, out } => {
            cli::generate::visual_aid(description, out).await
        }
        Commands::History { limit } => cli::history::list(limit),
        Commands::ClearHistory => cli::history::clear(),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("sahayak: error: {e}");
            ExitCode::FAILURE
        }
    }
}
