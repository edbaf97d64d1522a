//! lectern CLI: concept extraction, quiz assembly and grading from the terminal.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "lectern", version, about = "Lecture study aid: concepts, quizzes, grading")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract concepts and summaries from text documents
    Extract {
        /// Text file or directory of text files
        #[arg(long)]
        input: PathBuf,

        /// Concepts to keep per document
        #[arg(long)]
        max_concepts: Option<usize>,

        /// Max documents processed concurrently
        #[arg(long)]
        parallelism: Option<usize>,

        /// Save the full analysis as JSON
        #[arg(long)]
        output: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Validate question bank TOML files
    Validate {
        /// Path to question bank file or directory
        #[arg(long)]
        bank: PathBuf,
    },

    /// Assemble a randomized test from a question bank
    Assemble {
        /// Question bank TOML file
        #[arg(long)]
        bank: PathBuf,

        /// Number of questions
        #[arg(long, default_value = "5")]
        count: usize,

        /// Only questions of this difficulty
        #[arg(long)]
        difficulty: Option<u8>,

        /// Seed for reproducible selection
        #[arg(long)]
        seed: Option<u64>,

        /// Where to write the test JSON
        #[arg(long)]
        output: PathBuf,
    },

    /// Grade submitted answers against an assembled test
    Grade {
        /// Test JSON written by `assemble`
        #[arg(long)]
        test: PathBuf,

        /// Answers file (.toml with [[answers]] or .json array)
        #[arg(long)]
        answers: PathBuf,

        /// Short-answer similarity threshold (0.0 - 1.0)
        #[arg(long)]
        threshold: Option<f64>,

        /// Save the graded outcome as JSON
        #[arg(long)]
        output: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Export a test to a printable document
    Export {
        /// Test JSON written by `assemble`
        #[arg(long)]
        test: PathBuf,

        /// Include correct answers
        #[arg(long)]
        with_answers: bool,

        /// Output format: html, text
        #[arg(long, default_value = "html")]
        format: String,

        /// Output file (default: test-<id>.<ext> in the current directory)
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// List graded tests, or show one with its answers
    History {
        /// Directory of saved outcomes (default: output_dir from config)
        #[arg(long)]
        dir: Option<PathBuf>,

        /// Show the answers of one test (id or id prefix)
        #[arg(long)]
        test: Option<String>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create starter config and example question bank
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("lectern=info".parse().unwrap()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Extract {
            input,
            max_concepts,
            parallelism,
            output,
            config,
        } => commands::extract::execute(input, max_concepts, parallelism, output, config).await,
        Commands::Validate { bank } => commands::validate::execute(bank),
        Commands::Assemble {
            bank,
            count,
            difficulty,
            seed,
            output,
        } => commands::assemble::execute(bank, count, difficulty, seed, output),
        Commands::Grade {
            test,
            answers,
            threshold,
            output,
            config,
        } => commands::grade::execute(test, answers, threshold, output, config),
        Commands::Export {
            test,
            with_answers,
            format,
            output,
        } => commands::export::execute(test, with_answers, format, output),
        Commands::History { dir, test, config } => commands::history::execute(dir, test, config),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
