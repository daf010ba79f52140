//! transcript CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "transcript",
    version,
    about = "Academic results aggregation and classification"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a JSON enrollment list into semester results
    Compile {
        /// Path to a JSON array of enrollments
        #[arg(long)]
        enrollments: PathBuf,

        /// Output format: table, json, markdown
        #[arg(long, default_value = "table")]
        format: String,

        /// Write the compiled results as JSON to this file instead of printing
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Check an enrollment list for contract violations
    Validate {
        /// Path to a JSON array of enrollments
        #[arg(long)]
        enrollments: PathBuf,
    },

    /// Look up a student's results through the results cache
    Lookup {
        /// Student id (UUID)
        #[arg(long)]
        student: String,

        /// JSON map of student id to enrollments (defaults to `enrollments_file` from config)
        #[arg(long)]
        data: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output format: table, json, markdown
        #[arg(long, default_value = "table")]
        format: String,
    },

    /// Create a starter config and sample enrollment file
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("transcript=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Compile {
            enrollments,
            format,
            output,
        } => commands::compile::execute(enrollments, format, output),
        Commands::Validate { enrollments } => commands::validate::execute(enrollments),
        Commands::Lookup {
            student,
            data,
            config,
            format,
        } => commands::lookup::execute(student, data, config, format).await,
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
