mod commands;
mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(
    name = "tally",
    version,
    about = "Extract and summarize project totals from spreadsheets"
)]
struct Cli {
    /// Enable debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract "Total for <project>" rows from the first sheet of each workbook
    Extract {
        /// Path(s) to xlsx, xls, xlsb or ods files
        #[arg(required = true)]
        input_files: Vec<PathBuf>,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Write a "<name>_totals.xlsx" workbook per input into this directory
        #[arg(long, value_name = "DIR")]
        out_dir: Option<PathBuf>,
    },
    /// Extract totals and ask a language model to summarize the largest projects
    Summarize {
        /// Path(s) to xlsx, xls, xlsb or ods files
        #[arg(required = true)]
        input_files: Vec<PathBuf>,

        /// JSON config file (model, base_url, top_n, ...)
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// API key for the summary service
        #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
        api_key: Option<String>,

        /// Model name (overrides config)
        #[arg(long)]
        model: Option<String>,

        /// Number of largest projects to send (overrides config)
        #[arg(long, value_name = "N")]
        top: Option<usize>,

        /// Write a "<name>_summary_<timestamp>.docx" report per input into this directory
        #[arg(long, value_name = "DIR")]
        docx_dir: Option<PathBuf>,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
    /// Show the sheets in each workbook with their sizes
    Inspect {
        /// Path(s) to xlsx, xls, xlsb or ods files
        #[arg(required = true)]
        input_files: Vec<PathBuf>,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    fmt()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Extract {
            input_files,
            output,
            out_dir,
        } => commands::extract::run(&input_files, &output, out_dir.as_deref()),
        Commands::Summarize {
            input_files,
            config,
            api_key,
            model,
            top,
            docx_dir,
            output,
        } => commands::summarize::run(
            &input_files,
            commands::summarize::Overrides {
                config,
                api_key,
                model,
                top,
            },
            docx_dir.as_deref(),
            &output,
        ),
        Commands::Inspect {
            input_files,
            output,
        } => commands::inspect::run(&input_files, &output),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
