// navrecon CLI - compare NAV period files against scheme rules

mod commands;
mod exit_codes;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};

use exit_codes::{exit_code_name, EXIT_ERROR, EXIT_USAGE, EXIT_INPUT, EXIT_INVALID_RULES, EXIT_OUTPUT, EXIT_SUCCESS};

#[derive(Parser)]
#[command(name = "navrecon")]
#[command(about = "Reconcile mutual fund NAVs between a latest period and past periods")]
#[command(long_version = long_version())]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare the latest period against one or more past periods
    #[command(after_help = "\
Examples:
  navrecon run --rules scheme_rules.json --latest Latest.xlsx --past Past1.xlsx
  navrecon run --rules rules.toml --latest Latest.xlsx --past Past1.xlsx Past2.xlsx --out-dir out
  navrecon run --rules rules.toml --latest latest.csv --past past.csv --format json --json")]
    Run {
        /// Rule file (.json or .toml)
        #[arg(long)]
        rules: PathBuf,

        /// Latest period file
        #[arg(long)]
        latest: PathBuf,

        /// Past period files, compared in order
        #[arg(long, num_args = 1.., required = true)]
        past: Vec<PathBuf>,

        /// Directory for report files
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,

        /// Report format
        #[arg(long, value_enum, default_value_t = OutputFormat::Xlsx)]
        format: OutputFormat,

        /// Also print the reports as a JSON array on stdout
        #[arg(long)]
        json: bool,

        /// Workbook sheet holding the NAV table (first sheet when absent)
        #[arg(long, default_value = "NAV Data")]
        sheet: String,

        /// Header text of the fund name column
        #[arg(long, default_value = "NAV Name")]
        name_column: String,

        /// Header text of the NAV value column
        #[arg(long, default_value = "Net Asset Value")]
        value_column: String,

        /// Text that identifies the header row
        #[arg(long, default_value = "NAV Name")]
        header_marker: String,
    },

    /// Load and validate a rule file without running
    #[command(after_help = "\
Examples:
  navrecon validate scheme_rules.json")]
    Validate {
        /// Rule file (.json or .toml)
        rules: PathBuf,
    },

    /// Show how rules treat individual fund names
    #[command(after_help = "\
Examples:
  navrecon inspect --rules scheme_rules.json 'HDFC Flexi Cap Fund - Direct Plan - Growth'")]
    Inspect {
        /// Rule file (.json or .toml)
        #[arg(long)]
        rules: PathBuf,

        /// Fund names to inspect
        #[arg(required = true)]
        names: Vec<String>,

        /// Output JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Xlsx,
    Json,
    Csv,
}

impl From<OutputFormat> for navrecon_io::ReportFormat {
    fn from(f: OutputFormat) -> Self {
        match f {
            OutputFormat::Xlsx => Self::Xlsx,
            OutputFormat::Json => Self::Json,
            OutputFormat::Csv => Self::Csv,
        }
    }
}

fn long_version() -> &'static str {
    concat!(
        env!("CARGO_PKG_VERSION"),
        " (", env!("GIT_COMMIT_HASH"), ")",
        "\nengine:  navrecon-core ", env!("CARGO_PKG_VERSION"),
        "\ntarget:  ", env!("TARGET"),
    )
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Run {
            rules,
            latest,
            past,
            out_dir,
            format,
            json,
            sheet,
            name_column,
            value_column,
            header_marker,
        } => {
            let layout = navrecon_io::TableLayout { sheet, header_marker, name_column, value_column };
            commands::cmd_run(commands::RunArgs {
                rules,
                latest,
                past,
                out_dir,
                format: format.into(),
                json,
                layout,
            })
        }
        Commands::Validate { rules } => commands::cmd_validate(rules),
        Commands::Inspect { rules, names, json } => commands::cmd_inspect(rules, names, json),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            log::debug!("exiting with {code} ({})", exit_code_name(code));
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn usage(msg: impl Into<String>) -> Self {
        Self { code: EXIT_USAGE, message: msg.into(), hint: None }
    }

    pub fn rules(msg: impl Into<String>) -> Self {
        Self { code: EXIT_INVALID_RULES, message: msg.into(), hint: None }
    }

    pub fn input(msg: impl Into<String>) -> Self {
        Self { code: EXIT_INPUT, message: msg.into(), hint: None }
    }

    pub fn output(msg: impl Into<String>) -> Self {
        Self { code: EXIT_OUTPUT, message: msg.into(), hint: None }
    }

    pub fn general(msg: impl Into<String>) -> Self {
        Self { code: EXIT_ERROR, message: msg.into(), hint: None }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}
