use change_formatter::cli::{self, ConfigOptions};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "change-formatter")]
#[command(about = "Turn change-record spreadsheets into formatted change summaries.")]
#[command(long_about = "Change Formatter - change-record .xlsx to formatted summary .xlsx

Each input row becomes one output row with three wrapped cells:
  Change Details     - planned dates, title, location/status/counts, groups
  Change / Risk      - change reference and normalised risk level
  Trading / BC Apps  - trading scope and direct-relation BC apps

COMMANDS:
  format   - Write the formatted workbook
  preview  - Print the formatted projection of the first rows

EXAMPLES:
  change-formatter format changes.xlsx formatted_output.xlsx
  change-formatter preview changes.xlsx -n 3
  change-formatter format changes.xlsx out.xlsx --config formatter.yaml

Set RUST_LOG=change_formatter=debug to see degraded dates and ignored columns.")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct ConfigArgs {
    /// YAML config file (classifier rules, risk prefix, sheet)
    #[arg(short, long, env = "CHANGE_FORMATTER_CONFIG")]
    config: Option<PathBuf>,

    /// Worksheet to read (default: first sheet)
    #[arg(short, long)]
    sheet: Option<String>,

    /// Match the "(RelationType = Direct)" marker ignoring case
    #[arg(long)]
    case_insensitive: bool,

    /// Report untagged BC items as other apps instead of dropping them
    #[arg(long)]
    count_indirect_as_other: bool,
}

impl From<ConfigArgs> for ConfigOptions {
    fn from(args: ConfigArgs) -> Self {
        ConfigOptions {
            config: args.config,
            sheet: args.sheet,
            case_insensitive: args.case_insensitive,
            count_indirect_as_other: args.count_indirect_as_other,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    #[command(long_about = "Format a change-record workbook.

Reads the first worksheet (or --sheet), derives the summary fields for every
non-blank row and writes them to OUTPUT in a 'Formatted Output' sheet.

Rows whose recognised columns are all blank are skipped and listed.
A sheet with none of PlannedStart, Title, ChangeId or BC is rejected.")]
    /// Write the formatted workbook
    Format {
        /// Change-record workbook (.xlsx)
        input: PathBuf,

        /// Output workbook path (.xlsx)
        output: PathBuf,

        #[command(flatten)]
        config: ConfigArgs,

        /// Show verbose steps
        #[arg(short, long)]
        verbose: bool,
    },

    /// Print the formatted projection of the first rows
    Preview {
        /// Change-record workbook (.xlsx)
        input: PathBuf,

        /// Number of records to show
        #[arg(short = 'n', long, default_value = "5")]
        rows: usize,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        config: ConfigArgs,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "change_formatter=info"
    } else {
        "change_formatter=warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Format {
            input,
            output,
            config,
            verbose,
        } => {
            init_tracing(verbose);
            cli::format(input, output, config.into(), verbose)?
        }

        Commands::Preview {
            input,
            rows,
            json,
            config,
        } => {
            init_tracing(false);
            cli::preview(input, rows, json, config.into())?
        }
    }

    Ok(())
}
