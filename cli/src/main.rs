use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use rsqlite_connection::{Config, Connection, ExtensionConfig};
use rsqlite_core::{HostValue, ResultSet};
use tracing::Level;

/// Output format for query results.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Json,
    Yaml,
    Table,
}

#[derive(Debug, Parser)]
#[command(name = "rsqlite")]
#[command(about = "Evaluate SQL against read-only SQLite databases")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run one SQL statement and print every row it returns.
    Eval(EvalArgs),
    /// Show the database file name and row-buffer size.
    Info(InfoArgs),
}

#[derive(Debug, Args)]
struct ConnectionArgs {
    /// Database file path.
    #[arg(long)]
    db: PathBuf,
    /// YAML connection config file.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Rows per result chunk (overrides the config file).
    #[arg(long)]
    buffer_size: Option<usize>,
    /// Extension library to load after opening (repeatable).
    #[arg(long = "extension")]
    extensions: Vec<PathBuf>,
}

#[derive(Debug, Args)]
struct EvalArgs {
    #[command(flatten)]
    connection: ConnectionArgs,
    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,
    /// SQL text to evaluate.
    sql: String,
}

#[derive(Debug, Args)]
struct InfoArgs {
    #[command(flatten)]
    connection: ConnectionArgs,
    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Command::Eval(args) => run_eval(args),
        Command::Info(args) => run_info(args),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_max_level(level)
        .init();
}

fn run_eval(args: EvalArgs) -> Result<(), String> {
    let mut conn = open_connection(&args.connection)?;
    let result = conn.eval(&args.sql).map_err(|e| e.to_string())?;
    let output = format_result(&result, args.format)?;
    print!("{output}");
    conn.close().map_err(|e| format!("Failed to close database: {e}"))?;
    Ok(())
}

fn run_info(args: InfoArgs) -> Result<(), String> {
    let conn = open_connection(&args.connection)?;
    let info = conn.info().map_err(|e| e.to_string())?;
    match args.format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&info)
                .map_err(|e| format!("JSON serialization failed: {e}"))?;
            println!("{json}");
        }
        OutputFormat::Yaml => {
            let yaml = serde_yaml::to_string(&info)
                .map_err(|e| format!("YAML serialization failed: {e}"))?;
            print!("{yaml}");
        }
        OutputFormat::Table => {
            println!("database_file: {}", info.database_file);
            println!("buffer_size: {}", info.buffer_size);
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Builds the effective config from the config file and flag overrides.
fn connection_config(args: &ConnectionArgs) -> Result<Config, String> {
    let mut config = match &args.config {
        Some(path) => Config::load(path)
            .map_err(|e| format!("Failed to load config '{}': {e}", path.display()))?,
        None => Config::default(),
    };
    if let Some(buffer_size) = args.buffer_size {
        config.buffer_size = buffer_size;
    }
    for path in &args.extensions {
        config.extensions.push(ExtensionConfig::new(path));
    }
    Ok(config)
}

fn open_connection(args: &ConnectionArgs) -> Result<Connection, String> {
    let config = connection_config(args)?;
    Connection::open_with_config(&args.db, &config).map_err(|e| e.to_string())
}

fn format_result(result: &ResultSet, format: OutputFormat) -> Result<String, String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(result)
            .map(|json| format!("{json}\n"))
            .map_err(|e| format!("JSON serialization failed: {e}")),
        OutputFormat::Yaml => {
            serde_yaml::to_string(result).map_err(|e| format!("YAML serialization failed: {e}"))
        }
        OutputFormat::Table => Ok(format_table(result)),
    }
}

/// Renders rows as a left-aligned text table with a header line.
fn format_table(result: &ResultSet) -> String {
    let headers = result.column_names();
    if headers.is_empty() {
        return "(0 rows)\n".to_string();
    }

    let cells: Vec<Vec<String>> = result
        .iter()
        .map(|row| row.values().map(HostValue::to_string).collect())
        .collect();
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_table_line(&mut out, headers.iter().copied(), &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_table_line(&mut out, rule.iter().map(String::as_str), &widths);
    for row in &cells {
        push_table_line(&mut out, row.iter().map(String::as_str), &widths);
    }
    let n = result.len();
    out.push_str(&format!("({n} row{})\n", if n == 1 { "" } else { "s" }));
    out
}

fn push_table_line<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>, widths: &[usize]) {
    let line: Vec<String> = cells
        .zip(widths)
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect();
    out.push_str(line.join(" | ").trim_end());
    out.push('\n');
}
