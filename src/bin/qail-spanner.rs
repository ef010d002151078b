//! qail-spanner: render portable statements as Cloud Spanner SQL
//!
//! # Usage
//!
//! ```bash
//! # Translate a JSON statement
//! qail-spanner translate stmt.json
//!
//! # Same statement through the generic dialect, as JSON
//! cat stmt.json | qail-spanner translate --dialect generic --format json
//!
//! # DDL for a session temporary table
//! qail-spanner temp-table ht_person.json --drop --truncate
//!
//! # Widen an array parameter
//! qail-spanner bind-array --element-type small_int '[1, null, 3]'
//! ```

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::*;
use qail_spanner::array::{ArrayValue, SpannerArrayType};
use qail_spanner::ast::Statement;
use qail_spanner::config::{CONFIG_ENV, DialectConfig};
use qail_spanner::transpiler::{Dialect, TemporaryTable, TemporaryTableExporter, translate};
use qail_spanner::types::SqlType;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "qail-spanner")]
#[command(author = "QAIL Contributors")]
#[command(version)]
#[command(about = "Portable SQL statements rendered for Cloud Spanner", long_about = None)]
#[command(after_help = "EXAMPLES:
    qail-spanner translate stmt.json
    qail-spanner translate --dialect generic --format json < stmt.json
    qail-spanner temp-table ht_person.json --drop
    qail-spanner bind-array --element-type integer '[1, null, 3]'")]
struct Cli {
    /// Dialect config file (TOML)
    #[arg(short, long, global = true, env = CONFIG_ENV)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Sql,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Translate a JSON statement (file or stdin)
    Translate {
        file: Option<PathBuf>,

        #[arg(short, long, default_value = "spanner")]
        dialect: Dialect,

        #[arg(short, long, value_enum, default_value = "sql")]
        format: OutputFormat,
    },
    /// Create statement for a JSON temporary table descriptor
    TempTable {
        file: Option<PathBuf>,

        /// Also print the drop statement
        #[arg(long)]
        drop: bool,

        /// Also print the truncate statement
        #[arg(long)]
        truncate: bool,
    },
    /// Show how an array parameter is bound
    BindArray {
        #[arg(short, long)]
        element_type: SqlType,

        /// JSON array of elements
        values: String,
    },
    /// Print the effective dialect configuration
    Config,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(&cli) {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "qail_spanner=debug" } else { "qail_spanner=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    let config = DialectConfig::discover(cli.config.as_deref()).context("loading dialect config")?;

    match &cli.command {
        Commands::Translate { file, dialect, format } => {
            let input = read_input(file.as_deref())?;
            let statement: Statement =
                serde_json::from_str(&input).context("parsing statement JSON")?;
            let translation = translate(&statement, *dialect, &config)?;
            match format {
                OutputFormat::Sql => {
                    println!("{}", translation.sql.white());
                    if cli.verbose {
                        print_details(&translation);
                    }
                }
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&translation)?);
                }
            }
        }
        Commands::TempTable { file, drop, truncate } => {
            let input = read_input(file.as_deref())?;
            let table: TemporaryTable =
                serde_json::from_str(&input).context("parsing temporary table JSON")?;
            let exporter = TemporaryTableExporter::new(&config);
            println!("{};", exporter.create_command(&table)?);
            if *truncate {
                println!("{};", exporter.truncate_command(&table));
            }
            if *drop {
                println!("{};", exporter.drop_command(&table));
            }
        }
        Commands::BindArray { element_type, values } => {
            let value = ArrayValue::parse(*element_type, values)?;
            let array_type = SpannerArrayType::new(*element_type);
            let bound = array_type.bind(value);
            println!(
                "{} array<{}>",
                "Bound as:".green().bold(),
                array_type.bound_element_type()
            );
            println!("{}", serde_json::to_string(&bound)?);
        }
        Commands::Config => {
            if cli.verbose {
                match DialectConfig::default_path() {
                    Some(path) => eprintln!("{} {}", "Default path:".dimmed(), path.display()),
                    None => eprintln!("{}", "No user config directory".dimmed()),
                }
            }
            print!("{}", config.to_toml()?);
        }
    }
    Ok(())
}

fn print_details(translation: &qail_spanner::transpiler::Translation) {
    if !translation.parameters.is_empty() {
        println!();
        println!("{}", "Parameters:".cyan());
        for p in &translation.parameters {
            let name = p.name.as_deref().unwrap_or("?");
            println!("  {} {} {}", p.position, name.yellow(), p.sql_type.to_string().dimmed());
        }
    }
    if !translation.affected_tables.is_empty() {
        println!("{}", "Affected tables:".cyan());
        for table in &translation.affected_tables {
            println!("  {}", table);
        }
    }
    println!("{} {:?}", "Lock strategy:".cyan(), translation.lock_strategy);
}

fn read_input(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display())),
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf).context("reading stdin")?;
            Ok(buf)
        }
    }
}
