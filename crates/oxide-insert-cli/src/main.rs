//! oxide-insert CLI
//!
//! Extracts target tables, columns, select items and source tables from a
//! JSON array of `INSERT INTO` statements.

use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use serde::Serialize;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use oxide_insert::rewrite::rename_columns;
use oxide_insert::{ExtractError, InsertStatement, parse_json};

/// Span-preserving extraction of INSERT ... SELECT statements.
#[derive(Parser)]
#[command(name = "oxide-insert")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON file holding an array of statements (stdin if not specified).
    #[arg(short, long, env = "OXIDE_INSERT_INPUT")]
    input: Option<PathBuf>,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Rename a target column (repeatable).
    #[arg(short, long = "rename", value_name = "OLD=NEW", value_parser = parse_rename)]
    renames: Vec<(String, String)>,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    /// A `--TABLE--` header followed by the extracted statement.
    Text,
    /// One JSON object per statement.
    Json,
}

/// One output record in JSON mode.
#[derive(Serialize)]
struct Record<'a> {
    text: &'a str,
    statement: &'a InsertStatement,
    #[serde(skip_serializing_if = "Option::is_none")]
    rewritten: Option<String>,
}

fn parse_rename(value: &str) -> Result<(String, String), String> {
    match value.split_once('=') {
        Some((old, new)) if !old.trim().is_empty() && !new.trim().is_empty() => {
            Ok((old.trim().to_owned(), new.trim().to_owned()))
        }
        _ => Err(format!("expected OLD=NEW, got {value:?}")),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let reader: Box<dyn Read> = match &cli.input {
        Some(path) => {
            info!("Reading statements from {}", path.display());
            let file = File::open(path)
                .with_context(|| format!("failed to open {}", path.display()))?;
            Box::new(BufReader::new(file))
        }
        None => Box::new(io::stdin().lock()),
    };

    let renames: HashMap<String, String> = cli.renames.into_iter().collect();
    let format = cli.format;
    let mut out = BufWriter::new(io::stdout().lock());

    let summary = parse_json(reader, |text, statement| {
        let rewritten = if renames.is_empty() {
            None
        } else {
            let rewritten = rename_columns(text, &statement, &renames)
                .map_err(|e| ExtractError::Other(Box::new(e)))?;
            Some(rewritten)
        };

        match format {
            Format::Text => {
                writeln!(out, "\n--{}--", statement.table)?;
                writeln!(out, "{statement}")?;
                if let Some(rewritten) = &rewritten {
                    writeln!(out, "{rewritten}")?;
                }
            }
            Format::Json => {
                let record = Record {
                    text,
                    statement: &statement,
                    rewritten,
                };
                serde_json::to_writer(&mut out, &record)?;
                writeln!(out)?;
            }
        }
        Ok(())
    });
    out.flush()?;

    let summary = summary?;
    info!("Done: {summary}");
    Ok(())
}
