//! pgsql-ast CLI
//!
//! Parses Postgres-flavoured SQL and prints the AST as JSON, or the column
//! references it contains.

use std::convert::Infallible;
use std::io::Read;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use serde::Serialize;
use tracing::{debug, info, Level};
use tracing_subscriber::FmtSubscriber;

use pgsql_ast::ast::ExprRef;
use pgsql_ast::{Visit, Visitor};

/// Parse SQL into a typed AST.
#[derive(Parser)]
#[command(name = "pgsql-ast")]
#[command(author, version, about, long_about = None)]
#[allow(clippy::struct_excessive_bools)]
struct Cli {
    /// SQL file to read (stdin if neither this nor --sql is given).
    file: Option<PathBuf>,

    /// Inline SQL text.
    #[arg(short, long, env = "PGSQL_AST_SQL", conflicts_with = "file")]
    sql: Option<String>,

    /// Parse a single expression instead of statements.
    #[arg(short, long)]
    expr: bool,

    /// Print column references, one per line, instead of JSON.
    #[arg(short, long)]
    refs: bool,

    /// Print JSON on a single line.
    #[arg(short, long)]
    compact: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,
}

/// Collects every column reference as `[schema.][table.]column`.
#[derive(Default)]
struct RefCollector(Vec<String>);

impl Visitor for RefCollector {
    type Error = Infallible;

    fn visit_ref(&mut self, reference: &ExprRef) -> Result<(), Infallible> {
        let rendered = match &reference.table {
            Some(table) => format!("{table}.{}", reference.name),
            None => reference.name.clone(),
        };
        self.0.push(rendered);
        Ok(())
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
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let input = read_input(&cli)?;
    debug!(bytes = input.len(), "read input");

    if cli.expr {
        let expr = pgsql_ast::parse_expression(&input).context("failed to parse expression")?;
        emit(&cli, std::slice::from_ref(&expr))?;
    } else {
        let statements = pgsql_ast::parse(&input).context("failed to parse SQL")?;
        info!(count = statements.len(), "parsed statements");
        emit(&cli, &statements)?;
    }

    Ok(())
}

fn read_input(cli: &Cli) -> anyhow::Result<String> {
    if let Some(sql) = &cli.sql {
        return Ok(sql.clone());
    }
    if let Some(path) = &cli.file {
        return std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()));
    }
    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .context("failed to read stdin")?;
    Ok(input)
}

fn emit<T>(cli: &Cli, nodes: &[T]) -> anyhow::Result<()>
where
    T: Visit + Serialize,
{
    if cli.refs {
        let mut refs = RefCollector::default();
        nodes.visit(&mut refs).unwrap_or_else(|never| match never {});
        for reference in refs.0 {
            println!("{reference}");
        }
        return Ok(());
    }

    let json = if cli.compact {
        serde_json::to_string(nodes)?
    } else {
        serde_json::to_string_pretty(nodes)?
    };
    println!("{json}");
    Ok(())
}
