//! Tally syntax checker CLI

use std::io::{self, Write};
use std::path::PathBuf;
use std::process;
use anyhow::Context;
use clap::Parser;
use tally_compiler::{CheckError, Checker, CheckOptions};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "tallyc")]
#[command(about = "Tally syntax checker - validates Tally source against the language grammar")]
#[command(version)]
struct Args {
    /// Input Tally source file
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Print the parse trace (BEGIN/END/TOKEN events)
    #[arg(short, long)]
    trace: bool,

    /// On a syntax error, also list the productions being parsed
    #[arg(short, long)]
    context: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(args) {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("tallyc: {:#}", e);
            process::exit(2);
        }
    }
}

/// Check the input and print the outcome; returns whether the file is well formed
fn run(args: Args) -> anyhow::Result<bool> {
    let options = CheckOptions::new(args.input).trace(args.trace);

    let checker = Checker::new(options);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match checker.check() {
        Ok(output) => {
            if output.trace.is_empty() {
                writeln!(out, "SUCCESS").context("writing result")?;
            }
            for line in &output.trace {
                writeln!(out, "{}", line).context("writing trace")?;
            }
            tracing::info!(terminals = output.terminals, "{} is well formed", output.source_file.display());
            Ok(true)
        }
        Err(e @ (CheckError::Io(_) | CheckError::FileNotFound(_) | CheckError::Internal(_))) => {
            Err(e).with_context(|| format!("cannot check {}", checker.options().input.display()))
        }
        Err(e) => {
            for line in e.trace() {
                writeln!(out, "{}", line).context("writing trace")?;
            }
            out.flush().context("writing trace")?;
            eprintln!("{}", e);
            if args.context {
                for line in e.context_lines() {
                    eprintln!("  {}", line);
                }
            }
            Ok(false)
        }
    }
}
