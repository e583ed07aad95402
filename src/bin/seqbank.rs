//! Seqbank CLI - command-driven front end for a sequence store file.
//!
//! Opens (or creates) a store file and executes line-oriented commands
//! from stdin:
//!
//! ```text
//! insert ACGTAC            -> {"offset":0,"byte_len":2,"base_count":6}
//! get {"offset":0,...}     -> ACGTAC
//! remove {"offset":0,...}  -> removed
//! free                     -> extent 2 byte(s), 0 free in 0 block(s)
//! quit
//! ```
//!
//! Handles print as JSON and are accepted back verbatim. They stay usable
//! across runs against the same file; freed-space accounting does not.

use anyhow::{bail, Context, Result};
use clap::Parser;
use seqbank::{FileBacking, Handle, SequenceStore};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Seqbank - packed DNA sequence store
#[derive(Parser, Debug)]
#[command(name = "seqbank")]
#[command(author, version, about = "Packed DNA sequence store", long_about = None)]
struct Cli {
    /// Store file to operate on (created if missing)
    file: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let mut store = SequenceStore::open(&cli.file)
        .with_context(|| format!("opening store file {}", cli.file.display()))?;

    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();

    for line in stdin.lock().lines() {
        let line = line.context("reading command")?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match run_command(&mut store, line) {
            Ok(Some(output)) => writeln!(stdout, "{output}")?,
            Ok(None) => break,
            // Command errors are reported and the session continues.
            Err(err) => writeln!(stdout, "error: {err:#}")?,
        }
    }

    Ok(())
}

/// Execute one command line. `Ok(None)` ends the session.
fn run_command(store: &mut SequenceStore<FileBacking>, line: &str) -> Result<Option<String>> {
    let (command, rest) = match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };

    match command {
        "insert" => {
            if rest.is_empty() {
                bail!("usage: insert <sequence>");
            }
            let handle = store.insert(rest)?;
            Ok(Some(serde_json::to_string(&handle)?))
        }
        "get" => {
            let sequence = store.get(parse_handle(rest)?)?;
            Ok(Some(sequence.to_string()))
        }
        "remove" => {
            store.remove(parse_handle(rest)?)?;
            Ok(Some("removed".to_string()))
        }
        "free" => Ok(Some(store.stats().to_string())),
        "quit" | "exit" => Ok(None),
        other => bail!("unknown command '{other}' (expected insert, get, remove, free, quit)"),
    }
}

fn parse_handle(input: &str) -> Result<Handle> {
    if input.is_empty() {
        bail!(r#"expected a handle, e.g. {{"offset":0,"byte_len":1,"base_count":4}}"#);
    }
    serde_json::from_str(input).context("parsing handle")
}
