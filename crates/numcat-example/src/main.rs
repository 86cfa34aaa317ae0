//! `numcat` — number the lines of the given files, or of standard input
//! when none are given. A minimal demonstration of driving [`ArgvReader`]
//! from a filter program.
//!
//! Lines are tagged with the source they began in. Tagging reads the name
//! right after each chunk rather than through a buffered wrapper, whose
//! read-ahead would report a name one source ahead of the buffered bytes
//! near a file boundary.

use std::io::{Read, Write};

use anyhow::{Context, Result};
use argv_reader::ArgvReader;
use clap::Parser;

/// Number lines from the given files, reading standard input when no file
/// is named. `-` may be used anywhere in the list to splice stdin in.
#[derive(Parser)]
#[command(name = "numcat", version)]
struct Cli {
    /// Prefix each line with the name of the source it came from.
    #[arg(short, long)]
    tag: bool,

    /// Files to read, in order.
    files: Vec<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // The operands went through clap, so hand them over explicitly instead
    // of re-reading the process arguments.
    let mut input = ArgvReader::new(cli.files.clone());
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    let mut chunk = [0u8; 8192];
    let mut line = Vec::new();
    let mut line_from = String::new();
    let mut number = 0u64;

    loop {
        let n = input.read(&mut chunk).context("read input")?;
        if n == 0 {
            if !line.is_empty() {
                number += 1;
                emit(&mut out, &cli, number, &line_from, &line)?;
            }
            return Ok(());
        }
        // A single read never spans a source boundary, so every byte of
        // this chunk belongs to the source named right after it.
        let from = input.name();
        for &byte in &chunk[..n] {
            if line.is_empty() {
                line_from = from.to_owned();
            }
            line.push(byte);
            if byte == b'\n' {
                number += 1;
                emit(&mut out, &cli, number, &line_from, &line)?;
                line.clear();
            }
        }
    }
}

fn emit(out: &mut impl Write, cli: &Cli, number: u64, from: &str, line: &[u8]) -> Result<()> {
    if cli.tag {
        write!(out, "{from}:")?;
    }
    write!(out, "{number:>6}\t")?;
    out.write_all(line)?;
    if !line.ends_with(b"\n") {
        writeln!(out)?;
    }
    Ok(())
}
