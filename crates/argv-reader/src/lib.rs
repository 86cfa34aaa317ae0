//! Chained reading of the files named on the command line, with a stdin
//! fallback — the input behavior UNIX filter programs are expected to have.
//!
//! [`ArgvReader`] presents an ordered list of file names as one continuous
//! [`Read`](std::io::Read) stream: each source is opened on demand, drained,
//! closed, and the stream moves on to the next without the caller ever seeing
//! a boundary. An empty list means standard input, and the literal identifier
//! `-` names standard input anywhere in the list.
//!
//! # Quick start
//!
//! ```no_run
//! use std::io::{BufRead, BufReader};
//!
//! use argv_reader::ArgvReader;
//!
//! fn main() -> std::io::Result<()> {
//!     let mut input = BufReader::new(ArgvReader::from_env());
//!     let mut line = String::new();
//!     while input.read_line(&mut line)? > 0 {
//!         print!("{line}");
//!         line.clear();
//!     }
//!     Ok(())
//! }
//! ```
//!
//! Invoked as `./filter foo bar baz` this reads `foo`, `bar`, then `baz` as
//! one stream; invoked with no arguments it reads standard input instead.
//!
//! # Attributing data to a source
//!
//! [`ArgvReader::name`] reports where the most recently returned bytes came
//! from (`-` for standard input), so a filter can prefix its output the way
//! `grep` does with multiple files. A source that fails to open aborts the
//! whole stream with an error naming the identifier; see [`OpenError`].
//!
//! # Testing
//!
//! [`ArgvReader::new`] takes the identifier list explicitly, so tests build
//! readers over scratch files instead of touching process arguments;
//! [`ArgvReader::from_env`] is only a shorthand over it.

mod error;
mod reader;
mod source;

pub use error::OpenError;
pub use reader::{ArgvReader, ChainedReader};
pub use source::STDIN_NAME;
