//! The two kinds of readable source behind a chain: standard input and
//! opened files.

use std::fs::File;
use std::io::{self, Read};

/// The reserved identifier naming standard input.
pub const STDIN_NAME: &str = "-";

/// An open readable resource paired with its display name.
///
/// Standard input and opened files share exactly two capabilities here:
/// being read from and being named. Dropping the `File` variant closes the
/// file; dropping the `Stdin` variant leaves process stdin untouched.
#[derive(Debug)]
pub(crate) enum Source {
    Stdin(io::Stdin),
    File { file: File, name: String },
}

impl Source {
    /// Opens the source named by `identifier`: `-` binds to standard input,
    /// anything else is opened as a file for reading.
    pub(crate) fn open(identifier: &str) -> io::Result<Self> {
        if identifier == STDIN_NAME {
            Ok(Source::Stdin(io::stdin()))
        } else {
            let file = File::open(identifier)?;
            Ok(Source::File {
                file,
                name: identifier.to_owned(),
            })
        }
    }

    pub(crate) fn name(&self) -> &str {
        match self {
            Source::Stdin(_) => STDIN_NAME,
            Source::File { name, .. } => name,
        }
    }
}

impl Read for Source {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            Source::Stdin(stdin) => stdin.read(buf),
            Source::File { file, .. } => file.read(buf),
        }
    }
}
