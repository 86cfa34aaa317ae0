//! The chained reader and its source-advancement state machine.

use std::collections::VecDeque;
use std::env;
use std::io::{self, Read};
use std::mem;

use crate::error::OpenError;
use crate::source::{Source, STDIN_NAME};

/// Record of a failed source, replayed on every read after the first so the
/// chain never quietly resumes past an error.
#[derive(Debug)]
struct Failure {
    /// Handle that errored mid-read, left attached so [`ChainedReader::name`]
    /// can still attribute the failure. `None` after a failed open.
    handle: Option<Source>,
    kind: io::ErrorKind,
    message: String,
}

impl Failure {
    fn record(handle: Option<Source>, err: &io::Error) -> Self {
        Failure {
            handle,
            kind: err.kind(),
            message: err.to_string(),
        }
    }

    /// [`io::Error`] is not `Clone`; rebuild one with the same kind and text.
    fn replay(&self) -> io::Error {
        io::Error::new(self.kind, self.message.clone())
    }
}

#[derive(Debug)]
enum State {
    /// No source open; the next read pulls from `pending`.
    Idle,
    Active(Source),
    /// Every identifier has been consumed and drained.
    Exhausted,
    Failed(Failure),
}

/// Reads the sources named by an ordered identifier list as one continuous
/// byte stream.
///
/// Identifiers are consumed front to back. Each source is opened on the read
/// that reaches it, drained, closed at end-of-data, and the read resumes
/// against the next source without returning an intermediate zero-length
/// result. `Ok(0)` from a `ChainedReader` (with a non-empty buffer) therefore
/// means the entire chain is exhausted, and stays that way: exhaustion is
/// terminal and consumed identifiers are never reopened.
///
/// Failures are terminal too. An identifier that fails to open aborts the
/// chain with an [`OpenError`] payload rather than skipping ahead, and a
/// mid-read I/O error is reported as-is; either way, subsequent reads replay
/// the error instead of advancing.
///
/// ```
/// use std::io::Read;
///
/// use argv_reader::ChainedReader;
///
/// # fn main() -> std::io::Result<()> {
/// # let dir = tempfile::tempdir()?;
/// # let a = dir.path().join("a.txt");
/// # let b = dir.path().join("b.txt");
/// # std::fs::write(&a, "hello\n")?;
/// # std::fs::write(&b, "world\n")?;
/// # let a = a.to_str().unwrap();
/// # let b = b.to_str().unwrap();
/// let mut reader = ChainedReader::new([a, b]);
/// let mut contents = String::new();
/// reader.read_to_string(&mut contents)?;
/// assert_eq!(contents, "hello\nworld\n");
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ChainedReader {
    pending: VecDeque<String>,
    state: State,
}

impl ChainedReader {
    /// Creates a reader over `identifiers`, consumed in the order given.
    /// `-` names standard input; anything else is opened as a file when the
    /// stream reaches it. An empty list yields an already-exhausted reader.
    pub fn new<I>(identifiers: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        ChainedReader {
            pending: identifiers.into_iter().map(Into::into).collect(),
            state: State::Idle,
        }
    }

    /// Display name of the source the most recently returned bytes came
    /// from: `-` for standard input, the identifier for a file, and `""`
    /// before the first source opens or after the last one is drained.
    ///
    /// The name is stable while a source is active and switches only when
    /// the stream crosses into the next one. Note that a buffering wrapper
    /// such as [`io::BufReader`] reads ahead, so the name it observes can
    /// run ahead of bytes still sitting in its buffer.
    pub fn name(&self) -> &str {
        match &self.state {
            State::Active(source) => source.name(),
            State::Failed(failure) => failure.handle.as_ref().map_or("", Source::name),
            State::Idle | State::Exhausted => "",
        }
    }

    /// Opens the front pending identifier. `Ok(true)` when a source is now
    /// active, `Ok(false)` when nothing is left. A failed open latches the
    /// failure with the identifier already consumed; it is not retried.
    fn open_next(&mut self) -> io::Result<bool> {
        let Some(identifier) = self.pending.pop_front() else {
            self.state = State::Exhausted;
            return Ok(false);
        };
        match Source::open(&identifier) {
            Ok(source) => {
                self.state = State::Active(source);
                Ok(true)
            }
            Err(cause) => {
                let err = OpenError::wrap(identifier, cause);
                self.state = State::Failed(Failure::record(None, &err));
                Err(err)
            }
        }
    }

    /// Latches a mid-read failure. The errored handle stays attached (it is
    /// not advanced past) and is only closed when the reader is dropped.
    fn fail(&mut self, err: &io::Error) {
        let handle = match mem::replace(&mut self.state, State::Exhausted) {
            State::Active(source) => Some(source),
            _ => None,
        };
        self.state = State::Failed(Failure::record(handle, err));
    }
}

impl Read for ChainedReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        loop {
            match &mut self.state {
                State::Idle => {
                    if !self.open_next()? {
                        return Ok(0);
                    }
                }
                State::Active(source) => match source.read(buf) {
                    // An empty destination is the one case where Ok(0) does
                    // not mean end-of-data; pass it through untouched.
                    Ok(0) if !buf.is_empty() => {
                        // Replacing the state drops the drained source,
                        // closing it before the next one opens.
                        self.state = State::Idle;
                    }
                    Ok(n) => return Ok(n),
                    Err(err) if err.kind() == io::ErrorKind::Interrupted => return Err(err),
                    Err(err) => {
                        self.fail(&err);
                        return Err(err);
                    }
                },
                State::Exhausted => return Ok(0),
                State::Failed(failure) => return Err(failure.replay()),
            }
        }
    }
}

/// The reader handed to filter programs: the file names from the command
/// line chained in order, or standard input when none were given.
///
/// This is the crate's front door. With a non-empty identifier list it
/// behaves exactly like [`ChainedReader`]; with an empty list it binds
/// straight to standard input, no chaining machinery in between, and
/// [`name`](ArgvReader::name) reports `-` from the start.
///
/// ```no_run
/// use std::io::Read;
///
/// use argv_reader::ArgvReader;
///
/// let mut contents = String::new();
/// ArgvReader::from_env().read_to_string(&mut contents).unwrap();
/// ```
#[derive(Debug)]
pub struct ArgvReader {
    inner: Inner,
}

#[derive(Debug)]
enum Inner {
    Stdin(io::Stdin),
    Chain(ChainedReader),
}

impl ArgvReader {
    /// Builds a reader from an explicit identifier list. An empty list binds
    /// directly to standard input.
    ///
    /// Prefer this over [`from_env`](ArgvReader::from_env) whenever the
    /// identifiers come from anywhere but the raw process arguments, e.g.
    /// the leftover operands of an argument parser.
    pub fn new<I>(identifiers: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let pending: Vec<String> = identifiers.into_iter().map(Into::into).collect();
        let inner = if pending.is_empty() {
            Inner::Stdin(io::stdin())
        } else {
            Inner::Chain(ChainedReader::new(pending))
        };
        ArgvReader { inner }
    }

    /// Shorthand for [`new`](ArgvReader::new) over the process arguments
    /// after the program name.
    pub fn from_env() -> Self {
        Self::new(env::args().skip(1))
    }

    /// Name of the source currently being read; see [`ChainedReader::name`].
    pub fn name(&self) -> &str {
        match &self.inner {
            Inner::Stdin(_) => STDIN_NAME,
            Inner::Chain(chain) => chain.name(),
        }
    }
}

impl Read for ArgvReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match &mut self.inner {
            Inner::Stdin(stdin) => stdin.read(buf),
            Inner::Chain(chain) => chain.read(buf),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::ErrorKind;

    use tempfile::TempDir;

    use super::*;

    fn scratch_file(dir: &TempDir, name: &str, contents: &str) -> String {
        let path = dir.path().join(name);
        std::fs::write(&path, contents).unwrap();
        path.to_str().unwrap().to_owned()
    }

    #[test]
    fn name_is_empty_before_first_read() {
        let reader = ChainedReader::new(["-"]);
        assert_eq!(reader.name(), "");
    }

    #[test]
    fn name_tracks_the_active_source() {
        let dir = tempfile::tempdir().unwrap();
        let a = scratch_file(&dir, "a.txt", "hello\n");
        let b = scratch_file(&dir, "b.txt", "world\n");

        let mut reader = ChainedReader::new([a.clone(), b.clone()]);
        let mut byte = [0u8; 1];
        for i in 0..12 {
            assert_eq!(reader.read(&mut byte).unwrap(), 1);
            let expected = if i < 6 { &a } else { &b };
            assert_eq!(reader.name(), expected);
        }

        assert_eq!(reader.read(&mut byte).unwrap(), 0);
        assert_eq!(reader.name(), "");
    }

    #[test]
    fn empty_buffer_reads_zero_without_advancing() {
        let dir = tempfile::tempdir().unwrap();
        let a = scratch_file(&dir, "a.txt", "hello\n");

        let mut reader = ChainedReader::new([a.clone()]);
        let mut byte = [0u8; 1];
        assert_eq!(reader.read(&mut byte).unwrap(), 1);

        assert_eq!(reader.read(&mut []).unwrap(), 0);
        assert_eq!(reader.name(), a);

        let mut rest = String::new();
        reader.read_to_string(&mut rest).unwrap();
        assert_eq!(rest, "ello\n");
    }

    #[test]
    fn open_failure_latches_and_replays() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.txt");
        let b = scratch_file(&dir, "b.txt", "world\n");

        let mut reader = ChainedReader::new([missing.to_str().unwrap().to_owned(), b]);
        let mut buf = [0u8; 16];

        let first = reader.read(&mut buf).unwrap_err();
        assert_eq!(first.kind(), ErrorKind::NotFound);
        assert_eq!(reader.name(), "");

        // Still failed; the next identifier is never opened.
        let again = reader.read(&mut buf).unwrap_err();
        assert_eq!(again.kind(), ErrorKind::NotFound);
        assert_eq!(again.to_string(), first.to_string());
    }

    #[cfg(unix)]
    #[test]
    fn read_failure_keeps_the_errored_source_attached() {
        let dir = tempfile::tempdir().unwrap();
        let sub = dir.path().join("sub");
        std::fs::create_dir(&sub).unwrap();
        let sub = sub.to_str().unwrap().to_owned();
        let b = scratch_file(&dir, "b.txt", "world\n");

        // A directory opens fine on unix but errors on the first read,
        // which is a mid-read failure rather than an open failure.
        let mut reader = ChainedReader::new([sub.clone(), b]);
        let mut buf = [0u8; 16];

        let first = reader.read(&mut buf).unwrap_err();
        assert_ne!(first.kind(), ErrorKind::NotFound);
        assert_eq!(reader.name(), sub);

        // The handle stays attached and the failure replays; the chain
        // never advances to the next identifier.
        let again = reader.read(&mut buf).unwrap_err();
        assert_eq!(again.kind(), first.kind());
        assert_eq!(again.to_string(), first.to_string());
        assert_eq!(reader.name(), sub);
    }

    #[test]
    fn empty_chain_is_immediately_exhausted() {
        let mut reader = ChainedReader::new(Vec::<String>::new());
        let mut buf = [0u8; 4];
        assert_eq!(reader.read(&mut buf).unwrap(), 0);
        assert_eq!(reader.read(&mut buf).unwrap(), 0);
        assert_eq!(reader.name(), "");
    }

    #[test]
    fn argv_reader_without_identifiers_is_stdin() {
        let reader = ArgvReader::new(Vec::<String>::new());
        assert_eq!(reader.name(), "-");
    }

    #[test]
    fn argv_reader_with_dash_reports_no_name_until_read() {
        let reader = ArgvReader::new(["-"]);
        assert_eq!(reader.name(), "");
    }
}
