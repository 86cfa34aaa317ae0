//! Error type for sources that fail to open.

use std::io;

/// A source identifier could not be opened.
///
/// The chain stops at the first identifier that fails to open: the error is
/// returned from the `read` call that tried to advance, and nothing from the
/// identifiers after it is ever delivered. `OpenError` travels as the payload
/// of that [`io::Error`] (which keeps the original [`io::ErrorKind`]), so the
/// failing identifier stays attributable:
///
/// ```
/// use std::io::Read;
///
/// use argv_reader::{ChainedReader, OpenError};
///
/// let mut reader = ChainedReader::new(["no-such-file"]);
/// let err = reader.read(&mut [0u8; 16]).unwrap_err();
/// let open = err
///     .get_ref()
///     .and_then(|e| e.downcast_ref::<OpenError>())
///     .unwrap();
/// assert_eq!(open.name(), "no-such-file");
/// ```
///
/// Only the first report carries the payload; reads after a failure replay an
/// error with the same kind and message.
#[derive(Debug, thiserror::Error)]
#[error("cannot open {name}: {source}")]
pub struct OpenError {
    name: String,
    #[source]
    source: io::Error,
}

impl OpenError {
    /// Wraps `cause` so the resulting [`io::Error`] keeps its kind while the
    /// payload records which identifier was being opened.
    pub(crate) fn wrap(name: String, cause: io::Error) -> io::Error {
        let kind = cause.kind();
        io::Error::new(kind, OpenError { name, source: cause })
    }

    /// The identifier that failed to open.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The underlying I/O failure.
    pub fn cause(&self) -> &io::Error {
        &self.source
    }
}
