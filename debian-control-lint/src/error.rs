//! Structural errors that abort linting of a single file.
//!
//! Policy violations are not errors; they are collected as
//! [`crate::Violation`]s. The variants here describe input that cannot be
//! linted at all, or a misuse of the [`crate::ControlFile`] phase API.

use crate::control::Phase;
use std::path::PathBuf;

/// Errors that stop processing of a control file.
#[derive(Debug)]
pub enum Error {
    /// The input contained no lines.
    EmptyInput,
    /// A PGP signed message did not start with a `Hash` header.
    UnrecognizedSignature,
    /// A PGP signed message had no signature block.
    MissingSignature,
    /// The PGP envelope contained no signed content.
    SignatureOnly,
    /// No stanza could be read from the input.
    NoStanzas,
    /// A phase was run twice, or before the phase it depends on.
    Phase {
        /// The operation that was attempted
        operation: &'static str,
        /// The phase the control file was in
        phase: Phase,
    },
    /// The file to lint does not exist or is not a regular file.
    InvalidTarget(PathBuf),
    /// Failed to read the input
    Io {
        /// The path that failed to be read
        path: PathBuf,
        /// The underlying I/O error
        error: std::io::Error,
    },
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyInput => write!(f, "Control file is empty"),
            Self::UnrecognizedSignature => {
                write!(f, "Unrecognized PGP signature: missing Hash field")
            }
            Self::MissingSignature => write!(f, "PGP signature is missing"),
            Self::SignatureOnly => write!(f, "Control file only contains a PGP signature"),
            Self::NoStanzas => write!(f, "Control file does not contain any stanzas"),
            Self::Phase { operation, phase } => {
                write!(f, "Cannot {} a control file that is {}", operation, phase)
            }
            Self::InvalidTarget(path) => {
                write!(f, "Invalid target file: {}", path.display())
            }
            Self::Io { path, error } => {
                write!(f, "Failed to read {}: {}", path.display(), error)
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { error, .. } => Some(error),
            _ => None,
        }
    }
}
