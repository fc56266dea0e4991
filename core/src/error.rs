use std::io;

/// Fatal conditions raised while resolving labels or executing a program.
///
/// Every variant is terminal: the simulation does not attempt to recover,
/// it unwinds to the driver after whatever cleanup the failing opcode (or
/// pass) already performed.
#[derive(thiserror::Error, Debug)]
pub enum SimError {
    #[error("unresolved label: {0}")]
    UnresolvedLabel(String),

    #[error("unknown opcode at pc {0}")]
    UnknownOpcode(usize),

    #[error("failed to open file {path}: {source}")]
    FileOpen {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("file {0:?} was never opened by reset")]
    FileNotOpen(String),

    #[error("i/o error on file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("file {path} reached end of input")]
    EndOfFile { path: String },

    #[error("line {line:?} in {path} is not a valid 32-bit integer record")]
    InvalidFileRecord { path: String, line: String },

    #[error("assertion failed at {file}:{line}")]
    AssertionFailed { line: i32, file: String },
}
