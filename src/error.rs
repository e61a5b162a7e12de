use thiserror::Error;

use crate::map::Vertex;

// Low-level planning failure (no path for a single agent under a single
// constraint set) is not a variant here: the high-level search recovers
// from it locally by discarding a child, it never reaches Cbs::solve's caller.
#[derive(Debug, Error)]
pub enum CbsError {
    #[error("endpoint {0:?} is out of bounds or an obstacle")]
    InvalidEndpoint(Vertex),

    #[error("no path exists between {0:?} and {1:?} on the free grid")]
    NoPathExists(Vertex, Vertex),

    #[error("agent {0} has no path under the empty constraint set")]
    NoRootSolution(usize),

    #[error("open list exhausted without finding a conflict-free node")]
    NoSolution,
}

// Kept distinct from CbsError so a caller linking only the algorithmic core
// never has to match on loader-specific variants.
#[derive(Debug, Error)]
pub enum MapError {
    #[error("expected a header line of \"<rows> <cols>\", got: {0:?}")]
    MissingHeader(Option<String>),

    #[error("invalid header value {value:?}: {source}")]
    InvalidHeader {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    #[error("row {row} has {got} cells, expected {expected}")]
    RowWidthMismatch {
        row: usize,
        expected: usize,
        got: usize,
    },

    #[error("expected {expected} map rows, found {got}")]
    RowCountMismatch { expected: usize, got: usize },

    #[error("unrecognized cell {0:?} (expected '@' or '.')")]
    UnknownCell(char),

    #[error("expected an agent count line, got: {0:?}")]
    MissingAgentCount(Option<String>),

    #[error("agent line {line} malformed: expected \"sx sy gx gy\", got {content:?}")]
    MalformedAgentLine { line: usize, content: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
