//! Errors raised inside the parser.
//!
//! None of these errors reach the user of the crate: the parser logs them and falls back to a
//! best-effort node.
use thiserror::Error;

pub(crate) type InnerResult<T> = std::result::Result<T, ErrorKind>;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorKind {
    #[error("expected an argument delimited by `{{}}`")]
    GroupArgument,
    #[error("unbalanced group, input ended before the closing `}}`")]
    UnbalancedGroup,
    #[error("maximum nesting depth reached")]
    DepthLimit,
    #[error("unknown color")]
    UnknownColor,
}
