//! Error types for the graph engine.
//!
//! Path-not-found is deliberately absent: a disconnected pair is an
//! expected outcome and is reported as a value (`Ok(None)`), never as
//! an error.

use thiserror::Error;

use crate::frontier::EmptyFrontierError;
use crate::store::PersonId;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SearchError {
    /// Source or target is not in the store. Detected before any
    /// traversal begins.
    #[error("unknown person id {}", .0.raw())]
    UnknownPerson(PersonId),

    /// The cancellation token was observed between iterations.
    #[error("search cancelled")]
    Cancelled,

    /// Engine bug: the frontier was drained without the emptiness
    /// check. Propagated loudly, never swallowed.
    #[error("frontier invariant violated: {0}")]
    FrontierInvariant(#[from] EmptyFrontierError),
}
