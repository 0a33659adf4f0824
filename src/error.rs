//! Hard failure modes, via `thiserror` in the teacher's style. Domain
//! outcomes that are expected in normal operation — an item that can't
//! be placed, a query that finds nothing, a rearrangement that runs out
//! of options — are reported as values in the returned result structs,
//! not as `Err` variants here (distilled spec §7).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StowageError {
    #[error("invalid search query: neither id nor name was given")]
    InvalidQuery,

    #[error("container {0} not found")]
    UnknownContainer(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
