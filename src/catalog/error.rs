use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Reasons the catalog could not be produced. Every variant is fatal for the
/// session; the browser shows a fixed error message in place of the grid.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read course catalog at {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("course catalog at {path} is not valid")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("course id {0} appears more than once in the catalog")]
    DuplicateId(i64),
    #[error("catalog loader stopped before delivering a result")]
    LoaderGone,
}
