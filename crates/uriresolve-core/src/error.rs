//! Resolution errors.
//!
//! Each failure the resolver can hit has its own variant so callers decide
//! policy (retry, ask the user, give up) instead of seeing a bare "no path".

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ResolveError {
    /// Input could not be parsed as a URI.
    #[error("invalid URI {uri:?}: {reason}")]
    InvalidUri { uri: String, reason: String },

    /// URI matches no supported scheme or provider.
    #[error("no resolution strategy for {uri}")]
    Unresolvable { uri: String },

    /// External-storage document on a volume other than `primary`.
    #[error("unsupported storage volume {volume:?} in {uri}")]
    UnsupportedVolume { uri: String, volume: String },

    /// Downloads or media document id that cannot be mapped to a row.
    #[error("invalid document id {id:?} in {uri}")]
    InvalidDocumentId { uri: String, id: String },

    /// File shared through the app's own authority is not on disk.
    #[error("shared file not found: {}", path.display())]
    SharedFileMissing { path: PathBuf },

    /// Copy fallback has no usable file name in the URI.
    #[error("no file name in {uri}")]
    MissingFileName { uri: String },

    /// Provider returned no stream (or failed to open one).
    #[error("source unavailable: {uri}")]
    SourceUnavailable {
        uri: String,
        #[source]
        source: Option<io::Error>,
    },

    /// I/O failure while copying into private storage. No output is left behind.
    #[error("copy to {} failed", dest.display())]
    CopyFailed {
        dest: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Share-URI requested for a file outside the shareable directory.
    #[error("{} is not inside the shared pictures directory", path.display())]
    NotShareable { path: PathBuf },
}

impl ResolveError {
    /// True when the source simply has no local representation, as opposed to
    /// an I/O failure worth reporting loudly.
    pub fn is_unresolvable(&self) -> bool {
        matches!(
            self,
            ResolveError::Unresolvable { .. }
                | ResolveError::UnsupportedVolume { .. }
                | ResolveError::InvalidDocumentId { .. }
                | ResolveError::MissingFileName { .. }
        )
    }
}
