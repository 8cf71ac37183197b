//! Content URI → local path resolution.
//!
//! [`UriResolver`] classifies a URI into a [`ProviderKind`] and runs the one
//! handler for that kind. Providers that expose no direct path end up in the
//! copy-to-local fallback, which streams the content into the private files
//! directory.

mod share;

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::ResolverConfig;
use crate::content::{AppDirs, ContentResolver, Selection};
use crate::error::ResolveError;
use crate::provider::{MediaCollection, ProviderKind, PUBLIC_DOWNLOADS_URI};
use crate::storage::{self, DEFAULT_BUFFER_BYTES};
use crate::uri::{is_plain_component, sanitize_filename, ContentUri, DocumentId};

/// Outcome of a successful resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "path", rename_all = "snake_case")]
pub enum ResolvedPath {
    /// Path exposed by the URI or the provider; the file was not copied.
    Direct(PathBuf),
    /// Content copied into the private files directory; owned by the caller.
    Copied(PathBuf),
    /// Opaque remote identifier (cloud photo service). Not a local path.
    Remote(String),
}

impl ResolvedPath {
    /// Local filesystem path, if this resolution produced one.
    pub fn local_path(&self) -> Option<&Path> {
        match self {
            ResolvedPath::Direct(p) | ResolvedPath::Copied(p) => Some(p),
            ResolvedPath::Remote(_) => None,
        }
    }

    pub fn is_copy(&self) -> bool {
        matches!(self, ResolvedPath::Copied(_))
    }
}

impl fmt::Display for ResolvedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolvedPath::Direct(p) | ResolvedPath::Copied(p) => write!(f, "{}", p.display()),
            ResolvedPath::Remote(id) => f.write_str(id),
        }
    }
}

/// Behavior switches for a resolver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveOptions {
    /// Recognize document-provider URIs.
    pub document_uris: bool,
    /// Ask the provider for a `_data` path before copying.
    pub data_column_lookup: bool,
    /// Share files as `file://` URIs instead of sharing-authority URIs.
    pub legacy_file_uris: bool,
    /// Copy buffer size in bytes.
    pub copy_buffer_bytes: usize,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            document_uris: true,
            data_column_lookup: false,
            legacy_file_uris: false,
            copy_buffer_bytes: DEFAULT_BUFFER_BYTES,
        }
    }
}

impl From<&ResolverConfig> for ResolveOptions {
    fn from(cfg: &ResolverConfig) -> Self {
        Self {
            document_uris: cfg.document_uris,
            data_column_lookup: cfg.data_column_lookup,
            legacy_file_uris: cfg.legacy_file_uris,
            copy_buffer_bytes: cfg.copy_buffer_bytes,
        }
    }
}

/// Resolves content URIs against an injected [`ContentResolver`] and [`AppDirs`].
///
/// Stateless between calls; each resolution is a single pass with no retries.
/// Blocking: run it off any latency-sensitive thread.
#[derive(Debug, Clone)]
pub struct UriResolver<C> {
    content: C,
    dirs: AppDirs,
    sharing_authority: String,
    options: ResolveOptions,
}

impl<C: ContentResolver> UriResolver<C> {
    pub fn new(content: C, dirs: AppDirs, sharing_authority: impl Into<String>) -> Self {
        Self {
            content,
            dirs,
            sharing_authority: sharing_authority.into(),
            options: ResolveOptions::default(),
        }
    }

    /// Resolver with directories, authority and options taken from `cfg`.
    pub fn from_config(content: C, cfg: &ResolverConfig) -> anyhow::Result<Self> {
        Ok(Self::new(content, cfg.app_dirs()?, cfg.sharing_authority()).with_options(cfg.into()))
    }

    pub fn with_options(mut self, options: ResolveOptions) -> Self {
        self.options = options;
        self
    }

    pub fn dirs(&self) -> &AppDirs {
        &self.dirs
    }

    pub fn options(&self) -> &ResolveOptions {
        &self.options
    }

    pub fn sharing_authority(&self) -> &str {
        &self.sharing_authority
    }

    pub fn classify(&self, uri: &ContentUri) -> ProviderKind {
        ProviderKind::classify(uri, &self.sharing_authority, self.options.document_uris)
    }

    /// Parse `input` and resolve it.
    pub fn resolve_str(&self, input: &str) -> Result<ResolvedPath, ResolveError> {
        let uri = ContentUri::parse(input)?;
        self.resolve_path(&uri)
    }

    /// Resolve `uri` to a local path, a copied file or a remote id.
    pub fn resolve_path(&self, uri: &ContentUri) -> Result<ResolvedPath, ResolveError> {
        let kind = self.classify(uri);
        tracing::debug!(uri = %uri, kind = %kind, "resolving content uri");

        let result = match kind {
            ProviderKind::ExternalStorageDocument => self.external_storage_document(uri),
            ProviderKind::DownloadsDocument => self.downloads_document(uri),
            ProviderKind::MediaDocument => self.media_document(uri),
            ProviderKind::RemotePhotos => uri
                .last_path_segment()
                .map(ResolvedPath::Remote)
                .ok_or_else(|| unresolvable(uri)),
            ProviderKind::AppFileShare => self.app_file_share(uri),
            ProviderKind::GenericContent => self.data_column_lookup(uri, None),
            ProviderKind::File => Ok(ResolvedPath::Direct(PathBuf::from(uri.path()))),
            ProviderKind::Unsupported => Err(unresolvable(uri)),
        };

        match &result {
            Ok(resolved) => tracing::debug!(uri = %uri, resolved = %resolved, "resolved"),
            Err(e) if e.is_unresolvable() => tracing::debug!(uri = %uri, error = %e, "no path"),
            Err(e) => tracing::warn!(uri = %uri, error = %e, "resolution failed"),
        }
        result
    }

    fn external_storage_document(&self, uri: &ContentUri) -> Result<ResolvedPath, ResolveError> {
        let doc = DocumentId::parse(&document_id(uri)?);
        if !doc.kind_is("primary") {
            return Err(ResolveError::UnsupportedVolume {
                uri: uri.to_string(),
                volume: doc.kind,
            });
        }
        let relative = doc.value.trim_start_matches('/');
        if relative.is_empty() {
            return Err(invalid_document_id(uri, &doc));
        }
        Ok(ResolvedPath::Direct(
            self.dirs.external_storage_root.join(relative),
        ))
    }

    fn downloads_document(&self, uri: &ContentUri) -> Result<ResolvedPath, ResolveError> {
        let id = document_id(uri)?;
        let row_id: u64 = id.parse().map_err(|_| ResolveError::InvalidDocumentId {
            uri: uri.to_string(),
            id: id.clone(),
        })?;
        let row = ContentUri::parse(PUBLIC_DOWNLOADS_URI)?.with_appended_id(row_id)?;
        self.data_column_lookup(&row, None)
    }

    fn media_document(&self, uri: &ContentUri) -> Result<ResolvedPath, ResolveError> {
        let doc = DocumentId::parse(&document_id(uri)?);
        let collection = MediaCollection::from_document_kind(&doc.kind)
            .ok_or_else(|| invalid_document_id(uri, &doc))?;
        let row_id: u64 = doc
            .value
            .parse()
            .map_err(|_| invalid_document_id(uri, &doc))?;
        let row = ContentUri::parse(collection.content_uri())?.with_appended_id(row_id)?;
        self.data_column_lookup(&row, Some(&Selection::by_row_id(&doc.value)))
    }

    fn app_file_share(&self, uri: &ContentUri) -> Result<ResolvedPath, ResolveError> {
        let name = uri
            .last_path_segment()
            .filter(|s| is_plain_component(s))
            .ok_or_else(|| ResolveError::MissingFileName {
                uri: uri.to_string(),
            })?;
        let path = self.dirs.pictures_dir.join(name);
        if path.exists() {
            Ok(ResolvedPath::Direct(path))
        } else {
            Err(ResolveError::SharedFileMissing { path })
        }
    }

    /// Backing path for a provider row.
    ///
    /// With `data_column_lookup` enabled the provider is asked for its `_data`
    /// column first; a reported path that exists is returned directly. In every
    /// other case the content is copied into the private files directory.
    pub fn data_column_lookup(
        &self,
        uri: &ContentUri,
        selection: Option<&Selection>,
    ) -> Result<ResolvedPath, ResolveError> {
        if self.options.data_column_lookup {
            match self.content.query_data_column(uri, selection) {
                Ok(Some(path)) if path.exists() => return Ok(ResolvedPath::Direct(path)),
                Ok(Some(path)) => {
                    tracing::debug!(uri = %uri, path = %path.display(), "data column points at missing file");
                }
                Ok(None) => {}
                Err(e) => tracing::warn!(uri = %uri, error = %e, "data column query failed"),
            }
        }
        self.copy_to_local(uri).map(ResolvedPath::Copied)
    }

    /// Copy the content behind `uri` to `<files_dir>/<last path segment>`.
    ///
    /// Nothing is created when the source cannot be opened. A copy that fails
    /// midway removes its partial output.
    pub fn copy_to_local(&self, uri: &ContentUri) -> Result<PathBuf, ResolveError> {
        let name = uri
            .last_path_segment()
            .map(|s| sanitize_filename(&s))
            .unwrap_or_default();
        if name.is_empty() {
            return Err(ResolveError::MissingFileName {
                uri: uri.to_string(),
            });
        }
        let dest = self.dirs.files_dir.join(&name);

        let mut stream = match self.content.open_input_stream(uri) {
            Ok(Some(stream)) => stream,
            Ok(None) => {
                return Err(ResolveError::SourceUnavailable {
                    uri: uri.to_string(),
                    source: None,
                })
            }
            Err(e) => {
                return Err(ResolveError::SourceUnavailable {
                    uri: uri.to_string(),
                    source: Some(e),
                })
            }
        };

        let copy_failed = |source: std::io::Error| ResolveError::CopyFailed {
            dest: dest.clone(),
            source,
        };
        std::fs::create_dir_all(&self.dirs.files_dir).map_err(copy_failed)?;
        let bytes = storage::copy_to_file(&mut stream, &dest, self.options.copy_buffer_bytes)
            .map_err(copy_failed)?;

        tracing::info!(uri = %uri, dest = %dest.display(), bytes, "copied content to local file");
        Ok(dest)
    }
}

fn document_id(uri: &ContentUri) -> Result<String, ResolveError> {
    uri.document_id().ok_or_else(|| unresolvable(uri))
}

fn unresolvable(uri: &ContentUri) -> ResolveError {
    ResolveError::Unresolvable {
        uri: uri.to_string(),
    }
}

fn invalid_document_id(uri: &ContentUri, doc: &DocumentId) -> ResolveError {
    ResolveError::InvalidDocumentId {
        uri: uri.to_string(),
        id: format!("{}:{}", doc.kind, doc.value),
    }
}
