//! Content URI modeling.
//!
//! Wraps a parsed URI and exposes the pieces the resolver dispatches on:
//! scheme, authority, decoded path, last path segment and document id.

mod decode;
mod document_id;
mod sanitize;

pub use decode::percent_decode;
pub use document_id::DocumentId;
pub use sanitize::{is_plain_component, sanitize_filename};

use std::fmt;
use std::str::FromStr;

use url::Url;

use crate::error::ResolveError;

/// Scheme of provider-issued content references.
pub const SCHEME_CONTENT: &str = "content";
/// Scheme of plain local file references.
pub const SCHEME_FILE: &str = "file";

/// A parsed source reference (`content://authority/...` or `file:///...`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentUri {
    url: Url,
}

impl ContentUri {
    /// Parse a URI string. Fails on anything `url` cannot parse.
    pub fn parse(input: &str) -> Result<Self, ResolveError> {
        let url = Url::parse(input.trim()).map_err(|e| ResolveError::InvalidUri {
            uri: input.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self { url })
    }

    /// Build a `file://` URI from an absolute local path.
    pub fn from_file_path(path: &std::path::Path) -> Result<Self, ResolveError> {
        let url = Url::from_file_path(path).map_err(|()| ResolveError::InvalidUri {
            uri: path.display().to_string(),
            reason: "path is not absolute".to_string(),
        })?;
        Ok(Self { url })
    }

    /// Lowercase scheme, e.g. `content` or `file`.
    pub fn scheme(&self) -> &str {
        self.url.scheme()
    }

    /// Authority (`[userinfo@]host[:port]`); `None` when the URI has none.
    pub fn authority(&self) -> Option<&str> {
        let authority = self.url.authority();
        if authority.is_empty() {
            None
        } else {
            Some(authority)
        }
    }

    /// Percent-decoded path component.
    pub fn path(&self) -> String {
        percent_decode(self.url.path())
    }

    /// Non-empty, percent-decoded path segments in order.
    pub fn path_segments(&self) -> Vec<String> {
        self.url
            .path_segments()
            .map(|segments| {
                segments
                    .filter(|s| !s.is_empty())
                    .map(percent_decode)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Last non-empty path segment, decoded.
    pub fn last_path_segment(&self) -> Option<String> {
        self.path_segments().pop()
    }

    /// Document id when the path has document shape:
    /// `/document/<id>` or `/tree/<tree-id>/document/<id>`.
    pub fn document_id(&self) -> Option<String> {
        let mut segments = self.path_segments();
        match segments.len() {
            2 if segments[0] == "document" => segments.pop(),
            4 if segments[0] == "tree" && segments[2] == "document" => segments.pop(),
            _ => None,
        }
    }

    /// True if the path has document shape (see [`ContentUri::document_id`]).
    pub fn is_document_uri(&self) -> bool {
        self.document_id().is_some()
    }

    /// Appends `id` as a new trailing path segment (row URI for a collection).
    pub fn with_appended_id(&self, id: u64) -> Result<Self, ResolveError> {
        self.with_appended_segment(&id.to_string())
    }

    /// Appends one path segment, percent-encoding it as needed.
    pub fn with_appended_segment(&self, segment: &str) -> Result<Self, ResolveError> {
        let mut url = self.url.clone();
        url.path_segments_mut()
            .map_err(|()| ResolveError::InvalidUri {
                uri: self.to_string(),
                reason: "cannot append a path segment".to_string(),
            })?
            .pop_if_empty()
            .push(segment);
        Ok(Self { url })
    }
}

impl FromStr for ContentUri {
    type Err = ResolveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ContentUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.url.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_content_uri_parts() {
        let uri = ContentUri::parse("content://com.example.provider/images/IMG_1.jpg").unwrap();
        assert_eq!(uri.scheme(), "content");
        assert_eq!(uri.authority(), Some("com.example.provider"));
        assert_eq!(uri.path(), "/images/IMG_1.jpg");
        assert_eq!(uri.last_path_segment().as_deref(), Some("IMG_1.jpg"));
    }

    #[test]
    fn file_uri_has_no_authority() {
        let uri = ContentUri::parse("file:///a/b.jpg").unwrap();
        assert_eq!(uri.scheme(), "file");
        assert_eq!(uri.authority(), None);
        assert_eq!(uri.path(), "/a/b.jpg");
    }

    #[test]
    fn scheme_is_case_insensitive() {
        let uri = ContentUri::parse("CONTENT://media/external/images/media/7").unwrap();
        assert_eq!(uri.scheme(), "content");
    }

    #[test]
    fn last_segment_is_decoded_and_skips_trailing_slash() {
        let uri = ContentUri::parse("content://p/dir/my%20photo.png/").unwrap();
        assert_eq!(uri.last_path_segment().as_deref(), Some("my photo.png"));
    }

    #[test]
    fn no_last_segment_for_root() {
        let uri = ContentUri::parse("content://p/").unwrap();
        assert_eq!(uri.last_path_segment(), None);
    }

    #[test]
    fn document_id_plain_and_tree() {
        let doc = ContentUri::parse(
            "content://com.android.externalstorage.documents/document/primary%3ADCIM%2Ffoo.jpg",
        )
        .unwrap();
        assert_eq!(doc.document_id().as_deref(), Some("primary:DCIM/foo.jpg"));

        let tree = ContentUri::parse(
            "content://com.android.externalstorage.documents/tree/primary%3ADCIM/document/primary%3ADCIM%2Fa.jpg",
        )
        .unwrap();
        assert_eq!(tree.document_id().as_deref(), Some("primary:DCIM/a.jpg"));
    }

    #[test]
    fn non_document_shapes() {
        let row = ContentUri::parse("content://media/external/images/media/5").unwrap();
        assert!(!row.is_document_uri());
        let odd = ContentUri::parse("content://x/tree/a/b/c").unwrap();
        assert!(!odd.is_document_uri());
    }

    #[test]
    fn appended_id_adds_segment() {
        let base = ContentUri::parse("content://downloads/public_downloads").unwrap();
        let row = base.with_appended_id(42).unwrap();
        assert_eq!(row.to_string(), "content://downloads/public_downloads/42");
        assert_eq!(row.last_path_segment().as_deref(), Some("42"));
    }

    #[test]
    fn appended_segment_is_encoded() {
        let base = ContentUri::parse("content://com.example.app.provider/pictures").unwrap();
        let uri = base.with_appended_segment("my photo.jpg").unwrap();
        assert_eq!(
            uri.to_string(),
            "content://com.example.app.provider/pictures/my%20photo.jpg"
        );
        assert_eq!(uri.last_path_segment().as_deref(), Some("my photo.jpg"));
    }

    #[test]
    fn invalid_uri_is_an_error() {
        assert!(matches!(
            ContentUri::parse("not a uri"),
            Err(ResolveError::InvalidUri { .. })
        ));
    }
}
