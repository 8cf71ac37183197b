//! Filesystem-backed content resolver.
//!
//! Serves `content://<authority>/<path>` from `<root>/<authority>/<path>` and
//! `file://` URIs from their own path. Lets the resolver run on a desktop host
//! against a mirrored provider tree.

use std::fs::File;
use std::io::{self, Read};
use std::path::PathBuf;

use super::{ContentResolver, Selection};
use crate::uri::{is_plain_component, ContentUri, SCHEME_CONTENT, SCHEME_FILE};

#[derive(Debug, Clone)]
pub struct FsContentResolver {
    root: PathBuf,
    expose_data_column: bool,
}

impl FsContentResolver {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            expose_data_column: false,
        }
    }

    /// Report backing files through `query_data_column` (like providers that
    /// still populate `_data`).
    pub fn with_data_column(mut self, expose: bool) -> Self {
        self.expose_data_column = expose;
        self
    }

    /// Local file backing `uri`, if the URI maps inside the root.
    ///
    /// Segments that would escape the authority directory map to nothing.
    pub fn backing_path(&self, uri: &ContentUri) -> Option<PathBuf> {
        match uri.scheme() {
            SCHEME_FILE => Some(PathBuf::from(uri.path())),
            SCHEME_CONTENT => {
                let authority = uri.authority()?;
                if !is_plain_component(authority) {
                    return None;
                }
                let mut path = self.root.join(authority);
                for segment in uri.path_segments() {
                    if !is_plain_component(&segment) {
                        return None;
                    }
                    path.push(segment);
                }
                Some(path)
            }
            _ => None,
        }
    }
}

impl ContentResolver for FsContentResolver {
    fn open_input_stream(&self, uri: &ContentUri) -> io::Result<Option<Box<dyn Read + '_>>> {
        let Some(path) = self.backing_path(uri) else {
            return Ok(None);
        };
        let file = match File::open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e),
        };
        if !file.metadata()?.is_file() {
            return Ok(None);
        }
        Ok(Some(Box::new(file)))
    }

    fn query_data_column(
        &self,
        uri: &ContentUri,
        _selection: Option<&Selection>,
    ) -> io::Result<Option<PathBuf>> {
        if !self.expose_data_column {
            return Ok(None);
        }
        Ok(self.backing_path(uri).filter(|p| p.is_file()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (tempfile::TempDir, FsContentResolver) {
        let dir = tempfile::tempdir().unwrap();
        let media = dir.path().join("media/external/images/media");
        std::fs::create_dir_all(&media).unwrap();
        std::fs::write(media.join("7"), b"jpegbytes").unwrap();
        let resolver = FsContentResolver::new(dir.path());
        (dir, resolver)
    }

    #[test]
    fn maps_authority_and_segments() {
        let (dir, resolver) = setup();
        let uri = ContentUri::parse("content://media/external/images/media/7").unwrap();
        assert_eq!(
            resolver.backing_path(&uri).unwrap(),
            dir.path().join("media/external/images/media/7")
        );
    }

    #[test]
    fn opens_existing_content() {
        let (_dir, resolver) = setup();
        let uri = ContentUri::parse("content://media/external/images/media/7").unwrap();
        let mut buf = Vec::new();
        resolver
            .open_input_stream(&uri)
            .unwrap()
            .unwrap()
            .read_to_end(&mut buf)
            .unwrap();
        assert_eq!(buf, b"jpegbytes");
    }

    #[test]
    fn missing_or_directory_is_absent() {
        let (_dir, resolver) = setup();
        let missing = ContentUri::parse("content://media/external/images/media/8").unwrap();
        assert!(resolver.open_input_stream(&missing).unwrap().is_none());
        let directory = ContentUri::parse("content://media/external/images").unwrap();
        assert!(resolver.open_input_stream(&directory).unwrap().is_none());
    }

    #[test]
    fn escaping_segments_map_to_nothing() {
        let (_dir, resolver) = setup();
        let uri = ContentUri::parse("content://media/a%2F..%2F..%2Fetc/passwd").unwrap();
        assert!(resolver.backing_path(&uri).is_none());
    }

    #[test]
    fn data_column_only_when_exposed() {
        let (dir, resolver) = setup();
        let uri = ContentUri::parse("content://media/external/images/media/7").unwrap();
        assert!(resolver.query_data_column(&uri, None).unwrap().is_none());
        let resolver = resolver.with_data_column(true);
        assert_eq!(
            resolver.query_data_column(&uri, None).unwrap(),
            Some(dir.path().join("media/external/images/media/7"))
        );
    }
}
