//! Content-resolution capability consumed by the resolver.
//!
//! The resolver never touches a platform API directly; everything it needs
//! from the host (streams, column lookups, app directories) comes through
//! [`ContentResolver`] and [`AppDirs`].

mod fs;

pub use fs::FsContentResolver;

use std::io::{self, Read};
use std::path::PathBuf;

use crate::uri::ContentUri;

/// Row filter passed to data-column lookups (`_id=?` with its arguments).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub clause: String,
    pub args: Vec<String>,
}

impl Selection {
    /// `_id=?` bound to `id`.
    pub fn by_row_id(id: &str) -> Self {
        Self {
            clause: "_id=?".to_string(),
            args: vec![id.to_string()],
        }
    }
}

/// Host capability for opening content URIs.
pub trait ContentResolver {
    /// Open a readable stream for `uri`. `Ok(None)` means the provider has no
    /// stream for it.
    fn open_input_stream(&self, uri: &ContentUri) -> io::Result<Option<Box<dyn Read + '_>>>;

    /// Look up the `_data` column (backing file path) for `uri`.
    ///
    /// Most providers no longer expose it; the default reports nothing.
    fn query_data_column(
        &self,
        _uri: &ContentUri,
        _selection: Option<&Selection>,
    ) -> io::Result<Option<PathBuf>> {
        Ok(None)
    }
}

impl<T: ContentResolver + ?Sized> ContentResolver for &T {
    fn open_input_stream(&self, uri: &ContentUri) -> io::Result<Option<Box<dyn Read + '_>>> {
        (**self).open_input_stream(uri)
    }

    fn query_data_column(
        &self,
        uri: &ContentUri,
        selection: Option<&Selection>,
    ) -> io::Result<Option<PathBuf>> {
        (**self).query_data_column(uri, selection)
    }
}

/// Application storage directories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppDirs {
    /// Root of the device's shared external storage (`primary` volume).
    pub external_storage_root: PathBuf,
    /// App-private files directory; copies land here.
    pub files_dir: PathBuf,
    /// App-specific external pictures directory, exposed via the sharing authority.
    pub pictures_dir: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Empty;

    impl ContentResolver for Empty {
        fn open_input_stream(&self, _uri: &ContentUri) -> io::Result<Option<Box<dyn Read + '_>>> {
            Ok(None)
        }
    }

    #[test]
    fn default_data_column_is_absent() {
        let uri = ContentUri::parse("content://media/external/images/media/1").unwrap();
        let selection = Selection::by_row_id("1");
        assert_eq!(selection.clause, "_id=?");
        assert_eq!(selection.args, vec!["1".to_string()]);
        assert!(Empty.query_data_column(&uri, Some(&selection)).unwrap().is_none());
    }

    #[test]
    fn reference_forwards() {
        let resolver = &Empty;
        let uri = ContentUri::parse("content://p/a.jpg").unwrap();
        assert!(resolver.open_input_stream(&uri).unwrap().is_none());
    }
}
