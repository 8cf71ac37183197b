//! Provider classification.
//!
//! Maps a URI's scheme and authority to a closed set of provider kinds; the
//! resolver has exactly one handler per kind.

use crate::uri::{ContentUri, SCHEME_CONTENT, SCHEME_FILE};

pub const EXTERNAL_STORAGE_AUTHORITY: &str = "com.android.externalstorage.documents";
pub const DOWNLOADS_AUTHORITY: &str = "com.android.providers.downloads.documents";
pub const MEDIA_AUTHORITY: &str = "com.android.providers.media.documents";
pub const REMOTE_PHOTOS_AUTHORITY: &str = "com.google.android.apps.photos.content";

/// Row collection backing downloads documents.
pub const PUBLIC_DOWNLOADS_URI: &str = "content://downloads/public_downloads";

/// Suffix appended to the package name to form the app's sharing authority.
pub const SHARING_AUTHORITY_SUFFIX: &str = ".provider";

/// Builds the sharing authority for `package_name` (`<package>.provider`).
pub fn sharing_authority(package_name: &str) -> String {
    format!("{package_name}{SHARING_AUTHORITY_SUFFIX}")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    /// Document from the external storage provider (`type:relative/path`).
    ExternalStorageDocument,
    /// Document from the downloads provider (numeric row id).
    DownloadsDocument,
    /// Document from the media provider (`image|video|audio:row-id`).
    MediaDocument,
    /// Cloud photo service; the last segment is a remote id, not a path.
    RemotePhotos,
    /// The app's own file-sharing authority.
    AppFileShare,
    /// Any other `content` URI.
    GenericContent,
    /// `file` URI.
    File,
    /// Anything else.
    Unsupported,
}

impl ProviderKind {
    /// Classify `uri`.
    ///
    /// Document provider kinds are only returned when `document_uris` is
    /// enabled and the path has document shape; otherwise such URIs fall
    /// through to the generic `content` handling.
    pub fn classify(uri: &ContentUri, sharing_authority: &str, document_uris: bool) -> Self {
        let authority = uri.authority().unwrap_or_default();

        if document_uris && uri.is_document_uri() {
            match authority {
                EXTERNAL_STORAGE_AUTHORITY => return ProviderKind::ExternalStorageDocument,
                DOWNLOADS_AUTHORITY => return ProviderKind::DownloadsDocument,
                MEDIA_AUTHORITY => return ProviderKind::MediaDocument,
                _ => {}
            }
        }

        match uri.scheme() {
            SCHEME_CONTENT if authority == REMOTE_PHOTOS_AUTHORITY => ProviderKind::RemotePhotos,
            SCHEME_CONTENT if authority == sharing_authority => ProviderKind::AppFileShare,
            SCHEME_CONTENT => ProviderKind::GenericContent,
            SCHEME_FILE => ProviderKind::File,
            _ => ProviderKind::Unsupported,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ProviderKind::ExternalStorageDocument => "external_storage_document",
            ProviderKind::DownloadsDocument => "downloads_document",
            ProviderKind::MediaDocument => "media_document",
            ProviderKind::RemotePhotos => "remote_photos",
            ProviderKind::AppFileShare => "app_file_share",
            ProviderKind::GenericContent => "generic_content",
            ProviderKind::File => "file",
            ProviderKind::Unsupported => "unsupported",
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Media collections addressable from media documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaCollection {
    Images,
    Video,
    Audio,
}

impl MediaCollection {
    /// Collection for a media document kind (`image`, `video`, `audio`).
    pub fn from_document_kind(kind: &str) -> Option<Self> {
        match kind {
            "image" => Some(MediaCollection::Images),
            "video" => Some(MediaCollection::Video),
            "audio" => Some(MediaCollection::Audio),
            _ => None,
        }
    }

    /// External content URI of the collection.
    pub fn content_uri(self) -> &'static str {
        match self {
            MediaCollection::Images => "content://media/external/images/media",
            MediaCollection::Video => "content://media/external/video/media",
            MediaCollection::Audio => "content://media/external/audio/media",
        }
    }
}
