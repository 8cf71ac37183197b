//! Share URIs for files in the app's pictures directory.

use std::path::{Component, Path};

use super::UriResolver;
use crate::content::ContentResolver;
use crate::error::ResolveError;
use crate::uri::{is_plain_component, ContentUri};

/// Path prefix under the sharing authority for the pictures directory.
pub const PICTURES_SHARE_ROOT: &str = "pictures";

impl<C: ContentResolver> UriResolver<C> {
    /// URI other components can use to open `file`.
    ///
    /// Normally `content://<sharing-authority>/pictures/<name>`, which resolves
    /// back to the same file through the app-file-share branch; only direct
    /// children of the pictures directory can be shared this way. With
    /// `legacy_file_uris` any absolute path is shared as a `file://` URI.
    pub fn share_uri_for_file(&self, file: &Path) -> Result<ContentUri, ResolveError> {
        if self.options.legacy_file_uris {
            return ContentUri::from_file_path(file);
        }

        let not_shareable = || ResolveError::NotShareable {
            path: file.to_path_buf(),
        };
        let relative = file
            .strip_prefix(&self.dirs.pictures_dir)
            .map_err(|_| not_shareable())?;
        let mut components = relative.components();
        let name = match (components.next(), components.next()) {
            (Some(Component::Normal(name)), None) => name.to_str().ok_or_else(not_shareable)?,
            _ => return Err(not_shareable()),
        };
        if !is_plain_component(name) {
            return Err(not_shareable());
        }

        let root = ContentUri::parse(&format!(
            "content://{}/{}",
            self.sharing_authority, PICTURES_SHARE_ROOT
        ))?;
        let uri = root.with_appended_segment(name)?;
        tracing::debug!(file = %file.display(), uri = %uri, "built share uri");
        Ok(uri)
    }
}
