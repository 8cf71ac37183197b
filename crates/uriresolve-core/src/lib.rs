pub mod config;
pub mod logging;

pub mod checksum;
pub mod content;
pub mod error;
pub mod provider;
pub mod resolver;
pub mod storage;
pub mod uri;

pub use content::{AppDirs, ContentResolver, FsContentResolver, Selection};
pub use error::ResolveError;
pub use provider::ProviderKind;
pub use resolver::{ResolveOptions, ResolvedPath, UriResolver};
pub use uri::ContentUri;
