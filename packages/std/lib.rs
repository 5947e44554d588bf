pub mod error;
pub mod manifest;

#[cfg(feature = "tracing")]
pub mod tracing;

pub use error::{Error, Result};
pub use manifest::{Entry, Manifest};

/// The name of the manifest file inside a lib output directory.
pub const MANIFEST_FILE_NAME: &str = "package.json";
