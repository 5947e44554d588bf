use std::path::PathBuf;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// An error produced while linking bin outputs.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	/// The manifest could not be read, or it is not valid UTF-8.
	#[error(r#"failed to read the manifest at "{}""#, .path.display())]
	ReadManifest {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	/// The manifest is not valid JSON, or a recognized field has an unsupported shape.
	#[error(r#"failed to parse the manifest at "{}""#, .path.display())]
	ParseManifest {
		path: PathBuf,
		#[source]
		source: serde_json::Error,
	},

	/// A field required by the shape of the manifest is absent.
	#[error(r#"the manifest is missing the "{0}" field"#)]
	MissingField(&'static str),

	/// A field required by the shape of the manifest is present but is not a string.
	#[error(r#"the manifest's "{0}" field is not a string"#)]
	InvalidField(&'static str),

	#[error(r#"failed to create the symlink at "{}" pointing to "{}""#, .link.display(), .target.display())]
	CreateSymlink {
		link: PathBuf,
		target: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error(r#"failed to set the permissions of "{}""#, .path.display())]
	SetPermissions {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("failed to write to stdout")]
	WriteOutput(#[source] std::io::Error),
}

/// Print an error and its source chain to stderr.
pub fn print_error(error: &(dyn std::error::Error + 'static)) {
	let mut stack = vec![error];
	while let Some(error) = stack.pop() {
		// Print the message.
		let message = error.to_string();
		eprintln!("-> {}", message.replace('\n', "\n   "));

		// Add the source to the stack.
		if let Some(source) = error.source() {
			stack.push(source);
		}
	}
}
