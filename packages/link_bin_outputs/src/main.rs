use clap::Parser as _;
use node_std::{Entry, Error, Manifest, Result};
use std::{
	fs::Permissions,
	io::Write as _,
	os::unix::{ffi::OsStrExt as _, fs::PermissionsExt as _},
	path::{Path, PathBuf},
};

/// Link bin outputs based on package.json contents.
#[derive(Debug, clap::Parser)]
#[command(version)]
struct Args {
	/// The bin output path.
	bin_out: PathBuf,

	/// The lib output path.
	lib_out: PathBuf,
}

/// A symlink to create, from a path in the bin output directory to a path in the lib output directory.
#[derive(Clone, Debug, PartialEq, Eq)]
struct Link {
	bin: PathBuf,
	lib: PathBuf,
}

fn main() {
	// Setup tracing.
	#[cfg(feature = "tracing")]
	node_std::tracing::setup("LINK_BIN_OUTPUTS_TRACING");

	// Parse the args.
	let args = Args::parse();
	#[cfg(feature = "tracing")]
	tracing::info!(?args, "parsed arguments");

	if let Err(error) = main_inner(&args) {
		eprintln!("link-bin-outputs failed:");
		node_std::error::print_error(&error);
		std::process::exit(1);
	}
}

fn main_inner(args: &Args) -> Result<()> {
	let stdout = std::io::stdout();
	let mut stdout = stdout.lock();
	link_bin_outputs(&args.bin_out, &args.lib_out, &mut stdout)?;
	stdout.flush().map_err(Error::WriteOutput)
}

/// Link every executable declared by the manifest in `lib_out` into `bin_out`, writing each link's target to `output`.
fn link_bin_outputs(bin_out: &Path, lib_out: &Path, output: &mut impl std::io::Write) -> Result<()> {
	// Read the manifest.
	let manifest = Manifest::read(lib_out)?;

	// Get the entries.
	let entries = manifest.entries(lib_out)?;

	for link in resolve(bin_out, lib_out, entries) {
		link.create()?;

		// Print the target so it can be piped to a shebang patching step.
		output
			.write_all(link.lib.as_os_str().as_bytes())
			.and_then(|()| output.write_all(b"\n"))
			.map_err(Error::WriteOutput)?;
	}

	Ok(())
}

/// Resolve entries to links, joining each alias onto `bin_out` and each path onto `lib_out`.
fn resolve(
	bin_out: &Path,
	lib_out: &Path,
	entries: impl IntoIterator<Item = Entry>,
) -> impl Iterator<Item = Link> {
	entries.into_iter().map(|entry| Link {
		bin: bin_out.join(entry.alias),
		lib: lib_out.join(entry.path),
	})
}

impl Link {
	/// Create the symlink and make it executable.
	fn create(&self) -> Result<()> {
		std::os::unix::fs::symlink(&self.lib, &self.bin).map_err(|source| Error::CreateSymlink {
			link: self.bin.clone(),
			target: self.lib.clone(),
			source,
		})?;
		std::fs::set_permissions(&self.bin, Permissions::from_mode(0o755)).map_err(|source| {
			Error::SetPermissions {
				path: self.bin.clone(),
				source,
			}
		})?;
		#[cfg(feature = "tracing")]
		tracing::debug!(bin = ?self.bin, lib = ?self.lib, "created the link");
		Ok(())
	}
}
