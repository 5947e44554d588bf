use crate::{Error, MANIFEST_FILE_NAME, Result};
use indexmap::IndexMap;
use itertools::Itertools as _;
use std::{
	ffi::OsString,
	path::{Path, PathBuf},
};

/// The fields of a `package.json` that describe a package's executables.
///
/// Only a JSON object decodes. Other fields are ignored.
#[derive(Clone, Debug)]
pub struct Manifest {
	/// The package name. Only checked when `bin` is a single path.
	pub name: Option<serde_json::Value>,

	/// The executables exposed by the package. An explicit `null` fails to decode.
	pub bin: Option<Bin>,

	/// The package's directory layout. Any mismatch yields `None`.
	pub directories: Option<Directories>,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Deserialize)]
#[serde(untagged)]
pub enum Bin {
	/// A single executable, exposed under the package name.
	Path(String),

	/// Executables keyed by alias, in document order.
	Map(IndexMap<String, String>),
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Deserialize)]
pub struct Directories {
	/// A directory whose files are all exposed as executables.
	#[serde(default)]
	pub bin: Option<String>,
}

/// An executable to expose, as an alias and a path relative to the lib output directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entry {
	pub alias: OsString,
	pub path: PathBuf,
}

impl Entry {
	pub fn new(alias: impl Into<OsString>, path: impl Into<PathBuf>) -> Self {
		Self {
			alias: alias.into(),
			path: path.into(),
		}
	}
}

impl Manifest {
	/// Read the manifest from a lib output directory.
	pub fn read(lib_out: impl AsRef<Path>) -> Result<Self> {
		let path = lib_out.as_ref().join(MANIFEST_FILE_NAME);
		#[cfg(feature = "tracing")]
		::tracing::debug!(?path, "reading the manifest");
		let contents = match std::fs::read_to_string(&path) {
			Ok(contents) => contents,
			Err(source) => return Err(Error::ReadManifest { path, source }),
		};
		let manifest = match serde_json::from_str::<Self>(&contents) {
			Ok(manifest) => manifest,
			Err(source) => return Err(Error::ParseManifest { path, source }),
		};
		#[cfg(feature = "tracing")]
		::tracing::trace!(?manifest);
		Ok(manifest)
	}

	/// Get all entries, those from `bin` followed by those from `directories.bin`.
	pub fn entries(&self, lib_out: impl AsRef<Path>) -> Result<Vec<Entry>> {
		let mut entries = self.bin_entries()?;
		entries.extend(self.directories_bin_entries(lib_out));
		#[cfg(feature = "tracing")]
		::tracing::debug!(?entries);
		Ok(entries)
	}

	/// Get the entries declared by the `bin` field.
	pub fn bin_entries(&self) -> Result<Vec<Entry>> {
		match &self.bin {
			None => Ok(Vec::new()),
			Some(Bin::Path(path)) => {
				let name = match &self.name {
					None => return Err(Error::MissingField("name")),
					Some(serde_json::Value::String(name)) => name,
					Some(_) => return Err(Error::InvalidField("name")),
				};
				Ok(vec![Entry::new(name, path)])
			},
			Some(Bin::Map(map)) => Ok(map
				.iter()
				.map(|(alias, path)| Entry::new(alias, path))
				.collect_vec()),
		}
	}

	/// Get an entry for each file in the `directories.bin` directory. Any failure yields no entries.
	pub fn directories_bin_entries(&self, lib_out: impl AsRef<Path>) -> Vec<Entry> {
		let Some(bin) = self
			.directories
			.as_ref()
			.and_then(|directories| directories.bin.as_deref())
		else {
			return Vec::new();
		};
		let directory = lib_out.as_ref().join(bin);
		let names = list_directory(&directory);
		#[cfg(feature = "tracing")]
		if let Err(error) = &names {
			::tracing::debug!(?directory, %error, "skipping the bin directory");
		}
		names
			.unwrap_or_default()
			.into_iter()
			.map(|name| Entry::new(name.clone(), name))
			.collect_vec()
	}
}

fn list_directory(path: &Path) -> std::io::Result<Vec<OsString>> {
	std::fs::read_dir(path)?
		.map(|entry| entry.map(|entry| entry.file_name()))
		.collect()
}

impl<'de> serde::Deserialize<'de> for Manifest {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: serde::Deserializer<'de>,
	{
		deserializer.deserialize_map(ManifestVisitor)
	}
}

struct ManifestVisitor;

impl<'de> serde::de::Visitor<'de> for ManifestVisitor {
	type Value = Manifest;

	fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
		formatter.write_str("a package.json object")
	}

	fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
	where
		A: serde::de::MapAccess<'de>,
	{
		let mut manifest = Manifest {
			name: None,
			bin: None,
			directories: None,
		};
		while let Some(key) = map.next_key::<String>()? {
			match key.as_str() {
				"name" => manifest.name = Some(map.next_value()?),
				"bin" => manifest.bin = Some(map.next_value()?),
				"directories" => manifest.directories = directories_lenient(map.next_value()?),
				_ => {
					map.next_value::<serde::de::IgnoredAny>()?;
				},
			}
		}
		Ok(manifest)
	}
}

fn directories_lenient(value: serde_json::Value) -> Option<Directories> {
	if !value.is_object() {
		return None;
	}
	serde_json::from_value(value).ok()
}
