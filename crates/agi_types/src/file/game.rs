//! Game folder access.
//!
//! Ties directories and volumes together: locate a resource through its
//! directory, cut its payload out of the volume and decode it.
//!
//! Version 2 games ship four directory files (`LOGDIR`, `PICDIR`, `VIEWDIR`,
//! `SNDDIR`) and `VOL.N` volumes. Version 3 games ship a single `<ID>DIR` file
//! and `<ID>VOL.N` volumes, `<ID>` being a short game identifier. File names are
//! matched case-insensitively.

use std::{
	borrow::Cow,
	collections::HashMap,
	io,
	path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use super::{
	AgiFileError, DecodeConfig, Directory, DirectorySet, ResourceType, View, Volume, VolumeVersion,
	dir::constants::MAX_VOLUME,
};

/// Names of the files making up a game folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameLayout {
	/// Logic directory (version 2)
	pub logdir: String,
	/// Picture directory (version 2)
	pub picdir: String,
	/// View directory (version 2)
	pub viewdir: String,
	/// Sound directory (version 2)
	pub snddir: String,
	/// Volume file prefix, volumes are named `<prefix>.N`
	pub volume_prefix: String,
	/// Combined directory file (version 3); detected when unset
	pub combined_dir: Option<String>,
}

impl Default for GameLayout {
	fn default() -> Self {
		Self {
			logdir: "LOGDIR".to_string(),
			picdir: "PICDIR".to_string(),
			viewdir: "VIEWDIR".to_string(),
			snddir: "SNDDIR".to_string(),
			volume_prefix: "VOL".to_string(),
			combined_dir: None,
		}
	}
}

impl GameLayout {
	/// Layout of a version 3 game with identifier `id` (e.g. `KQ4`).
	pub fn v3(id: &str) -> Self {
		Self {
			volume_prefix: format!("{}VOL", id),
			combined_dir: Some(format!("{}DIR", id)),
			..Self::default()
		}
	}

	fn directory_name(&self, resource_type: ResourceType) -> &str {
		match resource_type {
			ResourceType::Logic => &self.logdir,
			ResourceType::Picture => &self.picdir,
			ResourceType::Sound => &self.snddir,
			ResourceType::View => &self.viewdir,
		}
	}
}

/// Lower-cased file name to path, for the files of a folder.
struct FolderIndex(HashMap<String, PathBuf>);

impl FolderIndex {
	fn scan(root: &Path) -> Result<Self, AgiFileError> {
		let mut files = HashMap::new();
		for entry in std::fs::read_dir(root)? {
			let entry = entry?;
			if entry.file_type()?.is_file() {
				let name = entry.file_name().to_string_lossy().to_lowercase();
				files.insert(name, entry.path());
			}
		}
		Ok(Self(files))
	}

	fn get(&self, name: &str) -> Option<&PathBuf> {
		self.0.get(&name.to_lowercase())
	}

	fn require(&self, name: &str) -> Result<&PathBuf, AgiFileError> {
		self.get(name).ok_or_else(|| {
			AgiFileError::IOError(io::Error::new(io::ErrorKind::NotFound, format!("{} not found", name)))
		})
	}

	/// Finds a `<ID>DIR` file, returning its identifier.
	fn find_combined(&self) -> Option<String> {
		let mut ids: Vec<_> = self
			.0
			.keys()
			.filter_map(|name| name.strip_suffix("dir"))
			.filter(|id| !matches!(*id, "" | "log" | "pic" | "view" | "snd"))
			.filter(|id| id.chars().all(|c| c.is_ascii_alphanumeric()))
			.map(str::to_uppercase)
			.collect();
		ids.sort();
		ids.into_iter().next()
	}
}

/// A game folder with its directories and volumes loaded.
#[derive(Debug, Clone)]
pub struct Game {
	root: PathBuf,
	version: VolumeVersion,
	directories: DirectorySet,
	volumes: Vec<Option<Volume>>,
	config: DecodeConfig,
}

impl Game {
	/// Opens the game folder at `root`.
	///
	/// The four version 2 directory files are used when the logic directory is
	/// present; otherwise the folder is read as a version 3 game.
	pub fn open(root: impl AsRef<Path>, layout: &GameLayout) -> Result<Self, AgiFileError> {
		let root = root.as_ref().to_path_buf();
		let files = FolderIndex::scan(&root)?;

		let (version, directories, volume_prefix) = match &layout.combined_dir {
			None if files.get(&layout.logdir).is_some() => {
				let load = |resource_type: ResourceType| {
					let Some(path) = files.get(layout.directory_name(resource_type)) else {
						log::warn!("No {} directory in {}", resource_type, root.display());
						return Ok(Directory::empty());
					};
					Directory::open(path)
				};
				let directories = DirectorySet::new(
					load(ResourceType::Logic)?,
					load(ResourceType::Picture)?,
					load(ResourceType::Sound)?,
					load(ResourceType::View)?,
				);
				(VolumeVersion::V2, directories, layout.volume_prefix.clone())
			}
			combined => {
				let (dir_name, volume_prefix) = match combined {
					Some(name) => (name.clone(), layout.volume_prefix.clone()),
					None => {
						let id = files.find_combined().ok_or_else(|| {
							io::Error::new(
								io::ErrorKind::NotFound,
								format!("no directory files in {}", root.display()),
							)
						})?;
						(format!("{}DIR", id), format!("{}VOL", id))
					}
				};
				let data = std::fs::read(files.require(&dir_name)?)?;
				(VolumeVersion::V3, DirectorySet::from_combined(&data)?, volume_prefix)
			}
		};

		let mut volumes = Vec::with_capacity(MAX_VOLUME as usize + 1);
		for number in 0..=MAX_VOLUME {
			let name = format!("{}.{}", volume_prefix, number);
			let volume = match files.get(&name) {
				Some(path) => Some(Volume::open(number, path)?),
				None => None,
			};
			volumes.push(volume);
		}

		log::info!(
			"Opened {:?} game at {}: {} views, {} volumes",
			version,
			root.display(),
			directories.get(ResourceType::View).count(),
			volumes.iter().flatten().count()
		);

		Ok(Self {
			root,
			version,
			directories,
			volumes,
			config: DecodeConfig::default(),
		})
	}

	/// Returns a copy decoding views with `config`.
	pub fn with_config(mut self, config: DecodeConfig) -> Self {
		self.config = config;
		self
	}

	/// Folder the game was opened from.
	pub fn root(&self) -> &Path {
		&self.root
	}

	/// Detected interpreter version.
	pub fn version(&self) -> VolumeVersion {
		self.version
	}

	/// The game's directories.
	pub fn directories(&self) -> &DirectorySet {
		&self.directories
	}

	/// Returns volume `number`, if the folder has it.
	pub fn volume(&self, number: u8) -> Option<&Volume> {
		self.volumes.get(number as usize).and_then(Option::as_ref)
	}

	/// Returns the payload of a resource, expanded if it is stored compressed.
	pub fn raw(&self, resource_type: ResourceType, number: u8) -> Result<Cow<'_, [u8]>, AgiFileError> {
		let location = self.directories.locate(resource_type, number).ok_or(
			AgiFileError::ResourceNotFound {
				resource_type,
				number,
			},
		)?;

		let volume = self.volume(location.volume).ok_or_else(|| {
			io::Error::new(io::ErrorKind::NotFound, format!("volume {} is missing", location.volume))
		})?;

		volume.entry(location.offset as usize, self.version, resource_type)
	}

	/// Locates and decodes view `number`.
	pub fn view(&self, number: u8) -> Result<View, AgiFileError> {
		let data = self.raw(ResourceType::View, number)?;
		View::decode(&data, &self.config)
	}
}
