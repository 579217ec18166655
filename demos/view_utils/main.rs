//! AGI View CLI Utility
//!
//! A command-line tool for inspecting resource directories and exporting view sprites.
//!
//! # Features
//!
//! - **dir**: List the entries of a resource directory
//! - **info**: Display the loops and cels of an extracted view resource
//! - **export**: Export every cel of a view to PNG images with JSON metadata
//! - **game**: Locate a view inside a game folder and export it
//!
//! # Configuration
//!
//! Decoding can be tuned with a TOML file passed through `--config`:
//!
//! ```toml
//! pixel_format = "rgba8888"
//! allow_empty_cels = false
//! ```
//!
//! Values can also be overridden with `AGI_` prefixed environment variables,
//! e.g. `AGI_ALLOW_EMPTY_CELS=false`.
//!
//! # Usage
//!
//! ```bash
//! # List a view directory
//! cargo run --example view_utils -- dir kq1/VIEWDIR
//!
//! # Show view information
//! cargo run --example view_utils -- info VIEW.011
//!
//! # Export a view to PNG files
//! cargo run --example view_utils -- export VIEW.011 -o view_011/
//!
//! # Export view 11 straight from a game folder
//! cargo run --example view_utils -- game kq1/ 11 -o view_011/
//! ```

use std::{
	fs,
	path::{Path, PathBuf},
};

use agi_rs::prelude::*;
use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use image::RgbaImage;
use log::{info, warn};
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "view_utils")]
#[command(author = "agi-rs project")]
#[command(version = "1.0")]
#[command(about = "AGI view utility - inspect directories, decode and export views", long_about = None)]
struct Cli {
	/// TOML file holding decode options
	#[arg(short, long, global = true, value_name = "CONFIG", env = "AGI_CONFIG")]
	config: Option<PathBuf>,

	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	/// List the entries of a resource directory
	Dir {
		/// Directory file (LOGDIR, PICDIR, SNDDIR, VIEWDIR)
		#[arg(value_name = "DIR_FILE")]
		input: PathBuf,

		/// Print the raw record bytes
		#[arg(short, long)]
		raw: bool,
	},

	/// Display information about an extracted view resource
	Info {
		/// View resource file
		#[arg(value_name = "VIEW_FILE")]
		input: PathBuf,
	},

	/// Export every cel of a view to PNG images
	Export {
		/// View resource file
		#[arg(value_name = "VIEW_FILE")]
		input: PathBuf,

		/// Output directory (defaults to `<input>_cels/`)
		#[arg(short, long, value_name = "OUTPUT_DIR")]
		output: Option<PathBuf>,
	},

	/// Export a view from a game folder
	Game {
		/// Game folder
		#[arg(value_name = "GAME_DIR")]
		folder: PathBuf,

		/// View number
		#[arg(value_name = "VIEW_NUMBER")]
		number: u8,

		/// Output directory (defaults to `view_<NUMBER>/`)
		#[arg(short, long, value_name = "OUTPUT_DIR")]
		output: Option<PathBuf>,

		/// Identifier of a version 3 game (e.g. KQ4), detected when omitted
		#[arg(long, value_name = "ID")]
		v3: Option<String>,
	},
}

/// Cel metadata for JSON serialization
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CelMetadata {
	/// Loop index
	loop_index: usize,
	/// Cel index within the loop
	cel_index: usize,
	/// Cel width in pixels
	width: usize,
	/// Cel height in pixels
	height: usize,
	/// Transparent palette index
	transparent: u8,
	/// Whether the cel was mirrored
	mirrored: bool,
	/// PNG filename
	filename: Option<String>,
}

/// Complete view metadata structure
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ViewMetadata {
	/// View description, if any
	description: Option<String>,
	/// Number of loops
	loop_count: usize,
	/// Per-cel metadata
	cels: Vec<CelMetadata>,
}

/// Load decode options from the config file and environment
fn load_config(path: Option<&Path>) -> Result<DecodeConfig> {
	let mut builder = config::Config::builder();
	if let Some(path) = path {
		builder = builder.add_source(config::File::from(path));
	}
	let settings = builder
		.add_source(config::Environment::with_prefix("AGI").try_parsing(true))
		.build()
		.context("Failed to read configuration")?;

	let config: DecodeConfig = settings.try_deserialize().context("Invalid configuration")?;
	let empty_cels = if config.allow_empty_cels {
		"allowed"
	} else {
		"rejected"
	};
	info!("Decoding with {} pixels, empty cels {}", config.pixel_format, empty_cels);
	Ok(config)
}

/// Handle dir command
fn handle_dir(input: &Path, raw: bool) -> Result<()> {
	let directory =
		Directory::open(input).with_context(|| format!("Cannot open directory {}", input.display()))?;

	println!("Directory: {}", input.display());
	println!("  Entries:  {}", directory.count());
	println!("  Checksum: {}", directory.checksum());
	for (number, location) in directory.iter() {
		if raw {
			println!("  {:3}: {} [{}]", number, location, hex::encode(location.to_record()));
		} else {
			println!("  {:3}: {}", number, location);
		}
	}

	Ok(())
}

/// Handle info command
fn handle_info(input: &Path, config: &DecodeConfig) -> Result<()> {
	let data = fs::read(input).with_context(|| format!("Cannot read {}", input.display()))?;
	let view = View::decode(&data, config).with_context(|| format!("Cannot decode {}", input.display()))?;

	println!("View: {}", input.display());
	print!("{}", view);
	Ok(())
}

/// Write every cel of `view` to `output` as PNG plus a metadata file
fn export_view(view: &View, output: &Path) -> Result<()> {
	fs::create_dir_all(output)
		.with_context(|| format!("Cannot create output directory {}", output.display()))?;

	let mut metadata = ViewMetadata {
		description: view.description().map(str::to_string),
		loop_count: view.loop_count(),
		cels: Vec::new(),
	};

	for (loop_index, lp) in view.iter().enumerate() {
		for (cel_index, cel) in lp.iter().enumerate() {
			let filename = if cel.is_empty() {
				warn!("Skipping empty cel {}/{}", loop_index, cel_index);
				None
			} else {
				let filename = format!("loop_{:02}_cel_{:02}.png", loop_index, cel_index);
				let image = RgbaImage::from_raw(cel.width() as u32, cel.height() as u32, cel.to_rgba())
					.context("Failed to create cel image")?;
				image.save(output.join(&filename))?;
				Some(filename)
			};

			metadata.cels.push(CelMetadata {
				loop_index,
				cel_index,
				width: cel.width(),
				height: cel.height(),
				transparent: cel.transparent_index(),
				mirrored: cel.is_mirrored(),
				filename,
			});
		}
	}

	let json = serde_json::to_string_pretty(&metadata)?;
	fs::write(output.join("view.json"), json)?;

	info!("Exported {} cels to {}", metadata.cels.len(), output.display());
	Ok(())
}

/// Handle export command
fn handle_export(input: &Path, output: Option<PathBuf>, config: &DecodeConfig) -> Result<()> {
	let output = output.unwrap_or_else(|| {
		let name = input.file_name().map_or_else(|| "view".into(), |n| n.to_string_lossy());
		input.with_file_name(format!("{}_cels", name))
	});

	let data = fs::read(input).with_context(|| format!("Cannot read {}", input.display()))?;
	let view = View::decode(&data, config).with_context(|| format!("Cannot decode {}", input.display()))?;
	export_view(&view, &output)
}

/// Handle game command
fn handle_game(
	folder: &Path,
	number: u8,
	output: Option<PathBuf>,
	v3: Option<String>,
	config: DecodeConfig,
) -> Result<()> {
	if !folder.is_dir() {
		bail!("{} is not a directory", folder.display());
	}

	let layout = v3.as_deref().map_or_else(GameLayout::default, GameLayout::v3);
	let game = Game::open(folder, &layout)
		.with_context(|| format!("Cannot open game in {}", folder.display()))?
		.with_config(config);

	let view = game.view(number).with_context(|| format!("Cannot load view {}", number))?;
	let output = output.unwrap_or_else(|| PathBuf::from(format!("view_{:03}", number)));
	export_view(&view, &output)
}

fn main() -> Result<()> {
	env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

	let cli = Cli::parse();
	let config = load_config(cli.config.as_deref())?;

	match cli.command {
		Commands::Dir {
			input,
			raw,
		} => handle_dir(&input, raw),
		Commands::Info {
			input,
		} => handle_info(&input, &config),
		Commands::Export {
			input,
			output,
		} => handle_export(&input, output, &config),
		Commands::Game {
			folder,
			number,
			output,
			v3,
		} => handle_game(&folder, number, output, v3, config),
	}
}
