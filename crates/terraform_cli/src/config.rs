//! Run configuration for the headless planet builder.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use terraform_core::{Edit, LatticeCoord, TerrainConfig};

/// Root configuration file.
///
/// ```toml
/// [terrain]
/// resolution = 64
/// iso_level = 24.0
///
/// [output]
/// obj = "planet.obj"
/// cache_dir = "cache"
///
/// [[edits]]
/// x = 32
/// y = 56
/// z = 32
/// value = 0.0
/// ```
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RunConfig {
	/// Lattice, chunking and noise parameters.
	pub terrain: TerrainConfig,
	/// Output locations.
	pub output: OutputConfig,
	/// Edits applied after the initial build, in order.
	pub edits: Vec<EditSpec>,
}

/// Output file locations, relative to the working directory.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
	/// Wavefront OBJ of all chunk meshes.
	pub obj: Option<PathBuf>,
	/// Directory for per-chunk JSON sample caches.
	pub cache_dir: Option<PathBuf>,
}

/// One edit: set lattice sample `(x, y, z)` to `value`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct EditSpec {
	pub x: u32,
	pub y: u32,
	pub z: u32,
	pub value: f32,
}

impl EditSpec {
	pub fn to_edit(self) -> Edit {
		Edit::new(LatticeCoord::new(self.x, self.y, self.z), self.value)
	}
}

/// Parses `x,y,z=value`.
impl FromStr for EditSpec {
	type Err = anyhow::Error;

	fn from_str(s: &str) -> Result<Self> {
		let (coord, value) = s
			.split_once('=')
			.with_context(|| format!("Edit '{}' must look like x,y,z=value", s))?;

		let parts: Vec<&str> = coord.split(',').map(str::trim).collect();
		if parts.len() != 3 {
			anyhow::bail!("Edit '{}' needs three coordinates, found {}", s, parts.len());
		}
		let axis = |i: usize| -> Result<u32> {
			parts[i]
				.parse()
				.with_context(|| format!("Invalid coordinate '{}' in edit '{}'", parts[i], s))
		};

		Ok(Self {
			x: axis(0)?,
			y: axis(1)?,
			z: axis(2)?,
			value: value
				.trim()
				.parse()
				.with_context(|| format!("Invalid value in edit '{}'", s))?,
		})
	}
}

impl RunConfig {
	/// Load configuration from a TOML file.
	pub fn load(path: &Path) -> Result<Self> {
		let content = std::fs::read_to_string(path)
			.with_context(|| format!("Failed to read config file: {}", path.display()))?;
		let config: RunConfig =
			toml::from_str(&content).with_context(|| "Failed to parse config TOML")?;

		config
			.terrain
			.validate()
			.with_context(|| format!("Invalid terrain section in {}", path.display()))?;

		Ok(config)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_parse_edit() {
		let edit: EditSpec = "3, 4,5=-1.5".parse().unwrap();
		assert_eq!(
			edit,
			EditSpec {
				x: 3,
				y: 4,
				z: 5,
				value: -1.5
			}
		);
	}

	#[test]
	fn test_parse_edit_errors() {
		assert!("3,4,5".parse::<EditSpec>().is_err());
		assert!("3,4=1".parse::<EditSpec>().is_err());
		assert!("3,-4,5=1".parse::<EditSpec>().is_err());
		assert!("3,4,5=abc".parse::<EditSpec>().is_err());
	}

	#[test]
	fn test_run_config_sections() {
		let config: RunConfig = toml::from_str(
			r#"
			[terrain]
			resolution = 32
			seam_policy = "include_neighbors"

			[output]
			obj = "out.obj"

			[[edits]]
			x = 1
			y = 2
			z = 3
			value = 0.5
			"#,
		)
		.unwrap();

		assert_eq!(config.terrain.resolution, 32);
		assert_eq!(config.output.obj, Some(PathBuf::from("out.obj")));
		assert!(config.output.cache_dir.is_none());
		assert_eq!(config.edits.len(), 1);
		assert_eq!(config.edits[0].to_edit().coord, LatticeCoord::new(1, 2, 3));
	}
}
