//! Headless planet builder.
//!
//! Builds the sphere + noise lattice, meshes every chunk, applies edits and
//! writes the result as a Wavefront OBJ and optional per-chunk JSON caches.
//!
//! Log verbosity follows `RUST_LOG` (default `info`); per-chunk extraction
//! details are logged at `debug`.

mod config;
mod obj;

use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use config::{EditSpec, RunConfig};
use terraform_core::{
	ChunkCache, ChunkDensity, ChunkId, LatticeCoord, MeshSink, RenderMesh, ResolutionPreset, SeamPolicy,
	Terrain,
};

/// Headless marching-cubes planet builder.
#[derive(Parser, Debug)]
#[command(name = "terraform")]
#[command(about = "Builds, edits and exports a chunked marching-cubes planet")]
struct Args {
	/// Path to configuration TOML file.
	#[arg(short, long)]
	config: Option<PathBuf>,

	/// Lattice samples per axis (overrides config).
	#[arg(short, long, conflicts_with = "preset")]
	resolution: Option<u32>,

	/// Lattice size preset: 16, 32, 64, 128, 256 or 512 (overrides config).
	#[arg(long, value_parser = parse_preset)]
	preset: Option<ResolutionPreset>,

	/// Surface threshold (overrides config).
	#[arg(short, long, allow_negative_numbers = true)]
	iso_level: Option<f32>,

	/// Chunks per X/Z axis (overrides config).
	#[arg(long, conflicts_with = "density")]
	chunks: Option<u32>,

	/// Total chunks per X/Z face: 4, 8, 16 or 32 (overrides config).
	#[arg(long, value_parser = parse_density)]
	density: Option<ChunkDensity>,

	/// Disable Perlin perturbation.
	#[arg(long)]
	no_noise: bool,

	/// Place crossings at edge midpoints instead of interpolating.
	#[arg(long)]
	midpoint: bool,

	/// Also remesh neighbouring chunks that read edited samples.
	#[arg(long)]
	seams: bool,

	/// Edit to apply, as `x,y,z=value`. Repeatable; runs after config edits.
	#[arg(short, long = "edit", allow_hyphen_values = true)]
	edits: Vec<EditSpec>,

	/// Output OBJ path (overrides config).
	#[arg(short, long)]
	obj: Option<PathBuf>,

	/// Directory for per-chunk JSON caches (overrides config).
	#[arg(long)]
	cache_dir: Option<PathBuf>,

	/// Restore chunk samples from the cache directory before editing.
	#[arg(long, requires = "cache_dir")]
	restore: bool,
}

fn parse_density(s: &str) -> Result<ChunkDensity, String> {
	match s {
		"4" => Ok(ChunkDensity::Four),
		"8" => Ok(ChunkDensity::Eight),
		"16" => Ok(ChunkDensity::Sixteen),
		"32" => Ok(ChunkDensity::ThirtyTwo),
		other => Err(format!("density must be 4, 8, 16 or 32, got {}", other)),
	}
}

fn parse_preset(s: &str) -> Result<ResolutionPreset, String> {
	s.parse::<u32>()
		.ok()
		.and_then(ResolutionPreset::from_value)
		.ok_or_else(|| format!("preset must be 16, 32, 64, 128, 256 or 512, got {}", s))
}

/// Logs each chunk handed over after an edit.
struct LogSink;

impl MeshSink for LogSink {
	fn on_chunk_meshed(&self, chunk: ChunkId, mesh: &RenderMesh) {
		info!(
			chunk = chunk.0,
			triangles = mesh.triangle_count(),
			"Chunk remeshed"
		);
	}

	fn on_edit_rejected(&self, coord: LatticeCoord) {
		warn!(%coord, "Edit rejected");
	}
}

fn main() -> Result<()> {
	tracing_subscriber::fmt()
		.with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
		.init();

	let args = Args::parse();

	let mut run = match &args.config {
		Some(path) => {
			info!("Loading config from: {}", path.display());
			RunConfig::load(path)?
		}
		None => RunConfig::default(),
	};
	apply_overrides(&mut run, &args);
	run
		.terrain
		.validate()
		.context("Invalid terrain configuration")?;

	let terrain_config = run.terrain.clone();
	info!(
		resolution = terrain_config.resolution,
		iso_level = terrain_config.iso_level,
		chunks_per_axis = terrain_config.chunk_count_per_axis,
		"Building planet"
	);

	let mut terrain = Terrain::from_config(terrain_config).context("Failed to build terrain")?;
	print_chunk_summary(&terrain);

	if args.restore {
		if let Some(dir) = &run.output.cache_dir {
			restore_caches(&mut terrain, dir);
		}
	}

	let edits: Vec<EditSpec> = run.edits.iter().chain(args.edits.iter()).copied().collect();
	let mut applied = 0;
	for spec in &edits {
		// Rejections are reported through the sink and do not stop the run
		if terrain.apply_edit_to_sink(spec.to_edit(), &LogSink).is_ok() {
			applied += 1;
		}
	}
	if !edits.is_empty() {
		println!("Applied {}/{} edits", applied, edits.len());
	}

	if let Some(path) = &run.output.obj {
		obj::export_obj(&terrain, path)?;
		println!("  ✓ {}", path.display());
	}

	if let Some(dir) = &run.output.cache_dir {
		write_caches(&terrain, dir)?;
		println!("  ✓ {} chunk caches in {}", terrain.layout().len(), dir.display());
	}

	let metrics = terrain.metrics();
	println!(
		"\nDone! {} triangles, avg extract {:.1}us, {} degenerate edges",
		terrain.total_triangles(),
		metrics.avg_extract_timing_us(),
		metrics.degenerate_edges
	);

	Ok(())
}

fn apply_overrides(run: &mut RunConfig, args: &Args) {
	let t = &mut run.terrain;
	if let Some(resolution) = args.resolution {
		t.resolution = resolution;
	}
	if let Some(preset) = args.preset {
		t.resolution = preset.value();
	}
	if let Some(iso_level) = args.iso_level {
		t.iso_level = iso_level;
	}
	if let Some(chunks) = args.chunks {
		t.chunk_count_per_axis = chunks;
	}
	if let Some(density) = args.density {
		t.chunk_count_per_axis = density.per_axis();
	}
	if args.no_noise {
		t.height_scale = 0.0;
	}
	if args.midpoint {
		t.use_interpolation = false;
	}
	if args.seams {
		t.seam_policy = SeamPolicy::IncludeNeighbors;
	}
	if let Some(obj) = &args.obj {
		run.output.obj = Some(obj.clone());
	}
	if let Some(dir) = &args.cache_dir {
		run.output.cache_dir = Some(dir.clone());
	}
}

fn print_chunk_summary(terrain: &Terrain) {
	println!("Chunk   Bounds (x / y / z)            Cubes  Active  Triangles");
	for (id, mesh) in terrain.chunk_meshes() {
		let Some(b) = terrain.layout().bounds(id) else {
			continue;
		};
		println!(
			"{:>5}   [{:>3},{:>3}) [{:>3},{:>3}) [{:>3},{:>3})  {:>6}  {:>6}  {:>9}",
			id.0,
			b.x.begin,
			b.x.end,
			b.y.begin,
			b.y.end,
			b.z.begin,
			b.z.end,
			mesh.stats.cubes_visited,
			mesh.stats.active_cubes,
			mesh.triangles.len()
		);
	}
}

/// Restore every valid cache; invalid or missing ones keep generated samples.
fn restore_caches(terrain: &mut Terrain, dir: &Path) {
	let ids: Vec<ChunkId> = terrain.layout().ids().collect();
	let mut restored = 0;
	for id in ids {
		let path = ChunkCache::path_in(dir, id);
		let result = ChunkCache::load(&path)
			.map_err(terraform_core::TerrainError::from)
			.and_then(|cache| terrain.restore_chunk(id, &cache));
		match result {
			Ok(_) => restored += 1,
			Err(err) => warn!(chunk = id.0, %err, "Cache unusable, keeping generated samples"),
		}
	}
	info!(restored, "Chunk caches restored");
}

fn write_caches(terrain: &Terrain, dir: &Path) -> Result<()> {
	std::fs::create_dir_all(dir)
		.with_context(|| format!("Failed to create cache dir: {}", dir.display()))?;

	for id in terrain.layout().ids() {
		let Some(cache) = terrain.capture_chunk(id) else {
			continue;
		};
		let path = ChunkCache::path_in(dir, id);
		cache
			.save(&path)
			.with_context(|| format!("Failed to write cache: {}", path.display()))?;
	}
	Ok(())
}
