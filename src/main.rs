mod config;
mod terrain;

use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use clap::Parser;
use hashbrown::HashMap;
use log::LevelFilter;
use sillycraft_blocks::{BlockId, BlockRegistry};
use sillycraft_chunk::{ChunkBuf, ChunkCoord};
use sillycraft_mesh_cpu::{CHUNK_SECTION, MeshSections};
use sillycraft_runtime::MeshRuntime;

use crate::config::AppConfig;
use crate::terrain::Terrain;

const BUILTIN_BLOCKS: &str = include_str!("../assets/blocks.toml");

#[derive(Parser, Debug)]
#[command(name = "sillycraft", about = "Generate demo terrain and greedy-mesh its chunks")]
struct Cli {
    /// Settings file; missing files fall back to defaults.
    #[arg(long, default_value = "sillycraft.toml")]
    config: PathBuf,
    /// Block definitions (overrides the settings file).
    #[arg(long)]
    blocks: Option<PathBuf>,
    #[arg(long)]
    seed: Option<i32>,
    /// World size in chunks as X,Y,Z.
    #[arg(long, value_parser = parse_extent)]
    extent: Option<(usize, usize, usize)>,
    /// World units per block.
    #[arg(long)]
    scale: Option<f32>,
    /// Mesh worker threads; 0 uses every core.
    #[arg(long)]
    workers: Option<usize>,
    #[arg(long)]
    frequency: Option<f32>,
    /// Raise log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn parse_extent(s: &str) -> Result<(usize, usize, usize), String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    let [x, y, z] = parts.as_slice() else {
        return Err(format!("expected X,Y,Z, got `{s}`"));
    };
    let p = |v: &str| v.parse::<usize>().map_err(|e| format!("`{v}`: {e}"));
    Ok((p(*x)?, p(*y)?, p(*z)?))
}

impl Cli {
    fn apply(&self, cfg: &mut AppConfig) {
        if let Some(p) = &self.blocks {
            cfg.blocks = p.clone();
        }
        if let Some(seed) = self.seed {
            cfg.seed = seed;
        }
        if let Some((x, y, z)) = self.extent {
            cfg.world.chunks_x = x;
            cfg.world.chunks_y = y;
            cfg.world.chunks_z = z;
        }
        if let Some(scale) = self.scale {
            cfg.scale = scale;
        }
        if let Some(w) = self.workers {
            cfg.workers = w;
        }
        if let Some(f) = self.frequency {
            cfg.terrain.frequency = f;
        }
    }

    fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

fn load_registry(cfg: &AppConfig) -> Result<BlockRegistry, Box<dyn Error>> {
    if cfg.blocks.exists() {
        return Ok(BlockRegistry::load_from_path(&cfg.blocks)?);
    }
    log::warn!(
        "{} not found; using built-in block definitions",
        cfg.blocks.display()
    );
    Ok(BlockRegistry::from_toml_str(BUILTIN_BLOCKS)?)
}

/// Chunks with at least one non-air cell; the rest have no geometry to mesh.
fn solid_chunks(chunks: Vec<ChunkBuf>, air: BlockId) -> Vec<ChunkBuf> {
    chunks.into_iter().filter(|c| c.has_non_air(air)).collect()
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    env_logger::Builder::new()
        .filter_level(cli.log_level())
        .parse_env("RUST_LOG")
        .init();

    let mut cfg = AppConfig::load_or_default(&cli.config)?;
    cli.apply(&mut cfg);
    let reg = Arc::new(load_registry(&cfg)?);

    let t0 = Instant::now();
    let terrain = Terrain::new(&cfg.terrain, cfg.world, cfg.seed, &reg)?;
    let chunks = terrain.generate_world(cfg.world);
    log::info!(
        "generated {} chunks ({}x{}x{}) in {}ms",
        chunks.len(),
        cfg.world.chunks_x,
        cfg.world.chunks_y,
        cfg.world.chunks_z,
        t0.elapsed().as_millis()
    );

    let runtime = MeshRuntime::new(reg.clone(), cfg.workers)?.with_scale(cfg.scale);
    let solid = solid_chunks(chunks, reg.air_id());
    let mut scene: HashMap<ChunkCoord, MeshSections> = solid
        .iter()
        .map(|c| (c.coord, MeshSections::new()))
        .collect();
    let stats = runtime.mesh_batch_into(&solid, &mut scene);

    for (coord, sections) in &scene {
        if let Some(mesh) = sections.get(CHUNK_SECTION) {
            log::debug!(
                "chunk ({}, {}, {}): {} quads",
                coord.cx,
                coord.cy,
                coord.cz,
                mesh.quad_count()
            );
        }
    }
    log::info!(
        "{} chunks with geometry, {} quads, {} vertices, {} indices, {} failed",
        scene.len(),
        stats.quads,
        stats.vertices,
        stats.indices,
        stats.failed
    );
    if stats.failed > 0 {
        return Err(format!("{} chunks failed to mesh", stats.failed).into());
    }
    Ok(())
}
