use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_blocks_path")] pub blocks: PathBuf,
    #[serde(default = "default_seed")] pub seed: i32,
    #[serde(default = "default_scale")] pub scale: f32,
    // 0 = available parallelism
    #[serde(default)] pub workers: usize,
    #[serde(default)] pub world: WorldExtent,
    #[serde(default)] pub terrain: TerrainConfig,
}

fn default_blocks_path() -> PathBuf { PathBuf::from("assets/blocks.toml") }
fn default_seed() -> i32 { 1337 }
fn default_scale() -> f32 { sillycraft_chunk::CHUNK_SCALE }

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            blocks: default_blocks_path(),
            seed: default_seed(),
            scale: default_scale(),
            workers: 0,
            world: WorldExtent::default(),
            terrain: TerrainConfig::default(),
        }
    }
}

/// Size of the demo world in chunks.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
pub struct WorldExtent {
    #[serde(default = "default_chunks")] pub chunks_x: usize,
    #[serde(default = "default_chunks")] pub chunks_y: usize,
    #[serde(default = "default_chunks")] pub chunks_z: usize,
}
fn default_chunks() -> usize { 4 }
impl Default for WorldExtent { fn default() -> Self { Self { chunks_x: 4, chunks_y: 4, chunks_z: 4 } } }

impl WorldExtent {
    pub fn chunk_count(&self) -> usize {
        self.chunks_x * self.chunks_y * self.chunks_z
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct TerrainConfig {
    #[serde(default = "default_frequency")] pub frequency: f32,
    #[serde(default = "default_min_ratio")] pub min_ratio: f32,
    #[serde(default = "default_max_ratio")] pub max_ratio: f32,
    /// Block used where no elevation band matches.
    #[serde(default = "default_fill")] pub fill: String,
}
fn default_frequency() -> f32 { 0.02 }
fn default_min_ratio() -> f32 { 0.15 }
fn default_max_ratio() -> f32 { 0.85 }
fn default_fill() -> String { "stone".to_string() }
impl Default for TerrainConfig { fn default() -> Self { Self { frequency: default_frequency(), min_ratio: default_min_ratio(), max_ratio: default_max_ratio(), fill: default_fill() } } }

impl AppConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Reads `path`, falling back to defaults when the file does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, Box<dyn Error>> {
        if !path.exists() {
            log::info!("{} not found; using default settings", path.display());
            return Ok(Self::default());
        }
        let s = fs::read_to_string(path)?;
        let cfg = Self::from_toml_str(&s)
            .map_err(|e| format!("{} parse error: {e}", path.display()))?;
        log::info!("loaded settings from {}", path.display());
        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let cfg = AppConfig::from_toml_str("").unwrap();
        assert_eq!(cfg.seed, 1337);
        assert_eq!(cfg.scale, 100.0);
        assert_eq!(cfg.workers, 0);
        assert_eq!(cfg.world, WorldExtent::default());
        assert_eq!(cfg.terrain.fill, "stone");
        assert_eq!(cfg.blocks, PathBuf::from("assets/blocks.toml"));
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let cfg = AppConfig::from_toml_str(
            r#"
            seed = 7
            [world]
            chunks_z = 2
            [terrain]
            frequency = 0.05
            "#,
        )
        .unwrap();
        assert_eq!(cfg.seed, 7);
        assert_eq!(cfg.world.chunks_x, 4);
        assert_eq!(cfg.world.chunks_z, 2);
        assert_eq!(cfg.world.chunk_count(), 32);
        assert_eq!(cfg.terrain.frequency, 0.05);
        assert_eq!(cfg.terrain.max_ratio, 0.85);
    }

    #[test]
    fn shipped_settings_parse() {
        let s = include_str!("../sillycraft.toml");
        let cfg = AppConfig::from_toml_str(s).unwrap();
        assert_eq!(cfg.world.chunk_count(), 64);
    }

    #[test]
    fn missing_file_is_default() {
        let cfg = AppConfig::load_or_default(Path::new("definitely/not/here.toml")).unwrap();
        assert_eq!(cfg.seed, default_seed());
    }
}
