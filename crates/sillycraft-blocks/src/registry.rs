use std::collections::HashMap;
use std::fs;
use std::path::Path;

use super::config::{BlockDef, BlocksConfig};
use super::error::RegistryError;
use super::types::{Block, BlockId, Hardness, LinearColor};

/// Read-only lookup from block ids to definitions, with a distinguished air block.
#[derive(Clone, Debug)]
pub struct BlockRegistry {
    pub blocks: Vec<Block>,
    pub by_name: HashMap<String, BlockId>,
    // id -> position in `blocks`; ids may be sparse.
    slots: Vec<Option<u32>>,
    air: BlockId,
}

impl BlockRegistry {
    pub const AIR_NAME: &'static str = "air";

    /// Registry holding only the air block at id 0.
    pub fn new() -> Self {
        let mut reg = Self {
            blocks: Vec::new(),
            by_name: HashMap::new(),
            slots: Vec::new(),
            air: 0,
        };
        let air = Block::new(
            Self::AIR_NAME,
            0,
            Hardness::Empty,
            LinearColor::TRANSPARENT,
            0,
            0,
            0,
        );
        reg.insert(air);
        reg
    }

    /// Adds a block definition. Ids and names must be unique.
    pub fn register(&mut self, block: Block) -> Result<BlockId, RegistryError> {
        if let Some(existing) = self.get(block.id) {
            return Err(RegistryError::DuplicateId {
                id: block.id,
                first: existing.name.clone(),
                second: block.name,
            });
        }
        if self.by_name.contains_key(&block.name) {
            return Err(RegistryError::DuplicateName(block.name));
        }
        let id = block.id;
        self.insert(block);
        Ok(id)
    }

    fn insert(&mut self, block: Block) {
        let slot = block.id as usize;
        if self.slots.len() <= slot {
            self.slots.resize(slot + 1, None);
        }
        self.slots[slot] = Some(self.blocks.len() as u32);
        self.by_name.insert(block.name.clone(), block.id);
        self.blocks.push(block);
    }

    #[inline]
    pub fn get(&self, id: BlockId) -> Option<&Block> {
        let pos = (*self.slots.get(id as usize)?)?;
        self.blocks.get(pos as usize)
    }

    pub fn id_by_name(&self, name: &str) -> Option<BlockId> {
        self.by_name.get(name).copied()
    }

    pub fn by_name(&self, name: &str) -> Option<&Block> {
        self.id_by_name(name).and_then(|id| self.get(id))
    }

    #[inline]
    pub fn air(&self) -> &Block {
        // Every constructor inserts the air block before returning.
        &self.blocks[self.slots[self.air as usize].unwrap_or(0) as usize]
    }

    #[inline]
    pub fn air_id(&self) -> BlockId {
        self.air
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Lowest-id solid block whose elevation band contains `z`.
    pub fn pick_for_elevation(&self, z: i32) -> Option<&Block> {
        self.blocks
            .iter()
            .filter(|b| !b.is_empty() && b.covers_elevation(z))
            .min_by_key(|b| b.id)
    }

    pub fn from_toml_str(toml_str: &str) -> Result<Self, RegistryError> {
        let cfg: BlocksConfig = toml::from_str(toml_str)?;
        Self::from_config(cfg)
    }

    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, RegistryError> {
        let path = path.as_ref();
        let s = fs::read_to_string(path)?;
        let reg = Self::from_toml_str(&s)?;
        log::info!(
            "loaded {} block definitions from {}",
            reg.len(),
            path.display()
        );
        Ok(reg)
    }

    pub fn from_config(cfg: BlocksConfig) -> Result<Self, RegistryError> {
        let mut reg = BlockRegistry {
            blocks: Vec::with_capacity(cfg.blocks.len()),
            by_name: HashMap::new(),
            slots: Vec::new(),
            air: 0,
        };
        let mut next_id: u32 = 0;
        for def in cfg.blocks.into_iter() {
            let id = match def.id {
                Some(id) => id,
                None => BlockId::try_from(next_id)
                    .map_err(|_| RegistryError::IdOverflow(def.name.clone()))?,
            };
            next_id = next_id.max(id as u32 + 1);
            let block = compile_block(id, def)?;
            reg.register(block)?;
        }
        let air = reg
            .by_name(&cfg.air)
            .ok_or_else(|| RegistryError::MissingAir(cfg.air.clone()))?;
        if !air.is_empty() {
            return Err(RegistryError::AirNotEmpty(cfg.air));
        }
        reg.air = air.id;
        Ok(reg)
    }
}

impl Default for BlockRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn compile_block(id: BlockId, def: BlockDef) -> Result<Block, RegistryError> {
    let color = match def.color.as_ref() {
        Some(c) => c.resolve().map_err(|reason| RegistryError::InvalidColor {
            block: def.name.clone(),
            reason,
        })?,
        None => LinearColor::WHITE,
    };
    let mut block = Block::new(
        def.name,
        id,
        def.hardness.unwrap_or_default(),
        color,
        def.range.unwrap_or(0),
        def.max_elevation.unwrap_or(0),
        def.min_elevation.unwrap_or(0),
    );
    block.life_span = def.life_span.unwrap_or(0);
    Ok(block)
}
