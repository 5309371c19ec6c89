use serde::{Deserialize, Serialize};

pub type BlockId = u16;

/// How solid a block is. `Empty` blocks are fully transparent and never meshed.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Hardness {
    Empty,
    Soft,
    Medium,
    #[default]
    Hard,
}

impl Hardness {
    #[inline]
    pub fn is_empty(self) -> bool {
        matches!(self, Hardness::Empty)
    }
}

/// Linear RGBA color with components in `[0, 1]`.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LinearColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl LinearColor {
    pub const WHITE: LinearColor = LinearColor::new(1.0, 1.0, 1.0, 1.0);
    pub const TRANSPARENT: LinearColor = LinearColor::new(0.0, 0.0, 0.0, 0.0);

    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    #[inline]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    #[inline]
    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Parses `#rrggbb` or `#rrggbbaa` (leading `#` optional).
    pub fn from_hex(s: &str) -> Option<Self> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        if !(hex.len() == 6 || hex.len() == 8) || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| -> Option<f32> {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .ok()
                .map(|v| v as f32 / 255.0)
        };
        let a = if hex.len() == 8 { channel(6)? } else { 1.0 };
        Some(Self::new(channel(0)?, channel(2)?, channel(4)?, a))
    }
}

impl Default for LinearColor {
    fn default() -> Self {
        LinearColor::WHITE
    }
}

/// Immutable block definition owned by the registry.
#[derive(Clone, Debug, PartialEq)]
pub struct Block {
    pub id: BlockId,
    pub name: String,
    pub hardness: Hardness,
    pub color: LinearColor,
    // Terrain placement metadata; the mesher never reads these.
    pub range: i32,
    pub min_elevation: i32,
    pub max_elevation: i32,
    pub life_span: i32,
}

impl Block {
    pub fn new(
        name: impl Into<String>,
        id: BlockId,
        hardness: Hardness,
        color: LinearColor,
        range: i32,
        max_elevation: i32,
        min_elevation: i32,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            hardness,
            color,
            range,
            min_elevation,
            max_elevation,
            life_span: 0,
        }
    }

    /// A block with only identity and hardness: white, no elevation band.
    pub fn plain(name: impl Into<String>, id: BlockId, hardness: Hardness) -> Self {
        Self::new(name, id, hardness, LinearColor::WHITE, 0, 0, 0)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.hardness.is_empty()
    }

    #[inline]
    pub fn covers_elevation(&self, z: i32) -> bool {
        self.min_elevation <= z && z <= self.max_elevation
    }
}
