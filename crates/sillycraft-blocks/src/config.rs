use serde::Deserialize;

use crate::types::{BlockId, Hardness, LinearColor};

fn default_air() -> String {
    "air".to_string()
}

// Top-level blocks config file
#[derive(Deserialize, Debug, Clone)]
pub struct BlocksConfig {
    // Name of the block treated as air at chunk borders.
    #[serde(default = "default_air")]
    pub air: String,
    #[serde(default)]
    pub blocks: Vec<BlockDef>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct BlockDef {
    pub name: String,
    #[serde(default)]
    pub id: Option<BlockId>,
    #[serde(default)]
    pub hardness: Option<Hardness>,
    #[serde(default)]
    pub color: Option<ColorDef>,
    #[serde(default)]
    pub range: Option<i32>,
    #[serde(default)]
    pub min_elevation: Option<i32>,
    #[serde(default)]
    pub max_elevation: Option<i32>,
    #[serde(default)]
    pub life_span: Option<i32>,
}

// Color accepts `[r, g, b]`, `[r, g, b, a]` or a hex string.
#[derive(Deserialize, Debug, Clone)]
#[serde(untagged)]
pub enum ColorDef {
    Rgba([f32; 4]),
    Rgb([f32; 3]),
    Hex(String),
}

impl ColorDef {
    pub fn resolve(&self) -> Result<LinearColor, String> {
        let c = match self {
            ColorDef::Rgba([r, g, b, a]) => LinearColor::new(*r, *g, *b, *a),
            ColorDef::Rgb([r, g, b]) => LinearColor::rgb(*r, *g, *b),
            ColorDef::Hex(s) => {
                return LinearColor::from_hex(s).ok_or_else(|| format!("bad hex color `{s}`"));
            }
        };
        let in_range = c.to_array().iter().all(|v| (0.0..=1.0).contains(v));
        if in_range {
            Ok(c)
        } else {
            Err(format!("components must lie in [0, 1], got {:?}", c.to_array()))
        }
    }
}
