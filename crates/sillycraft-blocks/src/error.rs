use thiserror::Error;

use crate::types::BlockId;

/// Errors raised while building a [`BlockRegistry`](crate::BlockRegistry).
#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("failed to read block config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse block config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("duplicate block id {id} ({first} and {second})")]
    DuplicateId {
        id: BlockId,
        first: String,
        second: String,
    },

    #[error("duplicate block name `{0}`")]
    DuplicateName(String),

    #[error("air block `{0}` is not defined")]
    MissingAir(String),

    #[error("air block `{0}` must have empty hardness")]
    AirNotEmpty(String),

    #[error("block `{block}` has an invalid color: {reason}")]
    InvalidColor { block: String, reason: String },

    #[error("block ids exhausted while assigning an id to `{0}`")]
    IdOverflow(String),
}
