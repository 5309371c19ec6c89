use sillycraft_blocks::BlockId;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MeshError {
    /// The chunk references an id the registry does not define.
    #[error("block id {id} at cell {index} is not in the registry")]
    UnknownBlock { id: BlockId, index: usize },
}
