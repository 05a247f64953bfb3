use serde::{Deserialize, Serialize};

/// Catalog identifier of a block type. Id 0 is the empty sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockId(pub u8);

impl BlockId {
    pub const EMPTY: BlockId = BlockId(0);

    pub fn is_empty(self) -> bool {
        self == Self::EMPTY
    }
}

impl From<u8> for BlockId {
    fn from(id: u8) -> Self {
        Self(id)
    }
}

/// One voxel cell: the block type plus, when the block is currently rendered,
/// the index of its entry in the owning chunk's instance list for that type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Block {
    pub id: BlockId,
    pub instance: Option<u32>,
}

impl Block {
    pub const EMPTY: Block = Block {
        id: BlockId::EMPTY,
        instance: None,
    };

    pub fn new(id: BlockId) -> Self {
        Self { id, instance: None }
    }

    pub fn is_empty(&self) -> bool {
        self.id.is_empty()
    }
}

impl Default for Block {
    fn default() -> Self {
        Self::EMPTY
    }
}
