use std::collections::HashMap;

use glam::IVec3;
use serde::{Deserialize, Serialize};

use crate::world::block::BlockId;
use crate::world::chunk_coord::ChunkCoord;

/// Sparse record of player edits, keyed by owning chunk and chunk-local cell.
/// The overlay outlives chunk unload, so a chunk regenerated later replays
/// every edit made to it. Constructed explicitly and handed to the chunks
/// that need it; there is no process-wide store.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EditOverlay {
    edits: HashMap<(ChunkCoord, (i32, i32, i32)), BlockId>,
}

impl EditOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, chunk: ChunkCoord, local: IVec3, id: BlockId) {
        self.edits.insert((chunk, Self::key(local)), id);
    }

    pub fn get(&self, chunk: ChunkCoord, local: IVec3) -> Option<BlockId> {
        self.edits.get(&(chunk, Self::key(local))).copied()
    }

    pub fn contains(&self, chunk: ChunkCoord, local: IVec3) -> bool {
        self.edits.contains_key(&(chunk, Self::key(local)))
    }

    /// All edits recorded against one chunk, in arbitrary order.
    pub fn entries_for(
        &self,
        chunk: ChunkCoord,
    ) -> impl Iterator<Item = (IVec3, BlockId)> + '_ {
        self.edits.iter().filter_map(move |((owner, cell), id)| {
            (*owner == chunk).then(|| (IVec3::new(cell.0, cell.1, cell.2), *id))
        })
    }

    /// Drops every recorded edit. Used on a full world regeneration.
    pub fn clear(&mut self) {
        self.edits.clear();
    }

    pub fn len(&self) -> usize {
        self.edits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    fn key(local: IVec3) -> (i32, i32, i32) {
        (local.x, local.y, local.z)
    }
}
