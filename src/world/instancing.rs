use glam::Vec3;
use log::error;

use crate::world::block::BlockId;

/// One renderable occurrence of a visible block. `position` is the center of
/// the block's unit cube in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockInstance {
    pub position: Vec3,
    pub color: [f32; 3],
}

/// Packed per-block-type list of render instances. A renderer consumes
/// `instances()` read-only once per frame; the owning chunk keeps each cell's
/// `instance` index in sync with this list.
#[derive(Debug, Clone)]
pub struct InstanceList {
    block: BlockId,
    instances: Vec<BlockInstance>,
}

impl InstanceList {
    pub fn new(block: BlockId) -> Self {
        Self {
            block,
            instances: Vec::new(),
        }
    }

    pub fn block(&self) -> BlockId {
        self.block
    }

    pub fn count(&self) -> u32 {
        self.instances.len() as u32
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    pub fn get(&self, index: u32) -> Option<&BlockInstance> {
        self.instances.get(index as usize)
    }

    pub fn instances(&self) -> &[BlockInstance] {
        &self.instances
    }

    /// Appends an instance and returns its index.
    pub fn push(&mut self, instance: BlockInstance) -> u32 {
        self.instances.push(instance);
        (self.instances.len() - 1) as u32
    }

    /// Removes the instance at `index` by swapping the last instance into its
    /// slot. Returns the relocated instance, if one moved; the caller must
    /// repoint that instance's cell at `index`.
    pub fn swap_remove(&mut self, index: u32) -> Option<BlockInstance> {
        let i = index as usize;
        if i >= self.instances.len() {
            error!(
                "instance index {index} out of range for block {:?} (count {})",
                self.block,
                self.instances.len()
            );
            return None;
        }
        self.instances.swap_remove(i);
        self.instances.get(i).copied()
    }

    pub fn clear(&mut self) {
        self.instances.clear();
    }
}
