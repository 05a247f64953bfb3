use std::collections::HashMap;

use glam::{IVec3, Vec3};
use log::error;

use crate::config::WorldGenConfig;
use crate::world::block::{Block, BlockId};
use crate::world::blocks_data::{self, BLOCKS, DIRT, GRASS, RESOURCES};
use crate::world::chunk_coord::ChunkCoord;
use crate::world::instancing::{BlockInstance, InstanceList};
use crate::world::noise::NoiseSource;
use crate::world::overlay::EditOverlay;

/// The six axis neighbors used by visibility checks and refresh fan-out.
pub(crate) const NEIGHBOR_OFFSETS: [IVec3; 6] = [
    IVec3::X,
    IVec3::NEG_X,
    IVec3::Y,
    IVec3::NEG_Y,
    IVec3::Z,
    IVec3::NEG_Z,
];

/// Cell dimensions shared by every chunk in a world. `width` spans both
/// horizontal axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkSize {
    pub width: u32,
    pub height: u32,
}

impl ChunkSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn volume(&self) -> usize {
        (self.width * self.width * self.height) as usize
    }
}

/// One fixed-size cuboid region of the voxel grid: a dense block array plus
/// one packed render-instance list per non-empty block type.
///
/// A chunk is created unloaded, generated exactly once, and disposed when the
/// world evicts it. It must not be queried before `generate` completes; the
/// owning `World` guards this through the `loaded` flag.
pub struct Chunk {
    coord: ChunkCoord,
    size: ChunkSize,
    origin: IVec3,
    cells: Vec<Block>,
    instances: HashMap<BlockId, InstanceList>,
    loaded: bool,
}

impl Chunk {
    pub fn new(coord: ChunkCoord, size: ChunkSize) -> Self {
        Self {
            coord,
            size,
            origin: coord.origin(size.width),
            cells: vec![Block::EMPTY; size.volume()],
            instances: HashMap::new(),
            loaded: false,
        }
    }

    pub fn coord(&self) -> ChunkCoord {
        self.coord
    }

    pub fn size(&self) -> ChunkSize {
        self.size
    }

    pub fn origin(&self) -> IVec3 {
        self.origin
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Fills the chunk deterministically from the generation parameters:
    /// terrain columns, then noise-scattered resources, then replay of any
    /// recorded player edits, then the render-instance build. Only after all
    /// of that does the chunk report itself loaded.
    pub fn generate(&mut self, params: &WorldGenConfig, overlay: &EditOverlay) {
        let noise = NoiseSource::new(params.seed);
        self.reset();
        self.generate_terrain(&noise, params);
        self.generate_resources(&noise);
        self.apply_overlay(overlay);
        self.build_instances();
        self.loaded = true;
    }

    /// Releases the render-instance lists. Called by the world on eviction.
    pub fn dispose(&mut self) {
        self.instances.clear();
        self.loaded = false;
    }

    fn reset(&mut self) {
        self.cells.fill(Block::EMPTY);
        self.instances.clear();
        self.loaded = false;
    }

    fn generate_terrain(&mut self, noise: &NoiseSource, params: &WorldGenConfig) {
        let width = self.size.width as i32;
        let height = self.size.height as i32;

        for x in 0..width {
            for z in 0..width {
                let world_x = (self.origin.x + x) as f64;
                let world_z = (self.origin.z + z) as f64;
                let value = noise.sample_2d(world_x / params.scale, world_z / params.scale);
                let scaled = params.offset + value * params.magnitude;
                let surface = ((scaled * height as f64).floor() as i32).clamp(0, height - 1);

                for y in 0..height {
                    let p = IVec3::new(x, y, z);
                    if y == surface {
                        self.set_block_id(p, GRASS);
                    } else if y < surface && self.block_id(p).is_empty() {
                        self.set_block_id(p, DIRT);
                    }
                }
            }
        }
    }

    fn generate_resources(&mut self, noise: &NoiseSource) {
        let width = self.size.width as i32;
        let height = self.size.height as i32;

        for resource in RESOURCES {
            for x in 0..width {
                for y in 0..height {
                    for z in 0..width {
                        let p = IVec3::new(x, y, z);
                        // Resources only replace terrain fill, never the air
                        // above it.
                        if self.block_id(p).is_empty() {
                            continue;
                        }
                        let value = noise.sample_3d(
                            (self.origin.x + x) as f64 / resource.scale[0],
                            y as f64 / resource.scale[1],
                            (self.origin.z + z) as f64 / resource.scale[2],
                        );
                        if value > resource.threshold {
                            self.set_block_id(p, resource.id);
                        }
                    }
                }
            }
        }
    }

    fn apply_overlay(&mut self, overlay: &EditOverlay) {
        // Edits always win over generated content.
        for (local, id) in overlay.entries_for(self.coord) {
            self.set_block_id(local, id);
        }
    }

    fn build_instances(&mut self) {
        let mut lists: HashMap<BlockId, InstanceList> = BLOCKS
            .iter()
            .map(|def| (def.id, InstanceList::new(def.id)))
            .collect();

        let width = self.size.width as i32;
        let height = self.size.height as i32;
        for x in 0..width {
            for y in 0..height {
                for z in 0..width {
                    let p = IVec3::new(x, y, z);
                    let id = self.block_id(p);
                    if id.is_empty() || !self.is_block_visible(p) {
                        continue;
                    }
                    let Some(def) = blocks_data::definition(id) else {
                        error!("no catalog entry for block {id:?} at {p} in chunk {:?}", self.coord);
                        continue;
                    };
                    let position = self.cell_center(p);
                    let Some(list) = lists.get_mut(&id) else {
                        continue;
                    };
                    let index = list.push(BlockInstance {
                        position,
                        color: def.color,
                    });
                    self.set_instance_index(p, Some(index));
                }
            }
        }

        self.instances = lists;
    }

    /// A block is visible when at least one axis neighbor is empty. Neighbors
    /// outside this chunk's bounds count as empty: chunk edges are assumed
    /// exposed at generation time and corrected lazily by the world.
    pub fn is_block_visible(&self, p: IVec3) -> bool {
        if !self.in_bounds(p) {
            return false;
        }
        NEIGHBOR_OFFSETS
            .iter()
            .any(|offset| self.block_id(p + *offset).is_empty())
    }

    /// Places a block into an empty cell, instances it if visible, and records
    /// the edit. No-op when the cell is occupied or out of bounds.
    pub fn add_block(&mut self, p: IVec3, id: BlockId, overlay: &mut EditOverlay) {
        if id.is_empty() {
            return;
        }
        let Some(block) = self.block(p) else { return };
        if !block.is_empty() {
            return;
        }
        self.set_block_id(p, id);
        self.add_block_instance(p);
        overlay.set(self.coord, p, id);
    }

    /// Clears an occupied cell, retiring its render instance, and records the
    /// edit. No-op when the cell is already empty or out of bounds.
    pub fn remove_block(&mut self, p: IVec3, overlay: &mut EditOverlay) {
        let Some(block) = self.block(p) else { return };
        if block.is_empty() {
            return;
        }
        self.delete_block_instance(p);
        self.set_block_id(p, BlockId::EMPTY);
        overlay.set(self.coord, p, BlockId::EMPTY);
    }

    /// Instances the block at `p` if it exists, is non-empty, is not already
    /// instanced, and is visible. Safe to call speculatively.
    pub fn add_block_instance(&mut self, p: IVec3) {
        let Some(block) = self.block(p) else { return };
        if block.is_empty() || block.instance.is_some() || !self.is_block_visible(p) {
            return;
        }
        let Some(def) = blocks_data::definition(block.id) else {
            error!("no catalog entry for block {:?} at {p} in chunk {:?}", block.id, self.coord);
            return;
        };
        let position = self.cell_center(p);
        let Some(list) = self.instances.get_mut(&block.id) else {
            error!("no instance list for block {:?} in chunk {:?}", block.id, self.coord);
            return;
        };
        let index = list.push(BlockInstance {
            position,
            color: def.color,
        });
        self.set_instance_index(p, Some(index));
    }

    /// Retires the render instance of the block at `p`, swapping the last
    /// instance of that type into the freed slot and repointing its cell.
    /// Safe to call speculatively on uninstanced cells.
    pub fn delete_block_instance(&mut self, p: IVec3) {
        let Some(block) = self.block(p) else { return };
        let Some(index) = block.instance else { return };
        let origin = self.origin.as_vec3();

        let moved = match self.instances.get_mut(&block.id) {
            Some(list) => list.swap_remove(index),
            None => {
                error!("no instance list for block {:?} in chunk {:?}", block.id, self.coord);
                return;
            }
        };

        self.set_instance_index(p, None);
        if let Some(moved) = moved {
            let moved_local = (moved.position - origin).floor().as_ivec3();
            self.set_instance_index(moved_local, Some(index));
        }
    }

    pub fn block(&self, p: IVec3) -> Option<Block> {
        self.index(p).map(|i| self.cells[i])
    }

    /// Block id at `p`, with out-of-bounds coordinates reading as empty.
    pub fn block_id(&self, p: IVec3) -> BlockId {
        self.block(p).map_or(BlockId::EMPTY, |b| b.id)
    }

    pub fn set_block_id(&mut self, p: IVec3, id: BlockId) {
        if let Some(i) = self.index(p) {
            self.cells[i].id = id;
        }
    }

    pub fn set_instance_index(&mut self, p: IVec3, index: Option<u32>) {
        if let Some(i) = self.index(p) {
            self.cells[i].instance = index;
        }
    }

    pub fn in_bounds(&self, p: IVec3) -> bool {
        let w = self.size.width as i32;
        let h = self.size.height as i32;
        p.x >= 0 && p.x < w && p.y >= 0 && p.y < h && p.z >= 0 && p.z < w
    }

    pub fn instance_list(&self, id: BlockId) -> Option<&InstanceList> {
        self.instances.get(&id)
    }

    pub fn instance_lists(&self) -> impl Iterator<Item = &InstanceList> {
        self.instances.values()
    }

    /// World-space center of the unit cube occupied by cell `p`.
    fn cell_center(&self, p: IVec3) -> Vec3 {
        (self.origin + p).as_vec3() + Vec3::splat(0.5)
    }

    fn index(&self, p: IVec3) -> Option<usize> {
        if !self.in_bounds(p) {
            return None;
        }
        let w = self.size.width as usize;
        let h = self.size.height as usize;
        Some((p.x as usize * h + p.y as usize) * w + p.z as usize)
    }
}
