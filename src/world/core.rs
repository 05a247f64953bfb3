use std::collections::{HashMap, HashSet};

use glam::{IVec3, Vec3};
use log::{debug, info, trace};

use crate::config::{EngineConfig, WorldGenConfig};
use crate::world::block::{Block, BlockId};
use crate::world::chunk::{Chunk, ChunkSize, NEIGHBOR_OFFSETS};
use crate::world::chunk_coord::{world_to_chunk, ChunkCoord};
use crate::world::overlay::EditOverlay;
use crate::world::queue::GenQueue;

/// The streamed voxel world: a square window of loaded chunks around an
/// observer, the shared edit overlay, and the deferred-generation queue.
///
/// All block coordinates on this API are world-space integers; the world maps
/// them onto chunks internally. Queries into unloaded or pending chunks
/// resolve to `None` rather than forcing generation.
pub struct World {
    chunks: HashMap<ChunkCoord, Chunk>,
    size: ChunkSize,
    params: WorldGenConfig,
    draw_distance: u32,
    async_loading: bool,
    generation_budget: usize,
    overlay: EditOverlay,
    queue: GenQueue,
}

impl World {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            chunks: HashMap::new(),
            size: ChunkSize::new(config.chunksys.chunk_width, config.chunksys.chunk_height),
            params: config.worldgen,
            draw_distance: config.chunksys.draw_distance,
            async_loading: config.chunksys.async_loading,
            generation_budget: config.chunksys.max_generates_per_update,
            overlay: EditOverlay::new(),
            queue: GenQueue::new(),
        }
    }

    /// Streams the chunk window toward `observer`: evicts chunks that left
    /// the window, admits chunks that entered it, and, in deferred mode,
    /// spends this update's generation budget on pending chunks.
    pub fn update(&mut self, observer: Vec3) {
        let visible = self.visible_chunks(observer);
        let keep: HashSet<ChunkCoord> = visible.iter().copied().collect();

        let stale: Vec<ChunkCoord> = self
            .chunks
            .keys()
            .filter(|coord| !keep.contains(coord))
            .copied()
            .collect();
        for coord in stale {
            if let Some(mut chunk) = self.chunks.remove(&coord) {
                chunk.dispose();
                debug!("unloaded chunk {coord:?}");
            }
        }

        for coord in visible {
            if self.chunks.contains_key(&coord) {
                continue;
            }
            let mut chunk = Chunk::new(coord, self.size);
            if self.async_loading {
                if self.queue.submit(coord) {
                    trace!("queued chunk {coord:?} for generation");
                }
            } else {
                chunk.generate(&self.params, &self.overlay);
                debug!("generated chunk {coord:?}");
            }
            self.chunks.insert(coord, chunk);
        }

        if self.async_loading {
            self.process_pending();
        }
    }

    /// Generates up to the per-update budget of queued chunks. Jobs whose
    /// chunk was evicted or already generated are dropped without spending
    /// budget. Returns how many chunks were generated.
    pub fn process_pending(&mut self) -> usize {
        let mut generated = 0;
        while generated < self.generation_budget {
            let Some(coord) = self.queue.pop() else { break };
            match self.chunks.get_mut(&coord) {
                Some(chunk) if !chunk.is_loaded() => {
                    chunk.generate(&self.params, &self.overlay);
                    generated += 1;
                    debug!("generated queued chunk {coord:?}");
                }
                Some(_) => trace!("dropping queued job for loaded chunk {coord:?}"),
                None => trace!("dropping queued job for evicted chunk {coord:?}"),
            }
        }
        generated
    }

    /// The square Chebyshev window of chunk coordinates around `observer`.
    pub fn visible_chunks(&self, observer: Vec3) -> Vec<ChunkCoord> {
        let center = ChunkCoord::from_world_pos(observer, self.size.width);
        let d = self.draw_distance as i32;
        let mut coords = Vec::with_capacity(((2 * d + 1) * (2 * d + 1)) as usize);
        for x in (center.x - d)..=(center.x + d) {
            for z in (center.z - d)..=(center.z + d) {
                coords.push(ChunkCoord::new(x, z));
            }
        }
        coords
    }

    /// Block at an integer world position, or `None` when the position falls
    /// in a missing or not-yet-generated chunk or outside the vertical range.
    pub fn block(&self, pos: IVec3) -> Option<Block> {
        let (coord, local) = world_to_chunk(pos, self.size.width);
        let chunk = self.chunks.get(&coord)?;
        if !chunk.is_loaded() {
            return None;
        }
        chunk.block(local)
    }

    pub fn block_id(&self, pos: IVec3) -> BlockId {
        self.block(pos).map_or(BlockId::EMPTY, |b| b.id)
    }

    /// Places a block at a world position and repairs render instancing for
    /// the cell and its six neighbors, across chunk boundaries. No-op on
    /// unloaded chunks and occupied cells.
    pub fn add_block(&mut self, pos: IVec3, id: BlockId) {
        let (coord, local) = world_to_chunk(pos, self.size.width);
        let Some(chunk) = self.chunks.get_mut(&coord) else {
            return;
        };
        if !chunk.is_loaded() {
            return;
        }
        chunk.add_block(local, id, &mut self.overlay);
        self.refresh_around(pos);
    }

    /// Clears a block at a world position, exposing any neighbors that were
    /// buried behind it. No-op on unloaded chunks and empty cells.
    pub fn remove_block(&mut self, pos: IVec3) {
        let (coord, local) = world_to_chunk(pos, self.size.width);
        let Some(chunk) = self.chunks.get_mut(&coord) else {
            return;
        };
        if !chunk.is_loaded() {
            return;
        }
        chunk.remove_block(local, &mut self.overlay);
        self.refresh_around(pos);
    }

    fn refresh_around(&mut self, pos: IVec3) {
        self.refresh_visibility(pos);
        for offset in NEIGHBOR_OFFSETS {
            self.refresh_visibility(pos + offset);
        }
    }

    /// Reconciles one cell's render instance with its world-level exposure.
    /// Unlike the chunk-local rule, this sees across chunk boundaries.
    fn refresh_visibility(&mut self, pos: IVec3) {
        let Some(block) = self.block(pos) else { return };
        if block.is_empty() {
            return;
        }
        let exposed = self.is_block_exposed(pos);
        let (coord, local) = world_to_chunk(pos, self.size.width);
        let Some(chunk) = self.chunks.get_mut(&coord) else {
            return;
        };
        if exposed {
            chunk.add_block_instance(local);
        } else {
            chunk.delete_block_instance(local);
        }
    }

    /// World-level exposure: any axis neighbor that is empty, out of vertical
    /// range, or in a missing chunk leaves this cell exposed.
    fn is_block_exposed(&self, pos: IVec3) -> bool {
        NEIGHBOR_OFFSETS
            .iter()
            .any(|offset| self.block(pos + *offset).map_or(true, |b| b.is_empty()))
    }

    /// Regenerates every loaded chunk from the current parameters. Recorded
    /// edits survive and are replayed on top of the new terrain.
    pub fn regenerate(&mut self) {
        for chunk in self.chunks.values_mut() {
            chunk.generate(&self.params, &self.overlay);
        }
        info!("regenerated {} loaded chunks", self.chunks.len());
    }

    pub fn set_params(&mut self, params: WorldGenConfig) {
        self.params = params;
    }

    pub fn params(&self) -> &WorldGenConfig {
        &self.params
    }

    pub fn overlay(&self) -> &EditOverlay {
        &self.overlay
    }

    /// Forgets every recorded edit. Takes effect on the next regeneration.
    pub fn clear_overlay(&mut self) {
        self.overlay.clear();
    }

    pub fn chunk(&self, coord: ChunkCoord) -> Option<&Chunk> {
        self.chunks.get(&coord)
    }

    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    pub fn loaded_chunk_count(&self) -> usize {
        self.chunks.values().filter(|c| c.is_loaded()).count()
    }

    pub fn pending_generations(&self) -> usize {
        self.queue.len()
    }

    pub fn chunk_size(&self) -> ChunkSize {
        self.size
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ChunkSysConfig;
    use crate::world::blocks_data::WOOD;

    /// Flat terrain with the grass layer at cell height 4, one chunk of
    /// margin around the observer.
    fn test_config(async_loading: bool) -> EngineConfig {
        EngineConfig {
            worldgen: WorldGenConfig {
                seed: 0,
                offset: 0.25,
                scale: 30.0,
                magnitude: 0.0,
            },
            chunksys: ChunkSysConfig {
                chunk_width: 8,
                chunk_height: 16,
                draw_distance: 1,
                async_loading,
                max_generates_per_update: 2,
            },
            ..EngineConfig::default()
        }
    }

    fn loaded_world() -> World {
        let mut world = World::new(&test_config(false));
        world.update(Vec3::new(4.0, 5.0, 4.0));
        world
    }

    #[test]
    fn test_update_loads_visible_window() {
        let world = loaded_world();
        assert_eq!(world.chunk_count(), 9);
        assert_eq!(world.loaded_chunk_count(), 9);
        for coord in world.visible_chunks(Vec3::new(4.0, 5.0, 4.0)) {
            assert!(world.chunk(coord).is_some());
        }
    }

    #[test]
    fn test_update_evicts_chunks_leaving_window() {
        let mut world = loaded_world();
        world.update(Vec3::new(800.0, 5.0, 800.0));

        assert_eq!(world.chunk_count(), 9);
        assert!(world.chunk(ChunkCoord::new(0, 0)).is_none());
        assert!(world.chunk(ChunkCoord::new(100, 100)).is_some());
    }

    #[test]
    fn test_block_lookup_across_chunks() {
        let world = loaded_world();

        // Negative coordinates land in chunk (-1, -1).
        assert!(!world.block_id(IVec3::new(-1, 4, -1)).is_empty());
        assert!(world.block_id(IVec3::new(-1, 5, -1)).is_empty());
        // Outside the loaded window there is no data at all.
        assert_eq!(world.block(IVec3::new(200, 4, 200)), None);
    }

    #[test]
    fn test_remove_block_exposes_neighbor_below() {
        let mut world = loaded_world();
        let top = IVec3::new(1, 4, 1);
        let below = IVec3::new(1, 3, 1);
        assert_eq!(world.block(below).unwrap().instance, None);

        world.remove_block(top);
        assert!(world.block_id(top).is_empty());
        assert!(world.block(below).unwrap().instance.is_some());
    }

    #[test]
    fn test_add_block_buries_neighbor_across_chunk_boundary() {
        let mut world = loaded_world();
        // (7, 2, 3) sits on the +x edge of chunk (0, 0). Generation assumed
        // its boundary face exposed, so it starts instanced despite being
        // enclosed at world level.
        let edge = IVec3::new(7, 2, 3);
        let across = IVec3::new(8, 2, 3);
        assert!(world.block(edge).unwrap().instance.is_some());

        world.remove_block(across);
        assert!(world.block(edge).unwrap().instance.is_some());

        world.add_block(across, WOOD);
        assert_eq!(world.block(edge).unwrap().instance, None);
    }

    #[test]
    fn test_edit_in_unloaded_chunk_is_noop() {
        let mut world = loaded_world();
        let outside = IVec3::new(200, 4, 200);
        world.remove_block(outside);
        world.add_block(outside, WOOD);
        assert!(world.overlay().is_empty());
    }

    #[test]
    fn test_deferred_generation_respects_budget() {
        let mut world = World::new(&test_config(true));
        let observer = Vec3::new(4.0, 5.0, 4.0);

        world.update(observer);
        assert_eq!(world.chunk_count(), 9);
        assert_eq!(world.loaded_chunk_count(), 2);
        assert_eq!(world.pending_generations(), 7);

        // Pending chunks answer no queries yet.
        let pending = world
            .visible_chunks(observer)
            .into_iter()
            .find(|c| !world.chunk(*c).unwrap().is_loaded())
            .unwrap();
        let origin = pending.origin(8);
        assert_eq!(world.block(origin + IVec3::new(0, 4, 0)), None);

        for _ in 0..4 {
            world.update(observer);
        }
        assert_eq!(world.loaded_chunk_count(), 9);
        assert_eq!(world.pending_generations(), 0);
    }

    #[test]
    fn test_stale_jobs_discarded_without_budget() {
        let mut world = World::new(&test_config(true));
        world.update(Vec3::new(4.0, 5.0, 4.0));
        assert_eq!(world.pending_generations(), 7);

        // Move far away: the pending chunks are evicted, their jobs go stale.
        world.update(Vec3::new(800.0, 5.0, 800.0));

        assert!(world.chunk(ChunkCoord::new(0, 0)).is_none());
        // Stale jobs were skipped for free, so the full budget still went to
        // the new window.
        assert_eq!(world.loaded_chunk_count(), 2);
        assert_eq!(world.pending_generations(), 7);
    }

    #[test]
    fn test_regenerate_replays_edits() {
        let mut world = loaded_world();
        let removed = IVec3::new(2, 4, 2);
        let placed = IVec3::new(2, 9, 2);

        world.remove_block(removed);
        world.add_block(placed, WOOD);
        world.regenerate();

        assert!(world.block_id(removed).is_empty());
        assert_eq!(world.block_id(placed), WOOD);
    }

    #[test]
    fn test_clear_overlay_restores_terrain_on_regenerate() {
        let mut world = loaded_world();
        let removed = IVec3::new(2, 4, 2);
        world.remove_block(removed);

        world.clear_overlay();
        world.regenerate();
        assert!(!world.block_id(removed).is_empty());
    }

    #[test]
    fn test_set_params_changes_terrain_after_regenerate() {
        let mut world = loaded_world();
        let mut params = *world.params();
        params.offset = 0.5;
        world.set_params(params);
        world.regenerate();

        // Surface moved from cell 4 up to cell 8.
        assert!(!world.block_id(IVec3::new(1, 8, 1)).is_empty());
        assert!(world.block_id(IVec3::new(1, 9, 1)).is_empty());
    }
}
