use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkSysConfig {
    /// Horizontal extent of a chunk on both the x and z axes.
    pub chunk_width: u32,
    pub chunk_height: u32,
    /// Streaming radius around the observer, in chunks (Chebyshev).
    pub draw_distance: u32,
    /// Defer chunk generation to a queue drained each frame instead of
    /// generating newly visible chunks inline.
    pub async_loading: bool,
    /// How many queued chunks may generate per `World::update` call.
    pub max_generates_per_update: usize,
}

impl Default for ChunkSysConfig {
    fn default() -> Self {
        Self {
            chunk_width: 16,
            chunk_height: 32,
            draw_distance: 3,
            async_loading: false,
            max_generates_per_update: 4,
        }
    }
}
