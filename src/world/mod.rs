pub mod block;
pub mod blocks_data;
pub mod chunk;
pub mod chunk_coord;
pub mod core;
pub mod instancing;
pub mod noise;
pub mod overlay;
pub mod queue;

pub use block::{Block, BlockId};
pub use chunk::{Chunk, ChunkSize};
pub use chunk_coord::{world_to_chunk, ChunkCoord};
pub use self::core::World;
pub use instancing::{BlockInstance, InstanceList};
pub use overlay::EditOverlay;
