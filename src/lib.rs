pub mod config;
pub mod physics;
pub mod utils;
pub mod world;

// Re-export commonly used types
pub use config::EngineConfig;
pub use physics::{Actor, PhysicsWorld, TIME_STEP};
pub use utils::ConfigError;
pub use world::{Block, BlockId, Chunk, ChunkCoord, EditOverlay, World};
