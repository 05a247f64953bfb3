pub mod chunksys;
pub mod core;
pub mod physics;
pub mod worldgen;

pub use chunksys::ChunkSysConfig;
pub use self::core::EngineConfig;
pub use physics::PhysicsConfig;
pub use worldgen::WorldGenConfig;
