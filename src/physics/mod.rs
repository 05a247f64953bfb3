pub mod actor;
pub mod world;

pub use actor::Actor;
pub use world::{PhysicsWorld, TIME_STEP};
