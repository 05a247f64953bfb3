use glam::{IVec3, Vec3};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;

/// Grid coordinate of a chunk column. Chunks tile the two horizontal axes;
/// the vertical axis is covered by a single chunk of configured height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChunkCoord {
    pub x: i32,
    pub z: i32,
}

impl Serialize for ChunkCoord {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        (self.x, self.z).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ChunkCoord {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let (x, z) = <(i32, i32)>::deserialize(deserializer)?;
        Ok(ChunkCoord { x, z })
    }
}

impl PartialOrd for ChunkCoord {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ChunkCoord {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.x.cmp(&other.x) {
            Ordering::Equal => self.z.cmp(&other.z),
            ord => ord,
        }
    }
}

impl ChunkCoord {
    pub fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// Chunk owning the given integer world position.
    pub fn from_world(pos: IVec3, chunk_width: u32) -> Self {
        let w = chunk_width as i32;
        Self::new(pos.x.div_euclid(w), pos.z.div_euclid(w))
    }

    /// Chunk owning the given continuous world position.
    pub fn from_world_pos(pos: Vec3, chunk_width: u32) -> Self {
        let w = chunk_width as f32;
        Self::new(
            (pos.x / w).floor() as i32,
            (pos.z / w).floor() as i32,
        )
    }

    /// World-space origin of this chunk's cell (0, 0, 0).
    pub fn origin(&self, chunk_width: u32) -> IVec3 {
        let w = chunk_width as i32;
        IVec3::new(self.x * w, 0, self.z * w)
    }

    pub fn chebyshev_distance(&self, other: &Self) -> i32 {
        (self.x - other.x).abs().max((self.z - other.z).abs())
    }
}

/// Splits an integer world position into the owning chunk coordinate and the
/// chunk-local cell. The mapping is exact and invertible:
/// `chunk.origin(width) + local == pos`, with y passing through unchanged.
pub fn world_to_chunk(pos: IVec3, chunk_width: u32) -> (ChunkCoord, IVec3) {
    let w = chunk_width as i32;
    let coord = ChunkCoord::new(pos.x.div_euclid(w), pos.z.div_euclid(w));
    let local = IVec3::new(pos.x.rem_euclid(w), pos.y, pos.z.rem_euclid(w));
    (coord, local)
}
