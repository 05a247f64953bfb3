// blocks_data.rs - static block catalog and resource table

use crate::world::block::BlockId;

/// How a block's surfaces are textured: one texture everywhere, or distinct
/// top/bottom/side textures (grass-style).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockAppearance {
    Uniform(&'static str),
    SixFace {
        top: &'static str,
        bottom: &'static str,
        side: &'static str,
    },
}

#[derive(Debug, Clone, Copy)]
pub struct BlockDefinition {
    pub id: BlockId,
    pub name: &'static str,
    pub color: [f32; 3],
    pub appearance: BlockAppearance,
}

/// A block type scattered through already-solid terrain by 3D noise.
/// `scale` stretches the noise field per axis; a sample above `threshold`
/// turns the cell into this resource.
#[derive(Debug, Clone, Copy)]
pub struct ResourceDefinition {
    pub id: BlockId,
    pub scale: [f64; 3],
    pub threshold: f64,
}

pub const DIRT: BlockId = BlockId(1);
pub const STONE: BlockId = BlockId(2);
pub const GRASS: BlockId = BlockId(3);
pub const WATER: BlockId = BlockId(4);
pub const SAND: BlockId = BlockId(5);
pub const WOOD: BlockId = BlockId(6);
pub const COAL_ORE: BlockId = BlockId(7);
pub const IRON_ORE: BlockId = BlockId(8);

/// Every non-empty catalog entry. The empty sentinel (id 0) is deliberately
/// absent: it has no color, no appearance and never gets an instance list.
pub const BLOCKS: &[BlockDefinition] = &[
    BlockDefinition {
        id: DIRT,
        name: "dirt",
        color: [0.545, 0.271, 0.075],
        appearance: BlockAppearance::Uniform("dirt.png"),
    },
    BlockDefinition {
        id: STONE,
        name: "stone",
        color: [0.5, 0.5, 0.5],
        appearance: BlockAppearance::Uniform("stone.png"),
    },
    BlockDefinition {
        id: GRASS,
        name: "grass",
        color: [0.07, 0.388, 0.102],
        appearance: BlockAppearance::SixFace {
            top: "grass.png",
            bottom: "dirt.png",
            side: "grass_side.png",
        },
    },
    BlockDefinition {
        id: WATER,
        name: "water",
        color: [0.0, 0.0, 1.0],
        appearance: BlockAppearance::Uniform("water.png"),
    },
    BlockDefinition {
        id: SAND,
        name: "sand",
        color: [1.0, 1.0, 0.0],
        appearance: BlockAppearance::Uniform("sand.png"),
    },
    BlockDefinition {
        id: WOOD,
        name: "wood",
        color: [0.545, 0.271, 0.075],
        appearance: BlockAppearance::SixFace {
            top: "wood_top.png",
            bottom: "wood_top.png",
            side: "wood.png",
        },
    },
    BlockDefinition {
        id: COAL_ORE,
        name: "coal_ore",
        color: [0.2, 0.2, 0.2],
        appearance: BlockAppearance::Uniform("coal_ore.png"),
    },
    BlockDefinition {
        id: IRON_ORE,
        name: "iron_ore",
        color: [0.75, 0.68, 0.6],
        appearance: BlockAppearance::Uniform("iron_ore.png"),
    },
];

/// Resource pass table, applied in order after terrain fill.
pub const RESOURCES: &[ResourceDefinition] = &[
    ResourceDefinition {
        id: STONE,
        scale: [30.0, 30.0, 30.0],
        threshold: 0.5,
    },
    ResourceDefinition {
        id: COAL_ORE,
        scale: [20.0, 20.0, 20.0],
        threshold: 0.8,
    },
    ResourceDefinition {
        id: IRON_ORE,
        scale: [40.0, 40.0, 40.0],
        threshold: 0.9,
    },
];

pub fn definition(id: BlockId) -> Option<&'static BlockDefinition> {
    BLOCKS.iter().find(|def| def.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_ids_unique() {
        for (i, a) in BLOCKS.iter().enumerate() {
            for b in &BLOCKS[i + 1..] {
                assert_ne!(a.id, b.id, "{} and {} share an id", a.name, b.name);
            }
        }
    }

    #[test]
    fn test_empty_sentinel_not_in_catalog() {
        assert!(definition(BlockId::EMPTY).is_none());
    }

    #[test]
    fn test_resources_reference_catalog_entries() {
        for resource in RESOURCES {
            assert!(definition(resource.id).is_some());
        }
    }
}
