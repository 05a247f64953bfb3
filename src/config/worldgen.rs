use serde::{Deserialize, Serialize};

/// Parameters driving procedural terrain generation. The same seed and
/// parameters always regenerate identical chunk content.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WorldGenConfig {
    pub seed: u32,
    /// Baseline surface level as a fraction of chunk height.
    pub offset: f64,
    /// Horizontal wavelength of the terrain noise, in blocks.
    pub scale: f64,
    /// Noise contribution to surface level, as a fraction of chunk height.
    pub magnitude: f64,
}

impl Default for WorldGenConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            offset: 0.4,
            scale: 30.0,
            magnitude: 0.2,
        }
    }
}
