//! Layer rules: which material a voxel gets from its position in the column.

use strata_materials::MaterialId;

use crate::heightmap::MAX_LAYERS;

/// Layers below this index are always bedrock.
const BEDROCK_LAYERS: u32 = 2;

/// Resolve the material of layer `layer` in a column `column_height` voxels tall.
///
/// Rules apply in order: the two base layers are bedrock, the topmost layer is
/// a cap chosen by elevation, everything in between is fill. The base rule wins
/// over the cap rule, so a column of height 2 is entirely bedrock.
pub fn resolve_material(layer: u32, column_height: u32) -> MaterialId {
    if layer < BEDROCK_LAYERS {
        return MaterialId::Bedrock;
    }
    if layer + 1 == column_height {
        let ratio = f64::from(column_height - BEDROCK_LAYERS) / f64::from(MAX_LAYERS);
        return if ratio > 0.8 {
            MaterialId::Snow
        } else if ratio > 0.6 {
            MaterialId::StoneCap
        } else {
            MaterialId::Grass
        };
    }
    MaterialId::Fill
}
