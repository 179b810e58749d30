//! Terrain builder: turns a height map into voxel placements and a preview.

use glam::{IVec3, UVec3};
use serde::Serialize;
use strata_materials::{Appearance, AppearanceTable, MaterialId};

use crate::error::TerrainError;
use crate::heightmap::{HeightMap, HeightMapGenerator, TerrainSize};
use crate::layers::resolve_material;
use crate::noise_field::{NoiseField, NoiseSource};
use crate::preview::PreviewImage;

/// A single voxel ready to hand to a renderer.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct VoxelPlacement {
    /// World position. The grid is centered on the origin in x and z.
    pub position: IVec3,
    /// Material from the layer rules.
    pub material: MaterialId,
    /// Resolved texture and color.
    pub appearance: Appearance,
}

impl VoxelPlacement {
    /// Place the voxel at grid coordinate `grid` of a grid whose half width is `half`.
    ///
    /// World position is `(x - half, y, z - half)`.
    pub fn new(
        grid: UVec3,
        half: u32,
        material: MaterialId,
        appearance: Appearance,
    ) -> Result<Self, TerrainError> {
        let err = || TerrainError::Placement { grid };
        let to_i32 = |v: u32| i32::try_from(v).map_err(|_| err());

        let half = to_i32(half)?;
        let x = to_i32(grid.x)?.checked_sub(half).ok_or_else(err)?;
        let y = to_i32(grid.y)?;
        let z = to_i32(grid.z)?.checked_sub(half).ok_or_else(err)?;

        Ok(Self {
            position: IVec3::new(x, y, z),
            material,
            appearance,
        })
    }
}

/// Counters collected while emitting placements.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BuildStats {
    /// Voxels emitted.
    pub placed: u64,
    /// Voxels dropped because their placement could not be built.
    pub skipped: u64,
    per_material: [u64; MaterialId::COUNT],
}

impl BuildStats {
    /// Number of emitted voxels with `material`.
    pub fn count(&self, material: MaterialId) -> u64 {
        self.per_material[material.index()]
    }

    fn record(&mut self, material: MaterialId) {
        self.placed += 1;
        self.per_material[material.index()] += 1;
    }
}

/// Output of a terrain build.
#[derive(Clone, Debug)]
pub struct Terrain {
    /// Voxels in column order: x, then z, then y ascending.
    pub placements: Vec<VoxelPlacement>,
    /// Grayscale preview, absent if it could not be derived.
    pub preview: Option<PreviewImage>,
    /// The height map the placements were built from.
    pub height_map: HeightMap,
    /// Emission counters.
    pub stats: BuildStats,
}

/// Builds terrain from a noise source and a shared appearance table.
pub struct TerrainBuilder<'a, N = NoiseField> {
    generator: HeightMapGenerator<N>,
    appearance: &'a AppearanceTable,
}

impl<'a, N: NoiseSource> TerrainBuilder<'a, N> {
    /// Create a builder sampling `noise` and resolving appearances from `appearance`.
    pub fn new(noise: N, appearance: &'a AppearanceTable) -> Self {
        Self {
            generator: HeightMapGenerator::new(noise),
            appearance,
        }
    }

    /// Generate a height map for `size` and build the terrain from it.
    ///
    /// Height map failures abort the build. Preview and per-voxel failures are
    /// logged and skipped.
    pub fn build(&self, size: TerrainSize) -> Result<Terrain, TerrainError> {
        let height_map = self.generator.generate(size).inspect_err(|e| {
            tracing::error!("Terrain build failed: {e}");
        })?;
        Ok(self.build_from_height_map(height_map))
    }

    /// Build terrain from an existing height map.
    pub fn build_from_height_map(&self, height_map: HeightMap) -> Terrain {
        let preview = match PreviewImage::from_height_map(&height_map) {
            Ok(preview) => Some(preview),
            Err(e) => {
                tracing::warn!("Skipping height map preview: {e}");
                None
            }
        };

        let size = height_map.size();
        let half = size / 2;
        tracing::info!("Building {size}x{size} terrain");

        let mut placements = Vec::with_capacity(height_map.total_voxels() as usize);
        let mut stats = BuildStats::default();

        for (x, z, height) in height_map.columns() {
            for y in 0..height {
                let material = resolve_material(y, height);
                let appearance = self.appearance.resolve(material).clone();
                match VoxelPlacement::new(UVec3::new(x, y, z), half, material, appearance) {
                    Ok(placement) => {
                        stats.record(material);
                        placements.push(placement);
                    }
                    Err(e) => {
                        tracing::warn!("Skipping voxel: {e}");
                        stats.skipped += 1;
                    }
                }
            }
        }

        tracing::info!(
            "Terrain complete: {} voxels ({} skipped), bedrock={} fill={} grass={} stone_cap={} snow={}",
            stats.placed,
            stats.skipped,
            stats.count(MaterialId::Bedrock),
            stats.count(MaterialId::Fill),
            stats.count(MaterialId::Grass),
            stats.count(MaterialId::StoneCap),
            stats.count(MaterialId::Snow),
        );

        Terrain {
            placements,
            preview,
            height_map,
            stats,
        }
    }
}

#[cfg(test)]
mod tests {
    use strata_materials::{Color, TextureHandle};

    use super::*;
    use crate::heightmap::MAX_LAYERS;
    use crate::noise_field::ConstantNoise;

    fn size(n: u32) -> TerrainSize {
        TerrainSize::new(n).unwrap()
    }

    #[test]
    fn test_flat_terrain_end_to_end() {
        let table = AppearanceTable::colors_only();
        let terrain = TerrainBuilder::new(ConstantNoise(0.0), &table)
            .build(size(32))
            .unwrap();

        assert!(terrain.height_map.cells().iter().all(|&h| h == 4));
        assert_eq!(terrain.placements.len(), 4096);
        assert_eq!(terrain.stats.placed, 4096);
        assert_eq!(terrain.stats.skipped, 0);
        assert_eq!(terrain.stats.count(MaterialId::Bedrock), 2048);
        assert_eq!(terrain.stats.count(MaterialId::Fill), 1024);
        assert_eq!(terrain.stats.count(MaterialId::Grass), 1024);
        assert_eq!(terrain.stats.count(MaterialId::StoneCap), 0);
        assert_eq!(terrain.stats.count(MaterialId::Snow), 0);

        let column: Vec<_> = terrain.placements[..4].iter().map(|p| p.material).collect();
        assert_eq!(
            column,
            [
                MaterialId::Bedrock,
                MaterialId::Bedrock,
                MaterialId::Fill,
                MaterialId::Grass
            ]
        );
    }

    #[test]
    fn test_voxel_count_equals_height_sum() {
        let table = AppearanceTable::colors_only();
        let terrain = TerrainBuilder::new(NoiseField::with_seed(11), &table)
            .build(size(64))
            .unwrap();
        assert_eq!(
            terrain.placements.len() as u64,
            terrain.height_map.total_voxels()
        );
        assert!(terrain.placements.len() as u64 <= 64 * 64 * u64::from(MAX_LAYERS));
    }

    #[test]
    fn test_terrain_is_centered_on_origin() {
        let table = AppearanceTable::colors_only();
        let terrain = TerrainBuilder::new(ConstantNoise(-1.0), &table)
            .build(size(64))
            .unwrap();

        // Every column is 2 voxels tall, so column (x, z) starts at (x * 64 + z) * 2.
        let first = &terrain.placements[0];
        assert_eq!(first.position, IVec3::new(-32, 0, -32));
        let last_column = &terrain.placements[(63 * 64 + 63) * 2];
        assert_eq!(last_column.position, IVec3::new(31, 0, 31));
    }

    #[test]
    fn test_odd_size_truncates_half() {
        let table = AppearanceTable::colors_only();
        let terrain = TerrainBuilder::new(ConstantNoise(-1.0), &table)
            .build(size(33))
            .unwrap();
        let xs: Vec<i32> = terrain.placements.iter().map(|p| p.position.x).collect();
        assert_eq!(xs.iter().min(), Some(&-16));
        assert_eq!(xs.iter().max(), Some(&16));
    }

    #[test]
    fn test_placements_use_injected_appearance() {
        let grass_texture = TextureHandle::new("grass.png", image::RgbaImage::new(2, 2));
        let table = AppearanceTable::from_fn(|m| match m {
            MaterialId::Grass => Appearance {
                texture: Some(grass_texture.clone()),
                color: Color::WHITE,
            },
            other => Appearance::fallback(other),
        });
        let terrain = TerrainBuilder::new(ConstantNoise(0.0), &table)
            .build(size(32))
            .unwrap();

        for p in &terrain.placements {
            assert_eq!(&p.appearance, table.resolve(p.material));
            if p.material == MaterialId::Grass {
                assert_eq!(p.appearance.texture.as_ref(), Some(&grass_texture));
            } else {
                assert!(p.appearance.texture.is_none());
            }
        }
    }

    #[test]
    fn test_preview_failure_does_not_stop_build() {
        let table = AppearanceTable::colors_only();
        let builder = TerrainBuilder::new(ConstantNoise(0.0), &table);
        let map = HeightMap::from_fn(32, |x, z| if (x, z) == (0, 0) { 9 } else { 3 });

        let terrain = builder.build_from_height_map(map);
        assert!(terrain.preview.is_none());
        assert_eq!(terrain.placements.len(), 9 + 3 * (32 * 32 - 1));
        assert_eq!(terrain.stats.count(MaterialId::Snow), 1);
    }

    #[test]
    fn test_preview_matches_height_map() {
        let table = AppearanceTable::colors_only();
        let terrain = TerrainBuilder::new(NoiseField::with_seed(5), &table)
            .build(size(40))
            .unwrap();
        let preview = terrain.preview.expect("preview should be present");
        for (x, z, h) in terrain.height_map.columns() {
            let expected = (f64::from(h) / 8.0 * 255.0).round() as u8;
            assert_eq!(preview.get(x, z), expected, "pixel ({x}, {z})");
        }
    }

    #[test]
    fn test_noise_failure_aborts_build() {
        let table = AppearanceTable::colors_only();
        let builder = TerrainBuilder::new(|_x: f64, _z: f64| f64::INFINITY, &table);
        assert!(matches!(
            builder.build(size(32)),
            Err(TerrainError::NoiseSample { x: 0, z: 0, .. })
        ));
    }

    #[test]
    fn test_placement_out_of_i32_range_is_error() {
        let grid = UVec3::new(u32::MAX, 0, 0);
        let appearance = Appearance::fallback(MaterialId::Fill);
        let result = VoxelPlacement::new(grid, 16, MaterialId::Fill, appearance);
        assert!(matches!(result, Err(TerrainError::Placement { .. })));
    }

    #[test]
    fn test_placement_serializes_texture_name() {
        let texture = TextureHandle::new("snow.png", image::RgbaImage::new(2, 2));
        let placement = VoxelPlacement::new(
            UVec3::new(1, 7, 2),
            1,
            MaterialId::Snow,
            Appearance {
                texture: Some(texture),
                color: Color::WHITE,
            },
        )
        .unwrap();
        let json = serde_json::to_value(&placement).unwrap();
        assert_eq!(json["position"], serde_json::json!([0, 7, 1]));
        assert_eq!(json["material"], "Snow");
        assert_eq!(json["appearance"]["texture"], "snow.png");
    }
}
